use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{Quote, QuoteRequest};
use crate::error::Error;

#[async_trait]
pub trait QuoteAPI {
    async fn compute_quote(&self, request: QuoteRequest) -> Result<Quote, Error>;
}

pub trait API: QuoteAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
