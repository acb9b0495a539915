use axum::body::Bytes;
use axum::extract::{Extension, Json};
use axum::http::Method;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::api::{DynAPI, QuoteAPI};
use crate::entities::{PickupTime, QuoteRequest};
use crate::error::{method_not_allowed_error, Error};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParams {
    origin_place_id: Option<String>,
    destination_place_id: Option<String>,
    selected_vehicle_type: Option<String>,
    is_airport_pickup: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pickup_timestamp: Option<PickupTime>,
    is_asap: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    quote: f64,
}

impl From<CreateParams> for QuoteRequest {
    fn from(params: CreateParams) -> Self {
        QuoteRequest {
            origin_id: params.origin_place_id,
            destination_id: params.destination_place_id,
            vehicle_type: params.selected_vehicle_type,
            is_airport_pickup: params.is_airport_pickup.unwrap_or(false),
            pickup_time: params.pickup_timestamp,
            is_asap: params.is_asap.unwrap_or(false),
        }
    }
}

// An unset datetime input arrives as "".
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<PickupTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(value) => PickupTime::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

pub async fn create(
    method: Method,
    Extension(api): Extension<DynAPI>,
    body: Bytes,
) -> Result<Json<CreateResponse>, Error> {
    if method != Method::POST {
        return Err(method_not_allowed_error());
    }

    let params: CreateParams = serde_json::from_slice(&body)?;

    match api.compute_quote(params.into()).await {
        Ok(quote) => Ok(CreateResponse {
            quote: quote.amount,
        }
        .into()),
        Err(err) => {
            if err.status().is_server_error() {
                tracing::error!(code = err.code, message = %err.message, "quote failed");
            } else {
                tracing::warn!(code = err.code, message = %err.message, "quote rejected");
            }

            Err(err)
        }
    }
}
