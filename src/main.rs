use std::process;

use concierge::config::Config;
use concierge::engine::Engine;
use concierge::external::GoogleMaps;
use concierge::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let (engine, addr) = match Config::from_env().and_then(|config| {
        let rates = config.rate_table()?;
        let routes = GoogleMaps::new(&config.maps_api_base)?;

        Ok((Engine::new(routes, rates, config.timezone), config.listen_addr))
    }) {
        Ok(setup) => setup,
        Err(err) => {
            tracing::error!(code = err.code, message = %err.message, "invalid configuration");
            process::exit(1);
        }
    };

    serve(engine, addr).await;
}
