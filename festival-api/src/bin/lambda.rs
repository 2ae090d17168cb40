//! Festival Lambda - Serves the festival API behind API Gateway.

use std::sync::Arc;

use festival_core::{loader, Config};
use lambda_http::{run, service_fn, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let loader = Arc::new(loader::from_config(&config));

    run(service_fn(move |event| {
        let loader = Arc::clone(&loader);
        async move { festival_core::handle(&*loader, &event) }
    }))
    .await
}
