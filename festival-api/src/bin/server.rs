//! Standalone festival server - Serves the festival API on `PORT` (default 5000).

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body as AxumBody;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Router;
use festival_core::{loader, Config, DatasetLoader};
use lambda_http::Body;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

type SharedLoader = Arc<dyn DatasetLoader>;

/// Forward the request to the shared router, discarding any request body.
async fn dispatch(State(loader): State<SharedLoader>, request: Request) -> Response {
    let (parts, _) = request.into_parts();
    let event = lambda_http::Request::from_parts(parts, Body::Empty);

    match festival_core::handle(loader.as_ref(), &event) {
        Ok(response) => response.map(|body| AxumBody::from(body.to_vec())),
        Err(e) => {
            error!("Failed to build response: {}", e);
            let mut response = (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "application/json")],
                r#"{"error": "Internal server error"}"#,
            )
                .into_response();
            add_cors(&mut response);
            response
        }
    }
}

/// Mirror the shared CORS headers onto a response built outside the router.
fn add_cors(response: &mut Response) {
    let cors = festival_core::with_cors(lambda_http::Response::new(Body::Empty));
    response.headers_mut().extend(cors.into_parts().0.headers);
}

fn build_router(loader: SharedLoader) -> Router {
    Router::new().fallback(dispatch).with_state(loader)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    let loader: SharedLoader = Arc::from(loader::from_config(&config));
    let app = build_router(loader);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting festival API at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
