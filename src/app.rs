use crate::{app::error::ApiError, roster::AppState};
use axum::{
    extract::ConnectInfo,
    http::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::net::SocketAddr;
use tracing::info;

pub mod error;
pub mod users;

pub fn router() -> Router<AppState> {
    users::router()
        .fallback(|| async { ApiError::NoRoute })
        .layer(middleware::from_fn(log_request))
}

async fn log_request<B>(req: Request<B>, next: Next<B>) -> Response {
    let client = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = req.method().clone();
    let uri = req.uri().clone();
    let res = next.run(req).await;
    info!("{client} : {method} {uri} -> {}", res.status());
    res
}
