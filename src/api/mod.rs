//! HTTP adapter around the dispatcher.
//!
//! Transports (a chat-platform webhook relay, a test harness, ...) post one
//! inbound message per request and get the bot's reply back in the response.

mod handlers;
pub mod middleware;

pub use handlers::OutboundReply;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use self::middleware::{auth_middleware, SecurityConfig};

pub fn create_router(ctx: &AppContext) -> Router {
    let security = SecurityConfig::from_config(ctx.config());
    create_router_with_security(ctx, security)
}

pub fn create_router_with_security(ctx: &AppContext, security: SecurityConfig) -> Router {
    let protected = Router::new()
        .route("/messages", post(handlers::post_message))
        .layer(from_fn_with_state(security, auth_middleware));

    let api = Router::new()
        .merge(protected)
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(ctx.dispatcher())
}
