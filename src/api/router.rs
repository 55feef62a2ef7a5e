//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Routes are nested under `/api/`; account endpoints and the
//! health probe are open, everything else sits behind the credential
//! middleware. CORS is restricted to the configured frontend origin.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer). Endpoint handlers use `State<ApiContext>` (provided via
/// `with_state`).
pub fn api_router(ctx: ApiContext) -> Router {
    // Protected routes — require a valid session credential.
    //
    // Layers are applied from bottom (innermost) to top (outermost):
    //   Extension (outermost) → Auth → Handler
    //
    // Extension must be outermost so the middleware can access ApiContext.
    let protected = Router::new()
        .route("/symptoms", get(endpoints::symptoms::catalog))
        .route("/diagnose", post(endpoints::diagnose::resolve))
        .route(
            "/history",
            post(endpoints::history::record).get(endpoints::history::list),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        .layer(axum::Extension(ctx.clone()));

    // Unprotected routes: account creation/login and liveness.
    let unprotected = Router::new()
        .route("/auth/register", post(endpoints::auth::register))
        .route("/auth/login", post(endpoints::auth::login))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx.clone());

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
        .layer(cors_layer(&ctx))
}

fn cors_layer(ctx: &ApiContext) -> CorsLayer {
    let origin = ctx
        .config
        .frontend_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:5173"));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
