use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::{locale_redirect_middleware, session_context_middleware};
use crate::state::AppState;

/// The full application router, as served by the binary
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Admin API (guard runs inside each handler)
        .merge(admin_routes())
        // Learner pages
        .merge(page_routes(&state))
        .fallback(handlers::public::fallback)
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer(&config))
                .layer(cors_layer(&config)),
        )
        .with_state(state)
}

fn admin_routes() -> Router<AppState> {
    use handlers::elevated::payments;

    Router::new()
        .route("/api/admin/payments/invoice/:id", get(payments::invoice_get))
        .route("/api/admin/payments/revenue-chart", get(payments::revenue_chart_get))
        .route("/api/admin/payments/transaction", get(payments::transaction_get))
}

fn page_routes(state: &AppState) -> Router<AppState> {
    use handlers::pages;

    Router::new()
        .route("/:locale/layout", get(pages::layout_get))
        .route("/:locale/lessons", get(pages::lessons_get))
        .route("/:locale/lessons/:id", get(pages::lesson_get))
        .route("/:locale/unit-tests/:id", get(pages::unit_test_get))
        .route("/:locale/subscription", get(pages::subscription_get))
        .route("/:locale/premium/lessons/:id", get(pages::premium_lesson_get))
        // Layers run bottom-up: locale check first, then session lookup
        .route_layer(middleware::from_fn_with_state(state.clone(), session_context_middleware))
        .route_layer(middleware::from_fn_with_state(state.clone(), locale_redirect_middleware))
}

fn trace_layer(config: &AppConfig) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    let level = if config.server.enable_request_logging {
        Level::INFO
    } else {
        Level::DEBUG
    };

    TraceLayer::new_for_http()
        .on_request(DefaultOnRequest::new().level(level))
        .on_response(DefaultOnResponse::new().level(level))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
