//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Payments:
///   - POST /api/v1/payments - Create a payment (PSE / CARD / NEQUI)
///   - GET  /api/v1/payments/{transaction_id} - Transaction status lookup
///   - POST /api/v1/payments/signature - Widget signature utility
///   - POST /api/v1/payments/tokenize - Card tokenization proxy
///   - GET  /api/v1/payments/banks - PSE financial institutions
///
/// - Webhooks:
///   - POST /webhook/wompi - Wompi event receiver (always 200)
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for now
    let cors = CorsLayer::new()
        .allow_origin(Any) // TODO: In production, restrict to the storefront origin
        .allow_methods(Any)
        .allow_headers(Any);

    let payment_routes = Router::new()
        .route("/payments", post(handlers::create_payment))
        .route("/payments/signature", post(handlers::widget_signature))
        .route("/payments/tokenize", post(handlers::tokenize_card))
        .route("/payments/banks", get(handlers::list_banks))
        .route("/payments/{transaction_id}", get(handlers::get_payment));

    // Webhook routes (no CORS, must accept raw body)
    let webhook_routes = Router::new().route("/wompi", post(handlers::wompi_webhook));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", payment_routes)
        // Webhooks
        .nest("/webhook", webhook_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
