//! # Runetic Pay
//!
//! Server-side payment orchestration for the Wompi processor.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export WOMPI_PUBLIC_KEY=pub_test_...
//! export WOMPI_PRIVATE_KEY=prv_test_...
//! export WOMPI_INTEGRITY_SECRET=...
//!
//! # Run the server
//! runetic-pay
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state (fails fast on missing credentials)
    let state = AppState::from_env()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 Runetic Pay starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("💳 Payments: POST http://{}/api/v1/payments", addr);
        info!("🔔 Webhook: POST http://{}/webhook/wompi", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  ⚡ Runetic Pay ⚡
  ━━━━━━━━━━━━━━━━━
  Payment orchestration service
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
