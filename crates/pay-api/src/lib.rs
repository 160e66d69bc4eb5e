//! # pay-api
//!
//! HTTP API layer for the runetic-pay orchestration service.
//!
//! Exposes the payment workflow over REST (Axum) behind the
//! `PaymentGateway` trait seam, so handlers stay processor-agnostic.

pub mod handlers;
pub mod routes;
pub mod state;
