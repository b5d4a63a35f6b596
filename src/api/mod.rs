//! HTTP API module for the payroll engine.
//!
//! This module exposes the payroll processor over a single REST endpoint,
//! `POST /payroll-runs`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ProcessPayrollRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
