//! Payroll calculation engine
//!
//! This crate turns a tenant's roster of active employees and their assigned
//! salary components into a persisted, auditable payroll run. It provides the
//! pay-period resolver, a progressive income-tax function with capped social
//! contributions, and a multi-pass payslip pipeline whose results are
//! committed atomically through a transactional store.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod processor;
pub mod store;

pub use error::{EngineError, EngineResult};
pub use processor::{PERIOD_FALLBACK, PayrollProcessor, ProcessedPayroll};
