//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while processing a payroll run.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the payroll engine.
///
/// Every failure aborts the whole run; the processor hands the error back to
/// the caller unchanged so the HTTP layer (or any other caller) can translate
/// it into a user-facing response.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/statutory.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/statutory.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates a statutory invariant.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the violated invariant.
        message: String,
    },

    /// The tenant does not exist.
    #[error("Tenant not found: {tenant_id}")]
    TenantNotFound {
        /// The tenant that was requested.
        tenant_id: Uuid,
    },

    /// The pay schedule does not exist or belongs to another tenant.
    #[error("Pay schedule {pay_schedule_id} not found for tenant {tenant_id}")]
    PayScheduleNotFound {
        /// The pay schedule that was requested.
        pay_schedule_id: Uuid,
        /// The tenant the schedule was expected to belong to.
        tenant_id: Uuid,
    },

    /// A salary component required for the calculation is not assigned.
    #[error("Employee {employee_id} is missing required component '{component}'")]
    MissingComponent {
        /// The employee being processed.
        employee_id: Uuid,
        /// The system code of the missing component.
        component: String,
    },

    /// A salary component or setting is inconsistent with its calculation mode.
    #[error("Malformed salary component '{component}': {message}")]
    MalformedComponent {
        /// The code (or name, when no code is set) of the component.
        component: String,
        /// A description of what is wrong with it.
        message: String,
    },

    /// A run already exists for the same tenant, pay schedule and period end.
    #[error(
        "Payroll run already exists for tenant {tenant_id}, pay schedule {pay_schedule_id}, period ending {period_end}"
    )]
    DuplicatePayrollRun {
        /// The tenant of the conflicting run.
        tenant_id: Uuid,
        /// The pay schedule of the conflicting run.
        pay_schedule_id: Uuid,
        /// The period end of the conflicting run.
        period_end: NaiveDate,
    },

    /// The store failed to read or write.
    #[error("Persistence error: {message}")]
    Persistence {
        /// A description of the storage failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
