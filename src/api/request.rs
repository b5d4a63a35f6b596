//! Request types for the payroll API.
//!
//! This module defines the JSON request structure for the `/payroll-runs` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for the `/payroll-runs` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessPayrollRequest {
    /// The tenant to run payroll for.
    pub tenant_id: Uuid,
    /// The pay schedule whose period is being processed.
    pub pay_schedule_id: Uuid,
    /// The last day of the period.
    pub period_end: NaiveDate,
    /// The date employees are paid.
    pub payment_date: NaiveDate,
    /// The user who started the run.
    #[serde(default)]
    pub initiated_by: Option<Uuid>,
}
