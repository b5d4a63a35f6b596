//! Payroll run model.
//!
//! A [`PayrollRun`] is one execution of the engine for a tenant, pay schedule
//! and period. It owns the payslips produced in the same transaction.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Payslip;
use crate::calculation::round_to_cents;

/// Lifecycle status of a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Created; payslips are being computed inside the open transaction.
    Processing,
    /// All payslips persisted and aggregates final.
    Completed,
}

/// Aggregate figures of a payroll run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Sum of all payslips' gross pay.
    pub gross: Decimal,
    /// Sum of all payslips' non-statutory deductions.
    pub deductions: Decimal,
    /// Sum of all payslips' statutory contributions and income tax.
    pub taxes: Decimal,
    /// Sum of all payslips' net pay.
    pub net: Decimal,
    /// Number of payslips in the run.
    pub employee_count: u32,
}

impl RunTotals {
    /// Sums payslip figures into run aggregates, each rounded to cents.
    ///
    /// Net is derived from the rounded aggregates so the run satisfies the
    /// same identity as its payslips.
    pub fn from_payslips(payslips: &[Payslip]) -> Self {
        let gross = round_to_cents(payslips.iter().map(|p| p.gross_pay).sum());
        let deductions = round_to_cents(payslips.iter().map(|p| p.deductions).sum());
        let taxes = round_to_cents(payslips.iter().map(|p| p.taxes).sum());

        Self {
            gross,
            deductions,
            taxes,
            net: round_to_cents(gross - deductions - taxes),
            employee_count: payslips.len() as u32,
        }
    }
}

/// One execution of the engine for a (tenant, pay schedule, period end).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: Uuid,
    /// The tenant being paid.
    pub tenant_id: Uuid,
    /// The pay schedule the run belongs to.
    pub pay_schedule_id: Uuid,
    /// First day of the period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// The date employees are paid.
    pub payment_date: NaiveDate,
    /// Lifecycle status.
    pub status: RunStatus,
    /// Aggregate figures.
    pub totals: RunTotals,
    /// The user who started the run, if known.
    pub initiated_by: Option<Uuid>,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
    /// When the run completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl PayrollRun {
    /// Creates a run in the [`RunStatus::Processing`] state with zero totals.
    pub fn start(
        tenant_id: Uuid,
        pay_schedule_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
        payment_date: NaiveDate,
        initiated_by: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            pay_schedule_id,
            period_start,
            period_end,
            payment_date,
            status: RunStatus::Processing,
            totals: RunTotals::default(),
            initiated_by,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Marks the run completed with the given aggregates.
    pub fn complete(self, totals: RunTotals) -> Self {
        Self {
            status: RunStatus::Completed,
            totals,
            completed_at: Some(Utc::now()),
            ..self
        }
    }

    /// Returns true if the run covers the same tenant, schedule and period end.
    pub fn conflicts_with(&self, other: &PayrollRun) -> bool {
        self.id != other.id
            && self.tenant_id == other.tenant_id
            && self.pay_schedule_id == other.pay_schedule_id
            && self.period_end == other.period_end
    }
}
