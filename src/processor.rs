//! The payroll run processor.
//!
//! [`PayrollProcessor::process_payroll`] checks the tenant and pay schedule,
//! then, inside one store transaction, opens the run, calculates a payslip per
//! eligible employee, stores the payslips and completes the run with its
//! aggregates. Any failure rolls the whole run back.

use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_payslip, is_fallback_frequency, resolve_period_start};
use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditWarning, PaySchedule, PayrollRun, Payslip, RunTotals};
use crate::store::{PayrollStore, PayrollTransaction};

/// Warning code attached to payslips whose period was resolved by the monthly fallback.
pub const PERIOD_FALLBACK: &str = "PERIOD_FALLBACK";

/// A completed, persisted run with its payslips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedPayroll {
    /// The completed run.
    pub payroll_run: PayrollRun,
    /// One payslip per eligible employee.
    pub payslips: Vec<Payslip>,
}

/// Runs payroll against a store with a fixed statutory configuration.
#[derive(Debug)]
pub struct PayrollProcessor<S> {
    store: S,
    config: StatutoryConfig,
}

impl<S: PayrollStore> PayrollProcessor<S> {
    /// Creates a processor.
    pub fn new(store: S, config: StatutoryConfig) -> Self {
        Self { store, config }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Processes payroll for a tenant's pay schedule and period.
    ///
    /// Returns the completed run and its payslips. A period with no eligible
    /// employees yields a completed run with zero totals and no payslips.
    ///
    /// # Errors
    ///
    /// - [`EngineError::TenantNotFound`] / [`EngineError::PayScheduleNotFound`]
    ///   before any write, including when the schedule belongs to another tenant
    /// - [`EngineError::DuplicatePayrollRun`] if the period was already processed
    /// - [`EngineError::MissingComponent`] / [`EngineError::MalformedComponent`]
    ///   if any employee's components are unusable
    /// - [`EngineError::Persistence`] if the store fails
    ///
    /// Nothing is persisted when an error is returned.
    pub fn process_payroll(
        &self,
        tenant_id: Uuid,
        pay_schedule_id: Uuid,
        period_end: NaiveDate,
        payment_date: NaiveDate,
        initiated_by: Option<Uuid>,
    ) -> EngineResult<ProcessedPayroll> {
        let start_time = Instant::now();

        self.store
            .find_tenant(tenant_id)?
            .ok_or(EngineError::TenantNotFound { tenant_id })?;
        let schedule = self
            .store
            .find_pay_schedule(pay_schedule_id)?
            .filter(|schedule| schedule.belongs_to(tenant_id))
            .ok_or(EngineError::PayScheduleNotFound {
                pay_schedule_id,
                tenant_id,
            })?;

        let period_start = resolve_period_start(period_end, schedule.frequency);
        info!(
            tenant_id = %tenant_id,
            pay_schedule_id = %pay_schedule_id,
            frequency = %schedule.frequency,
            period_start = %period_start,
            period_end = %period_end,
            "Starting payroll run"
        );

        let result = self.store.transaction(|tx| {
            let run = PayrollRun::start(
                tenant_id,
                pay_schedule_id,
                period_start,
                period_end,
                payment_date,
                initiated_by,
            );
            tx.insert_payroll_run(&run)?;
            self.run_in_transaction(tx, run, &schedule)
        });

        match &result {
            Ok(processed) => {
                let totals = &processed.payroll_run.totals;
                info!(
                    payroll_run_id = %processed.payroll_run.id,
                    employee_count = totals.employee_count,
                    gross = %totals.gross,
                    deductions = %totals.deductions,
                    taxes = %totals.taxes,
                    net = %totals.net,
                    duration_us = start_time.elapsed().as_micros() as u64,
                    "Payroll run completed"
                );
            }
            Err(err) => {
                warn!(
                    tenant_id = %tenant_id,
                    pay_schedule_id = %pay_schedule_id,
                    period_end = %period_end,
                    error = %err,
                    "Payroll run failed; nothing was persisted"
                );
            }
        }

        result
    }

    fn run_in_transaction(
        &self,
        tx: &mut dyn PayrollTransaction,
        run: PayrollRun,
        schedule: &PaySchedule,
    ) -> EngineResult<ProcessedPayroll> {
        let rosters = tx.eligible_employees(run.tenant_id, run.period_start, run.period_end)?;
        let fallback = is_fallback_frequency(schedule.frequency);

        let mut payslips = Vec::with_capacity(rosters.len());
        for roster in &rosters {
            let mut payslip = calculate_payslip(roster, &self.config, run.id)?;
            if fallback {
                payslip.audit_trace.warnings.push(AuditWarning::new(
                    PERIOD_FALLBACK,
                    format!(
                        "Pay schedule '{}' has no period rule for its frequency; \
                         period resolved from {} to {}",
                        schedule.name, run.period_start, run.period_end
                    ),
                    "medium",
                ));
            }
            tx.insert_payslip(&payslip)?;
            payslips.push(payslip);
        }

        let payroll_run = run.complete(RunTotals::from_payslips(&payslips));
        tx.update_payroll_run(&payroll_run)?;

        Ok(ProcessedPayroll {
            payroll_run,
            payslips,
        })
    }
}
