//! Persistence boundary for the payroll engine.
//!
//! The processor only talks to storage through [`PayrollStore`] and the
//! [`PayrollTransaction`] it hands out. Everything written inside
//! [`PayrollStore::transaction`] becomes visible together on commit, or not
//! at all.

mod memory;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{EmployeeRoster, PaySchedule, PayrollRun, Payslip, Tenant};

pub use memory::InMemoryStore;

/// Reads and writes performed inside one atomic unit of work.
pub trait PayrollTransaction {
    /// Returns the tenant's employees eligible for the period, each joined
    /// with its active salary settings and their component templates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::MissingComponent`] when a setting refers
    /// to a component that does not exist for the tenant.
    fn eligible_employees(
        &self,
        tenant_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> EngineResult<Vec<EmployeeRoster>>;

    /// Stages a new run.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::DuplicatePayrollRun`] when a run for the
    /// same tenant, pay schedule and period end already exists.
    fn insert_payroll_run(&mut self, run: &PayrollRun) -> EngineResult<()>;

    /// Replaces a run staged earlier in this transaction.
    fn update_payroll_run(&mut self, run: &PayrollRun) -> EngineResult<()>;

    /// Stages a payslip and its items.
    fn insert_payslip(&mut self, payslip: &Payslip) -> EngineResult<()>;
}

/// A transactional store scoped by tenant.
pub trait PayrollStore: Send + Sync {
    /// Looks up a tenant.
    fn find_tenant(&self, tenant_id: Uuid) -> EngineResult<Option<Tenant>>;

    /// Looks up a pay schedule.
    fn find_pay_schedule(&self, pay_schedule_id: Uuid) -> EngineResult<Option<PaySchedule>>;

    /// Runs `work` inside one transaction.
    ///
    /// The transaction commits when `work` returns `Ok` and is discarded when
    /// it returns `Err`; the error is handed back unchanged. Commit itself may
    /// fail, in which case nothing is persisted either.
    fn transaction<T, F>(&self, work: F) -> EngineResult<T>
    where
        F: FnOnce(&mut dyn PayrollTransaction) -> EngineResult<T>;
}
