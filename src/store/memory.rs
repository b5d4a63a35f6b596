//! In-memory implementation of the payroll store.
//!
//! Committed state sits behind a mutex. A transaction reads through to it and
//! stages its own writes; commit takes the lock, re-checks the run uniqueness
//! constraint against whatever committed in the meantime, and applies the
//! staged rows in one step.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AssignedComponent, Employee, EmployeeRoster, EmployeeSalarySetting, PaySchedule, PayrollRun,
    Payslip, SalaryComponent, Tenant,
};

use super::{PayrollStore, PayrollTransaction};

#[derive(Debug, Default)]
struct StoreState {
    tenants: HashMap<Uuid, Tenant>,
    pay_schedules: HashMap<Uuid, PaySchedule>,
    employees: Vec<Employee>,
    components: HashMap<Uuid, SalaryComponent>,
    settings: Vec<EmployeeSalarySetting>,
    payroll_runs: Vec<PayrollRun>,
    payslips: Vec<Payslip>,
}

impl StoreState {
    fn duplicate_of(&self, run: &PayrollRun) -> Option<EngineError> {
        self.payroll_runs
            .iter()
            .any(|existing| existing.conflicts_with(run))
            .then(|| duplicate_run(run))
    }
}

fn duplicate_run(run: &PayrollRun) -> EngineError {
    EngineError::DuplicatePayrollRun {
        tenant_id: run.tenant_id,
        pay_schedule_id: run.pay_schedule_id,
        period_end: run.period_end,
    }
}

/// A thread-safe, transactional in-memory store.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Tenant;
/// use payroll_engine::store::{InMemoryStore, PayrollStore};
/// use uuid::Uuid;
///
/// let store = InMemoryStore::new();
/// let tenant = Tenant { id: Uuid::new_v4(), name: "Atlas Textiles".to_string() };
/// store.insert_tenant(tenant.clone());
///
/// assert_eq!(store.find_tenant(tenant.id).unwrap(), Some(tenant));
/// assert!(store.payroll_runs().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds or replaces a tenant.
    pub fn insert_tenant(&self, tenant: Tenant) {
        self.lock().tenants.insert(tenant.id, tenant);
    }

    /// Adds or replaces a pay schedule.
    pub fn insert_pay_schedule(&self, schedule: PaySchedule) {
        self.lock().pay_schedules.insert(schedule.id, schedule);
    }

    /// Adds an employee.
    pub fn insert_employee(&self, employee: Employee) {
        self.lock().employees.push(employee);
    }

    /// Adds or replaces a salary component template.
    pub fn insert_salary_component(&self, component: SalaryComponent) {
        self.lock().components.insert(component.id, component);
    }

    /// Assigns a component to an employee.
    pub fn assign_component(&self, setting: EmployeeSalarySetting) {
        self.lock().settings.push(setting);
    }

    /// Returns every committed run.
    pub fn payroll_runs(&self) -> Vec<PayrollRun> {
        self.lock().payroll_runs.clone()
    }

    /// Returns the committed payslips of a run.
    pub fn payslips_for_run(&self, payroll_run_id: Uuid) -> Vec<Payslip> {
        self.lock()
            .payslips
            .iter()
            .filter(|p| p.payroll_run_id == payroll_run_id)
            .cloned()
            .collect()
    }

    fn commit(&self, staged: MemoryTransaction<'_>) -> EngineResult<()> {
        let mut state = self.lock();

        for run in &staged.runs {
            if let Some(error) = state.duplicate_of(run) {
                return Err(error);
            }
        }

        debug!(
            runs = staged.runs.len(),
            payslips = staged.payslips.len(),
            "Committing payroll transaction"
        );
        state.payroll_runs.extend(staged.runs);
        state.payslips.extend(staged.payslips);
        Ok(())
    }
}

impl PayrollStore for InMemoryStore {
    fn find_tenant(&self, tenant_id: Uuid) -> EngineResult<Option<Tenant>> {
        Ok(self.lock().tenants.get(&tenant_id).cloned())
    }

    fn find_pay_schedule(&self, pay_schedule_id: Uuid) -> EngineResult<Option<PaySchedule>> {
        Ok(self.lock().pay_schedules.get(&pay_schedule_id).cloned())
    }

    fn transaction<T, F>(&self, work: F) -> EngineResult<T>
    where
        F: FnOnce(&mut dyn PayrollTransaction) -> EngineResult<T>,
    {
        let mut tx = MemoryTransaction {
            store: self,
            runs: Vec::new(),
            payslips: Vec::new(),
        };

        let value = work(&mut tx)?;
        self.commit(tx)?;
        Ok(value)
    }
}

/// Writes staged by one open transaction.
struct MemoryTransaction<'a> {
    store: &'a InMemoryStore,
    runs: Vec<PayrollRun>,
    payslips: Vec<Payslip>,
}

impl PayrollTransaction for MemoryTransaction<'_> {
    fn eligible_employees(
        &self,
        tenant_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> EngineResult<Vec<EmployeeRoster>> {
        let state = self.store.lock();

        state
            .employees
            .iter()
            .filter(|e| e.tenant_id == tenant_id && e.is_eligible_for(period_start, period_end))
            .map(|employee| -> EngineResult<EmployeeRoster> {
                let components = state
                    .settings
                    .iter()
                    .filter(|s| {
                        s.employee_id == employee.id
                            && s.is_active
                            && s.effective_date <= period_end
                    })
                    .map(|setting| -> EngineResult<AssignedComponent> {
                        let component = state
                            .components
                            .get(&setting.component_id)
                            .filter(|c| c.tenant_id.is_none_or(|owner| owner == tenant_id))
                            .ok_or_else(|| EngineError::MissingComponent {
                                employee_id: employee.id,
                                component: setting.component_id.to_string(),
                            })?;
                        Ok(AssignedComponent {
                            setting: setting.clone(),
                            component: component.clone(),
                        })
                    })
                    .collect::<EngineResult<Vec<_>>>()?;

                Ok(EmployeeRoster {
                    employee: employee.clone(),
                    components,
                })
            })
            .collect()
    }

    fn insert_payroll_run(&mut self, run: &PayrollRun) -> EngineResult<()> {
        if let Some(error) = self.store.lock().duplicate_of(run) {
            return Err(error);
        }
        if self.runs.iter().any(|staged| staged.conflicts_with(run)) {
            return Err(duplicate_run(run));
        }
        self.runs.push(run.clone());
        Ok(())
    }

    fn update_payroll_run(&mut self, run: &PayrollRun) -> EngineResult<()> {
        let staged = self
            .runs
            .iter_mut()
            .find(|staged| staged.id == run.id)
            .ok_or_else(|| EngineError::Persistence {
                message: format!("payroll run {} is not part of this transaction", run.id),
            })?;
        *staged = run.clone();
        Ok(())
    }

    fn insert_payslip(&mut self, payslip: &Payslip) -> EngineResult<()> {
        if !self.runs.iter().any(|run| run.id == payslip.payroll_run_id) {
            return Err(EngineError::Persistence {
                message: format!(
                    "payslip {} refers to unknown payroll run {}",
                    payslip.id, payslip.payroll_run_id
                ),
            });
        }
        if self.payslips.iter().any(|existing| {
            existing.payroll_run_id == payslip.payroll_run_id
                && existing.employee_id == payslip.employee_id
        }) {
            return Err(EngineError::Persistence {
                message: format!(
                    "employee {} already has a payslip in run {}",
                    payslip.employee_id, payslip.payroll_run_id
                ),
            });
        }
        self.payslips.push(payslip.clone());
        Ok(())
    }
}
