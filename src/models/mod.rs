//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod employee;
mod pay_schedule;
mod payroll_run;
mod payslip;
mod salary_component;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::{Employee, EmployeeRoster, EmploymentStatus};
pub use pay_schedule::{Frequency, PaySchedule, Tenant};
pub use payroll_run::{PayrollRun, RunStatus, RunTotals};
pub use payslip::{Payslip, PayslipItem, PayslipItemType};
pub use salary_component::{
    AssignedComponent, CalculationMode, ComponentCategory, ComponentRole, EmployeeSalarySetting,
    SalaryComponent,
};
