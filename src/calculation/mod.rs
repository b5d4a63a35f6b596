//! Calculation logic for the payroll engine.
//!
//! This module contains the pay-period resolver, the progressive income-tax
//! function and the ordered passes that turn an employee's assigned salary
//! components into a payslip: base salary, fixed earnings, percentage
//! components, the contribution ceiling, statutory contributions, professional
//! expenses, income tax and fixed deductions.

mod accumulator;
mod base_salary;
mod components;
mod fixed_deductions;
mod fixed_earnings;
mod income_tax;
mod percentage_components;
mod period;
mod pipeline;
mod professional_expenses;
mod rounding;
mod statutory_contributions;

#[cfg(test)]
mod test_support;

pub use accumulator::{PayslipAccumulator, PayslipLine};
pub use base_salary::apply_base_salary;
pub use components::ResolvedComponents;
pub use fixed_deductions::apply_fixed_deductions;
pub use fixed_earnings::apply_fixed_earnings;
pub use income_tax::{MONTHS_PER_YEAR, apply_income_tax, compute_annual_tax, monthly_income_tax};
pub use percentage_components::apply_percentage_components;
pub use period::{is_fallback_frequency, resolve_period_start};
pub use pipeline::{FORMULA_NOT_SUPPORTED, calculate_payslip};
pub use professional_expenses::apply_professional_expenses;
pub use rounding::round_to_cents;
pub use statutory_contributions::{apply_statutory_contributions, cap_contribution_bases};
