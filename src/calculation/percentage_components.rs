//! Percentage-of-base-salary pass.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{CalculationMode, ComponentCategory};

use super::accumulator::PayslipAccumulator;
use super::components::ResolvedComponents;
use super::round_to_cents;

/// Pass 2: applies non-statutory percentage components to the base salary.
///
/// `amount = round2(base_salary × percentage / 100)`. Earnings feed gross pay
/// and their flagged bases; deductions go to other deductions and, when
/// flagged taxable, come off the taxable base.
///
/// # Errors
///
/// Returns [`crate::EngineError::MalformedComponent`] when a component has no
/// percentage on either the setting or the template.
pub fn apply_percentage_components(
    acc: PayslipAccumulator,
    components: &ResolvedComponents<'_>,
) -> EngineResult<PayslipAccumulator> {
    let hundred = Decimal::ONE_HUNDRED;
    components
        .others_in_mode(CalculationMode::Percentage)
        .try_fold(acc, |acc, assigned| {
            let percentage = assigned.percentage()?;
            let base = acc.base_salary;
            let amount = round_to_cents(base * percentage / hundred);
            let component = &assigned.component;

            let (acc, effect) = match component.category {
                ComponentCategory::Earning => (acc.add_earning(component, amount), "earning"),
                ComponentCategory::Deduction => (acc.add_deduction(component, amount), "deduction"),
            };

            Ok(acc.record(
                "percentage_component",
                "Percentage Component",
                serde_json::json!({
                    "component": component.label(),
                    "base_salary": base.normalize().to_string(),
                    "percentage": percentage.normalize().to_string(),
                }),
                serde_json::json!({
                    "amount": amount.normalize().to_string(),
                    "category": effect,
                    "taxable": component.is_taxable,
                }),
                format!(
                    "{} x {}% = {}",
                    base.normalize(),
                    percentage.normalize(),
                    amount.normalize()
                ),
            ))
        })
}
