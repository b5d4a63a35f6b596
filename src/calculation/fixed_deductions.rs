//! Fixed deductions pass.

use crate::models::{CalculationMode, ComponentCategory};

use super::accumulator::PayslipAccumulator;
use super::components::ResolvedComponents;
use super::round_to_cents;

/// Pass 5: adds every remaining fixed deduction to other deductions.
///
/// Runs after income tax, so these amounts never change the taxable base.
pub fn apply_fixed_deductions(
    acc: PayslipAccumulator,
    components: &ResolvedComponents<'_>,
) -> PayslipAccumulator {
    components
        .others
        .iter()
        .filter(|c| c.is(ComponentCategory::Deduction, CalculationMode::Fixed))
        .fold(acc, |acc, assigned| {
            let amount = round_to_cents(assigned.fixed_amount());
            let component = &assigned.component;
            acc.add_post_tax_deduction(component, amount).record(
                "fixed_deduction",
                "Fixed Deduction",
                serde_json::json!({
                    "component": component.label(),
                    "setting_amount": assigned.setting.amount.map(|a| a.normalize().to_string()),
                    "default_amount": component.amount.map(|a| a.normalize().to_string()),
                }),
                serde_json::json!({
                    "amount": amount.normalize().to_string(),
                }),
                format!("{} withholds {}", component.name, amount.normalize()),
            )
        })
}
