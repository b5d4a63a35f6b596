//! Fixed earnings pass.

use crate::models::{CalculationMode, ComponentCategory};

use super::accumulator::PayslipAccumulator;
use super::components::ResolvedComponents;
use super::round_to_cents;

/// Pass 1: adds every non-statutory fixed earning.
///
/// Each amount goes to gross pay and to the bases its component is flagged for.
/// A component with no amount on either the setting or the template adds nothing.
pub fn apply_fixed_earnings(
    acc: PayslipAccumulator,
    components: &ResolvedComponents<'_>,
) -> PayslipAccumulator {
    components
        .others
        .iter()
        .filter(|c| c.is(ComponentCategory::Earning, CalculationMode::Fixed))
        .fold(acc, |acc, assigned| {
            let amount = round_to_cents(assigned.fixed_amount());
            let component = &assigned.component;
            acc.add_earning(component, amount).record(
                "fixed_earning",
                "Fixed Earning",
                serde_json::json!({
                    "component": component.label(),
                    "setting_amount": assigned.setting.amount.map(|a| a.normalize().to_string()),
                    "default_amount": component.amount.map(|a| a.normalize().to_string()),
                }),
                serde_json::json!({
                    "amount": amount.normalize().to_string(),
                    "taxable": component.is_taxable,
                    "social_security_base": component.is_social_security_base,
                    "health_insurance_base": component.is_health_insurance_base,
                }),
                format!("{} adds {} to gross pay", component.name, amount.normalize()),
            )
        })
}
