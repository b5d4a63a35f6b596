//! Base salary pass.

use crate::models::PayslipItemType;

use super::accumulator::{PayslipAccumulator, PayslipLine};
use super::components::ResolvedComponents;
use super::round_to_cents;

/// Pass 0: seeds the accumulator with the base salary.
///
/// The amount is the setting override, else the template default. The base
/// line is emitted even when the amount is zero so every payslip shows it.
pub fn apply_base_salary(
    acc: PayslipAccumulator,
    components: &ResolvedComponents<'_>,
) -> PayslipAccumulator {
    let base = components.base_salary;
    let amount = round_to_cents(base.fixed_amount());
    let source = if base.setting.amount.is_some() {
        "employee setting"
    } else {
        "component default"
    };

    let acc = PayslipAccumulator {
        base_salary: amount,
        ..acc
    };

    acc.add_to_bases(&base.component, amount)
        .push_line(PayslipLine::new(&base.component, PayslipItemType::Earning, amount))
        .record(
            "base_salary",
            "Base Salary",
            serde_json::json!({
                "setting_amount": base.setting.amount.map(|a| a.normalize().to_string()),
                "default_amount": base.component.amount.map(|a| a.normalize().to_string()),
            }),
            serde_json::json!({
                "amount": amount.normalize().to_string(),
                "taxable": base.component.is_taxable,
                "social_security_base": base.component.is_social_security_base,
                "health_insurance_base": base.component.is_health_insurance_base,
            }),
            format!("Base salary {} taken from {}", amount.normalize(), source),
        )
}
