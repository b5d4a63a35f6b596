//! Statutory contribution passes.
//!
//! The social-security base is clamped to its monthly ceiling before either
//! contribution is computed; the health-insurance base is never capped. Both
//! contributions count as taxes and are deductible from the income-tax base.

use rust_decimal::Decimal;

use crate::config::StatutoryConfig;
use crate::error::EngineResult;
use crate::models::{AssignedComponent, ComponentRole};

use super::accumulator::PayslipAccumulator;
use super::components::ResolvedComponents;
use super::round_to_cents;

/// Clamps the social-security base to the configured monthly ceiling.
pub fn cap_contribution_bases(
    acc: PayslipAccumulator,
    config: &StatutoryConfig,
) -> PayslipAccumulator {
    let ceiling = config.social_security_ceiling();
    let uncapped = acc.social_security_base;
    if uncapped <= ceiling {
        return acc;
    }

    PayslipAccumulator {
        social_security_base: ceiling,
        ..acc
    }
    .record(
        "contribution_cap",
        "Social Security Ceiling",
        serde_json::json!({
            "social_security_base": uncapped.normalize().to_string(),
            "ceiling": ceiling.normalize().to_string(),
        }),
        serde_json::json!({
            "social_security_base": ceiling.normalize().to_string(),
        }),
        format!(
            "Social security base {} exceeds the monthly ceiling; capped at {}",
            uncapped.normalize(),
            ceiling.normalize()
        ),
    )
}

/// Pass 3: computes each assigned statutory contribution on its base.
///
/// # Errors
///
/// Returns [`crate::EngineError::MalformedComponent`] when a contribution has
/// no percentage.
pub fn apply_statutory_contributions(
    acc: PayslipAccumulator,
    components: &ResolvedComponents<'_>,
) -> EngineResult<PayslipAccumulator> {
    let acc = match components.social_security {
        Some(assigned) => {
            let base = acc.social_security_base;
            apply_contribution(acc, assigned, ComponentRole::SocialSecurity, base)?
        }
        None => acc,
    };

    match components.health_insurance {
        Some(assigned) => {
            let base = acc.health_insurance_base;
            apply_contribution(acc, assigned, ComponentRole::HealthInsurance, base)
        }
        None => Ok(acc),
    }
}

fn apply_contribution(
    acc: PayslipAccumulator,
    assigned: &AssignedComponent,
    role: ComponentRole,
    base: Decimal,
) -> EngineResult<PayslipAccumulator> {
    let percentage = assigned.percentage()?;
    let amount = round_to_cents(base * percentage / Decimal::ONE_HUNDRED);
    let rule_id = match role {
        ComponentRole::SocialSecurity => "social_security",
        _ => "health_insurance",
    };
    let rule_name = match role {
        ComponentRole::SocialSecurity => "Social Security Contribution",
        _ => "Health Insurance Contribution",
    };

    Ok(acc.add_contribution(&assigned.component, amount).record(
        rule_id,
        rule_name,
        serde_json::json!({
            "component": role.system_code(),
            "base": base.normalize().to_string(),
            "percentage": percentage.normalize().to_string(),
        }),
        serde_json::json!({
            "amount": amount.normalize().to_string(),
        }),
        format!(
            "{} x {}% = {}",
            base.normalize(),
            percentage.normalize(),
            amount.normalize()
        ),
    ))
}
