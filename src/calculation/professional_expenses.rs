//! Professional-expense allowance and annualization of the taxable base.

use rust_decimal::Decimal;

use crate::config::StatutoryConfig;

use super::accumulator::PayslipAccumulator;
use super::income_tax::MONTHS_PER_YEAR;

/// Takes the professional-expense allowance off the monthly taxable base and annualizes it.
///
/// `deduction = min(max(taxable, 0) × rate, annual_cap / 12)`, then
/// `taxable = max(0, taxable − deduction)` and `annual = taxable × 12`.
pub fn apply_professional_expenses(
    acc: PayslipAccumulator,
    config: &StatutoryConfig,
) -> PayslipAccumulator {
    let monthly_base = acc.taxable_base;
    let monthly_cap = config.professional_expense_monthly_cap();
    let deduction = (monthly_base.max(Decimal::ZERO) * config.professional_expense_rate())
        .min(monthly_cap);
    let taxable_base = (monthly_base - deduction).max(Decimal::ZERO);
    let annual_taxable_base = taxable_base * Decimal::from(MONTHS_PER_YEAR);
    let capped = deduction == monthly_cap;

    PayslipAccumulator {
        taxable_base,
        annual_taxable_base,
        ..acc
    }
    .record(
        "professional_expenses",
        "Professional Expenses",
        serde_json::json!({
            "monthly_taxable_base": monthly_base.normalize().to_string(),
            "rate": config.professional_expense_rate().normalize().to_string(),
            "monthly_cap": monthly_cap.normalize().to_string(),
        }),
        serde_json::json!({
            "deduction": deduction.normalize().to_string(),
            "cap_applied": capped,
            "monthly_taxable_base": taxable_base.normalize().to_string(),
            "annual_taxable_base": annual_taxable_base.normalize().to_string(),
        }),
        format!(
            "{} - {} = {}; x {} = {}",
            monthly_base.normalize(),
            deduction.normalize(),
            taxable_base.normalize(),
            MONTHS_PER_YEAR,
            annual_taxable_base.normalize()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::dec;

    fn with_taxable(base: &str) -> PayslipAccumulator {
        PayslipAccumulator {
            taxable_base: dec(base),
            ..PayslipAccumulator::new()
        }
    }

    #[test]
    fn test_rate_applies_below_cap() {
        let acc = apply_professional_expenses(with_taxable("11460"), &StatutoryConfig::standard());

        assert_eq!(acc.taxable_base, dec("9168"));
        assert_eq!(acc.annual_taxable_base, dec("110016"));
        assert_eq!(acc.audit_steps[0].output["cap_applied"], false);
    }

    #[test]
    fn test_monthly_cap_limits_deduction() {
        let acc = apply_professional_expenses(with_taxable("20000"), &StatutoryConfig::standard());

        assert_eq!(acc.taxable_base, dec("17500"));
        assert_eq!(acc.annual_taxable_base, dec("210000"));
        assert_eq!(acc.audit_steps[0].output["cap_applied"], true);
    }

    #[test]
    fn test_negative_base_is_floored_at_zero() {
        let acc = apply_professional_expenses(with_taxable("-250"), &StatutoryConfig::standard());

        assert_eq!(acc.taxable_base, Decimal::ZERO);
        assert_eq!(acc.annual_taxable_base, Decimal::ZERO);
    }
}
