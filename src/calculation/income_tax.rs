//! Progressive income tax.
//!
//! The annual tax is computed with the quick-deduction form of the scale:
//! for the first bracket whose ceiling covers the base, `base × rate −
//! quick_deduction`. The monthly withholding is a twelfth of the annual tax.

use rust_decimal::Decimal;

use crate::config::{BracketCeiling, StatutoryConfig, TaxBracket};
use crate::models::ComponentRole;

use super::accumulator::PayslipAccumulator;
use super::components::ResolvedComponents;
use super::round_to_cents;

/// Months in a tax year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Computes the annual tax for an annual taxable base.
///
/// The result is rounded to cents and never negative. A table without a
/// covering bracket yields zero; [`StatutoryConfig`] guarantees the top
/// bracket is unbounded so this cannot happen with a validated table.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_annual_tax;
/// use payroll_engine::config::standard_tax_brackets;
/// use rust_decimal::Decimal;
///
/// let brackets = standard_tax_brackets();
/// assert_eq!(compute_annual_tax(Decimal::new(30_000, 0), &brackets), Decimal::ZERO);
/// assert_eq!(compute_annual_tax(Decimal::new(80_000, 0), &brackets), Decimal::new(10_000, 0));
/// ```
pub fn compute_annual_tax(annual_taxable_base: Decimal, brackets: &[TaxBracket]) -> Decimal {
    brackets
        .iter()
        .find(|bracket| bracket.covers(annual_taxable_base))
        .map(|bracket| round_to_cents(bracket.raw_tax(annual_taxable_base)))
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

/// Converts an annual tax into the monthly withholding, rounded to cents.
pub fn monthly_income_tax(annual_tax: Decimal) -> Decimal {
    round_to_cents(annual_tax / Decimal::from(MONTHS_PER_YEAR))
}

/// Pass 4: withholds income tax when an income-tax line is assigned.
pub fn apply_income_tax(
    acc: PayslipAccumulator,
    components: &ResolvedComponents<'_>,
    config: &StatutoryConfig,
) -> PayslipAccumulator {
    let Some(income_tax) = components.income_tax else {
        return acc;
    };

    let annual_base = acc.annual_taxable_base;
    let bracket = config
        .tax_brackets()
        .iter()
        .find(|bracket| bracket.covers(annual_base));
    let annual_tax = compute_annual_tax(annual_base, config.tax_brackets());
    let monthly_tax = monthly_income_tax(annual_tax);

    let ceiling = match bracket.map(|b| b.ceiling) {
        Some(BracketCeiling::UpTo(ceiling)) => ceiling.normalize().to_string(),
        Some(BracketCeiling::Unbounded) | None => "unbounded".to_string(),
    };
    let rate = bracket.map(|b| b.rate).unwrap_or_default();
    let quick_deduction = bracket.map(|b| b.quick_deduction).unwrap_or_default();

    acc.add_income_tax(&income_tax.component, monthly_tax).record(
        "income_tax",
        "Income Tax",
        serde_json::json!({
            "annual_taxable_base": annual_base.normalize().to_string(),
            "bracket_ceiling": ceiling,
            "rate": rate.normalize().to_string(),
            "quick_deduction": quick_deduction.normalize().to_string(),
        }),
        serde_json::json!({
            "annual_tax": annual_tax.normalize().to_string(),
            "monthly_tax": monthly_tax.normalize().to_string(),
            "component": ComponentRole::IncomeTax.system_code(),
        }),
        format!(
            "{} x {} - {} = {} per year; / {} = {}",
            annual_base.normalize(),
            rate.normalize(),
            quick_deduction.normalize(),
            annual_tax.normalize(),
            MONTHS_PER_YEAR,
            monthly_tax.normalize()
        ),
    )
}
