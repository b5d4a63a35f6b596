//! Statutory configuration types.
//!
//! This module contains the strongly-typed statutory parameters used by the
//! payslip pipeline and the file structures they are deserialized from.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// The upper edge of a tax bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketCeiling {
    /// The bracket applies to bases up to and including this amount.
    UpTo(Decimal),
    /// The uppermost bracket; applies to every base above the previous ceiling.
    Unbounded,
}

/// One bracket of the progressive income-tax scale.
///
/// The tax for a base falling in this bracket is `base × rate − quick_deduction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// The upper edge of the bracket.
    pub ceiling: BracketCeiling,
    /// The marginal rate as a fraction (e.g., 0.34 for 34%).
    pub rate: Decimal,
    /// The amount subtracted so the scale is continuous at each ceiling.
    pub quick_deduction: Decimal,
}

impl TaxBracket {
    /// Creates a bounded bracket.
    pub fn up_to(ceiling: Decimal, rate: Decimal, quick_deduction: Decimal) -> Self {
        Self {
            ceiling: BracketCeiling::UpTo(ceiling),
            rate,
            quick_deduction,
        }
    }

    /// Creates the unbounded top bracket.
    pub fn unbounded(rate: Decimal, quick_deduction: Decimal) -> Self {
        Self {
            ceiling: BracketCeiling::Unbounded,
            rate,
            quick_deduction,
        }
    }

    /// Returns true if a base is at or below this bracket's ceiling.
    pub fn covers(&self, base: Decimal) -> bool {
        match self.ceiling {
            BracketCeiling::UpTo(ceiling) => base <= ceiling,
            BracketCeiling::Unbounded => true,
        }
    }

    /// Applies the quick-deduction formula, unrounded.
    pub fn raw_tax(&self, base: Decimal) -> Decimal {
        base * self.rate - self.quick_deduction
    }
}

/// Returns the reference progressive scale.
///
/// | ceiling  | rate | quick deduction |
/// |----------|------|-----------------|
/// | 30 000   | 0%   | 0               |
/// | 50 000   | 10%  | 3 000           |
/// | 60 000   | 20%  | 8 000           |
/// | 80 000   | 30%  | 14 000          |
/// | 180 000  | 34%  | 17 200          |
/// | above    | 38%  | 24 400          |
pub fn standard_tax_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::up_to(Decimal::new(30_000, 0), Decimal::ZERO, Decimal::ZERO),
        TaxBracket::up_to(
            Decimal::new(50_000, 0),
            Decimal::new(10, 2),
            Decimal::new(3_000, 0),
        ),
        TaxBracket::up_to(
            Decimal::new(60_000, 0),
            Decimal::new(20, 2),
            Decimal::new(8_000, 0),
        ),
        TaxBracket::up_to(
            Decimal::new(80_000, 0),
            Decimal::new(30, 2),
            Decimal::new(14_000, 0),
        ),
        TaxBracket::up_to(
            Decimal::new(180_000, 0),
            Decimal::new(34, 2),
            Decimal::new(17_200, 0),
        ),
        TaxBracket::unbounded(Decimal::new(38, 2), Decimal::new(24_400, 0)),
    ]
}

/// Statutory parameters for payslip calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatutoryConfig {
    /// The progressive scale, ascending, last bracket unbounded.
    tax_brackets: Vec<TaxBracket>,
    /// Monthly ceiling of the social-security contribution base.
    social_security_ceiling: Decimal,
    /// Share of the taxable base deducted as professional expenses.
    professional_expense_rate: Decimal,
    /// Yearly ceiling of the professional-expense deduction.
    professional_expense_annual_cap: Decimal,
}

impl StatutoryConfig {
    /// Creates a configuration after checking the bracket table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the table is empty, not
    /// ascending, not continuous at a ceiling, has a bounded top bracket or
    /// an unbounded bracket anywhere else, or if a limit is negative.
    pub fn new(
        tax_brackets: Vec<TaxBracket>,
        social_security_ceiling: Decimal,
        professional_expense_rate: Decimal,
        professional_expense_annual_cap: Decimal,
    ) -> EngineResult<Self> {
        validate_brackets(&tax_brackets)?;

        if social_security_ceiling < Decimal::ZERO {
            return Err(invalid("social security ceiling must not be negative"));
        }
        if professional_expense_rate < Decimal::ZERO || professional_expense_rate > Decimal::ONE {
            return Err(invalid("professional expense rate must be between 0 and 1"));
        }
        if professional_expense_annual_cap < Decimal::ZERO {
            return Err(invalid("professional expense cap must not be negative"));
        }

        Ok(Self {
            tax_brackets,
            social_security_ceiling,
            professional_expense_rate,
            professional_expense_annual_cap,
        })
    }

    /// Returns the reference configuration.
    ///
    /// Social-security base capped at 6 000 per month; professional expenses
    /// at 20% up to 30 000 per year; the scale from [`standard_tax_brackets`].
    pub fn standard() -> Self {
        Self {
            tax_brackets: standard_tax_brackets(),
            social_security_ceiling: Decimal::new(6_000, 0),
            professional_expense_rate: Decimal::new(20, 2),
            professional_expense_annual_cap: Decimal::new(30_000, 0),
        }
    }

    /// Returns the progressive scale.
    pub fn tax_brackets(&self) -> &[TaxBracket] {
        &self.tax_brackets
    }

    /// Returns the monthly social-security base ceiling.
    pub fn social_security_ceiling(&self) -> Decimal {
        self.social_security_ceiling
    }

    /// Returns the professional-expense rate as a fraction.
    pub fn professional_expense_rate(&self) -> Decimal {
        self.professional_expense_rate
    }

    /// Returns the yearly professional-expense ceiling.
    pub fn professional_expense_annual_cap(&self) -> Decimal {
        self.professional_expense_annual_cap
    }

    /// Returns the monthly professional-expense ceiling (annual ÷ 12).
    pub fn professional_expense_monthly_cap(&self) -> Decimal {
        self.professional_expense_annual_cap / Decimal::from(12)
    }
}

impl Default for StatutoryConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}

fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let Some((last, bounded)) = brackets.split_last() else {
        return Err(invalid("tax scale must contain at least one bracket"));
    };

    if last.ceiling != BracketCeiling::Unbounded {
        return Err(invalid("the top tax bracket must be unbounded"));
    }

    for bracket in brackets {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(invalid(format!(
                "tax rate {} must be between 0 and 1",
                bracket.rate
            )));
        }
    }

    let mut previous: Option<Decimal> = None;
    for (index, bracket) in bounded.iter().enumerate() {
        let BracketCeiling::UpTo(ceiling) = bracket.ceiling else {
            return Err(invalid(format!(
                "only the top tax bracket may be unbounded (bracket {})",
                index + 1
            )));
        };

        if previous.is_some_and(|p| ceiling <= p) {
            return Err(invalid(format!(
                "tax bracket ceilings must be ascending ({} follows {})",
                ceiling,
                previous.unwrap_or_default()
            )));
        }

        let next = &brackets[index + 1];
        let below = bracket.raw_tax(ceiling);
        let above = next.raw_tax(ceiling);
        if below != above {
            return Err(invalid(format!(
                "tax scale is discontinuous at {}: {} below, {} above",
                ceiling, below, above
            )));
        }

        previous = Some(ceiling);
    }

    Ok(())
}

/// One bracket as written in the statutory configuration file.
///
/// `up_to` is omitted for the top bracket.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracketEntry {
    /// The upper edge, absent for the unbounded bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// The marginal rate as a fraction.
    pub rate: Decimal,
    /// The quick deduction for the bracket.
    pub quick_deduction: Decimal,
}

impl From<TaxBracketEntry> for TaxBracket {
    fn from(entry: TaxBracketEntry) -> Self {
        match entry.up_to {
            Some(ceiling) => TaxBracket::up_to(ceiling, entry.rate, entry.quick_deduction),
            None => TaxBracket::unbounded(entry.rate, entry.quick_deduction),
        }
    }
}

/// Income tax section of the statutory configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeTaxSection {
    /// The scale, ascending.
    pub brackets: Vec<TaxBracketEntry>,
}

/// Social security section of the statutory configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialSecuritySection {
    /// Monthly ceiling of the contribution base.
    pub monthly_ceiling: Decimal,
}

/// Professional expenses section of the statutory configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfessionalExpensesSection {
    /// Share of the taxable base deducted, as a fraction.
    pub rate: Decimal,
    /// Yearly ceiling of the deduction.
    pub annual_cap: Decimal,
}

/// The statutory configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryFile {
    /// The income tax scale.
    pub income_tax: IncomeTaxSection,
    /// Social security parameters.
    pub social_security: SocialSecuritySection,
    /// Professional expense parameters.
    pub professional_expenses: ProfessionalExpensesSection,
}

impl TryFrom<StatutoryFile> for StatutoryConfig {
    type Error = EngineError;

    fn try_from(file: StatutoryFile) -> EngineResult<Self> {
        StatutoryConfig::new(
            file.income_tax.brackets.into_iter().map(Into::into).collect(),
            file.social_security.monthly_ceiling,
            file.professional_expenses.rate,
            file.professional_expenses.annual_cap,
        )
    }
}
