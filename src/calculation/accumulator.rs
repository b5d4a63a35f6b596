//! Running totals threaded through the payslip pipeline.
//!
//! Each pass takes a [`PayslipAccumulator`] by value and returns the updated
//! record, so the order of passes is visible in the data flow.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AuditStep, AuditWarning, PayslipItemType, SalaryComponent};

use super::round_to_cents;

/// A payslip line before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// The originating component.
    pub component_id: Uuid,
    /// The component's system code.
    pub component_code: Option<String>,
    /// The component's display name.
    pub component_name: String,
    /// Earning, deduction or tax.
    pub item_type: PayslipItemType,
    /// The line amount, rounded to cents.
    pub amount: Decimal,
}

impl PayslipLine {
    /// Creates a line for a component.
    pub fn new(component: &SalaryComponent, item_type: PayslipItemType, amount: Decimal) -> Self {
        Self {
            component_id: component.id,
            component_code: component.system_code.clone(),
            component_name: component.name.clone(),
            item_type,
            amount,
        }
    }
}

/// The state of one employee's payslip between passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayslipAccumulator {
    /// The resolved base salary; percentage components are computed on it.
    pub base_salary: Decimal,
    /// Sum of earnings so far.
    pub gross_pay: Decimal,
    /// Monthly income-tax base.
    pub taxable_base: Decimal,
    /// Social-security contribution base (capped before contributions).
    pub social_security_base: Decimal,
    /// Health-insurance contribution base (never capped).
    pub health_insurance_base: Decimal,
    /// Annualized taxable base, set after professional expenses.
    pub annual_taxable_base: Decimal,
    /// Non-statutory deductions so far.
    pub other_deductions: Decimal,
    /// Statutory contributions and income tax so far.
    pub taxes: Decimal,
    /// Lines emitted so far.
    pub lines: Vec<PayslipLine>,
    /// Audit steps recorded so far.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings recorded so far.
    pub warnings: Vec<AuditWarning>,
}

impl PayslipAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an earning to gross pay and to every base the component is flagged for.
    pub fn add_earning(self, component: &SalaryComponent, amount: Decimal) -> Self {
        self.add_to_bases(component, amount)
            .push_non_zero(component, PayslipItemType::Earning, amount)
    }

    /// Adds an amount to gross pay and the flagged bases without emitting a line.
    pub fn add_to_bases(mut self, component: &SalaryComponent, amount: Decimal) -> Self {
        self.gross_pay += amount;
        if component.is_taxable {
            self.taxable_base += amount;
        }
        if component.is_social_security_base {
            self.social_security_base += amount;
        }
        if component.is_health_insurance_base {
            self.health_insurance_base += amount;
        }
        self
    }

    /// Adds a non-statutory deduction; taxable deductions also reduce the taxable base.
    pub fn add_deduction(mut self, component: &SalaryComponent, amount: Decimal) -> Self {
        self.other_deductions += amount;
        if component.is_taxable {
            self.taxable_base -= amount;
        }
        self.push_non_zero(component, PayslipItemType::Deduction, amount)
    }

    /// Adds a deduction taken after income tax; the taxable base is left alone.
    pub fn add_post_tax_deduction(mut self, component: &SalaryComponent, amount: Decimal) -> Self {
        self.other_deductions += amount;
        self.push_non_zero(component, PayslipItemType::Deduction, amount)
    }

    /// Adds a statutory contribution: counts as tax and is deductible from the taxable base.
    pub fn add_contribution(mut self, component: &SalaryComponent, amount: Decimal) -> Self {
        self.taxes += amount;
        self.taxable_base -= amount;
        self.push_non_zero(component, PayslipItemType::Tax, amount)
    }

    /// Adds the income-tax withholding.
    pub fn add_income_tax(mut self, component: &SalaryComponent, amount: Decimal) -> Self {
        self.taxes += amount;
        self.push_non_zero(component, PayslipItemType::Tax, amount)
    }

    /// Emits a line regardless of its amount.
    pub fn push_line(mut self, line: PayslipLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Records an audit step with the next step number.
    pub fn record(
        mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) -> Self {
        let step_number = self.audit_steps.len() as u32 + 1;
        self.audit_steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
        self
    }

    /// Records a warning.
    pub fn warn(mut self, warning: AuditWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Gross pay rounded to cents.
    pub fn rounded_gross(&self) -> Decimal {
        round_to_cents(self.gross_pay)
    }

    /// Other deductions rounded to cents.
    pub fn rounded_deductions(&self) -> Decimal {
        round_to_cents(self.other_deductions)
    }

    /// Taxes rounded to cents.
    pub fn rounded_taxes(&self) -> Decimal {
        round_to_cents(self.taxes)
    }

    /// Net pay: `round2(gross − deductions − taxes)` on the rounded figures.
    pub fn net_pay(&self) -> Decimal {
        round_to_cents(self.rounded_gross() - self.rounded_deductions() - self.rounded_taxes())
    }

    fn push_non_zero(
        self,
        component: &SalaryComponent,
        item_type: PayslipItemType,
        amount: Decimal,
    ) -> Self {
        if amount.is_zero() {
            self
        } else {
            self.push_line(PayslipLine::new(component, item_type, amount))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalculationMode, ComponentCategory};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn component(taxable: bool, social: bool, health: bool) -> SalaryComponent {
        SalaryComponent {
            id: Uuid::new_v4(),
            tenant_id: None,
            name: "Line".to_string(),
            category: ComponentCategory::Earning,
            calculation_mode: CalculationMode::Fixed,
            amount: None,
            percentage: None,
            is_taxable: taxable,
            is_social_security_base: social,
            is_health_insurance_base: health,
            system_code: None,
        }
    }

    #[test]
    fn test_earning_feeds_only_flagged_bases() {
        let acc = PayslipAccumulator::new()
            .add_earning(&component(true, true, false), dec("1000"))
            .add_earning(&component(false, false, true), dec("200"));

        assert_eq!(acc.gross_pay, dec("1200"));
        assert_eq!(acc.taxable_base, dec("1000"));
        assert_eq!(acc.social_security_base, dec("1000"));
        assert_eq!(acc.health_insurance_base, dec("200"));
        assert_eq!(acc.lines.len(), 2);
    }

    #[test]
    fn test_add_to_bases_matches_earning_without_a_line() {
        let line = component(true, false, true);
        let via_bases = PayslipAccumulator::new().add_to_bases(&line, dec("750"));
        let via_earning = PayslipAccumulator::new().add_earning(&line, dec("750"));

        assert!(via_bases.lines.is_empty());
        assert_eq!(via_bases.gross_pay, via_earning.gross_pay);
        assert_eq!(via_bases.taxable_base, via_earning.taxable_base);
        assert_eq!(via_bases.social_security_base, Decimal::ZERO);
        assert_eq!(via_bases.health_insurance_base, via_earning.health_insurance_base);
    }

    #[test]
    fn test_zero_amounts_emit_no_line() {
        let acc =
            PayslipAccumulator::new().add_earning(&component(true, true, true), Decimal::ZERO);
        assert!(acc.lines.is_empty());
    }

    #[test]
    fn test_taxable_deduction_reduces_taxable_base() {
        let acc = PayslipAccumulator::new()
            .add_earning(&component(true, false, false), dec("1000"))
            .add_deduction(&component(true, false, false), dec("100"))
            .add_deduction(&component(false, false, false), dec("50"));

        assert_eq!(acc.taxable_base, dec("900"));
        assert_eq!(acc.other_deductions, dec("150"));
    }

    #[test]
    fn test_contribution_is_tax_and_deductible() {
        let acc = PayslipAccumulator::new()
            .add_earning(&component(true, false, false), dec("1000"))
            .add_contribution(&component(false, false, false), dec("44.80"));

        assert_eq!(acc.taxes, dec("44.80"));
        assert_eq!(acc.taxable_base, dec("955.20"));
        assert_eq!(acc.lines[1].item_type, PayslipItemType::Tax);
    }

    #[test]
    fn test_record_numbers_steps_sequentially() {
        let acc = PayslipAccumulator::new()
            .record("a", "A", serde_json::json!({}), serde_json::json!({}), "first".to_string())
            .record("b", "B", serde_json::json!({}), serde_json::json!({}), "second".to_string());

        let numbers: Vec<u32> = acc.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_net_pay_identity() {
        let acc = PayslipAccumulator {
            gross_pay: dec("12500"),
            other_deductions: dec("150.004"),
            taxes: dec("2223.79"),
            ..PayslipAccumulator::new()
        };

        assert_eq!(acc.rounded_deductions(), dec("150.00"));
        assert_eq!(acc.net_pay(), dec("10126.21"));
    }
}
