//! Payslip models.
//!
//! A [`Payslip`] is one employee's result for a payroll run; it owns the
//! immutable [`PayslipItem`] lines that explain its figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuditTrace;

/// The classification of a payslip line.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayslipItemType;
///
/// assert_eq!(serde_json::to_string(&PayslipItemType::Tax).unwrap(), "\"tax\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipItemType {
    /// Adds to gross pay.
    Earning,
    /// A non-statutory deduction.
    Deduction,
    /// A statutory contribution or the income-tax withholding.
    Tax,
}

/// One line on a payslip.
///
/// Amounts are unsigned; the sign is implied by [`PayslipItemType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipItem {
    /// Unique identifier for the line.
    pub id: Uuid,
    /// The payslip this line belongs to.
    pub payslip_id: Uuid,
    /// The salary component the line originates from.
    pub component_id: Uuid,
    /// The component's system code at the time of the run.
    pub component_code: Option<String>,
    /// The component's display name at the time of the run.
    pub component_name: String,
    /// Earning, deduction or tax.
    pub item_type: PayslipItemType,
    /// The line amount, rounded to cents.
    pub amount: Decimal,
}

/// One employee's result for a payroll run.
///
/// Invariant: `net_pay == gross_pay - deductions - taxes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip.
    pub id: Uuid,
    /// The run that produced this payslip.
    pub payroll_run_id: Uuid,
    /// The employee being paid.
    pub employee_id: Uuid,
    /// The employee number at the time of the run.
    pub employee_number: String,
    /// Sum of all earnings.
    pub gross_pay: Decimal,
    /// Sum of non-statutory deductions.
    pub deductions: Decimal,
    /// Sum of statutory contributions and income tax.
    pub taxes: Decimal,
    /// Amount paid to the employee.
    pub net_pay: Decimal,
    /// The lines making up the payslip.
    pub items: Vec<PayslipItem>,
    /// How each figure was derived.
    pub audit_trace: AuditTrace,
}

impl Payslip {
    /// Returns the sum of all lines of the given type.
    pub fn total_of(&self, item_type: PayslipItemType) -> Decimal {
        self.items
            .iter()
            .filter(|item| item.item_type == item_type)
            .map(|item| item.amount)
            .sum()
    }

    /// Returns the line originating from the component with the given code.
    pub fn item_by_code(&self, code: &str) -> Option<&PayslipItem> {
        self.items
            .iter()
            .find(|item| item.component_code.as_deref() == Some(code))
    }
}
