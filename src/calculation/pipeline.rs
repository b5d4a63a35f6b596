//! The per-employee payslip pipeline.
//!
//! Pass order is fixed: later passes read totals produced by earlier ones, so
//! reordering changes tax outcomes.

use std::time::Instant;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::StatutoryConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditTrace, AuditWarning, CalculationMode, EmployeeRoster, Payslip, PayslipItem,
};

use super::accumulator::PayslipAccumulator;
use super::base_salary::apply_base_salary;
use super::components::ResolvedComponents;
use super::fixed_deductions::apply_fixed_deductions;
use super::fixed_earnings::apply_fixed_earnings;
use super::income_tax::apply_income_tax;
use super::percentage_components::apply_percentage_components;
use super::professional_expenses::apply_professional_expenses;
use super::statutory_contributions::{apply_statutory_contributions, cap_contribution_bases};

/// Warning code for components whose calculation mode the engine does not evaluate.
pub const FORMULA_NOT_SUPPORTED: &str = "FORMULA_NOT_SUPPORTED";

/// Calculates one employee's payslip for a run.
///
/// # Errors
///
/// - [`crate::EngineError::MissingComponent`] if no base salary is assigned
/// - [`crate::EngineError::MalformedComponent`] if a component is inconsistent
///   or a percentage component has no percentage
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_payslip;
/// use payroll_engine::config::StatutoryConfig;
/// use payroll_engine::models::{
///     AssignedComponent, CalculationMode, ComponentCategory, Employee, EmployeeRoster,
///     EmployeeSalarySetting, EmploymentStatus, SalaryComponent,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let component = SalaryComponent {
///     id: Uuid::new_v4(),
///     tenant_id: None,
///     name: "Base salary".to_string(),
///     category: ComponentCategory::Earning,
///     calculation_mode: CalculationMode::Fixed,
///     amount: Some(Decimal::new(5_000, 0)),
///     percentage: None,
///     is_taxable: true,
///     is_social_security_base: true,
///     is_health_insurance_base: true,
///     system_code: Some("BASE_SALARY".to_string()),
/// };
/// let employee = Employee {
///     id: Uuid::new_v4(),
///     tenant_id: Uuid::new_v4(),
///     employee_number: "EMP-0001".to_string(),
///     first_name: "Salma".to_string(),
///     last_name: "Idrissi".to_string(),
///     status: EmploymentStatus::Active,
///     hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     termination_date: None,
/// };
/// let roster = EmployeeRoster {
///     components: vec![AssignedComponent {
///         setting: EmployeeSalarySetting {
///             id: Uuid::new_v4(),
///             employee_id: employee.id,
///             component_id: component.id,
///             amount: None,
///             percentage: None,
///             effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///             is_active: true,
///         },
///         component,
///     }],
///     employee,
/// };
///
/// let payslip = calculate_payslip(&roster, &StatutoryConfig::standard(), Uuid::new_v4()).unwrap();
/// assert_eq!(payslip.gross_pay, Decimal::new(5_000, 0));
/// assert_eq!(payslip.net_pay, Decimal::new(5_000, 0));
/// ```
pub fn calculate_payslip(
    roster: &EmployeeRoster,
    config: &StatutoryConfig,
    payroll_run_id: Uuid,
) -> EngineResult<Payslip> {
    let start = Instant::now();
    let components = ResolvedComponents::resolve(roster)?;

    let acc = PayslipAccumulator::new();
    let acc = flag_formula_components(acc, &components, roster);
    let acc = apply_base_salary(acc, &components);
    let acc = apply_fixed_earnings(acc, &components);
    let acc = apply_percentage_components(acc, &components)?;
    let acc = cap_contribution_bases(acc, config);
    let acc = apply_statutory_contributions(acc, &components)?;
    let acc = apply_professional_expenses(acc, config);
    let acc = apply_income_tax(acc, &components, config);
    let acc = apply_fixed_deductions(acc, &components);

    let payslip = into_payslip(acc, roster, payroll_run_id, start);
    debug!(
        employee_id = %roster.employee.id,
        employee_number = %roster.employee.employee_number,
        gross = %payslip.gross_pay,
        deductions = %payslip.deductions,
        taxes = %payslip.taxes,
        net = %payslip.net_pay,
        "Payslip calculated"
    );
    Ok(payslip)
}

fn flag_formula_components(
    acc: PayslipAccumulator,
    components: &ResolvedComponents<'_>,
    roster: &EmployeeRoster,
) -> PayslipAccumulator {
    components
        .others_in_mode(CalculationMode::Formula)
        .fold(acc, |acc, assigned| {
            let label = assigned.component.label();
            warn!(
                employee_id = %roster.employee.id,
                component = label,
                "Formula component skipped"
            );
            acc.warn(AuditWarning::new(
                FORMULA_NOT_SUPPORTED,
                format!("Formula component '{}' was not evaluated", label),
                "medium",
            ))
        })
}

fn into_payslip(
    acc: PayslipAccumulator,
    roster: &EmployeeRoster,
    payroll_run_id: Uuid,
    start: Instant,
) -> Payslip {
    let id = Uuid::new_v4();
    let gross_pay = acc.rounded_gross();
    let deductions = acc.rounded_deductions();
    let taxes = acc.rounded_taxes();
    let net_pay = acc.net_pay();

    let items = acc
        .lines
        .into_iter()
        .map(|line| PayslipItem {
            id: Uuid::new_v4(),
            payslip_id: id,
            component_id: line.component_id,
            component_code: line.component_code,
            component_name: line.component_name,
            item_type: line.item_type,
            amount: line.amount,
        })
        .collect();

    Payslip {
        id,
        payroll_run_id,
        employee_id: roster.employee.id,
        employee_number: roster.employee.employee_number.clone(),
        gross_pay,
        deductions,
        taxes,
        net_pay,
        items,
        audit_trace: AuditTrace {
            steps: acc.audit_steps,
            warnings: acc.warnings,
            duration_us: start.elapsed().as_micros() as u64,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::{component, dec, reference_roster, roster_with};
    use crate::error::EngineError;
    use crate::models::{ComponentCategory, PayslipItemType};

    fn calculate(roster: &EmployeeRoster) -> Payslip {
        calculate_payslip(roster, &StatutoryConfig::standard(), Uuid::new_v4()).unwrap()
    }

    #[test]
    fn test_reference_payslip() {
        let payslip = calculate(&reference_roster());

        assert_eq!(payslip.gross_pay, dec("12500"));
        assert_eq!(payslip.deductions, dec("0"));
        assert_eq!(payslip.taxes, dec("2223.79"));
        assert_eq!(payslip.net_pay, dec("10276.21"));
        assert_eq!(payslip.item_by_code("CNSS").unwrap().amount, dec("268.80"));
        assert_eq!(payslip.item_by_code("AMO").unwrap().amount, dec("271.20"));
        assert_eq!(payslip.item_by_code("IR").unwrap().amount, dec("1683.79"));
        assert_eq!(payslip.items.len(), 5);
    }

    #[test]
    fn test_item_totals_match_payslip_figures() {
        let payslip = calculate(&reference_roster());

        assert_eq!(payslip.total_of(PayslipItemType::Earning), payslip.gross_pay);
        assert_eq!(payslip.total_of(PayslipItemType::Tax), payslip.taxes);
        assert_eq!(payslip.total_of(PayslipItemType::Deduction), payslip.deductions);
        assert!(payslip.items.iter().all(|i| i.payslip_id == payslip.id));
    }

    #[test]
    fn test_audit_steps_follow_pass_order() {
        let payslip = calculate(&reference_roster());
        let rules: Vec<&str> = payslip
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rules,
            vec![
                "base_salary",
                "fixed_earning",
                "contribution_cap",
                "social_security",
                "health_insurance",
                "professional_expenses",
                "income_tax",
            ]
        );
    }

    #[test]
    fn test_without_income_tax_line_no_tax_is_withheld() {
        let roster = roster_with(vec![component(
            "BASE_SALARY",
            ComponentCategory::Earning,
            CalculationMode::Fixed,
            Some(dec("20000")),
        )]);
        let payslip = calculate(&roster);

        assert_eq!(payslip.taxes, rust_decimal::Decimal::ZERO);
        assert_eq!(payslip.net_pay, dec("20000"));
    }

    #[test]
    fn test_formula_component_is_skipped_with_warning() {
        let mut roster = reference_roster();
        roster.components.push(component(
            "OVERTIME",
            ComponentCategory::Earning,
            CalculationMode::Formula,
            None,
        ));
        let payslip = calculate(&roster);

        assert_eq!(payslip.gross_pay, dec("12500"));
        assert_eq!(payslip.audit_trace.warnings.len(), 1);
        assert_eq!(payslip.audit_trace.warnings[0].code, FORMULA_NOT_SUPPORTED);
    }

    #[test]
    fn test_fixed_deduction_comes_after_income_tax() {
        let mut roster = reference_roster();
        roster.components.push(component(
            "LOAN",
            ComponentCategory::Deduction,
            CalculationMode::Fixed,
            Some(dec("1000")),
        ));
        let payslip = calculate(&roster);

        assert_eq!(payslip.item_by_code("IR").unwrap().amount, dec("1683.79"));
        assert_eq!(payslip.deductions, dec("1000"));
        assert_eq!(payslip.net_pay, dec("9276.21"));
    }

    #[test]
    fn test_missing_base_salary_fails() {
        let roster = roster_with(vec![component(
            "TRANSPORT",
            ComponentCategory::Earning,
            CalculationMode::Fixed,
            Some(dec("500")),
        )]);

        assert!(matches!(
            calculate_payslip(&roster, &StatutoryConfig::standard(), Uuid::new_v4()),
            Err(EngineError::MissingComponent { .. })
        ));
    }
}
