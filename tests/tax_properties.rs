//! Property-based tests for the income-tax scale and payslip arithmetic.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use payroll_engine::calculation::{calculate_payslip, compute_annual_tax, monthly_income_tax};
use payroll_engine::config::{StatutoryConfig, standard_tax_brackets};
use payroll_engine::models::{
    AssignedComponent, CalculationMode, ComponentCategory, Employee, EmployeeRoster,
    EmployeeSalarySetting, EmploymentStatus, PayslipItemType, SalaryComponent,
};

/// Annual bases from zero to two million, in cents.
fn annual_base() -> impl Strategy<Value = Decimal> {
    (0i64..200_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Monthly amounts between the given bounds, in cents.
fn monthly_amount(min_cents: i64, max_cents: i64) -> impl Strategy<Value = Decimal> {
    (min_cents..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn assigned(
    code: &str,
    category: ComponentCategory,
    mode: CalculationMode,
    amount: Option<Decimal>,
    percentage: Option<Decimal>,
    flagged: bool,
) -> AssignedComponent {
    let component = SalaryComponent {
        id: Uuid::new_v4(),
        tenant_id: None,
        name: code.to_string(),
        category,
        calculation_mode: mode,
        amount: None,
        percentage: None,
        is_taxable: flagged,
        is_social_security_base: flagged,
        is_health_insurance_base: flagged,
        system_code: Some(code.to_string()),
    };
    AssignedComponent {
        setting: EmployeeSalarySetting {
            id: Uuid::new_v4(),
            employee_id: Uuid::nil(),
            component_id: component.id,
            amount,
            percentage,
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            is_active: true,
        },
        component,
    }
}

fn roster(base_salary: Decimal, allowance: Decimal, loan: Decimal) -> EmployeeRoster {
    use CalculationMode::{Fixed, Formula, Percentage};
    use ComponentCategory::{Deduction, Earning};

    EmployeeRoster {
        employee: Employee {
            id: Uuid::nil(),
            tenant_id: Uuid::nil(),
            employee_number: "EMP-0001".to_string(),
            first_name: "Salma".to_string(),
            last_name: "Idrissi".to_string(),
            status: EmploymentStatus::Active,
            hire_date: NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
            termination_date: None,
        },
        components: vec![
            assigned("BASE_SALARY", Earning, Fixed, Some(base_salary), None, true),
            assigned("TRANSPORT", Earning, Fixed, Some(allowance), None, false),
            assigned("CNSS", Deduction, Percentage, None, Some(Decimal::new(448, 2)), false),
            assigned("AMO", Deduction, Percentage, None, Some(Decimal::new(226, 2)), false),
            assigned("IR", Deduction, Formula, None, None, false),
            assigned("LOAN", Deduction, Fixed, Some(loan), None, false),
        ],
    }
}

proptest! {
    /// Property: the annual tax is never negative, and zero up to 30 000.
    #[test]
    fn prop_tax_is_non_negative(base in annual_base()) {
        let tax = compute_annual_tax(base, &standard_tax_brackets());

        prop_assert!(tax >= Decimal::ZERO);
        if base <= Decimal::new(30_000, 0) {
            prop_assert_eq!(tax, Decimal::ZERO);
        }
    }

    /// Property: a larger base never yields less tax.
    #[test]
    fn prop_tax_is_monotonic(a in annual_base(), b in annual_base()) {
        let brackets = standard_tax_brackets();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        prop_assert!(compute_annual_tax(low, &brackets) <= compute_annual_tax(high, &brackets));
    }

    /// Property: one more cent of base adds at most one cent of tax.
    #[test]
    fn prop_tax_has_no_jumps(base in annual_base()) {
        let brackets = standard_tax_brackets();
        let next = base + Decimal::new(1, 2);

        let step = compute_annual_tax(next, &brackets) - compute_annual_tax(base, &brackets);

        prop_assert!(step >= Decimal::ZERO);
        prop_assert!(step <= Decimal::new(1, 2));
    }

    /// Property: the monthly withholding is a twelfth of the annual tax, to the cent.
    #[test]
    fn prop_monthly_tax_is_a_twelfth(base in annual_base()) {
        let annual = compute_annual_tax(base, &standard_tax_brackets());
        let monthly = monthly_income_tax(annual);

        prop_assert!(monthly.scale() <= 2);
        prop_assert!((monthly * Decimal::from(12) - annual).abs() <= Decimal::new(6, 2));
    }

    /// Property: every payslip satisfies net = gross − deductions − taxes,
    /// and its items add up to the headline figures.
    #[test]
    fn prop_payslip_identities_hold(
        base_salary in monthly_amount(100_00, 60_000_00),
        allowance in monthly_amount(0, 2_000_00),
        loan in monthly_amount(0, 1_000_00),
    ) {
        let roster = roster(base_salary, allowance, loan);
        let payslip = calculate_payslip(&roster, &StatutoryConfig::standard(), Uuid::new_v4())
            .unwrap();

        prop_assert_eq!(payslip.gross_pay, base_salary + allowance);
        prop_assert_eq!(payslip.net_pay, payslip.gross_pay - payslip.deductions - payslip.taxes);
        prop_assert_eq!(payslip.total_of(PayslipItemType::Earning), payslip.gross_pay);
        prop_assert_eq!(payslip.total_of(PayslipItemType::Deduction), payslip.deductions);
        prop_assert_eq!(payslip.total_of(PayslipItemType::Tax), payslip.taxes);
        prop_assert_eq!(payslip.deductions, loan);
    }

    /// Property: the social-security line never exceeds the rate on the ceiling.
    #[test]
    fn prop_social_security_is_capped(base_salary in monthly_amount(100_00, 200_000_00)) {
        let roster = roster(base_salary, Decimal::ZERO, Decimal::ZERO);
        let payslip = calculate_payslip(&roster, &StatutoryConfig::standard(), Uuid::new_v4())
            .unwrap();

        let cnss = payslip.item_by_code("CNSS").map(|item| item.amount).unwrap_or_default();
        prop_assert!(cnss <= Decimal::new(26_880, 2));
    }
}
