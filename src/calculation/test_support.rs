//! Builders shared by the pass tests.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    AssignedComponent, CalculationMode, ComponentCategory, ComponentRole, Employee,
    EmployeeRoster, EmployeeSalarySetting, EmploymentStatus, SalaryComponent,
};

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Assigns a component whose value lives on the employee setting.
///
/// Earnings count towards every base; deductions and statutory lines towards none.
pub fn component(
    code: &str,
    category: ComponentCategory,
    mode: CalculationMode,
    value: Option<Decimal>,
) -> AssignedComponent {
    let flagged = category == ComponentCategory::Earning
        && !matches!(
            ComponentRole::from_system_code(code),
            Some(
                ComponentRole::SocialSecurity
                    | ComponentRole::HealthInsurance
                    | ComponentRole::IncomeTax
            )
        );
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
    let (amount, percentage) = match mode {
        CalculationMode::Fixed => (value, None),
        CalculationMode::Percentage => (None, value),
        CalculationMode::Formula => (None, None),
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

pub fn roster_with(components: Vec<AssignedComponent>) -> EmployeeRoster {
    EmployeeRoster {
        employee: Employee {
            id: Uuid::nil(),
            tenant_id: Uuid::nil(),
            employee_number: "EMP-0001".to_string(),
            first_name: "Youssef".to_string(),
            last_name: "Bennani".to_string(),
            status: EmploymentStatus::Active,
            hire_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
            termination_date: None,
        },
        components,
    }
}

/// Base 12 000, a non-taxable allowance of 500, both contributions and income tax.
pub fn reference_roster() -> EmployeeRoster {
    let mut allowance = component(
        "TRANSPORT",
        ComponentCategory::Earning,
        CalculationMode::Fixed,
        Some(dec("500")),
    );
    allowance.component.is_taxable = false;
    allowance.component.is_social_security_base = false;
    allowance.component.is_health_insurance_base = false;

    roster_with(vec![
        component(
            "BASE_SALARY",
            ComponentCategory::Earning,
            CalculationMode::Fixed,
            Some(dec("12000")),
        ),
        allowance,
        component(
            "CNSS",
            ComponentCategory::Deduction,
            CalculationMode::Percentage,
            Some(dec("4.48")),
        ),
        component(
            "AMO",
            ComponentCategory::Deduction,
            CalculationMode::Percentage,
            Some(dec("2.26")),
        ),
        component(
            "IR",
            ComponentCategory::Deduction,
            CalculationMode::Formula,
            None,
        ),
    ])
}
