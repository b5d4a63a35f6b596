//! Salary component templates and per-employee settings.
//!
//! A [`SalaryComponent`] describes one payroll line type (base salary, an
//! allowance, a statutory contribution...). An [`EmployeeSalarySetting`]
//! assigns a component to an employee, optionally overriding its default
//! amount or percentage.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Whether a component adds to or takes from the employee's pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    /// Adds to gross pay.
    Earning,
    /// Reduces net pay.
    Deduction,
}

/// How the amount of a component is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// A fixed monthly amount.
    Fixed,
    /// A percentage of a base (base salary, or a contribution base for statutory lines).
    Percentage,
    /// An expression evaluated by an external formula engine.
    Formula,
}

/// The statutory roles the engine recognises by system code.
///
/// Role-tagged components are handled by dedicated passes of the payslip
/// pipeline instead of the generic fixed/percentage passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentRole {
    /// The employee's base salary; seeds percentage components.
    BaseSalary,
    /// First statutory contribution, computed on a capped base.
    SocialSecurity,
    /// Second statutory contribution, computed on an uncapped base.
    HealthInsurance,
    /// The monthly income-tax withholding line.
    IncomeTax,
}

impl ComponentRole {
    /// All recognised roles, in pipeline order.
    pub const ALL: [ComponentRole; 4] = [
        ComponentRole::BaseSalary,
        ComponentRole::SocialSecurity,
        ComponentRole::HealthInsurance,
        ComponentRole::IncomeTax,
    ];

    /// Returns the system code that identifies this role.
    pub fn system_code(self) -> &'static str {
        match self {
            ComponentRole::BaseSalary => "BASE_SALARY",
            ComponentRole::SocialSecurity => "CNSS",
            ComponentRole::HealthInsurance => "AMO",
            ComponentRole::IncomeTax => "IR",
        }
    }

    /// Maps a system code to its role, if it is one the engine recognises.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::ComponentRole;
    ///
    /// assert_eq!(ComponentRole::from_system_code("CNSS"), Some(ComponentRole::SocialSecurity));
    /// assert_eq!(ComponentRole::from_system_code("TRANSPORT"), None);
    /// ```
    pub fn from_system_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.system_code() == code)
    }
}

/// A template describing one payroll line type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Unique identifier for the component.
    pub id: Uuid,
    /// The owning tenant; `None` for system-wide components.
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    /// The display name (e.g., "Transport allowance").
    pub name: String,
    /// Earning or deduction.
    pub category: ComponentCategory,
    /// Fixed, percentage or formula.
    pub calculation_mode: CalculationMode,
    /// Default monthly amount, for fixed components.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Default percentage (e.g., 4.48 for 4.48%), for percentage components.
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// Whether the line counts towards the income-tax base.
    pub is_taxable: bool,
    /// Whether the line counts towards the social-security contribution base.
    pub is_social_security_base: bool,
    /// Whether the line counts towards the health-insurance contribution base.
    pub is_health_insurance_base: bool,
    /// Stable code used to recognise well-known components.
    #[serde(default)]
    pub system_code: Option<String>,
}

impl SalaryComponent {
    /// Returns the statutory role of this component, if any.
    pub fn role(&self) -> Option<ComponentRole> {
        self.system_code
            .as_deref()
            .and_then(ComponentRole::from_system_code)
    }

    /// Returns the system code, or the display name when no code is set.
    pub fn label(&self) -> &str {
        self.system_code.as_deref().unwrap_or(&self.name)
    }

    /// Checks that the default amount/percentage agree with the calculation mode.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedComponent`] when a value is set that
    /// the calculation mode does not use.
    pub fn validate(&self) -> EngineResult<()> {
        let violation = match self.calculation_mode {
            CalculationMode::Fixed if self.percentage.is_some() => {
                Some("fixed component must not carry a percentage")
            }
            CalculationMode::Percentage if self.amount.is_some() => {
                Some("percentage component must not carry a fixed amount")
            }
            CalculationMode::Formula if self.amount.is_some() || self.percentage.is_some() => {
                Some("formula component must not carry an amount or percentage")
            }
            _ => None,
        };

        match violation {
            Some(message) => Err(EngineError::MalformedComponent {
                component: self.label().to_string(),
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// A component assigned to an employee with employee-specific values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalarySetting {
    /// Unique identifier for the setting.
    pub id: Uuid,
    /// The employee the component is assigned to.
    pub employee_id: Uuid,
    /// The assigned component.
    pub component_id: Uuid,
    /// Overrides the component's default amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Overrides the component's default percentage.
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// The date from which this setting applies.
    pub effective_date: NaiveDate,
    /// Only active settings take part in payroll.
    pub is_active: bool,
}

/// An active setting joined with its component template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedComponent {
    /// The employee-specific setting.
    pub setting: EmployeeSalarySetting,
    /// The component template.
    pub component: SalaryComponent,
}

impl AssignedComponent {
    /// Returns the monthly amount for a fixed component.
    ///
    /// The setting override wins over the template default; a component with
    /// neither contributes zero.
    pub fn fixed_amount(&self) -> Decimal {
        self.setting
            .amount
            .or(self.component.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the percentage for a percentage component.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedComponent`] when neither the setting
    /// nor the template carries a percentage.
    pub fn percentage(&self) -> EngineResult<Decimal> {
        self.setting
            .percentage
            .or(self.component.percentage)
            .ok_or_else(|| EngineError::MalformedComponent {
                component: self.component.label().to_string(),
                message: "percentage component has no percentage value".to_string(),
            })
    }

    /// Returns true if the component uses the given category and mode.
    pub fn is(&self, category: ComponentCategory, mode: CalculationMode) -> bool {
        self.component.category == category && self.component.calculation_mode == mode
    }
}
