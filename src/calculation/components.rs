//! Resolution of an employee's assigned components into typed roles.
//!
//! Statutory components are recognised once per employee by system code; the
//! passes then work on typed references instead of re-testing codes.

use crate::error::{EngineError, EngineResult};
use crate::models::{AssignedComponent, CalculationMode, ComponentRole, EmployeeRoster};

/// An employee's components, split by statutory role.
#[derive(Debug, Clone)]
pub struct ResolvedComponents<'a> {
    /// The base-salary component.
    pub base_salary: &'a AssignedComponent,
    /// The capped statutory contribution, if assigned.
    pub social_security: Option<&'a AssignedComponent>,
    /// The uncapped statutory contribution, if assigned.
    pub health_insurance: Option<&'a AssignedComponent>,
    /// The income-tax line, if assigned.
    pub income_tax: Option<&'a AssignedComponent>,
    /// Every other active component, in assignment order.
    pub others: Vec<&'a AssignedComponent>,
}

impl<'a> ResolvedComponents<'a> {
    /// Validates and classifies the active components of a roster entry.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MalformedComponent`] if a component violates its
    ///   calculation-mode invariant, a role or component has two active
    ///   settings, or the base salary is not a fixed component
    /// - [`EngineError::MissingComponent`] if no base-salary component is assigned
    pub fn resolve(roster: &'a EmployeeRoster) -> EngineResult<Self> {
        let mut base_salary = None;
        let mut social_security = None;
        let mut health_insurance = None;
        let mut income_tax = None;
        let mut others: Vec<&AssignedComponent> = Vec::new();

        for assigned in roster.components.iter().filter(|c| c.setting.is_active) {
            assigned.component.validate()?;

            let slot = match assigned.component.role() {
                Some(ComponentRole::BaseSalary) => &mut base_salary,
                Some(ComponentRole::SocialSecurity) => &mut social_security,
                Some(ComponentRole::HealthInsurance) => &mut health_insurance,
                Some(ComponentRole::IncomeTax) => &mut income_tax,
                None => {
                    if others.iter().any(|o| o.component.id == assigned.component.id) {
                        return Err(assigned_twice(assigned, roster));
                    }
                    others.push(assigned);
                    continue;
                }
            };

            if slot.replace(assigned).is_some() {
                return Err(assigned_twice(assigned, roster));
            }
        }

        let base_salary = base_salary.ok_or_else(|| EngineError::MissingComponent {
            employee_id: roster.employee.id,
            component: ComponentRole::BaseSalary.system_code().to_string(),
        })?;

        if base_salary.component.calculation_mode != CalculationMode::Fixed {
            return Err(EngineError::MalformedComponent {
                component: base_salary.component.label().to_string(),
                message: "base salary must be a fixed component".to_string(),
            });
        }

        Ok(Self {
            base_salary,
            social_security,
            health_insurance,
            income_tax,
            others,
        })
    }

    /// Returns the non-role components with the given mode.
    pub fn others_in_mode(
        &self,
        mode: CalculationMode,
    ) -> impl Iterator<Item = &'a AssignedComponent> + '_ {
        self.others
            .iter()
            .copied()
            .filter(move |c| c.component.calculation_mode == mode)
    }
}

fn assigned_twice(assigned: &AssignedComponent, roster: &EmployeeRoster) -> EngineError {
    EngineError::MalformedComponent {
        component: assigned.component.label().to_string(),
        message: format!("assigned more than once to employee {}", roster.employee.id),
    }
}
