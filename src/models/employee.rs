//! Employee model and related types.
//!
//! This module defines the Employee struct and EmploymentStatus enum
//! for representing the workers a payroll run is computed for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AssignedComponent;

/// Represents the employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed and paid.
    Active,
    /// On leave or suspended; excluded from payroll.
    Inactive,
    /// No longer employed.
    Terminated,
}

/// Represents an employee of a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// The tenant the employee belongs to.
    pub tenant_id: Uuid,
    /// The tenant-specific employee number (e.g., "EMP-0001").
    pub employee_number: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employment status.
    pub status: EmploymentStatus,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// The date the employment ended, if any.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
}

impl Employee {
    /// Returns true if the employee must be paid for the given period.
    ///
    /// An employee is eligible when active, hired on or before the period end,
    /// and not terminated before the period start.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmploymentStatus};
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    ///
    /// let employee = Employee {
    ///     id: Uuid::new_v4(),
    ///     tenant_id: Uuid::new_v4(),
    ///     employee_number: "EMP-0001".to_string(),
    ///     first_name: "Amina".to_string(),
    ///     last_name: "Haddad".to_string(),
    ///     status: EmploymentStatus::Active,
    ///     hire_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     termination_date: None,
    /// };
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    /// assert!(employee.is_eligible_for(start, end));
    /// ```
    pub fn is_eligible_for(&self, period_start: NaiveDate, period_end: NaiveDate) -> bool {
        self.status == EmploymentStatus::Active
            && self.hire_date <= period_end
            && self
                .termination_date
                .is_none_or(|terminated| terminated >= period_start)
    }

    /// Returns the employee's display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An eligible employee joined with their currently-active component settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRoster {
    /// The employee.
    pub employee: Employee,
    /// Active settings, each with its component template.
    pub components: Vec<AssignedComponent>,
}
