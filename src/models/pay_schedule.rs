//! Tenant and pay schedule models.
//!
//! This module contains the [`Tenant`] and [`PaySchedule`] records the engine
//! reads before opening a payroll transaction, and the [`Frequency`] cadence
//! used to resolve period boundaries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant (company) whose employees are paid by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique identifier for the tenant.
    pub id: Uuid,
    /// The tenant's display name.
    pub name: String,
}

/// The cadence of a pay schedule.
///
/// Unrecognised values deserialize to [`Frequency::Custom`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::Frequency;
///
/// let frequency: Frequency = serde_json::from_str("\"bi_weekly\"").unwrap();
/// assert_eq!(frequency, Frequency::BiWeekly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every week; a period spans seven days.
    Weekly,
    /// Every two weeks; a period spans fourteen days.
    BiWeekly,
    /// Twice a month: the 1st-15th and the 16th-end of month.
    SemiMonthly,
    /// Once a month.
    Monthly,
    /// Any other cadence; resolved as monthly with a warning.
    #[serde(other)]
    Custom,
}

impl Frequency {
    /// Returns the snake_case name of the frequency.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi_weekly",
            Frequency::SemiMonthly => "semi_monthly",
            Frequency::Monthly => "monthly",
            Frequency::Custom => "custom",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tenant's pay schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySchedule {
    /// Unique identifier for the schedule.
    pub id: Uuid,
    /// The tenant that owns the schedule.
    pub tenant_id: Uuid,
    /// The schedule's display name (e.g., "Monthly staff").
    pub name: String,
    /// The pay cadence.
    pub frequency: Frequency,
}

impl PaySchedule {
    /// Returns true if the schedule belongs to the given tenant.
    pub fn belongs_to(&self, tenant_id: Uuid) -> bool {
        self.tenant_id == tenant_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_serialization() {
        assert_eq!(
            serde_json::to_string(&Frequency::SemiMonthly).unwrap(),
            "\"semi_monthly\""
        );
        assert_eq!(
            serde_json::to_string(&Frequency::BiWeekly).unwrap(),
            "\"bi_weekly\""
        );
    }

    #[test]
    fn test_unknown_frequency_deserializes_to_custom() {
        let frequency: Frequency = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(frequency, Frequency::Custom);

        let frequency: Frequency = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(frequency, Frequency::Custom);
    }

    #[test]
    fn test_frequency_display_matches_serde_name() {
        for frequency in [
            Frequency::Weekly,
            Frequency::BiWeekly,
            Frequency::SemiMonthly,
            Frequency::Monthly,
        ] {
            assert_eq!(
                serde_json::to_string(&frequency).unwrap(),
                format!("\"{}\"", frequency)
            );
        }
    }

    #[test]
    fn test_schedule_belongs_to_owner_only() {
        let tenant_id = Uuid::new_v4();
        let schedule = PaySchedule {
            id: Uuid::new_v4(),
            tenant_id,
            name: "Monthly staff".to_string(),
            frequency: Frequency::Monthly,
        };
        assert!(schedule.belongs_to(tenant_id));
        assert!(!schedule.belongs_to(Uuid::new_v4()));
    }
}
