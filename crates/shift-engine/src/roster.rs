//! Display names for the two rotating roles.

use serde::{Deserialize, Serialize};

use crate::shift::ShiftRole;

/// Who fills each role and how the role's day is described.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Person on shift during the first half of the cycle.
    pub on_name: String,
    /// Person on shift during the second half.
    pub off_name: String,
    pub on_hours: String,
    pub off_hours: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            on_name: "Daniel".to_string(),
            off_name: "Michael".to_string(),
            on_hours: "12h shift".to_string(),
            off_hours: "Rest".to_string(),
        }
    }
}

impl RosterConfig {
    pub fn name_for(&self, role: ShiftRole) -> &str {
        match role {
            ShiftRole::RoleA => &self.on_name,
            ShiftRole::RoleB => &self.off_name,
        }
    }

    pub fn hours_for(&self, role: ShiftRole) -> &str {
        match role {
            ShiftRole::RoleA => &self.on_hours,
            ShiftRole::RoleB => &self.off_hours,
        }
    }
}
