use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity flag values that mark a record as active (absent is stored as "")
pub const ACTIVE_FLAGS: [&str; 2] = ["", "w"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Active,
    Inactive,
}

impl ActivityStatus {
    pub fn from_flag(flag: Option<&str>) -> Self {
        if ACTIVE_FLAGS.contains(&flag.unwrap_or("")) {
            ActivityStatus::Active
        } else {
            ActivityStatus::Inactive
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityStatus::Active => write!(f, "active"),
            ActivityStatus::Inactive => write!(f, "inactive"),
        }
    }
}
