// Visibility filtering for the task list

use crate::models::Task;
use eyre::eyre;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// View mode restricting which tasks are visible
///
/// `All` is the default. The enum is the whole domain of `set_filter`;
/// out-of-enum input only exists at the string-parse boundary, where it
/// is rejected with a validation error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Whether a task is visible under this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

impl FromStr for Filter {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("all") {
            Ok(Filter::All)
        } else if name.eq_ignore_ascii_case("active") {
            Ok(Filter::Active)
        } else if name.eq_ignore_ascii_case("completed") {
            Ok(Filter::Completed)
        } else {
            Err(eyre!("Unknown filter: {} (expected all, active or completed)", s))
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "all"),
            Filter::Active => write!(f, "active"),
            Filter::Completed => write!(f, "completed"),
        }
    }
}
