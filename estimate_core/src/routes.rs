//! Screens of the application and the paths they answer to.

use serde::{Deserialize, Serialize};

/// A navigable screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Route {
    /// The estimation form
    #[default]
    Intake,
    /// The rendered estimation report
    Report,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Intake, Route::Report];

    /// Resolve a path; unknown paths land on the form.
    pub fn from_path(path: &str) -> Route {
        match path.trim().trim_end_matches('/') {
            "" => Route::Intake,
            "/estimation" => Route::Report,
            other => {
                tracing::debug!(path = other, "unknown route, falling back to intake");
                Route::Intake
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Intake => "/",
            Route::Report => "/estimation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Route::Intake => "New Estimate",
            Route::Report => "Estimation Report",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
