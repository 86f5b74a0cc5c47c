//! Route table
//!
//! Authenticated pages and the screen the view layer should show for a given state.

use std::fmt;
use std::str::FromStr;

/// Pages reachable once signed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Dashboard,
    Food,
    Activity,
    Profile,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[Route::Dashboard, Route::Food, Route::Activity, Route::Profile]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Food => "/food",
            Route::Activity => "/activity",
            Route::Profile => "/profile",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        match trimmed {
            "" => Ok(Route::Dashboard),
            "food" => Ok(Route::Food),
            "activity" => Ok(Route::Activity),
            "profile" => Ok(Route::Profile),
            _ => Err(format!("no route for path: {}", s)),
        }
    }
}

/// What the view layer renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Session restore still in flight
    Loading,
    /// Nobody signed in
    Login,
    Page(Route),
}
