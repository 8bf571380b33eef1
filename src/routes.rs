//! Views the console can show.

use std::fmt;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    SignIn,
    SignUp,
    Campaigns,
    #[default]
    Billboards,
    Locations,
    CampaignBillboards(Uuid),
}

impl Route {
    /// Views listed in the navigation bar, in order.
    pub const NAV: [Route; 3] = [Route::Campaigns, Route::Billboards, Route::Locations];

    pub fn path(self) -> String {
        match self {
            Route::SignIn => "/auth/signin".to_string(),
            Route::SignUp => "/auth/signup".to_string(),
            Route::Campaigns => "/campaigns".to_string(),
            Route::Billboards => "/billboards".to_string(),
            Route::Locations => "/locations".to_string(),
            Route::CampaignBillboards(id) => format!("/campaign-billboards/{id}"),
        }
    }

    /// Parses a path; `/` lands on the default view.
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::default()),
            "/auth/signin" => Some(Route::SignIn),
            "/auth/signup" => Some(Route::SignUp),
            "/campaigns" => Some(Route::Campaigns),
            "/billboards" => Some(Route::Billboards),
            "/locations" => Some(Route::Locations),
            other => other
                .strip_prefix("/campaign-billboards/")
                .and_then(|id| Uuid::parse_str(id).ok())
                .map(Route::CampaignBillboards),
        }
    }

    /// Sign-in and sign-up do not need a session.
    pub fn is_auth(self) -> bool {
        matches!(self, Route::SignIn | Route::SignUp)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::SignIn => "Sign in",
            Route::SignUp => "Sign up",
            Route::Campaigns => "Campaigns",
            Route::Billboards => "Billboards",
            Route::Locations => "Locations",
            Route::CampaignBillboards(_) => "Campaign billboards",
        }
    }

    /// Index in [`Route::NAV`]; the campaign-billboards view sits under Campaigns.
    pub fn nav_index(self) -> Option<usize> {
        match self {
            Route::Campaigns | Route::CampaignBillboards(_) => Some(0),
            Route::Billboards => Some(1),
            Route::Locations => Some(2),
            Route::SignIn | Route::SignUp => None,
        }
    }

    /// Next navigation tab, wrapping around.
    pub fn next_nav(self) -> Self {
        let next = self.nav_index().map_or(0, |i| (i + 1) % Self::NAV.len());
        Self::NAV[next]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
