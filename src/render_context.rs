use throbber_widgets_tui::ThrobberState;

use crate::data::{Billboard, Campaign, Location};
use crate::modal::Modal;
use crate::notifications::Toast;
use crate::routes::Route;
use crate::state::{AuthState, CampaignBillboardsState, CollectionState};

/// Read-only snapshot of app state handed to the screen for one frame.
pub struct RenderContext<'a> {
    pub route: Route,
    pub authenticated: bool,

    // Resource tables
    pub billboards: &'a CollectionState<Billboard>,
    pub locations: &'a CollectionState<Location>,
    pub campaigns: &'a CollectionState<Campaign>,
    pub campaign_billboards: Option<&'a CampaignBillboardsState>,

    pub auth: &'a AuthState,
    pub modal: Option<&'a Modal>,

    // Status bar
    pub toast: Option<&'a Toast>,
    pub activity: Option<&'a str>,

    pub show_help: bool,
    pub throbber: &'a ThrobberState,
}

impl RenderContext<'_> {
    /// Key hints for the status bar, depending on what has focus.
    pub fn key_hints(&self) -> &'static str {
        match (self.modal, self.route) {
            (Some(Modal::Editor(_)), _) => "Tab/↑↓ Field  ←→ Choose  Enter Save  Esc Cancel",
            (Some(Modal::ConfirmDelete(_)), _) => "Enter/y Delete  Esc/n Cancel",
            (None, Route::SignIn | Route::SignUp) => {
                "Tab Field  Enter Submit  Ctrl-N Sign in/up  Ctrl-C Quit"
            }
            (None, Route::CampaignBillboards(_)) => {
                "Tab Pane  a Add  r Remove  ←→ Page  Esc Back  ? Help"
            }
            (None, Route::Campaigns) => "n New  e Edit  d Delete  Enter Billboards  ←→ Page  ? Help",
            (None, _) => "n New  e Edit  d Delete  ←→ Page  R Reload  ? Help",
        }
    }

    /// Left half of the status bar: activity first, then the newest toast.
    pub fn status_text(&self) -> String {
        if let Some(activity) = self.activity {
            return crate::notifications::progress(activity);
        }
        match self.toast {
            Some(toast) => toast.to_string(),
            None => "Ready | Press ? for help".to_string(),
        }
    }
}
