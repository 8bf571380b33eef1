//! Application state and the event loop.
//!
//! `App` owns every piece of UI state and is only touched by the UI thread.
//! Network work goes through [`TaskManager`]; finished jobs are applied at the
//! end of each tick.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use ratatui::{DefaultTerminal, Frame};
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};

use crate::actions::{settle, Effect, Mutation, MutationKey};
use crate::api::{ApiClient, ApiError, Session};
use crate::async_task::{Job, JobOutput, TaskManager, ViewData};
use crate::columns::{available_actions, BillboardColumn, RowAction};
use crate::data::{
    Billboard, Campaign, Location, Resource, ADD_TO_CAMPAIGN, REMOVE_FROM_CAMPAIGN,
};
use crate::forms::{Choice, Form, FormKind, ValidationErrors};
use crate::key_handler::{InputMode, KeyAction, KeyHandler};
use crate::modal::{Modal, ModalHost};
use crate::notifications::{Toast, ToastQueue};
use crate::render_context::RenderContext;
use crate::routes::Route;
use crate::screen::Screen;
use crate::state::{AuthMode, AuthState, BillboardPane, CampaignBillboardsState, CollectionState};

/// How long the loop waits for input before polling background jobs.
pub const TICK: Duration = Duration::from_millis(100);

pub struct App {
    running: bool,
    session: Session,
    tasks: TaskManager,
    key_handler: KeyHandler,
    screen: Screen,
    route: Route,
    billboards: CollectionState<Billboard>,
    locations: CollectionState<Location>,
    campaigns: CollectionState<Campaign>,
    campaign_billboards: Option<CampaignBillboardsState>,
    auth: AuthState,
    modal: ModalHost,
    toasts: ToastQueue,
    show_help: bool,
    /// Label of the mutation in flight, for the status bar.
    activity: Option<&'static str>,
    /// A reload was requested while a load for the same view was pending.
    reload_queued: bool,
    /// The in-flight mutation submitted from the open modal, with that modal's id.
    modal_mutation: Option<(MutationKey, u64)>,
    throbber: ThrobberState,
    today: NaiveDate,
}

impl App {
    /// Starts on Billboards when `session` already carries a token, on sign-in otherwise.
    pub fn new(client: ApiClient, session: Session) -> Self {
        let start = if session.is_authenticated() {
            Route::Billboards
        } else {
            Route::SignIn
        };
        let mut app = Self {
            running: false,
            session,
            tasks: TaskManager::new(client),
            key_handler: KeyHandler::new(),
            screen: Screen::new(),
            route: start,
            billboards: CollectionState::new(),
            locations: CollectionState::new(),
            campaigns: CollectionState::new(),
            campaign_billboards: None,
            auth: AuthState::default(),
            modal: ModalHost::new(),
            toasts: ToastQueue::new(),
            show_help: false,
            activity: None,
            reload_queued: false,
            modal_mutation: None,
            throbber: ThrobberState::default(),
            today: Local::now().date_naive(),
        };
        app.navigate(start);
        app
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        info!(route = %self.route, "console started");
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            let action = self.key_handler.next_action(self.input_mode(), TICK)?;
            if self.handle_action(action) {
                self.quit();
            }
            self.poll_tasks();
            self.throbber.calc_next();
        }
        info!("console stopped");
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        self.screen.render(frame, &self.render_context());
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            route: self.route,
            authenticated: self.session.is_authenticated(),
            billboards: &self.billboards,
            locations: &self.locations,
            campaigns: &self.campaigns,
            campaign_billboards: self.campaign_billboards.as_ref(),
            auth: &self.auth,
            modal: self.modal.current(),
            toast: self.toasts.latest(),
            activity: self.activity,
            show_help: self.show_help,
            throbber: &self.throbber,
        }
    }

    fn quit(&mut self) {
        self.running = false;
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn modal(&self) -> &ModalHost {
        &self.modal
    }

    pub fn input_mode(&self) -> InputMode {
        match self.modal.current() {
            Some(Modal::Editor(_)) => InputMode::Typing,
            Some(Modal::ConfirmDelete(_)) => InputMode::Confirm,
            None if self.route.is_auth() => InputMode::Typing,
            None => InputMode::Navigate,
        }
    }

    /// Applies one key action. Returns `true` when the app should quit.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::None => false,
            KeyAction::Quit => true,
            action => {
                match self.input_mode() {
                    InputMode::Navigate => self.handle_navigate(action),
                    InputMode::Typing => self.handle_typing(action),
                    InputMode::Confirm => self.handle_confirm(action),
                }
                false
            }
        }
    }

    fn handle_navigate(&mut self, action: KeyAction) {
        if self.show_help {
            if matches!(action, KeyAction::Help | KeyAction::Back) {
                self.show_help = false;
            }
            return;
        }

        match action {
            KeyAction::Help => self.show_help = true,
            KeyAction::Back => {
                if let Route::CampaignBillboards(_) = self.route {
                    self.navigate(Route::Campaigns);
                }
            }
            KeyAction::NextView => match self.campaign_billboards.as_mut() {
                Some(state) => state.toggle_focus(),
                None => self.navigate(self.route.next_nav()),
            },
            KeyAction::JumpTo(index) => {
                if let Some(route) = Route::NAV.get(index) {
                    self.navigate(*route);
                }
            }
            KeyAction::NavigateUp
            | KeyAction::NavigateDown
            | KeyAction::PrevPage
            | KeyAction::NextPage => self.move_cursor(&action),
            KeyAction::Select => {
                if self.route == Route::Campaigns {
                    if let Some(id) = self.campaigns.selected_item().map(|c| c.id) {
                        self.navigate(Route::CampaignBillboards(id));
                    }
                }
            }
            KeyAction::New => self.open_editor(false),
            KeyAction::Edit => self.open_editor(true),
            KeyAction::Delete => self.confirm_delete(),
            KeyAction::AddToCampaign => self.change_association(BillboardPane::Available),
            KeyAction::RemoveFromCampaign => self.change_association(BillboardPane::Current),
            KeyAction::Reload => self.reload(),
            KeyAction::SignOut => self.sign_out(),
            _ => {}
        }
    }

    fn handle_typing(&mut self, action: KeyAction) {
        match action {
            KeyAction::Submit => self.submit_form(),
            KeyAction::Back => {
                if self.modal.is_open() {
                    self.modal.close();
                }
            }
            KeyAction::ToggleAuthMode if !self.modal.is_open() => {
                self.auth.toggle_mode();
                self.route = match self.auth.mode {
                    AuthMode::SignIn => Route::SignIn,
                    AuthMode::SignUp => Route::SignUp,
                };
            }
            action => {
                let Some(form) = self.focused_form() else {
                    return;
                };
                match action {
                    KeyAction::InputChar(c) => form.push_char(c),
                    KeyAction::Backspace => form.pop_char(),
                    KeyAction::NextField => form.focus_next(),
                    KeyAction::PrevField => form.focus_prev(),
                    KeyAction::CycleNext => form.cycle_choice(true),
                    KeyAction::CyclePrev => form.cycle_choice(false),
                    _ => {}
                }
            }
        }
    }

    fn handle_confirm(&mut self, action: KeyAction) {
        match action {
            KeyAction::Submit => {
                let mutation = match self.modal.current() {
                    Some(Modal::ConfirmDelete(confirm)) if !confirm.busy => confirm.mutation(),
                    _ => return,
                };
                self.start_mutation(mutation);
            }
            KeyAction::Back => self.modal.close(),
            _ => {}
        }
    }

    fn focused_form(&mut self) -> Option<&mut Form> {
        if let Some(editor) = self.modal.editor_mut() {
            return Some(&mut editor.form);
        }
        if self.route.is_auth() {
            return Some(&mut self.auth.form);
        }
        None
    }

    fn move_cursor(&mut self, action: &KeyAction) {
        fn apply<T>(state: &mut CollectionState<T>, action: &KeyAction) {
            match action {
                KeyAction::NavigateUp => {
                    state.select_prev();
                }
                KeyAction::NavigateDown => {
                    state.select_next();
                }
                KeyAction::PrevPage => {
                    state.prev_page();
                }
                KeyAction::NextPage => {
                    state.next_page();
                }
                _ => {}
            }
        }

        match self.route {
            Route::Billboards => apply(&mut self.billboards, action),
            Route::Locations => apply(&mut self.locations, action),
            Route::Campaigns => apply(&mut self.campaigns, action),
            Route::CampaignBillboards(_) => {
                if let Some(state) = self.campaign_billboards.as_mut() {
                    apply(state.focused_mut(), action);
                }
            }
            Route::SignIn | Route::SignUp => {}
        }
    }

    // ---- navigation & loading ----

    /// Shows `route` and fetches its data.
    pub fn navigate(&mut self, route: Route) {
        debug!(from = %self.route, to = %route, "navigate");
        self.route = route;
        self.reload_queued = false;
        self.show_help = false;
        self.modal.close();
        self.campaign_billboards = match route {
            Route::CampaignBillboards(id) => Some(CampaignBillboardsState::new(id)),
            _ => None,
        };
        match route {
            Route::SignIn => self.auth = AuthState::new(AuthMode::SignIn),
            Route::SignUp => self.auth = AuthState::new(AuthMode::SignUp),
            _ => self.reload(),
        }
    }

    /// Re-fetches the current view. The old snapshot stays visible until the new one lands.
    pub fn reload(&mut self) {
        if self.route.is_auth() {
            return;
        }
        match self.route {
            Route::Billboards => self.billboards.begin_loading(),
            Route::Locations => self.locations.begin_loading(),
            Route::Campaigns => self.campaigns.begin_loading(),
            Route::CampaignBillboards(_) => {
                if let Some(state) = self.campaign_billboards.as_mut() {
                    state.begin_loading();
                }
            }
            Route::SignIn | Route::SignUp => {}
        }
        if !self.tasks.spawn(Job::Load(self.route), &self.session) {
            self.reload_queued = true;
        }
    }

    fn require_sign_in(&mut self) {
        warn!(route = %self.route, "session rejected, returning to sign-in");
        self.session = self.session.signed_out();
        self.clear_data();
        self.navigate(Route::SignIn);
    }

    fn clear_data(&mut self) {
        self.billboards.clear();
        self.locations.clear();
        self.campaigns.clear();
        self.campaign_billboards = None;
    }

    fn sign_out(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }
        info!("signing out");
        let session = self.session.clone();
        self.tasks.spawn(Job::SignOut, &session);
        self.session = self.session.signed_out();
        self.clear_data();
        self.toasts.push(Toast::info("Signed out"));
        self.navigate(Route::SignIn);
    }

    // ---- modals & mutations ----

    fn open_editor(&mut self, edit: bool) {
        let today = self.today;
        match self.route {
            Route::Billboards => {
                let existing = match (edit, self.billboards.selected_item()) {
                    (false, _) => None,
                    (true, Some(b)) => Some(b.clone()),
                    (true, None) => return,
                };
                self.modal.open_editor(
                    Resource::Billboard,
                    existing.as_ref().map(|b| b.id),
                    Form::billboard(existing.as_ref()),
                );
                self.tasks.spawn(Job::LoadLocationOptions, &self.session);
            }
            Route::Locations => {
                let existing = match (edit, self.locations.selected_item()) {
                    (false, _) => None,
                    (true, Some(l)) => Some(l.clone()),
                    (true, None) => return,
                };
                self.modal.open_editor(
                    Resource::Location,
                    existing.as_ref().map(|l| l.id),
                    Form::location(existing.as_ref()),
                );
            }
            Route::Campaigns => {
                let existing = match (edit, self.campaigns.selected_item()) {
                    (false, _) => None,
                    (true, Some(c)) => Some(c.clone()),
                    (true, None) => return,
                };
                self.modal.open_editor(
                    Resource::Campaign,
                    existing.as_ref().map(|c| c.id),
                    Form::campaign(existing.as_ref(), today),
                );
            }
            _ => {}
        }
    }

    fn confirm_delete(&mut self) {
        let target = match self.route {
            Route::Billboards => self
                .billboards
                .selected_item()
                .map(|b| (Resource::Billboard, b.id, b.location.summary())),
            Route::Locations => self
                .locations
                .selected_item()
                .map(|l| (Resource::Location, l.id, l.summary())),
            Route::Campaigns => self
                .campaigns
                .selected_item()
                .map(|c| (Resource::Campaign, c.id, c.name.clone())),
            _ => None,
        };
        if let Some((resource, id, label)) = target {
            self.modal.confirm_delete(resource, id, label);
        }
    }

    /// Adds or removes the selected billboard through the link the server declared on it.
    fn change_association(&mut self, pane: BillboardPane) {
        let Some(state) = self.campaign_billboards.as_ref() else {
            return;
        };
        if state.focus != pane {
            self.toasts.push(Toast::info(format!(
                "Select a billboard in {} first (Tab switches)",
                pane.title().to_lowercase()
            )));
            return;
        }
        let Some(billboard) = state.focused().selected_item() else {
            return;
        };

        let billboard_id = billboard.id;
        let mutation = available_actions::<BillboardColumn>(billboard, pane.mode())
            .into_iter()
            .find_map(|action| match action {
                RowAction::AddToCampaign(link) => Some(Mutation::Associate { billboard_id, link }),
                RowAction::RemoveFromCampaign(link) => {
                    Some(Mutation::Disassociate { billboard_id, link })
                }
                _ => None,
            });

        match mutation {
            Some(mutation) => self.start_mutation(mutation),
            None => {
                let name = match pane {
                    BillboardPane::Available => ADD_TO_CAMPAIGN,
                    BillboardPane::Current => REMOVE_FROM_CAMPAIGN,
                };
                let err = ApiError::MissingLink(name.to_string());
                debug!(%billboard_id, error = %err, "association not offered");
                self.toasts
                    .push(Toast::info("Not available").with_description(err.to_string()));
            }
        }
    }

    fn submit_form(&mut self) {
        if self.modal.is_open() {
            let result = match self.modal.editor_mut() {
                Some(editor) if !editor.busy => editor.submit(),
                _ => return,
            };
            match result {
                Ok(mutation) => self.start_mutation(mutation),
                Err(errors) => self.reject_input(&errors),
            }
        } else if self.route.is_auth() && !self.auth.busy {
            match self.auth.form.credentials_payload() {
                Ok(credentials) => {
                    self.auth.errors = ValidationErrors::default();
                    let job = match self.auth.mode {
                        AuthMode::SignIn => Job::SignIn(credentials),
                        AuthMode::SignUp => Job::SignUp(credentials),
                    };
                    self.auth.busy = self.tasks.spawn(job, &self.session);
                }
                Err(errors) => {
                    self.reject_input(&errors);
                    self.auth.errors = errors;
                }
            }
        }
    }

    fn reject_input(&mut self, errors: &ValidationErrors) {
        debug!(%errors, "form rejected");
        self.toasts
            .push(Toast::error("Invalid input").with_description(errors.to_string()));
    }

    fn start_mutation(&mut self, mutation: Mutation) {
        let label = mutation.describe();
        let key = mutation.key();
        if self.tasks.spawn(Job::Mutate(mutation), &self.session) {
            if let Some(id) = self.modal.open_id() {
                self.modal.set_busy(true);
                self.modal_mutation = Some((key, id));
            }
            self.activity = Some(label);
        } else {
            self.toasts.push(Toast::info("Already in progress"));
        }
    }

    // ---- background results ----

    /// Applies every job that finished since the last tick.
    pub fn poll_tasks(&mut self) {
        while let Some(done) = self.tasks.try_recv() {
            self.apply(done.output);
        }
    }

    fn apply(&mut self, output: JobOutput) {
        match output {
            JobOutput::Loaded { route, result } => self.apply_loaded(route, result),
            JobOutput::Mutated { mutation, result } => {
                if self.tasks.pending_mutations() == 0 {
                    self.activity = None;
                }
                // Only the modal that submitted this mutation reacts to it.
                let origin = match &self.modal_mutation {
                    Some((key, id)) if *key == mutation.key() => Some(*id),
                    _ => None,
                };
                if origin.is_some() {
                    self.modal_mutation = None;
                }
                let owns_modal = origin.is_some() && origin == self.modal.open_id();
                if owns_modal {
                    self.modal.set_busy(false);
                }
                for effect in settle(&mutation, &result) {
                    if effect == Effect::CloseModal && !owns_modal {
                        debug!(key = ?mutation.key(), "modal changed since submit, leaving it open");
                        continue;
                    }
                    self.apply_effect(effect);
                }
            }
            JobOutput::SignedIn(result) => {
                self.auth.busy = false;
                match result {
                    Ok(session) => {
                        info!("signed in");
                        self.session = session;
                        self.toasts
                            .push(Toast::success("Welcome").with_description("Login successful"));
                        self.navigate(Route::Billboards);
                    }
                    Err(ApiError::AuthenticationRequired) => self
                        .toasts
                        .push(Toast::error("Error").with_description("Wrong credentials")),
                    Err(e) => {
                        warn!(error = %e, "sign-in failed");
                        self.toasts.push(Toast::generic_failure());
                    }
                }
            }
            JobOutput::SignedUp(result) => {
                self.auth.busy = false;
                match result {
                    Ok(()) => {
                        self.toasts.push(
                            Toast::info("We sent you an email")
                                .with_description("Please confirm your email"),
                        );
                        self.navigate(Route::SignIn);
                    }
                    Err(e) => {
                        warn!(error = %e, "sign-up failed");
                        self.toasts.push(Toast::generic_failure());
                    }
                }
            }
            JobOutput::SignedOut(result) => {
                if let Err(e) = result {
                    debug!(error = %e, "server-side sign-out failed");
                }
            }
            JobOutput::LocationOptions(result) => match result {
                Ok(locations) => {
                    if let Some(editor) = self.modal.editor_mut() {
                        if editor.form.kind == FormKind::Billboard {
                            let choices = locations
                                .iter()
                                .map(|l| Choice {
                                    id: l.id,
                                    label: l.summary(),
                                })
                                .collect();
                            editor.form.set_choices("location_id", choices);
                        }
                    }
                }
                Err(e) if e.is_auth() => {
                    self.toasts.push(Toast::session_expired());
                    self.require_sign_in();
                }
                Err(e) => {
                    warn!(error = %e, "location options failed");
                    self.toasts.push(Toast::error("Failed to load locations"));
                }
            },
        }
    }

    fn apply_loaded(&mut self, route: Route, result: Result<ViewData, ApiError>) {
        // A rejected session counts even when it comes from a view the user has left.
        if let Err(e) = &result {
            if e.is_auth() {
                self.toasts.push(Toast::session_expired());
                self.require_sign_in();
                return;
            }
        }

        if route != self.route {
            debug!(%route, current = %self.route, "discarding result for inactive view");
            return;
        }

        match result {
            Ok(data) => match data {
                ViewData::Billboards(items) => self.billboards.replace(items),
                ViewData::Locations(items) => self.locations.replace(items),
                ViewData::Campaigns(items) => self.campaigns.replace(items),
                ViewData::CampaignBillboards {
                    campaign,
                    available,
                } => {
                    if let Some(state) = self.campaign_billboards.as_mut() {
                        state.replace(campaign, available);
                    }
                }
                ViewData::Empty => {}
            },
            Err(e) => {
                match route {
                    Route::Billboards => self.billboards.fail(),
                    Route::Locations => self.locations.fail(),
                    Route::Campaigns => self.campaigns.fail(),
                    Route::CampaignBillboards(_) => {
                        if let Some(state) = self.campaign_billboards.as_mut() {
                            state.fail();
                        }
                    }
                    Route::SignIn | Route::SignUp => {}
                }
                warn!(%route, error = %e, "load failed");
                self.toasts.push(Toast::generic_failure());
            }
        }

        if self.reload_queued {
            self.reload_queued = false;
            self.reload();
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Notify(toast) => self.toasts.push(toast),
            Effect::CloseModal => self.modal.close(),
            Effect::Reload => self.reload(),
            Effect::RequireSignIn => self.require_sign_in(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::api::Method;
    use crate::data::fixtures;

    const WAIT: Duration = Duration::from_secs(5);

    fn app_with(transport: &Arc<ScriptedTransport>, token: Option<&str>) -> App {
        let base = Session::new(reqwest::Url::parse("http://api.test/api/v1").unwrap());
        let session = match token {
            Some(token) => base.with_token(token),
            None => base,
        };
        App::new(ApiClient::new(transport.clone()), session)
    }

    impl App {
        /// Applies results until no job is pending.
        fn wait_for_tasks(&mut self) {
            while self.tasks.has_pending() {
                match self.tasks.recv_timeout(WAIT) {
                    Some(done) => self.apply(done.output),
                    None => panic!("background job timed out"),
                }
            }
        }

        fn set_field(&mut self, key: &str, value: &str) {
            let form = self.focused_form().unwrap();
            let field = form.fields.iter_mut().find(|f| f.key == key).unwrap();
            field.value = value.to_string();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_action(KeyAction::InputChar(c));
        }
    }

    #[test]
    fn test_starts_on_sign_in_without_token() {
        let transport = Arc::new(ScriptedTransport::new());
        let app = app_with(&transport, None);
        assert_eq!(app.route(), Route::SignIn);
        assert_eq!(app.input_mode(), InputMode::Typing);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_starts_on_billboards_with_token() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": [fixtures::billboard()]}));
        let mut app = app_with(&transport, Some("tok"));
        app.wait_for_tasks();

        assert_eq!(app.route(), Route::Billboards);
        assert_eq!(app.billboards.len(), 1);
        assert_eq!(transport.requests()[0].bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn test_successful_create_closes_modal_and_reloads_once() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/locations", 200, json!({"data": []}));
        transport.respond(Method::Post, "/api/v1/locations", 201, json!({"data": {}}));
        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(2));
        app.wait_for_tasks();
        assert_eq!(transport.count(Method::Get, "/api/v1/locations"), 1);

        app.handle_action(KeyAction::New);
        assert_eq!(app.input_mode(), InputMode::Typing);
        type_text(&mut app, "1 Main St");
        app.set_field("lat", "30.2");
        app.set_field("lng", "-97.7");
        app.handle_action(KeyAction::Submit);
        assert!(app.modal().is_busy());
        app.wait_for_tasks();

        assert!(!app.modal().is_open());
        assert_eq!(app.toasts().latest(), Some(&Toast::created(Resource::Location)));
        assert_eq!(transport.count(Method::Post, "/api/v1/locations"), 1);
        assert_eq!(transport.count(Method::Get, "/api/v1/locations"), 2);
        let posted = transport
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Post)
            .unwrap();
        assert_eq!(posted.body.unwrap()["address"], "1 Main St");
    }

    #[test]
    fn test_out_of_range_latitude_never_reaches_network() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/locations", 200, json!({"data": []}));
        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(2));
        app.wait_for_tasks();

        app.handle_action(KeyAction::New);
        app.set_field("lat", "91");
        app.handle_action(KeyAction::Submit);

        assert!(!app.tasks.has_pending());
        assert_eq!(transport.count(Method::Post, "/api/v1/locations"), 0);
        match app.modal().current() {
            Some(Modal::Editor(editor)) => assert_eq!(
                editor.errors.for_field("lat"),
                Some("Latitude must be between -90 and 90")
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_delete_conflict_shows_dependents_and_does_not_reload() {
        let transport = Arc::new(ScriptedTransport::new());
        let location = fixtures::location();
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/locations", 200, json!([location]));
        transport.respond(
            Method::Delete,
            &format!("/api/v1/locations/{}", location.id),
            409,
            json!({"detail": "Location has billboards, update billboards first"}),
        );
        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(2));
        app.wait_for_tasks();

        app.handle_action(KeyAction::Delete);
        assert_eq!(app.input_mode(), InputMode::Confirm);
        app.handle_action(KeyAction::Submit);
        app.wait_for_tasks();

        let toast = app.toasts().latest().unwrap();
        assert_eq!(toast.title, "Forbidden: location has dependents");
        assert!(!app.modal().is_open());
        assert_eq!(transport.count(Method::Get, "/api/v1/locations"), 1);
        assert_eq!(app.locations.len(), 1);
    }

    #[test]
    fn test_generic_failure_keeps_editor_open_for_retry() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/campaigns", 200, json!({"data": []}));
        transport.respond(Method::Post, "/api/v1/campaigns", 500, json!({"detail": "boom"}));
        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(0));
        app.wait_for_tasks();

        app.handle_action(KeyAction::New);
        type_text(&mut app, "Winter");
        app.handle_action(KeyAction::Submit);
        app.wait_for_tasks();

        assert!(app.modal().is_open());
        assert!(!app.modal().is_busy());
        assert_eq!(app.toasts().latest(), Some(&Toast::generic_failure()));
        assert_eq!(transport.count(Method::Get, "/api/v1/campaigns"), 1);
    }

    #[test]
    fn test_unauthorized_load_redirects_to_sign_in() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/campaigns", 401, json!({"detail": "expired"}));
        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(0));
        app.wait_for_tasks();

        assert_eq!(app.route(), Route::SignIn);
        assert_eq!(app.route().path(), "/auth/signin");
        assert!(!app.session().is_authenticated());
        assert_eq!(app.toasts().latest(), Some(&Toast::session_expired()));
    }

    #[test]
    fn test_unauthorized_mutation_redirects_to_sign_in() {
        let transport = Arc::new(ScriptedTransport::new());
        let billboard = fixtures::billboard();
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": [billboard]}));
        transport.respond(
            Method::Delete,
            &format!("/api/v1/billboards/{}", billboard.id),
            401,
            json!({}),
        );
        let mut app = app_with(&transport, Some("tok"));
        app.wait_for_tasks();

        app.handle_action(KeyAction::Delete);
        app.handle_action(KeyAction::Submit);
        app.wait_for_tasks();

        assert_eq!(app.route(), Route::SignIn);
        assert!(!app.modal().is_open());
    }

    #[test]
    fn test_sign_in_with_wrong_credentials_stays_put() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Post, "/api/v1/auth/sign-in", 401, json!({"detail": "nope"}));
        let mut app = app_with(&transport, None);

        type_text(&mut app, "ana@example.com");
        app.handle_action(KeyAction::NextField);
        type_text(&mut app, "wrong");
        app.handle_action(KeyAction::Submit);
        app.wait_for_tasks();

        assert_eq!(app.route(), Route::SignIn);
        assert_eq!(
            app.toasts().latest().unwrap().to_string(),
            "✗ Error: Wrong credentials"
        );
    }

    #[test]
    fn test_sign_in_success_lands_on_billboards() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Post, "/api/v1/auth/sign-in", 200, json!({"access_token": "fresh"}));
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        let mut app = app_with(&transport, None);

        type_text(&mut app, "ana@example.com");
        app.handle_action(KeyAction::NextField);
        type_text(&mut app, "secret");
        app.handle_action(KeyAction::Submit);
        app.wait_for_tasks();

        assert_eq!(app.route(), Route::Billboards);
        assert_eq!(app.session().token(), Some("fresh"));
        let load = transport
            .requests()
            .into_iter()
            .find(|r| r.method == Method::Get)
            .unwrap();
        assert_eq!(load.bearer.as_deref(), Some("fresh"));
    }

    #[test]
    fn test_invalid_credentials_are_not_sent() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut app = app_with(&transport, None);
        type_text(&mut app, "nope");
        app.handle_action(KeyAction::Submit);

        assert!(transport.requests().is_empty());
        assert_eq!(app.auth.errors.for_field("email"), Some("Not a valid email"));
    }

    #[test]
    fn test_sign_up_returns_to_sign_in() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Post, "/api/v1/auth/sign-up", 201, json!({}));
        let mut app = app_with(&transport, None);

        app.handle_action(KeyAction::ToggleAuthMode);
        assert_eq!(app.route(), Route::SignUp);
        type_text(&mut app, "new@example.com");
        app.handle_action(KeyAction::NextField);
        type_text(&mut app, "pw");
        app.handle_action(KeyAction::Submit);
        app.wait_for_tasks();

        assert_eq!(app.route(), Route::SignIn);
        assert_eq!(
            app.toasts().latest().unwrap().to_string(),
            "ℹ We sent you an email: Please confirm your email"
        );
    }

    #[test]
    fn test_sign_out_drops_token() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Post, "/api/v1/auth/sign-out", 200, json!({}));
        let mut app = app_with(&transport, Some("tok"));
        app.wait_for_tasks();

        app.handle_action(KeyAction::SignOut);
        app.wait_for_tasks();

        assert_eq!(app.route(), Route::SignIn);
        assert!(!app.session().is_authenticated());
        assert_eq!(transport.count(Method::Post, "/api/v1/auth/sign-out"), 1);
    }

    #[test]
    fn test_add_to_campaign_follows_declared_link_and_reloads() {
        let transport = Arc::new(ScriptedTransport::new());
        let campaign = fixtures::campaign();
        let href = format!("/api/v1/campaigns/{}/billboards/b1", campaign.id);
        let candidate = fixtures::billboard_with_actions(vec![fixtures::link(ADD_TO_CAMPAIGN, &href)]);
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/campaigns", 200, json!({"data": [campaign]}));
        transport.respond(
            Method::Get,
            &format!("/api/v1/campaigns/{}", campaign.id),
            200,
            json!({"data": campaign}),
        );
        transport.respond(Method::Get, "/api/v1/availability", 200, json!({"data": [candidate]}));
        transport.respond(Method::Post, &href, 201, json!({}));

        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(0));
        app.wait_for_tasks();
        app.handle_action(KeyAction::Select);
        app.wait_for_tasks();
        assert_eq!(app.route(), Route::CampaignBillboards(campaign.id));

        // current pane has no add action
        app.handle_action(KeyAction::AddToCampaign);
        assert_eq!(transport.count(Method::Post, &href), 0);

        app.handle_action(KeyAction::NextView);
        app.handle_action(KeyAction::AddToCampaign);
        app.wait_for_tasks();

        assert_eq!(transport.count(Method::Post, &href), 1);
        assert_eq!(transport.count(Method::Get, "/api/v1/availability"), 2);
        assert_eq!(
            app.toasts().latest(),
            Some(&Toast::success("Billboard added to campaign"))
        );
    }

    #[test]
    fn test_missing_remove_link_is_reported() {
        let transport = Arc::new(ScriptedTransport::new());
        let campaign = fixtures::campaign();
        let mut app = app_with(&transport, Some("tok"));
        app.navigate(Route::CampaignBillboards(campaign.id));
        app.wait_for_tasks();
        app.apply(JobOutput::Loaded {
            route: Route::CampaignBillboards(campaign.id),
            result: Ok(ViewData::CampaignBillboards {
                campaign,
                available: Vec::new(),
            }),
        });

        app.handle_action(KeyAction::RemoveFromCampaign);

        assert!(!app.tasks.has_pending());
        assert_eq!(
            app.toasts().latest().unwrap().to_string(),
            "ℹ Not available: missing `remove_from_campaign` link"
        );
    }

    #[test]
    fn test_unauthorized_load_for_left_view_still_signs_out() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/locations", 200, json!({"data": []}));
        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(2));
        app.wait_for_tasks();
        assert_eq!(app.route(), Route::Locations);

        app.apply(JobOutput::Loaded {
            route: Route::Billboards,
            result: Err(ApiError::AuthenticationRequired),
        });

        assert_eq!(app.route(), Route::SignIn);
        assert!(!app.session().is_authenticated());
        assert_eq!(app.toasts().latest(), Some(&Toast::session_expired()));
    }

    #[test]
    fn test_stale_mutation_result_leaves_new_editor_open() {
        let transport = Arc::new(ScriptedTransport::new());
        let location = fixtures::location();
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/locations", 200, json!({"data": [location]}));
        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(2));
        app.wait_for_tasks();

        app.handle_action(KeyAction::New);
        type_text(&mut app, "draft");
        app.apply(JobOutput::Mutated {
            mutation: Mutation::Delete {
                resource: Resource::Location,
                id: location.id,
            },
            result: Ok(()),
        });

        match app.modal().current() {
            Some(Modal::Editor(editor)) => assert_eq!(editor.form.fields[0].value, "draft"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(app.toasts().latest(), Some(&Toast::deleted(Resource::Location)));
    }

    #[test]
    fn test_result_after_escape_does_not_touch_next_editor() {
        let transport = Arc::new(ScriptedTransport::new());
        let location = fixtures::location();
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/locations", 200, json!({"data": [location]}));
        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(2));
        app.wait_for_tasks();

        // Submit an edit, walk away from it, then start a new location.
        app.handle_action(KeyAction::Edit);
        app.handle_action(KeyAction::Submit);
        assert!(app.modal().is_busy());
        let submitted = Mutation::Update {
            id: location.id,
            payload: match app.modal().current() {
                Some(Modal::Editor(editor)) => editor.form.payload().unwrap(),
                other => panic!("unexpected {other:?}"),
            },
        };
        app.handle_action(KeyAction::Back);
        app.handle_action(KeyAction::New);
        type_text(&mut app, "draft");

        app.apply(JobOutput::Mutated {
            mutation: submitted,
            result: Ok(()),
        });

        assert!(app.modal().is_open());
        assert!(!app.modal().is_busy());
        match app.modal().current() {
            Some(Modal::Editor(editor)) => assert_eq!(editor.form.fields[0].value, "draft"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_owning_editor_closes_on_success() {
        let transport = Arc::new(ScriptedTransport::new());
        let location = fixtures::location();
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/locations", 200, json!({"data": [location]}));
        transport.respond(
            Method::Patch,
            &format!("/api/v1/locations/{}", location.id),
            200,
            json!({}),
        );
        let mut app = app_with(&transport, Some("tok"));
        app.handle_action(KeyAction::JumpTo(2));
        app.wait_for_tasks();

        app.handle_action(KeyAction::Edit);
        app.handle_action(KeyAction::Submit);
        app.wait_for_tasks();

        assert!(!app.modal().is_open());
        assert_eq!(app.toasts().latest(), Some(&Toast::updated(Resource::Location)));
    }

    #[test]
    fn test_results_for_left_view_are_discarded() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        let mut app = app_with(&transport, Some("tok"));
        app.wait_for_tasks();

        app.apply(JobOutput::Loaded {
            route: Route::Locations,
            result: Ok(ViewData::Locations(vec![fixtures::location()])),
        });

        assert!(!app.locations.is_loaded());
    }

    #[test]
    fn test_billboard_editor_receives_location_choices() {
        let transport = Arc::new(ScriptedTransport::new());
        let location = fixtures::location();
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/locations", 200, json!({"data": [location]}));
        let mut app = app_with(&transport, Some("tok"));
        app.wait_for_tasks();

        app.handle_action(KeyAction::New);
        app.wait_for_tasks();
        app.handle_action(KeyAction::CycleNext);

        match app.modal().current() {
            Some(Modal::Editor(editor)) => {
                let field = &editor.form.fields[0];
                assert_eq!(field.choices.len(), 1);
                assert_eq!(field.value, location.id.to_string());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_location_options_failure_toasts() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/api/v1/billboards", 200, json!({"data": []}));
        transport.respond(Method::Get, "/api/v1/locations", 500, json!({}));
        let mut app = app_with(&transport, Some("tok"));
        app.wait_for_tasks();

        app.handle_action(KeyAction::New);
        app.wait_for_tasks();

        assert_eq!(
            app.toasts().latest(),
            Some(&Toast::error("Failed to load locations"))
        );
        assert!(app.modal().is_open());
    }

    #[test]
    fn test_escape_from_campaign_billboards_goes_back() {
        let transport = Arc::new(ScriptedTransport::new());
        let id = Uuid::new_v4();
        let mut app = app_with(&transport, Some("tok"));
        app.navigate(Route::CampaignBillboards(id));
        app.handle_action(KeyAction::Back);
        assert_eq!(app.route(), Route::Campaigns);
    }
}
