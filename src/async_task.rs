//! Background execution of API calls.
//!
//! The UI loop is synchronous, so every request runs on its own worker thread
//! and reports back over a crossbeam channel. The event loop polls
//! [`TaskManager::try_recv`] once per tick and applies whatever arrived.
//!
//! # Usage
//!
//! ```no_run
//! use billboard_console::api::{ApiClient, Session};
//! use billboard_console::async_task::{Job, TaskManager};
//! use billboard_console::routes::Route;
//!
//! # fn demo(client: ApiClient, session: Session) {
//! let mut tm = TaskManager::new(client);
//! tm.spawn(Job::Load(Route::Billboards), &session);
//!
//! if let Some(done) = tm.try_recv() {
//!     println!("{:?}", done.key);
//! }
//! # }
//! ```

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, info};

use crate::actions::{Mutation, MutationKey};
use crate::api::{ApiClient, ApiError, Session};
use crate::data::{Billboard, Campaign, Credentials, Location};
use crate::routes::Route;

/// Work that can run in the background.
#[derive(Debug, Clone)]
pub enum Job {
    /// Fetch everything a view displays.
    Load(Route),
    Mutate(Mutation),
    SignIn(Credentials),
    SignUp(Credentials),
    SignOut,
    /// Choices for the billboard form's location select.
    LoadLocationOptions,
}

/// Identity of a job. Two jobs with the same key never run at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobKey {
    Load(Route),
    Mutate(MutationKey),
    SignIn,
    SignUp,
    SignOut,
    LocationOptions,
}

impl Job {
    pub fn key(&self) -> JobKey {
        match self {
            Job::Load(route) => JobKey::Load(*route),
            Job::Mutate(mutation) => JobKey::Mutate(mutation.key()),
            Job::SignIn(_) => JobKey::SignIn,
            Job::SignUp(_) => JobKey::SignUp,
            Job::SignOut => JobKey::SignOut,
            Job::LoadLocationOptions => JobKey::LocationOptions,
        }
    }
}

/// A fresh snapshot of one view's data.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    Billboards(Vec<Billboard>),
    Locations(Vec<Location>),
    Campaigns(Vec<Campaign>),
    CampaignBillboards {
        campaign: Campaign,
        available: Vec<Billboard>,
    },
    /// Views without remote data.
    Empty,
}

#[derive(Debug, Clone)]
pub enum JobOutput {
    Loaded {
        route: Route,
        result: Result<ViewData, ApiError>,
    },
    Mutated {
        mutation: Mutation,
        result: Result<(), ApiError>,
    },
    SignedIn(Result<Session, ApiError>),
    SignedUp(Result<(), ApiError>),
    SignedOut(Result<(), ApiError>),
    LocationOptions(Result<Vec<Location>, ApiError>),
}

#[derive(Debug, Clone)]
pub struct Completed {
    pub key: JobKey,
    pub output: JobOutput,
}

/// Fetches the data behind `route`.
pub fn load_view(client: &ApiClient, session: &Session, route: Route) -> Result<ViewData, ApiError> {
    match route {
        Route::Billboards => client.list_billboards(session).map(ViewData::Billboards),
        Route::Locations => client.list_locations(session).map(ViewData::Locations),
        Route::Campaigns => client.list_campaigns(session).map(ViewData::Campaigns),
        Route::CampaignBillboards(id) => {
            let campaign = client.get_campaign(session, id)?;
            let available = client.availability(session, id)?;
            Ok(ViewData::CampaignBillboards {
                campaign,
                available,
            })
        }
        Route::SignIn | Route::SignUp => Ok(ViewData::Empty),
    }
}

/// Runs a job to completion on the calling thread.
pub fn run_job(client: &ApiClient, session: &Session, job: Job) -> JobOutput {
    match job {
        Job::Load(route) => JobOutput::Loaded {
            route,
            result: load_view(client, session, route),
        },
        Job::Mutate(mutation) => {
            let result = mutation.execute(client, session);
            JobOutput::Mutated { mutation, result }
        }
        Job::SignIn(credentials) => JobOutput::SignedIn(client.sign_in(session, &credentials)),
        Job::SignUp(credentials) => JobOutput::SignedUp(client.sign_up(session, &credentials)),
        Job::SignOut => JobOutput::SignedOut(client.sign_out(session)),
        Job::LoadLocationOptions => JobOutput::LocationOptions(client.list_locations(session)),
    }
}

/// Spawns jobs on worker threads and collects their outputs.
pub struct TaskManager {
    client: ApiClient,
    sender: Sender<Completed>,
    receiver: Receiver<Completed>,
    pending: HashSet<JobKey>,
}

impl TaskManager {
    pub fn new(client: ApiClient) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            client,
            sender,
            receiver,
            pending: HashSet::new(),
        }
    }

    /// Starts `job` in the background with a snapshot of `session`.
    ///
    /// Returns `false` without spawning if a job with the same key is still
    /// pending.
    pub fn spawn(&mut self, job: Job, session: &Session) -> bool {
        let key = job.key();
        if !self.pending.insert(key.clone()) {
            debug!(?key, "job already pending");
            return false;
        }

        let client = self.client.clone();
        let session = session.clone();
        let sender = self.sender.clone();
        thread::spawn(move || {
            let output = run_job(&client, &session, job);
            // Receiver is gone only when the app is shutting down.
            let _ = sender.send(Completed { key, output });
        });
        true
    }

    /// Returns a completed job, if any.
    pub fn try_recv(&mut self) -> Option<Completed> {
        if self.pending.is_empty() {
            return None;
        }
        let completed = self.receiver.try_recv().ok()?;
        self.finish(&completed.key);
        Some(completed)
    }

    /// Blocks up to `timeout` for a completed job.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<Completed> {
        if self.pending.is_empty() {
            return None;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(completed) => {
                self.finish(&completed.key);
                Some(completed)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    fn finish(&mut self, key: &JobKey) {
        self.pending.remove(key);
        info!(?key, "job finished");
    }

    pub fn is_pending(&self, key: &JobKey) -> bool {
        self.pending.contains(key)
    }

    /// Mutations still in flight.
    pub fn pending_mutations(&self) -> usize {
        self.pending
            .iter()
            .filter(|key| matches!(key, JobKey::Mutate(_)))
            .count()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::api::Method;
    use crate::data::fixtures;

    const WAIT: Duration = Duration::from_secs(5);

    fn setup() -> (Arc<ScriptedTransport>, TaskManager, Session) {
        let transport = Arc::new(ScriptedTransport::new());
        let tm = TaskManager::new(ApiClient::new(transport.clone()));
        let session = Session::new(reqwest::Url::parse("http://api.test/api/v1").unwrap());
        (transport, tm, session)
    }

    #[test]
    fn test_task_manager_creation() {
        let (_, mut tm, _) = setup();
        assert_eq!(tm.pending_count(), 0);
        assert!(!tm.has_pending());
        assert!(tm.try_recv().is_none());
    }

    #[test]
    fn test_spawn_and_receive_load() {
        let (transport, mut tm, session) = setup();
        transport.respond(
            Method::Get,
            "/api/v1/locations",
            200,
            json!({"data": [fixtures::location()]}),
        );

        assert!(tm.spawn(Job::Load(Route::Locations), &session));
        assert!(tm.is_pending(&JobKey::Load(Route::Locations)));

        let done = tm.recv_timeout(WAIT).unwrap();
        assert_eq!(done.key, JobKey::Load(Route::Locations));
        match done.output {
            JobOutput::Loaded {
                route: Route::Locations,
                result: Ok(ViewData::Locations(items)),
            } => assert_eq!(items.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!tm.has_pending());
    }

    #[test]
    fn test_duplicate_key_is_refused() {
        let (_, mut tm, session) = setup();
        assert!(tm.spawn(Job::SignOut, &session));
        assert!(!tm.spawn(Job::SignOut, &session));
        assert_eq!(tm.pending_count(), 1);
        assert!(tm.recv_timeout(WAIT).is_some());
        assert!(tm.spawn(Job::SignOut, &session));
    }

    #[test]
    fn test_campaign_billboards_load_combines_two_calls() {
        let (transport, mut tm, session) = setup();
        let campaign = fixtures::campaign();
        transport.respond(
            Method::Get,
            &format!("/api/v1/campaigns/{}", campaign.id),
            200,
            json!({"data": campaign}),
        );
        transport.respond(
            Method::Get,
            "/api/v1/availability",
            200,
            json!({"data": [fixtures::billboard()]}),
        );

        let route = Route::CampaignBillboards(campaign.id);
        tm.spawn(Job::Load(route), &session);
        match tm.recv_timeout(WAIT).unwrap().output {
            JobOutput::Loaded {
                result: Ok(ViewData::CampaignBillboards { campaign: c, available }),
                ..
            } => {
                assert_eq!(c.id, campaign.id);
                assert_eq!(available.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_load_error_is_reported() {
        let (transport, mut tm, session) = setup();
        transport.respond(Method::Get, "/api/v1/campaigns", 401, json!({}));
        tm.spawn(Job::Load(Route::Campaigns), &session);
        match tm.recv_timeout(WAIT).unwrap().output {
            JobOutput::Loaded { result, .. } => {
                assert_eq!(result, Err(ApiError::AuthenticationRequired))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
