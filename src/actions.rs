//! Mutating intents and how their outcomes affect the UI.
//!
//! A [`Mutation`] issues exactly one request. [`settle`] turns its result into
//! a list of [`Effect`]s that the app applies; a successful mutation always
//! ends in one full reload of the enclosing view, never a local patch.

use uuid::Uuid;

use crate::api::{ApiClient, ApiError, Session};
use crate::data::{HateoasLink, NewBillboard, NewCampaign, NewLocation, Resource};
use crate::notifications::Toast;

/// A validated request body for one resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Location(NewLocation),
    Billboard(NewBillboard),
    Campaign(NewCampaign),
}

impl Payload {
    pub fn resource(&self) -> Resource {
        match self {
            Payload::Location(_) => Resource::Location,
            Payload::Billboard(_) => Resource::Billboard,
            Payload::Campaign(_) => Resource::Campaign,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(Payload),
    Update { id: Uuid, payload: Payload },
    Delete { resource: Resource, id: Uuid },
    /// Follows a billboard's `add_to_campaign` link.
    Associate { billboard_id: Uuid, link: HateoasLink },
    /// Follows a billboard's `remove_from_campaign` link.
    Disassociate { billboard_id: Uuid, link: HateoasLink },
}

/// Identity of a mutation for the busy rule: same kind, same target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationKey {
    Create(Resource),
    Update(Resource, Uuid),
    Delete(Resource, Uuid),
    Associate(Uuid),
    Disassociate(Uuid),
}

impl Mutation {
    pub fn resource(&self) -> Resource {
        match self {
            Mutation::Create(payload) | Mutation::Update { payload, .. } => payload.resource(),
            Mutation::Delete { resource, .. } => *resource,
            Mutation::Associate { .. } | Mutation::Disassociate { .. } => Resource::Billboard,
        }
    }

    pub fn key(&self) -> MutationKey {
        match self {
            Mutation::Create(payload) => MutationKey::Create(payload.resource()),
            Mutation::Update { id, payload } => MutationKey::Update(payload.resource(), *id),
            Mutation::Delete { resource, id } => MutationKey::Delete(*resource, *id),
            Mutation::Associate { billboard_id, .. } => MutationKey::Associate(*billboard_id),
            Mutation::Disassociate { billboard_id, .. } => MutationKey::Disassociate(*billboard_id),
        }
    }

    /// Short present-tense label for busy indicators.
    pub fn describe(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "Creating",
            Mutation::Update { .. } => "Saving",
            Mutation::Delete { .. } => "Deleting",
            Mutation::Associate { .. } => "Adding to campaign",
            Mutation::Disassociate { .. } => "Removing from campaign",
        }
    }

    /// Issues the single request for this mutation.
    pub fn execute(&self, client: &ApiClient, session: &Session) -> Result<(), ApiError> {
        match self {
            Mutation::Create(Payload::Location(p)) => client.create_location(session, p),
            Mutation::Create(Payload::Billboard(p)) => client.create_billboard(session, p),
            Mutation::Create(Payload::Campaign(p)) => client.create_campaign(session, p),
            Mutation::Update { id, payload } => match payload {
                Payload::Location(p) => client.update_location(session, *id, p),
                Payload::Billboard(p) => client.update_billboard(session, *id, p),
                Payload::Campaign(p) => client.update_campaign(session, *id, p),
            },
            Mutation::Delete { resource, id } => match resource {
                Resource::Location => client.delete_location(session, *id),
                Resource::Billboard => client.delete_billboard(session, *id),
                Resource::Campaign => client.delete_campaign(session, *id),
            },
            Mutation::Associate { link, .. } | Mutation::Disassociate { link, .. } => {
                client.follow(session, link)
            }
        }
    }

    fn success_toast(&self) -> Toast {
        match self {
            Mutation::Create(payload) => Toast::created(payload.resource()),
            Mutation::Update { payload, .. } => Toast::updated(payload.resource()),
            Mutation::Delete { resource, .. } => Toast::deleted(*resource),
            Mutation::Associate { .. } => Toast::success("Billboard added to campaign"),
            Mutation::Disassociate { .. } => Toast::success("Billboard removed from campaign"),
        }
    }
}

/// A UI consequence of a settled mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Toast),
    CloseModal,
    /// Re-fetch the enclosing view's data.
    Reload,
    /// Drop the session and show the sign-in view.
    RequireSignIn,
}

/// Maps a mutation outcome to its effects.
///
/// Failures other than 401 and delete conflicts leave the modal open so the
/// user can retry.
pub fn settle(mutation: &Mutation, result: &Result<(), ApiError>) -> Vec<Effect> {
    match result {
        Ok(()) => vec![
            Effect::Notify(mutation.success_toast()),
            Effect::CloseModal,
            Effect::Reload,
        ],
        Err(ApiError::AuthenticationRequired) => vec![
            Effect::Notify(Toast::session_expired()),
            Effect::RequireSignIn,
        ],
        Err(ApiError::Conflict(detail)) if matches!(mutation, Mutation::Delete { .. }) => vec![
            Effect::Notify(Toast::has_dependents(mutation.resource(), detail)),
            Effect::CloseModal,
        ],
        Err(_) => vec![Effect::Notify(Toast::generic_failure())],
    }
}
