//! Entities returned by the billboard API.
//!
//! The console never persists these records: every view holds a snapshot of
//! whatever the last fetch returned and replaces it wholesale on reload.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three CRUD-managed entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Billboard,
    Location,
    Campaign,
}

impl Resource {
    /// Collection path relative to the `/api/v1` base.
    pub fn collection_path(self) -> &'static str {
        match self {
            Resource::Billboard => "/billboards",
            Resource::Location => "/locations",
            Resource::Campaign => "/campaigns",
        }
    }

    pub fn item_path(self, id: Uuid) -> String {
        format!("{}/{}", self.collection_path(), id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Resource::Billboard => "Billboard",
            Resource::Location => "Location",
            Resource::Campaign => "Campaign",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Resource::Billboard => "Billboards",
            Resource::Location => "Locations",
            Resource::Campaign => "Campaigns",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A server-supplied follow-up action: semantic name, HTTP method and URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HateoasLink {
    pub name: String,
    pub method: String,
    pub href: String,
}

/// Some endpoints send `self` as a bare href, others as a full link object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelfLink {
    Href(String),
    Link(HateoasLink),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedLinks {
    List(Vec<HateoasLink>),
    Map(BTreeMap<String, String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<SelfLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<HateoasLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<RelatedLinks>,
}

impl Links {
    /// Looks up a declared action by name.
    pub fn action(&self, name: &str) -> Option<&HateoasLink> {
        self.actions.as_ref()?.iter().find(|link| link.name == name)
    }
}

/// Name of the link that assigns a billboard to a campaign.
pub const ADD_TO_CAMPAIGN: &str = "add_to_campaign";
/// Name of the link that removes a billboard from a campaign.
pub const REMOVE_FROM_CAMPAIGN: &str = "remove_from_campaign";

/// A location as embedded in a billboard (no id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country_code: String,
    pub lat: f64,
    pub lng: f64,
}

impl LocationInfo {
    /// "address, city, state (CC)"
    pub fn summary(&self) -> String {
        format!(
            "{}, {}, {} ({})",
            self.address, self.city, self.state, self.country_code
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country_code: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub links: Option<Links>,
}

impl Location {
    pub fn info(&self) -> LocationInfo {
        LocationInfo {
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            country_code: self.country_code.clone(),
            lat: self.lat,
            lng: self.lng,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}, {}, {} ({})",
            self.address, self.city, self.state, self.country_code
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Billboard {
    pub id: Uuid,
    pub width_mt: f64,
    pub height_mt: f64,
    pub dollars_per_day: f64,
    pub location_id: Uuid,
    pub location: LocationInfo,
    #[serde(default)]
    pub links: Option<Links>,
}

impl Billboard {
    /// The named action link, if the server declared it for this billboard.
    pub fn action_link(&self, name: &str) -> Option<&HateoasLink> {
        self.links.as_ref()?.action(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub total_dollar_amount: f64,
    #[serde(default)]
    pub billboards: Vec<Billboard>,
    #[serde(default)]
    pub links: Option<Links>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country_code: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBillboard {
    pub width_mt: f64,
    pub height_mt: f64,
    pub dollars_per_day: f64,
    pub location_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Response body: either the `{ "data": ... }` envelope or the bare value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Something that can be pinned on the world map.
pub trait Geolocated {
    fn coordinates(&self) -> (f64, f64);
    fn map_label(&self) -> String;
}

impl Geolocated for LocationInfo {
    fn coordinates(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    fn map_label(&self) -> String {
        self.summary()
    }
}

impl Geolocated for Location {
    fn coordinates(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    fn map_label(&self) -> String {
        self.summary()
    }
}

impl Geolocated for Billboard {
    fn coordinates(&self) -> (f64, f64) {
        self.location.coordinates()
    }

    fn map_label(&self) -> String {
        self.location.summary()
    }
}
