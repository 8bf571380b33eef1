//! Typed operations over the billboard REST API.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{ApiError, ApiRequest, ApiResponse, HttpTransport, Method, Session, Transport};
use crate::data::{
    AuthTokens, Billboard, Campaign, Credentials, Envelope, HateoasLink, Location, NewBillboard,
    NewCampaign, NewLocation, Resource,
};

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client backed by a real HTTP connection pool.
    pub fn http() -> Result<Self, ApiError> {
        Ok(Self::new(Arc::new(HttpTransport::new()?)))
    }

    // ---- auth ----

    /// Exchanges credentials for a bearer token and returns the signed-in session.
    pub fn sign_in(&self, session: &Session, credentials: &Credentials) -> Result<Session, ApiError> {
        let body = to_body(credentials)?;
        let url = session.endpoint("/auth/sign-in")?;
        let response = self.request(session, Method::Post, url, Some(body))?;
        let tokens: AuthTokens = decode(&response)?;
        Ok(session.with_token(tokens.access_token))
    }

    pub fn sign_up(&self, session: &Session, credentials: &Credentials) -> Result<(), ApiError> {
        let body = to_body(credentials)?;
        let url = session.endpoint("/auth/sign-up")?;
        self.request(session, Method::Post, url, Some(body))
            .map(drop)
    }

    pub fn sign_out(&self, session: &Session) -> Result<(), ApiError> {
        let url = session.endpoint("/auth/sign-out")?;
        self.request(session, Method::Post, url, None).map(drop)
    }

    // ---- billboards ----

    pub fn list_billboards(&self, session: &Session) -> Result<Vec<Billboard>, ApiError> {
        self.list(session, Resource::Billboard)
    }

    pub fn create_billboard(&self, session: &Session, payload: &NewBillboard) -> Result<(), ApiError> {
        self.create(session, Resource::Billboard, payload)
    }

    pub fn update_billboard(
        &self,
        session: &Session,
        id: Uuid,
        payload: &NewBillboard,
    ) -> Result<(), ApiError> {
        self.update(session, Resource::Billboard, id, payload)
    }

    pub fn delete_billboard(&self, session: &Session, id: Uuid) -> Result<(), ApiError> {
        self.delete(session, Resource::Billboard, id)
    }

    // ---- locations ----

    pub fn list_locations(&self, session: &Session) -> Result<Vec<Location>, ApiError> {
        self.list(session, Resource::Location)
    }

    pub fn create_location(&self, session: &Session, payload: &NewLocation) -> Result<(), ApiError> {
        self.create(session, Resource::Location, payload)
    }

    pub fn update_location(
        &self,
        session: &Session,
        id: Uuid,
        payload: &NewLocation,
    ) -> Result<(), ApiError> {
        self.update(session, Resource::Location, id, payload)
    }

    pub fn delete_location(&self, session: &Session, id: Uuid) -> Result<(), ApiError> {
        self.delete(session, Resource::Location, id)
    }

    // ---- campaigns ----

    pub fn list_campaigns(&self, session: &Session) -> Result<Vec<Campaign>, ApiError> {
        self.list(session, Resource::Campaign)
    }

    pub fn get_campaign(&self, session: &Session, id: Uuid) -> Result<Campaign, ApiError> {
        let url = session.endpoint(&Resource::Campaign.item_path(id))?;
        let response = self.request(session, Method::Get, url, None)?;
        decode(&response)
    }

    pub fn create_campaign(&self, session: &Session, payload: &NewCampaign) -> Result<(), ApiError> {
        self.create(session, Resource::Campaign, payload)
    }

    pub fn update_campaign(
        &self,
        session: &Session,
        id: Uuid,
        payload: &NewCampaign,
    ) -> Result<(), ApiError> {
        self.update(session, Resource::Campaign, id, payload)
    }

    pub fn delete_campaign(&self, session: &Session, id: Uuid) -> Result<(), ApiError> {
        self.delete(session, Resource::Campaign, id)
    }

    /// Billboards not yet assigned to `campaign_id`.
    pub fn availability(&self, session: &Session, campaign_id: Uuid) -> Result<Vec<Billboard>, ApiError> {
        let url = session.endpoint(&format!("/availability?campaign_id={campaign_id}"))?;
        let response = self.request(session, Method::Get, url, None)?;
        decode(&response)
    }

    /// Invokes a server-declared action with its own method and href.
    pub fn follow(&self, session: &Session, link: &HateoasLink) -> Result<(), ApiError> {
        let method = Method::parse(&link.method)?;
        let url = session.resolve_href(&link.href)?;
        self.request(session, method, url, None).map(drop)
    }

    // ---- generic resource plumbing ----

    fn list<T: DeserializeOwned>(&self, session: &Session, resource: Resource) -> Result<Vec<T>, ApiError> {
        let url = session.endpoint(resource.collection_path())?;
        let response = self.request(session, Method::Get, url, None)?;
        decode(&response)
    }

    fn create<P: Serialize>(&self, session: &Session, resource: Resource, payload: &P) -> Result<(), ApiError> {
        let url = session.endpoint(resource.collection_path())?;
        self.request(session, Method::Post, url, Some(to_body(payload)?))
            .map(drop)
    }

    fn update<P: Serialize>(
        &self,
        session: &Session,
        resource: Resource,
        id: Uuid,
        payload: &P,
    ) -> Result<(), ApiError> {
        let url = session.endpoint(&resource.item_path(id))?;
        self.request(session, Method::Patch, url, Some(to_body(payload)?))
            .map(drop)
    }

    fn delete(&self, session: &Session, resource: Resource, id: Uuid) -> Result<(), ApiError> {
        let url = session.endpoint(&resource.item_path(id))?;
        self.request(session, Method::Delete, url, None).map(drop)
    }

    fn request(
        &self,
        session: &Session,
        method: Method,
        url: reqwest::Url,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            method,
            url,
            bearer: session.token().map(str::to_string),
            body,
        };

        let response = self.transport.send(&request).map_err(|e| {
            warn!(%method, url = %request.url, error = %e, "request failed");
            e
        })?;
        debug!(%method, url = %request.url, status = response.status, "response");

        if response.is_success() {
            Ok(response)
        } else {
            let err = ApiError::from_status(response.status, &response.body);
            warn!(%method, url = %request.url, status = response.status, error = %err, "API error");
            Err(err)
        }
    }
}

fn to_body<P: Serialize>(payload: &P) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
    serde_json::from_str::<Envelope<T>>(&response.body)
        .map(Envelope::into_inner)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::data::{fixtures, ADD_TO_CAMPAIGN};

    fn setup() -> (Arc<ScriptedTransport>, ApiClient, Session) {
        let transport = Arc::new(ScriptedTransport::new());
        let client = ApiClient::new(transport.clone());
        let session = Session::new(reqwest::Url::parse("http://api.test/api/v1").unwrap());
        (transport, client, session)
    }

    #[test]
    fn test_sign_in_returns_authenticated_session() {
        let (transport, client, session) = setup();
        transport.respond(
            Method::Post,
            "/api/v1/auth/sign-in",
            200,
            json!({"access_token": "tok", "token_type": "bearer"}),
        );

        let creds = Credentials {
            email: "ana@example.com".into(),
            password: "secret".into(),
        };
        let signed_in = client.sign_in(&session, &creds).unwrap();

        assert_eq!(signed_in.token(), Some("tok"));
        let sent = transport.requests();
        assert_eq!(sent[0].bearer, None);
        assert_eq!(sent[0].body.as_ref().unwrap()["email"], "ana@example.com");
    }

    #[test]
    fn test_sign_in_wrong_credentials_is_auth_error() {
        let (transport, client, session) = setup();
        transport.respond(Method::Post, "/api/v1/auth/sign-in", 401, json!({"detail": "bad"}));
        let creds = Credentials {
            email: "ana@example.com".into(),
            password: "nope".into(),
        };
        assert_eq!(
            client.sign_in(&session, &creds),
            Err(ApiError::AuthenticationRequired)
        );
    }

    #[test]
    fn test_list_unwraps_envelope_and_sends_bearer() {
        let (transport, client, session) = setup();
        let billboard = fixtures::billboard();
        transport.respond(
            Method::Get,
            "/api/v1/billboards",
            200,
            json!({ "data": [billboard] }),
        );

        let list = client
            .list_billboards(&session.with_token("tok"))
            .unwrap();

        assert_eq!(list, vec![billboard]);
        assert_eq!(transport.requests()[0].bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn test_list_locations_accepts_bare_array() {
        let (transport, client, session) = setup();
        let location = fixtures::location();
        transport.respond(Method::Get, "/api/v1/locations", 200, json!([location]));

        assert_eq!(client.list_locations(&session).unwrap(), vec![location]);
    }

    #[test]
    fn test_delete_conflict_maps_to_conflict() {
        let (transport, client, session) = setup();
        let id = Uuid::new_v4();
        transport.respond(
            Method::Delete,
            &format!("/api/v1/locations/{id}"),
            409,
            json!({"detail": "Location has billboards, update billboards first"}),
        );

        assert!(matches!(
            client.delete_location(&session, id),
            Err(ApiError::Conflict(_))
        ));
    }

    #[test]
    fn test_delete_accepts_empty_body() {
        let (transport, client, session) = setup();
        let id = Uuid::new_v4();
        transport.respond(
            Method::Delete,
            &format!("/api/v1/billboards/{id}"),
            204,
            Value::Null,
        );
        assert_eq!(client.delete_billboard(&session, id), Ok(()));
    }

    #[test]
    fn test_update_uses_patch_on_item_path() {
        let (transport, client, session) = setup();
        let id = Uuid::new_v4();
        let path = format!("/api/v1/campaigns/{id}");
        transport.respond(Method::Patch, &path, 200, json!({"data": {}}));

        let payload = NewCampaign {
            name: "Spring".into(),
            start_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        };
        client.update_campaign(&session, id, &payload).unwrap();

        assert_eq!(transport.count(Method::Patch, &path), 1);
        assert_eq!(
            transport.requests()[0].body.as_ref().unwrap()["start_date"],
            "2026-03-01"
        );
    }

    #[test]
    fn test_availability_sends_campaign_query() {
        let (transport, client, session) = setup();
        let campaign_id = Uuid::new_v4();
        transport.respond(Method::Get, "/api/v1/availability", 200, json!({"data": []}));

        assert!(client.availability(&session, campaign_id).unwrap().is_empty());
        let expected = format!("campaign_id={campaign_id}");
        assert_eq!(transport.requests()[0].url.query(), Some(expected.as_str()));
    }

    #[test]
    fn test_follow_uses_link_method_and_href() {
        let (transport, client, session) = setup();
        transport.respond(Method::Post, "/api/v1/campaigns/c1/billboards/b1", 201, json!({}));
        let link = fixtures::link(ADD_TO_CAMPAIGN, "/api/v1/campaigns/c1/billboards/b1");

        client.follow(&session, &link).unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url.as_str(), "http://api.test/api/v1/campaigns/c1/billboards/b1");
    }

    #[test]
    fn test_decode_failure_is_reported() {
        let (transport, client, session) = setup();
        transport.respond(Method::Get, "/api/v1/campaigns", 200, json!({"data": "nope"}));
        assert!(matches!(
            client.list_campaigns(&session),
            Err(ApiError::Decode(_))
        ));
    }
}
