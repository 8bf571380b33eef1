//! Editable forms and their client-side validation.
//!
//! A form is a closed list of typed fields backed by text buffers. Nothing is
//! parsed until [`Form::payload`] or [`Form::credentials_payload`] runs, and a failed
//! validation never reaches the network.

use std::fmt;

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::actions::Payload;
use crate::data::{
    Billboard, Campaign, Credentials, Location, NewBillboard, NewCampaign, NewLocation,
};

/// Default campaign length when creating one.
pub const DEFAULT_CAMPAIGN_DAYS: i64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Rendered masked.
    Secret,
    Number,
    /// `YYYY-MM-DD`
    Date,
    /// One of a list of server-provided choices; the buffer holds the chosen id.
    Select,
}

/// An option in a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: Uuid,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub choices: Vec<Choice>,
}

impl FormField {
    fn new(key: &'static str, label: &'static str, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            kind,
            value: value.into(),
            choices: Vec::new(),
        }
    }

    /// What the field shows: masked secrets, select labels, raw text otherwise.
    pub fn display_value(&self) -> String {
        match self.kind {
            FieldKind::Secret => "*".repeat(self.value.chars().count()),
            FieldKind::Select => self
                .selected_choice()
                .map(|c| c.label.clone())
                .unwrap_or_else(|| {
                    if self.choices.is_empty() {
                        "(loading...)".to_string()
                    } else {
                        "(choose with ← →)".to_string()
                    }
                }),
            _ => self.value.clone(),
        }
    }

    pub fn selected_choice(&self) -> Option<&Choice> {
        let id = Uuid::parse_str(self.value.trim()).ok()?;
        self.choices.iter().find(|c| c.id == id)
    }

    fn cycle(&mut self, forward: bool) {
        if self.choices.is_empty() {
            return;
        }
        let len = self.choices.len();
        let next = match self.choices.iter().position(|c| Some(c) == self.selected_choice()) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.value = self.choices[next].id.to_string();
    }
}

/// A validation failure on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn for_field(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == key)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Location,
    Billboard,
    Campaign,
    Credentials,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    fn with_fields(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            focus: 0,
        }
    }

    /// Blank creation form or edit form pre-populated from `existing`.
    pub fn location(existing: Option<&Location>) -> Self {
        let info = existing.map(Location::info);
        let text = |value: Option<&String>| value.cloned().unwrap_or_default();
        let number = |value: Option<f64>| value.unwrap_or(0.0).to_string();
        Self::with_fields(
            FormKind::Location,
            vec![
                FormField::new(
                    "address",
                    "Address",
                    FieldKind::Text,
                    text(info.as_ref().map(|l| &l.address)),
                ),
                FormField::new(
                    "city",
                    "City",
                    FieldKind::Text,
                    text(info.as_ref().map(|l| &l.city)),
                ),
                FormField::new(
                    "state",
                    "State",
                    FieldKind::Text,
                    text(info.as_ref().map(|l| &l.state)),
                ),
                FormField::new(
                    "country_code",
                    "Country code",
                    FieldKind::Text,
                    text(info.as_ref().map(|l| &l.country_code)),
                ),
                FormField::new(
                    "lat",
                    "Latitude",
                    FieldKind::Number,
                    number(info.as_ref().map(|l| l.lat)),
                ),
                FormField::new(
                    "lng",
                    "Longitude",
                    FieldKind::Number,
                    number(info.as_ref().map(|l| l.lng)),
                ),
            ],
        )
    }

    pub fn billboard(existing: Option<&Billboard>) -> Self {
        let number = |value: Option<f64>| value.unwrap_or(0.0).to_string();
        Self::with_fields(
            FormKind::Billboard,
            vec![
                FormField::new(
                    "location_id",
                    "Location",
                    FieldKind::Select,
                    existing.map(|b| b.location_id.to_string()).unwrap_or_default(),
                ),
                FormField::new(
                    "width_mt",
                    "Width (mt)",
                    FieldKind::Number,
                    number(existing.map(|b| b.width_mt)),
                ),
                FormField::new(
                    "height_mt",
                    "Height (mt)",
                    FieldKind::Number,
                    number(existing.map(|b| b.height_mt)),
                ),
                FormField::new(
                    "dollars_per_day",
                    "Dollars per day",
                    FieldKind::Number,
                    number(existing.map(|b| b.dollars_per_day)),
                ),
            ],
        )
    }

    /// New campaigns default to `today ..= today + 30 days`.
    pub fn campaign(existing: Option<&Campaign>, today: NaiveDate) -> Self {
        let (name, start, end) = match existing {
            Some(c) => (c.name.clone(), c.start_date, c.end_date),
            None => (
                String::new(),
                today,
                today + Duration::days(DEFAULT_CAMPAIGN_DAYS),
            ),
        };
        Self::with_fields(
            FormKind::Campaign,
            vec![
                FormField::new("name", "Name", FieldKind::Text, name),
                FormField::new(
                    "start_date",
                    "Start date",
                    FieldKind::Date,
                    start.format(DATE_FORMAT).to_string(),
                ),
                FormField::new(
                    "end_date",
                    "End date",
                    FieldKind::Date,
                    end.format(DATE_FORMAT).to_string(),
                ),
            ],
        )
    }

    pub fn credentials() -> Self {
        Self::with_fields(
            FormKind::Credentials,
            vec![
                FormField::new("email", "Email", FieldKind::Text, ""),
                FormField::new("password", "Password", FieldKind::Secret, ""),
            ],
        )
    }

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Types into the focused field. Select fields ignore typing.
    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind != FieldKind::Select {
                field.value.push(c);
            }
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind != FieldKind::Select {
                field.value.pop();
            }
        }
    }

    /// Moves the focused select field to the next/previous choice.
    pub fn cycle_choice(&mut self, forward: bool) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind == FieldKind::Select {
                field.cycle(forward);
            }
        }
    }

    /// Installs the choices for the select field `key`.
    ///
    /// A pre-selected id that is not among the choices is kept as-is; the
    /// field then shows a prompt and fails validation until changed.
    pub fn set_choices(&mut self, key: &str, choices: Vec<Choice>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            field.choices = choices;
        }
    }

    fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.trim())
            .unwrap_or("")
    }

    fn label(&self, key: &str) -> &'static str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.label)
            .unwrap_or("Field")
    }

    /// Validates a resource form into its request payload.
    pub fn payload(&self) -> Result<Payload, ValidationErrors> {
        let mut errors = Vec::new();
        let payload = match self.kind {
            FormKind::Location => self.location_payload(&mut errors).map(Payload::Location),
            FormKind::Billboard => self.billboard_payload(&mut errors).map(Payload::Billboard),
            FormKind::Campaign => self.campaign_payload(&mut errors).map(Payload::Campaign),
            FormKind::Credentials => None,
        };
        match payload {
            Some(payload) if errors.is_empty() => Ok(payload),
            _ => Err(ValidationErrors(errors)),
        }
    }

    /// Validates a credentials form.
    pub fn credentials_payload(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = Vec::new();
        let email = self.value("email");
        if !looks_like_email(email) {
            errors.push(FieldError::new("email", "Not a valid email"));
        }
        let password = self
            .fields
            .iter()
            .find(|f| f.key == "password")
            .map(|f| f.value.as_str())
            .unwrap_or("");
        if password.is_empty() {
            errors.push(FieldError::new("password", "Empty password not allowed"));
        }
        if errors.is_empty() {
            Ok(Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
        } else {
            Err(ValidationErrors(errors))
        }
    }

    fn number(&self, key: &'static str, errors: &mut Vec<FieldError>) -> Option<f64> {
        match self.value(key).parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                errors.push(FieldError::new(
                    key,
                    format!("{} must be a number", self.label(key)),
                ));
                None
            }
        }
    }

    fn positive(&self, key: &'static str, errors: &mut Vec<FieldError>) -> Option<f64> {
        let n = self.number(key, errors)?;
        if n > 0.0 {
            Some(n)
        } else {
            errors.push(FieldError::new(
                key,
                format!("{} must be greater than 0", self.label(key)),
            ));
            None
        }
    }

    fn in_range(
        &self,
        key: &'static str,
        bound: f64,
        message: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<f64> {
        let n = self.number(key, errors)?;
        if (-bound..=bound).contains(&n) {
            Some(n)
        } else {
            errors.push(FieldError::new(key, message));
            None
        }
    }

    fn date(&self, key: &'static str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
        let raw = self.value(key);
        if raw.is_empty() {
            errors.push(FieldError::new(key, format!("{} is required", self.label(key))));
            return None;
        }
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new(
                    key,
                    format!("{} must be a date (YYYY-MM-DD)", self.label(key)),
                ));
                None
            }
        }
    }

    fn location_payload(&self, errors: &mut Vec<FieldError>) -> Option<NewLocation> {
        let lat = self.in_range("lat", 90.0, "Latitude must be between -90 and 90", errors);
        let lng = self.in_range("lng", 180.0, "Longitude must be between -180 and 180", errors);
        Some(NewLocation {
            address: self.value("address").to_string(),
            city: self.value("city").to_string(),
            state: self.value("state").to_string(),
            country_code: self.value("country_code").to_string(),
            lat: lat?,
            lng: lng?,
        })
    }

    fn billboard_payload(&self, errors: &mut Vec<FieldError>) -> Option<NewBillboard> {
        let location_id = Uuid::parse_str(self.value("location_id")).ok();
        if location_id.is_none() {
            errors.push(FieldError::new("location_id", "Location is required"));
        }
        let width_mt = self.positive("width_mt", errors);
        let height_mt = self.positive("height_mt", errors);
        let dollars_per_day = self.positive("dollars_per_day", errors);
        Some(NewBillboard {
            width_mt: width_mt?,
            height_mt: height_mt?,
            dollars_per_day: dollars_per_day?,
            location_id: location_id?,
        })
    }

    fn campaign_payload(&self, errors: &mut Vec<FieldError>) -> Option<NewCampaign> {
        let name = self.value("name");
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        let start_date = self.date("start_date", errors);
        let end_date = self.date("end_date", errors);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.push(FieldError::new(
                    "end_date",
                    "End date must not be before start date",
                ));
            }
        }
        Some(NewCampaign {
            name: name.to_string(),
            start_date: start_date?,
            end_date: end_date?,
        })
    }
}

/// `local@domain.tld`, no whitespace.
fn looks_like_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, _)| !host.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    }
}
