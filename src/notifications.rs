//! Toast notifications shown in the status bar.

use std::collections::VecDeque;
use std::fmt;

use crate::data::Resource;

/// Success indicator (✓)
pub const SUCCESS: &str = "✓";
/// Error indicator (✗)
pub const ERROR: &str = "✗";
/// Progress indicator (⟳)
pub const PROGRESS: &str = "⟳";
/// Information indicator (ℹ)
pub const INFO: &str = "ℹ";

/// How many toasts are kept.
pub const TOAST_HISTORY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    pub fn symbol(self) -> &'static str {
        match self {
            ToastLevel::Success => SUCCESS,
            ToastLevel::Info => INFO,
            ToastLevel::Error => ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    pub fn new(level: ToastLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, title)
    }

    pub fn created(resource: Resource) -> Self {
        Self::success(format!("{resource} created!"))
    }

    pub fn updated(resource: Resource) -> Self {
        Self::success(format!("{resource} updated!"))
    }

    pub fn deleted(resource: Resource) -> Self {
        Self::success(format!("{resource} deleted"))
    }

    /// A delete refused because other records still reference the target.
    pub fn has_dependents(resource: Resource, detail: &str) -> Self {
        let toast = Self::error(format!(
            "Forbidden: {} has dependents",
            resource.label().to_lowercase()
        ));
        if detail.is_empty() {
            toast
        } else {
            toast.with_description(detail)
        }
    }

    pub fn generic_failure() -> Self {
        Self::error("Error").with_description("Oops, something went wrong")
    }

    pub fn session_expired() -> Self {
        Self::error("Session expired").with_description("Please sign in again")
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.symbol(), self.title)?;
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

/// Formats an in-progress message, e.g. `⟳ Saving...`.
pub fn progress(msg: &str) -> String {
    format!("{PROGRESS} {msg}...")
}

/// Bounded, newest-last toast history.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        if self.toasts.len() == TOAST_HISTORY {
            self.toasts.pop_front();
        }
        self.toasts.push_back(toast);
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
