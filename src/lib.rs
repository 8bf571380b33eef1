//! Terminal console for a billboard advertising API.
//!
//! Everything except terminal setup lives here so it can be tested without a TTY.

pub mod actions;
pub mod api;
pub mod app;
pub mod async_task;
pub mod columns;
pub mod config;
pub mod data;
pub mod forms;
pub mod key_handler;
pub mod logging;
pub mod modal;
pub mod notifications;
pub mod pages;
pub mod pagination;
pub mod render_context;
pub mod routes;
pub mod screen;
pub mod state;
pub mod ui_utils;

pub use api::{ApiClient, ApiError, Session};
pub use app::App;
pub use config::{Cli, Config, ConfigError};
pub use data::{Billboard, Campaign, Location, Resource};
