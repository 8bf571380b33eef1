//! REST API access: explicit sessions, a transport seam and typed operations.

mod client;
mod error;
mod session;
mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use session::Session;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

#[cfg(test)]
pub(crate) use transport::testing;
