//! REST API client module for the balldontlie players API.
//!
//! `ApiClient` builds the paginated `/players` URL, performs the GET and
//! decodes the body into a `PageResult`. Requests are unauthenticated
//! unless an API key is configured.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};
