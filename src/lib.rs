//! Typed client for the Apex Legends status API (`api.mozambiquehe.re`).
//!
//! Each operation validates its parameters, builds one GET request, and
//! reshapes the JSON body into the types in [`api::models`].

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;

pub use api::client::ApexApiClient;
pub use api::endpoints::{HistoryAction, Platform};
pub use api::models::*;
pub use api::request::{CallDescriptor, PlayerQuery, RequestBuilder};
pub use api::transport::{RawResponse, Transport, UreqTransport};
pub use config::ClientConfig;
pub use error::AppError;
