//! # Twitter Provider
//!
//! Direct message support for the Twitter REST API (v1).
//!
//! Request signing is pluggable through [`core_auth::RequestSigner`]; this
//! crate only builds requests, checks statuses and decodes responses.

pub mod client;
pub mod direct_messages;
pub mod error;
pub mod types;

pub use client::TwitterClient;
pub use direct_messages::{DirectMessageApi, DirectMessageOperations};
pub use error::{Result, TwitterError};
pub use types::{DirectMessage, PageParams, TwitterProfile};
