//! # Authorization Module
//!
//! Request authorization for the Facebook and Twitter clients.
//!
//! ## Overview
//!
//! Obtaining tokens (the OAuth dance) happens outside this workspace. This
//! crate takes the result of that dance and answers two questions for every
//! API operation:
//!
//! - Is the client authorized at all? Operations that need a user context call
//!   [`AuthorizedClient::require_authorization`] before touching the network.
//! - How is an outgoing request signed? A [`RequestSigner`] decorates each
//!   request. [`BearerTokenSigner`] covers OAuth 2.0 (Facebook); other schemes,
//!   such as OAuth 1.0a for Twitter, plug in by implementing the trait.

pub mod client;
pub mod error;
pub mod signer;
pub mod types;

pub use client::AuthorizedClient;
pub use error::{AuthError, Result};
pub use signer::{BearerTokenSigner, RequestSigner};
pub use types::{AccessGrant, ProviderKind};
