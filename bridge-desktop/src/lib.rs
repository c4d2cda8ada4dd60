//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides the `HttpClient` implementation backed by `reqwest`,
//! with rustls TLS, connection pooling and multipart uploads for the Graph API
//! photo and video endpoints.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use bridge_traits::HttpClient;
//!
//! #[tokio::main]
//! async fn main() -> bridge_traits::error::Result<()> {
//!     let http_client = ReqwestHttpClient::new()?;
//!
//!     // Hand it to SocialConfig::builder().http_client(..)
//!     Ok(())
//! }
//! ```

mod http;

pub use http::ReqwestHttpClient;
