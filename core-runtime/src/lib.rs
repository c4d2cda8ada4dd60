//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the social API clients:
//! - Logging and tracing infrastructure
//! - Configuration management (endpoints, timeouts, retry, HTTP client)
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the provider crates depend
//! on. It establishes the logging conventions and the validated configuration
//! that every Facebook and Twitter client is built from.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{FacebookApiConfig, SocialConfig, SocialConfigBuilder, TwitterApiConfig};
pub use error::{Error, Result};
