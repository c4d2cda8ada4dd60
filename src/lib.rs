//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`core-service`, `provider-facebook`, `provider-twitter`).
//! Host applications can depend on `social-workspace` and enable the documented
//! features without needing to wire each crate individually.

#[cfg(any(feature = "desktop-shims", feature = "facebook", feature = "twitter"))]
pub use core_service as service;

#[cfg(feature = "facebook")]
pub use provider_facebook as facebook;

#[cfg(feature = "twitter")]
pub use provider_twitter as twitter;
