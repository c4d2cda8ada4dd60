//! # Facebook Provider
//!
//! Client for the media parts of the Facebook Graph API.
//!
//! ## Overview
//!
//! This module provides:
//! - The generic Graph request pattern (fetch object, fetch connections,
//!   fetch image, publish) in [`GraphApi`]
//! - Album, photo and video operations in [`MediaOperations`]
//! - Mapping of Graph error responses to [`FacebookError`]

pub mod client;
pub mod error;
pub mod graph;
pub mod media;
pub mod types;

pub use client::FacebookClient;
pub use error::{FacebookError, Result};
pub use graph::GraphApi;
pub use media::{MediaApi, MediaOperations};
pub use types::{Album, AlbumType, Image, ImageType, Photo, Privacy, Reference, Tag, Video};
