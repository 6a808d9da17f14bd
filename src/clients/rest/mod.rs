//! REST API client for the Akeneo PIM.
//!
//! This module provides a higher-level REST API client built on top of the
//! [`HttpClient`](crate::clients::HttpClient).
//!
//! # Overview
//!
//! - [`RestClient`]: The REST API client with `get()`, `patch()`, `delete()`
//!   and `post_multipart()` methods
//! - [`PatchBody`], [`CollectionBody`]: JSON and bulk PATCH bodies
//! - [`RestError`], [`PaginationFailure`]: Error types for REST API operations

mod body;
mod client;
mod errors;

pub use body::{failed_lines, CollectionBody, PatchBody};
pub use client::RestClient;
pub use errors::{PaginationFailure, RestError};
