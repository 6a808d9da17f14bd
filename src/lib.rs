//! # Akeneo API Rust Client
//!
//! A Rust client for the Akeneo PIM REST API, providing type-safe
//! configuration, OAuth token handling, paginated list calls and bulk updates.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`AkeneoConfig`] and [`AkeneoConfigBuilder`]
//! - Validated newtypes for the host and the API credentials
//! - Password and refresh token grants via [`auth::oauth`]
//! - Session management with expiry tracking
//! - Async HTTP client that never sends the token to a foreign host
//! - One method per endpoint on [`AkeneoClient`]: products, product models,
//!   categories, families, attributes and their options, attribute groups,
//!   association types, measure and measurement families, channels, media files
//! - Cursor pagination with cycle and page-cap safeguards via [`rest`]
//!
//! ## Quick Start
//!
//! ```rust
//! use akeneo_api::{AkeneoConfig, ClientId, ClientSecret, HostUrl, Password, Username};
//!
//! // Create configuration using the builder pattern
//! let config = AkeneoConfig::builder()
//!     .host(HostUrl::new("https://pim.example.com").unwrap())
//!     .client_id(ClientId::new("client-id").unwrap())
//!     .client_secret(ClientSecret::new("client-secret").unwrap())
//!     .username(Username::new("api-user").unwrap())
//!     .password(Password::new("api-password").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Connecting
//!
//! [`AkeneoClient::connect`] obtains a token with the password grant. If the
//! grant fails, no other request is sent.
//!
//! ```rust,ignore
//! use akeneo_api::{AkeneoClient, ListQuery, SearchFilter};
//! use serde_json::json;
//!
//! let mut client = AkeneoClient::connect(config).await?;
//!
//! // Every page of a list, in server order
//! let children = client.get_child_categories("master").await?;
//!
//! // One product
//! let product = client.get_product("sku-1").await?;
//!
//! // Several products in one collection request
//! let status = client
//!     .patch_products(&[
//!         json!({"identifier": "sku-1", "enabled": true}),
//!         json!({"identifier": "sku-2", "enabled": false}),
//!     ])
//!     .await?;
//! ```
//!
//! ## Token Refresh
//!
//! Tokens are never refreshed implicitly:
//!
//! ```rust,ignore
//! // Before a long job
//! client.ensure_fresh_token().await?;
//!
//! // Or after a 401
//! if matches!(err.status(), Some(401)) {
//!     client.refresh_token().await?;
//! }
//! ```
//!
//! ## Partial Results
//!
//! A list call that fails part way still hands back what it collected:
//!
//! ```rust,ignore
//! use akeneo_api::clients::RestError;
//!
//! match client.get_products(&ListQuery::new()).await {
//!     Ok(products) => println!("{} products", products.len()),
//!     Err(RestError::Pagination { items, reason, .. }) => {
//!         eprintln!("Stopped after {} products: {reason}", items.len());
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No silent retries**: Failures are logged and returned to the caller

pub mod auth;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::Session;
pub use client::AkeneoClient;
pub use config::{
    AkeneoConfig, AkeneoConfigBuilder, ClientId, ClientSecret, HostUrl, Password, Username,
};
pub use error::{AkeneoError, ConfigError};

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, HttpResponseError,
    InvalidHttpRequestError,
};

// Re-export REST types
pub use clients::rest::{CollectionBody, PaginationFailure, PatchBody, RestClient, RestError};
pub use rest::{ListQuery, MediaTarget, MediaUpload, Paginator, Resource, SearchFilter};
