//! Building blocks for the Akeneo REST resources.
//!
//! - [`path`]: the endpoint table mapping resources and operations to paths
//! - [`query`]: list query parameters and search filters
//! - [`pagination`]: cursor pagination over `_links.next.href`
//! - [`media`]: multipart bodies for media file uploads
//!
//! [`AkeneoClient`](crate::AkeneoClient) combines these into one method per
//! endpoint; they are public so that callers can reach endpoints the client
//! does not wrap.
//!
//! # Example
//!
//! ```rust,ignore
//! use akeneo_api::rest::{resource_path, ListQuery, Operation, Paginator, Resource, SearchFilter};
//!
//! let path = resource_path(Resource::Category, Operation::List, &[])?;
//! let query = ListQuery::new().search(SearchFilter::new().equals("parent", "master"));
//! let categories = Paginator::new(&rest_client, &path, &query.to_params(100, false), 50)?
//!     .collect_all()
//!     .await?;
//! ```

pub mod media;
pub mod pagination;
pub mod path;
pub mod query;

pub use media::{MediaTarget, MediaUpload};
pub use pagination::{Page, Paginator};
pub use path::{build_path, get_path, resource_path, Operation, Resource, ResourcePath, ENDPOINTS};
pub use query::{Condition, ListQuery, SearchFilter};
