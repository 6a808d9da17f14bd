//! Endpoint table for the Akeneo REST resources.
//!
//! Every supported `(resource, operation)` pair maps to one [`ResourcePath`]
//! in [`ENDPOINTS`]. Templates are relative to `/api/rest/v1` and use
//! `{name}` placeholders that [`build_path`] fills with percent-encoded codes.
//!
//! # Example
//!
//! ```rust
//! use akeneo_api::rest::{resource_path, Operation, Resource};
//!
//! let path = resource_path(
//!     Resource::AttributeOption,
//!     Operation::Find,
//!     &[("attribute", "color"), ("code", "dark blue")],
//! )
//! .unwrap();
//!
//! assert_eq!(path, "attributes/color/options/dark%20blue");
//! ```

use std::fmt;

use crate::clients::rest::RestError;
use crate::clients::HttpMethod;

/// Resources exposed by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Products, identified by their identifier (SKU).
    Product,
    /// Product models.
    ProductModel,
    /// Categories.
    Category,
    /// Families.
    Family,
    /// Attributes.
    Attribute,
    /// Options of a select attribute.
    AttributeOption,
    /// Attribute groups.
    AttributeGroup,
    /// Association types.
    AssociationType,
    /// Legacy measure families.
    MeasureFamily,
    /// Measurement families.
    MeasurementFamily,
    /// Channels.
    Channel,
    /// Product and product model media files.
    MediaFile,
}

impl Resource {
    /// Returns the collection segment of the resource path.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::ProductModel => "product-models",
            Self::Category => "categories",
            Self::Family => "families",
            Self::Attribute => "attributes",
            Self::AttributeOption => "attributes/{attribute}/options",
            Self::AttributeGroup => "attribute-groups",
            Self::AssociationType => "association-types",
            Self::MeasureFamily => "measure-families",
            Self::MeasurementFamily => "measurement-families",
            Self::Channel => "channels",
            Self::MediaFile => "media-files",
        }
    }

    /// Returns `true` if list requests use `pagination_type=search_after`.
    ///
    /// Offset pagination degrades on large catalogs, so it is avoided for
    /// products and product models.
    #[must_use]
    pub const fn uses_search_after(&self) -> bool {
        matches!(self, Self::Product | Self::ProductModel)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations that can be performed on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List resources, following pagination (GET /resources).
    List,
    /// Find a single resource by code (GET /resources/{code}).
    Find,
    /// Create or update one resource (PATCH /resources/{code}).
    Update,
    /// Create or update several resources (PATCH /resources).
    UpdateMany,
    /// Delete a resource (DELETE /resources/{code}).
    Delete,
    /// Upload a file (POST /resources).
    Upload,
}

impl Operation {
    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::List | Self::Find => HttpMethod::Get,
            Self::Update | Self::UpdateMany => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
            Self::Upload => HttpMethod::Post,
        }
    }
}

/// A path template for one resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The resource this path belongs to.
    pub resource: Resource,
    /// The operation this path is used for.
    pub operation: Operation,
    /// Placeholders the template requires, in order.
    pub ids: &'static [&'static str],
    /// The path template, relative to the REST base path.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        resource: Resource,
        operation: Operation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            resource,
            operation,
            ids,
            template,
        }
    }

    /// Returns the HTTP method of the operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        self.operation.http_method()
    }
}

const CODE: &[&str] = &["code"];
const NONE: &[&str] = &[];

/// Every supported endpoint.
pub const ENDPOINTS: &[ResourcePath] = &[
    // Products
    ResourcePath::new(Resource::Product, Operation::List, NONE, "products"),
    ResourcePath::new(Resource::Product, Operation::Find, CODE, "products/{code}"),
    ResourcePath::new(Resource::Product, Operation::Update, CODE, "products/{code}"),
    ResourcePath::new(Resource::Product, Operation::UpdateMany, NONE, "products"),
    ResourcePath::new(Resource::Product, Operation::Delete, CODE, "products/{code}"),
    // Product models
    ResourcePath::new(Resource::ProductModel, Operation::List, NONE, "product-models"),
    ResourcePath::new(Resource::ProductModel, Operation::Find, CODE, "product-models/{code}"),
    ResourcePath::new(Resource::ProductModel, Operation::Update, CODE, "product-models/{code}"),
    ResourcePath::new(Resource::ProductModel, Operation::UpdateMany, NONE, "product-models"),
    // Categories
    ResourcePath::new(Resource::Category, Operation::List, NONE, "categories"),
    ResourcePath::new(Resource::Category, Operation::Find, CODE, "categories/{code}"),
    ResourcePath::new(Resource::Category, Operation::Update, CODE, "categories/{code}"),
    ResourcePath::new(Resource::Category, Operation::UpdateMany, NONE, "categories"),
    // Families
    ResourcePath::new(Resource::Family, Operation::List, NONE, "families"),
    ResourcePath::new(Resource::Family, Operation::Find, CODE, "families/{code}"),
    ResourcePath::new(Resource::Family, Operation::Update, CODE, "families/{code}"),
    // Attributes
    ResourcePath::new(Resource::Attribute, Operation::List, NONE, "attributes"),
    ResourcePath::new(Resource::Attribute, Operation::Find, CODE, "attributes/{code}"),
    ResourcePath::new(Resource::Attribute, Operation::Update, CODE, "attributes/{code}"),
    ResourcePath::new(Resource::Attribute, Operation::Delete, CODE, "attributes/{code}"),
    // Attribute options
    ResourcePath::new(
        Resource::AttributeOption,
        Operation::List,
        &["attribute"],
        "attributes/{attribute}/options",
    ),
    ResourcePath::new(
        Resource::AttributeOption,
        Operation::Find,
        &["attribute", "code"],
        "attributes/{attribute}/options/{code}",
    ),
    ResourcePath::new(
        Resource::AttributeOption,
        Operation::Update,
        &["attribute", "code"],
        "attributes/{attribute}/options/{code}",
    ),
    ResourcePath::new(
        Resource::AttributeOption,
        Operation::UpdateMany,
        &["attribute"],
        "attributes/{attribute}/options",
    ),
    // Attribute groups
    ResourcePath::new(Resource::AttributeGroup, Operation::List, NONE, "attribute-groups"),
    ResourcePath::new(Resource::AttributeGroup, Operation::Find, CODE, "attribute-groups/{code}"),
    ResourcePath::new(Resource::AttributeGroup, Operation::Update, CODE, "attribute-groups/{code}"),
    // Association types
    ResourcePath::new(Resource::AssociationType, Operation::List, NONE, "association-types"),
    ResourcePath::new(Resource::AssociationType, Operation::Find, CODE, "association-types/{code}"),
    ResourcePath::new(Resource::AssociationType, Operation::Update, CODE, "association-types/{code}"),
    // Measure families
    ResourcePath::new(Resource::MeasureFamily, Operation::List, NONE, "measure-families"),
    ResourcePath::new(Resource::MeasureFamily, Operation::Find, CODE, "measure-families/{code}"),
    // Measurement families: one unpaginated document, updated in bulk
    ResourcePath::new(Resource::MeasurementFamily, Operation::Find, NONE, "measurement-families"),
    ResourcePath::new(Resource::MeasurementFamily, Operation::UpdateMany, NONE, "measurement-families"),
    // Channels
    ResourcePath::new(Resource::Channel, Operation::List, NONE, "channels"),
    ResourcePath::new(Resource::Channel, Operation::Find, CODE, "channels/{code}"),
    // Media files
    ResourcePath::new(Resource::MediaFile, Operation::Find, CODE, "media-files/{code}"),
    ResourcePath::new(Resource::MediaFile, Operation::Upload, NONE, "media-files"),
];

/// Looks up the endpoint for a resource operation.
#[must_use]
pub fn get_path(resource: Resource, operation: Operation) -> Option<&'static ResourcePath> {
    ENDPOINTS
        .iter()
        .find(|p| p.resource == resource && p.operation == operation)
}

/// Fills `{name}` placeholders with percent-encoded values.
///
/// Each `/`-separated segment of a value is encoded on its own, so media
/// file codes such as `a/b/c/front.jpg` keep their slashes.
///
/// # Example
///
/// ```rust
/// use akeneo_api::rest::build_path;
///
/// assert_eq!(build_path("products/{code}", &[("code", "sku 1")]), "products/sku%201");
/// assert_eq!(
///     build_path("media-files/{code}", &[("code", "a/b/front image.jpg")]),
///     "media-files/a/b/front%20image.jpg"
/// );
/// ```
#[must_use]
pub fn build_path(template: &str, ids: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = value
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");
        result = result.replace(&placeholder, &encoded);
    }

    result
}

/// Resolves the path of a resource operation.
///
/// # Errors
///
/// Returns [`RestError::InvalidPath`] if the operation is not supported
/// for the resource, or a required code is missing or empty.
pub fn resource_path(
    resource: Resource,
    operation: Operation,
    ids: &[(&str, &str)],
) -> Result<String, RestError> {
    let endpoint = get_path(resource, operation).ok_or_else(|| RestError::InvalidPath {
        path: format!("{resource} ({operation:?} is not supported)"),
    })?;

    for required in endpoint.ids {
        let present = ids
            .iter()
            .any(|(key, value)| key == required && !value.trim().is_empty());
        if !present {
            return Err(RestError::InvalidPath {
                path: build_path(endpoint.template, ids),
            });
        }
    }

    Ok(build_path(endpoint.template, ids))
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
    assert_send_sync::<Operation>();
    assert_send_sync::<ResourcePath>();
};
