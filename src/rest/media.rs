//! Multipart bodies for `POST /media-files`.
//!
//! The upload carries two parts: a JSON metadata part naming the product
//! (or product model) and attribute the file belongs to, and the file
//! itself. The file part's file name is the MIME type with `/` replaced by
//! `.`, e.g. `image.jpeg`.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::clients::MultipartField;

/// What the uploaded file is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTarget {
    /// A product, referenced by identifier.
    Product,
    /// A product model, referenced by code.
    ProductModel,
}

impl MediaTarget {
    /// Name of the metadata part.
    #[must_use]
    pub const fn part_name(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::ProductModel => "product_model",
        }
    }

    /// Key holding the owner reference inside the metadata.
    #[must_use]
    pub const fn owner_key(&self) -> &'static str {
        match self {
            Self::Product => "identifier",
            Self::ProductModel => "code",
        }
    }
}

/// A file to attach to a product or product model attribute.
///
/// # Example
///
/// ```rust
/// use akeneo_api::rest::{MediaTarget, MediaUpload};
///
/// let upload = MediaUpload::new(vec![0xFF, 0xD8, 0xFF], "photos/front.jpg", "sku-1", "picture")
///     .scope("ecommerce")
///     .locale("en_US");
///
/// assert_eq!(upload.mime_type(), "image/jpeg");
/// assert_eq!(upload.file_name(), "image.jpeg");
/// assert_eq!(upload.to_multipart_fields(MediaTarget::Product).len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaUpload {
    /// Raw file content.
    pub bytes: Vec<u8>,
    /// Path the MIME type is guessed from. The file is not read.
    pub file_path: PathBuf,
    /// Product identifier or product model code.
    pub identifier: String,
    /// Code of the media attribute.
    pub attribute: String,
    /// Locale of the value, for localizable attributes.
    pub locale: Option<String>,
    /// Channel of the value, for scopable attributes.
    pub scope: Option<String>,
}

impl MediaUpload {
    /// Creates an upload for a non-localizable, non-scopable attribute.
    #[must_use]
    pub fn new(
        bytes: Vec<u8>,
        file_path: impl AsRef<Path>,
        identifier: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            file_path: file_path.as_ref().to_path_buf(),
            identifier: identifier.into(),
            attribute: attribute.into(),
            locale: None,
            scope: None,
        }
    }

    /// Sets the locale of the value.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Sets the channel of the value.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Returns the MIME type guessed from the file extension.
    ///
    /// Unknown extensions fall back to `application/octet-stream`.
    #[must_use]
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.file_path)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    /// Returns the file name announced for the file part.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.mime_type().replace('/', ".")
    }

    /// Returns the metadata JSON. Missing locale and scope are sent as `null`.
    #[must_use]
    pub fn metadata(&self, target: MediaTarget) -> serde_json::Value {
        json!({
            target.owner_key(): self.identifier,
            "attribute": self.attribute,
            "scope": self.scope,
            "locale": self.locale,
        })
    }

    /// Builds the two multipart parts: metadata first, then the file.
    #[must_use]
    pub fn to_multipart_fields(&self, target: MediaTarget) -> Vec<MultipartField> {
        let mime = self.mime_type();
        vec![
            MultipartField::Text {
                name: target.part_name().to_string(),
                value: self.metadata(target).to_string(),
            },
            MultipartField::File {
                name: "file".to_string(),
                file_name: mime.replace('/', "."),
                mime,
                bytes: self.bytes.clone(),
            },
        ]
    }
}
