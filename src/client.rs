//! The [`AkeneoClient`] facade.
//!
//! One client owns the configuration, the current [`Session`] and a
//! [`RestClient`] carrying its bearer token. It exposes one method per
//! endpoint plus generic `get`/`patch`/`delete`/`get_list` helpers.
//!
//! # Token lifetime
//!
//! The token is fetched once by [`AkeneoClient::connect`]. It is never
//! refreshed behind the caller's back: call [`AkeneoClient::ensure_fresh_token`]
//! before long jobs or [`AkeneoClient::refresh_token`] after a 401. Both
//! need `&mut self`, so a client shared between tasks must sit behind a lock.

use std::fmt;

use serde_json::Value;

use crate::auth::oauth::{fetch_token, refresh_access_token};
use crate::auth::Session;
use crate::clients::rest::{CollectionBody, PatchBody, RestClient, RestError};
use crate::config::AkeneoConfig;
use crate::error::AkeneoError;
use crate::rest::{
    resource_path, ListQuery, MediaTarget, MediaUpload, Operation, Paginator, Resource,
    SearchFilter,
};

/// An authenticated client for one PIM.
///
/// # Example
///
/// ```rust,ignore
/// use akeneo_api::{AkeneoClient, AkeneoConfig, ListQuery, SearchFilter};
/// use serde_json::json;
///
/// let mut client = AkeneoClient::connect(config).await?;
///
/// let shoes = client
///     .get_products(&ListQuery::new().search(SearchFilter::new().equals("family", "shoes")))
///     .await?;
///
/// client.patch_product("sku-1", json!({"enabled": false})).await?;
/// ```
pub struct AkeneoClient {
    config: AkeneoConfig,
    session: Session,
    rest_client: RestClient,
}

// Verify AkeneoClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AkeneoClient>();
};

impl fmt::Debug for AkeneoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AkeneoClient")
            .field("host", self.config.host())
            .field("username", self.config.username())
            .field("token_expires", &self.session.expires)
            .finish_non_exhaustive()
    }
}

impl AkeneoClient {
    /// Obtains a token with the password grant and creates the client.
    ///
    /// No REST request is sent when the grant fails.
    ///
    /// # Errors
    ///
    /// Returns [`AkeneoError::OAuth`] if the token cannot be obtained, or
    /// [`AkeneoError::Rest`] if the HTTP client cannot be created.
    pub async fn connect(config: AkeneoConfig) -> Result<Self, AkeneoError> {
        let session = fetch_token(&config).await?;
        Ok(Self::with_session(config, session)?)
    }

    /// Creates a client from an existing session.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Unauthenticated`] if the session has no token.
    pub fn with_session(config: AkeneoConfig, session: Session) -> Result<Self, RestError> {
        let rest_client = RestClient::new(&config, &session)?;
        Ok(Self {
            config,
            session,
            rest_client,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &AkeneoConfig {
        &self.config
    }

    /// Returns the current session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the REST client bound to the current token.
    #[must_use]
    pub const fn rest_client(&self) -> &RestClient {
        &self.rest_client
    }

    /// Replaces the token.
    ///
    /// The refresh grant is tried first when the session has a refresh token;
    /// if it fails, or there is none, a new password grant is made. The
    /// session is left untouched on failure.
    ///
    /// # Errors
    ///
    /// Returns [`AkeneoError::OAuth`] if no new token could be obtained.
    pub async fn refresh_token(&mut self) -> Result<(), AkeneoError> {
        let refreshed = match self.session.refresh_token.as_deref() {
            Some(refresh_token) if !refresh_token.is_empty() => {
                match refresh_access_token(&self.config, refresh_token).await {
                    Ok(session) => Some(session),
                    Err(e) => {
                        tracing::warn!("Refresh grant failed, using password grant: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        let session = match refreshed {
            Some(session) => session,
            None => fetch_token(&self.config).await?,
        };

        self.rest_client = RestClient::new(&self.config, &session)?;
        self.session = session;
        Ok(())
    }

    /// Refreshes the token if it expires within the configured margin.
    ///
    /// Returns `true` if the token was replaced.
    ///
    /// # Errors
    ///
    /// Returns [`AkeneoError::OAuth`] if a needed refresh failed.
    pub async fn ensure_fresh_token(&mut self) -> Result<bool, AkeneoError> {
        if !self
            .session
            .expires_within(self.config.token_refresh_margin())
        {
            return Ok(false);
        }

        tracing::debug!("Access token expires within the refresh margin, refreshing");
        self.refresh_token().await?;
        Ok(true)
    }

    // Generic operations

    /// GETs a path relative to `/api/rest/v1` and returns the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status or a network error.
    pub async fn get(&self, path: &str) -> Result<Value, RestError> {
        Ok(self.rest_client.get(path, &[]).await?.body)
    }

    /// PATCHes a path and returns the status code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status or a network error.
    pub async fn patch(&self, path: &str, body: impl Into<PatchBody>) -> Result<u16, RestError> {
        Ok(self.rest_client.patch(path, body.into()).await?.code)
    }

    /// DELETEs a path and returns the status code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status or a network error.
    pub async fn delete(&self, path: &str) -> Result<u16, RestError> {
        Ok(self.rest_client.delete(path).await?.code)
    }

    /// Returns a paginator over a list path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if `path` is empty.
    pub fn paginate(&self, path: &str, query: &ListQuery) -> Result<Paginator<'_>, RestError> {
        Paginator::new(
            &self.rest_client,
            path,
            &query.to_params(self.config.page_limit(), false),
            self.config.max_pages(),
        )
    }

    /// Returns a paginator over a resource list.
    ///
    /// `ids` fills the placeholders of the list path, such as `attribute`
    /// for attribute options.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the resource cannot be listed.
    pub fn paginate_resource(
        &self,
        resource: Resource,
        ids: &[(&str, &str)],
        query: &ListQuery,
    ) -> Result<Paginator<'_>, RestError> {
        let path = resource_path(resource, Operation::List, ids)?;
        Paginator::new(
            &self.rest_client,
            &path,
            &query.to_params(self.config.page_limit(), resource.uses_search_after()),
            self.config.max_pages(),
        )
    }

    /// Fetches every page of a list path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] with the items collected so far if
    /// any page fails.
    pub async fn get_list(&self, path: &str, query: &ListQuery) -> Result<Vec<Value>, RestError> {
        self.paginate(path, query)?.collect_all().await
    }

    /// Uploads a media file and attaches it to a product or product model.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status or a network error.
    pub async fn upload_media(
        &self,
        target: MediaTarget,
        upload: &MediaUpload,
    ) -> Result<u16, RestError> {
        let path = resource_path(Resource::MediaFile, Operation::Upload, &[])?;
        let response = self
            .rest_client
            .post_multipart(&path, upload.to_multipart_fields(target))
            .await?;

        tracing::info!(
            "Uploaded {} for {} {} ({})",
            upload.file_name(),
            target.owner_key(),
            upload.identifier,
            response.location().unwrap_or("no location")
        );
        Ok(response.code)
    }

    async fn list(
        &self,
        resource: Resource,
        ids: &[(&str, &str)],
        query: &ListQuery,
    ) -> Result<Vec<Value>, RestError> {
        self.paginate_resource(resource, ids, query)?
            .collect_all()
            .await
    }

    async fn find(&self, resource: Resource, ids: &[(&str, &str)]) -> Result<Value, RestError> {
        let path = resource_path(resource, Operation::Find, ids)?;
        self.get(&path).await
    }

    async fn update(
        &self,
        resource: Resource,
        ids: &[(&str, &str)],
        body: Value,
    ) -> Result<u16, RestError> {
        let path = resource_path(resource, Operation::Update, ids)?;
        self.patch(&path, body).await
    }

    async fn update_many(
        &self,
        resource: Resource,
        ids: &[(&str, &str)],
        items: &[Value],
    ) -> Result<u16, RestError> {
        let path = resource_path(resource, Operation::UpdateMany, ids)?;
        self.patch(&path, CollectionBody::from_items(items)).await
    }

    async fn remove(&self, resource: Resource, ids: &[(&str, &str)]) -> Result<u16, RestError> {
        let path = resource_path(resource, Operation::Delete, ids)?;
        self.delete(&path).await
    }

    // Products

    /// Lists products with `search_after` pagination.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] with the products collected so far
    /// if any page fails.
    pub async fn get_products(&self, query: &ListQuery) -> Result<Vec<Value>, RestError> {
        self.list(Resource::Product, &[], query).await
    }

    /// Gets a product by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] with status 404 if the product does not exist.
    pub async fn get_product(&self, identifier: &str) -> Result<Value, RestError> {
        self.find(Resource::Product, &[("code", identifier)]).await
    }

    /// Creates or updates a product.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status, e.g. 422 on validation errors.
    pub async fn patch_product(&self, identifier: &str, body: Value) -> Result<u16, RestError> {
        self.update(Resource::Product, &[("code", identifier)], body)
            .await
    }

    /// Creates or updates several products in one collection request.
    ///
    /// Per-product failures are logged; the overall status is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the request as a whole fails.
    pub async fn patch_products(&self, items: &[Value]) -> Result<u16, RestError> {
        self.update_many(Resource::Product, &[], items).await
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn delete_product(&self, identifier: &str) -> Result<u16, RestError> {
        self.remove(Resource::Product, &[("code", identifier)]).await
    }

    // Product models

    /// Lists product models with `search_after` pagination.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_product_models(&self, query: &ListQuery) -> Result<Vec<Value>, RestError> {
        self.list(Resource::ProductModel, &[], query).await
    }

    /// Gets a product model by code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_product_model(&self, code: &str) -> Result<Value, RestError> {
        self.find(Resource::ProductModel, &[("code", code)]).await
    }

    /// Creates or updates a product model.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn patch_product_model(&self, code: &str, body: Value) -> Result<u16, RestError> {
        self.update(Resource::ProductModel, &[("code", code)], body)
            .await
    }

    /// Creates or updates several product models.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the request as a whole fails.
    pub async fn patch_product_models(&self, items: &[Value]) -> Result<u16, RestError> {
        self.update_many(Resource::ProductModel, &[], items).await
    }

    // Categories

    /// Lists categories.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_categories(&self, query: &ListQuery) -> Result<Vec<Value>, RestError> {
        self.list(Resource::Category, &[], query).await
    }

    /// Gets a category by code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_category(&self, code: &str) -> Result<Value, RestError> {
        self.find(Resource::Category, &[("code", code)]).await
    }

    /// Lists the direct children of a category.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_child_categories(&self, parent: &str) -> Result<Vec<Value>, RestError> {
        let query = ListQuery::new().search(SearchFilter::new().equals("parent", parent));
        self.list(Resource::Category, &[], &query).await
    }

    /// Creates or updates a category.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn patch_category(&self, code: &str, body: Value) -> Result<u16, RestError> {
        self.update(Resource::Category, &[("code", code)], body)
            .await
    }

    /// Creates or updates several categories.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the request as a whole fails.
    pub async fn patch_categories(&self, items: &[Value]) -> Result<u16, RestError> {
        self.update_many(Resource::Category, &[], items).await
    }

    // Families

    /// Lists families.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_families(&self, query: &ListQuery) -> Result<Vec<Value>, RestError> {
        self.list(Resource::Family, &[], query).await
    }

    /// Gets a family by code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_family(&self, code: &str) -> Result<Value, RestError> {
        self.find(Resource::Family, &[("code", code)]).await
    }

    /// Creates or updates a family.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn patch_family(&self, code: &str, body: Value) -> Result<u16, RestError> {
        self.update(Resource::Family, &[("code", code)], body).await
    }

    // Attributes

    /// Lists attributes.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_attributes(&self, query: &ListQuery) -> Result<Vec<Value>, RestError> {
        self.list(Resource::Attribute, &[], query).await
    }

    /// Gets an attribute by code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_attribute(&self, code: &str) -> Result<Value, RestError> {
        self.find(Resource::Attribute, &[("code", code)]).await
    }

    /// Creates or updates an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn patch_attribute(&self, code: &str, body: Value) -> Result<u16, RestError> {
        self.update(Resource::Attribute, &[("code", code)], body)
            .await
    }

    /// Deletes an attribute.
    ///
    /// Most PIM editions reject this with 405; the status is reported as an error.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn delete_attribute(&self, code: &str) -> Result<u16, RestError> {
        self.remove(Resource::Attribute, &[("code", code)]).await
    }

    // Attribute options

    /// Lists the options of an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_attribute_options(
        &self,
        attribute: &str,
        query: &ListQuery,
    ) -> Result<Vec<Value>, RestError> {
        self.list(Resource::AttributeOption, &[("attribute", attribute)], query)
            .await
    }

    /// Gets one option of an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_attribute_option(
        &self,
        attribute: &str,
        code: &str,
    ) -> Result<Value, RestError> {
        self.find(
            Resource::AttributeOption,
            &[("attribute", attribute), ("code", code)],
        )
        .await
    }

    /// Creates or updates one option of an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn patch_attribute_option(
        &self,
        attribute: &str,
        code: &str,
        body: Value,
    ) -> Result<u16, RestError> {
        self.update(
            Resource::AttributeOption,
            &[("attribute", attribute), ("code", code)],
            body,
        )
        .await
    }

    /// Creates or updates several options of an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the request as a whole fails.
    pub async fn patch_attribute_options(
        &self,
        attribute: &str,
        items: &[Value],
    ) -> Result<u16, RestError> {
        self.update_many(Resource::AttributeOption, &[("attribute", attribute)], items)
            .await
    }

    // Attribute groups

    /// Lists attribute groups.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_attribute_groups(&self, query: &ListQuery) -> Result<Vec<Value>, RestError> {
        self.list(Resource::AttributeGroup, &[], query).await
    }

    /// Gets an attribute group by code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_attribute_group(&self, code: &str) -> Result<Value, RestError> {
        self.find(Resource::AttributeGroup, &[("code", code)]).await
    }

    /// Creates or updates an attribute group.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn patch_attribute_group(&self, code: &str, body: Value) -> Result<u16, RestError> {
        self.update(Resource::AttributeGroup, &[("code", code)], body)
            .await
    }

    // Association types

    /// Lists association types.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_association_types(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<Value>, RestError> {
        self.list(Resource::AssociationType, &[], query).await
    }

    /// Gets an association type by code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_association_type(&self, code: &str) -> Result<Value, RestError> {
        self.find(Resource::AssociationType, &[("code", code)]).await
    }

    /// Creates or updates an association type.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn patch_association_type(
        &self,
        code: &str,
        body: Value,
    ) -> Result<u16, RestError> {
        self.update(Resource::AssociationType, &[("code", code)], body)
            .await
    }

    // Measure families

    /// Lists legacy measure families.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_measure_families(&self, query: &ListQuery) -> Result<Vec<Value>, RestError> {
        self.list(Resource::MeasureFamily, &[], query).await
    }

    /// Gets a legacy measure family by code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_measure_family(&self, code: &str) -> Result<Value, RestError> {
        self.find(Resource::MeasureFamily, &[("code", code)]).await
    }

    // Measurement families

    /// Gets all measurement families. The endpoint is not paginated.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_measurement_families(&self) -> Result<Value, RestError> {
        self.find(Resource::MeasurementFamily, &[]).await
    }

    /// Creates or updates measurement families.
    ///
    /// `body` is a JSON array of measurement families.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the request as a whole fails.
    pub async fn patch_measurement_families(&self, body: Value) -> Result<u16, RestError> {
        let path = resource_path(Resource::MeasurementFamily, Operation::UpdateMany, &[])?;
        self.patch(&path, body).await
    }

    // Channels

    /// Lists channels.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Pagination`] if any page fails.
    pub async fn get_channels(&self, query: &ListQuery) -> Result<Vec<Value>, RestError> {
        self.list(Resource::Channel, &[], query).await
    }

    /// Gets a channel by code.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_channel(&self, code: &str) -> Result<Value, RestError> {
        self.find(Resource::Channel, &[("code", code)]).await
    }

    // Media files

    /// Uploads a file for a product media attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn upload_product_media(&self, upload: &MediaUpload) -> Result<u16, RestError> {
        self.upload_media(MediaTarget::Product, upload).await
    }

    /// Uploads a file for a product model media attribute.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn upload_product_model_media(
        &self,
        upload: &MediaUpload,
    ) -> Result<u16, RestError> {
        self.upload_media(MediaTarget::ProductModel, upload).await
    }

    /// Gets the metadata of a media file.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] on a non-2xx status.
    pub async fn get_media_file(&self, code: &str) -> Result<Value, RestError> {
        self.find(Resource::MediaFile, &[("code", code)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, HostUrl, Password, Username};

    fn create_config() -> AkeneoConfig {
        AkeneoConfig::builder()
            .host(HostUrl::new("https://pim.example.com").unwrap())
            .client_id(ClientId::new("client-id").unwrap())
            .client_secret(ClientSecret::new("client-secret").unwrap())
            .username(Username::new("admin").unwrap())
            .password(Password::new("admin-password").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_with_session_rejects_empty_token() {
        let session = Session::new(String::new(), None, None);
        let result = AkeneoClient::with_session(create_config(), session);
        assert!(matches!(result, Err(RestError::Unauthenticated)));
    }

    #[test]
    fn test_debug_hides_token_and_password() {
        let session = Session::new("secret-token".to_string(), None, None);
        let client = AkeneoClient::with_session(create_config(), session).unwrap();

        let debug = format!("{client:?}");
        assert!(debug.contains("pim.example.com"));
        assert!(!debug.contains("secret-token"));
        assert!(!debug.contains("admin-password"));
    }

    #[test]
    fn test_paginate_rejects_empty_path() {
        let session = Session::new("token".to_string(), None, None);
        let client = AkeneoClient::with_session(create_config(), session).unwrap();

        assert!(matches!(
            client.paginate("", &ListQuery::new()),
            Err(RestError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_paginate_resource_requires_attribute() {
        let session = Session::new("token".to_string(), None, None);
        let client = AkeneoClient::with_session(create_config(), session).unwrap();

        assert!(matches!(
            client.paginate_resource(Resource::AttributeOption, &[], &ListQuery::new()),
            Err(RestError::InvalidPath { .. })
        ));
    }

    #[tokio::test]
    async fn test_ensure_fresh_token_skips_long_lived_session() {
        let session = Session::new(
            "token".to_string(),
            None,
            Some(chrono::Utc::now() + chrono::Duration::hours(1)),
        );
        let mut client = AkeneoClient::with_session(create_config(), session).unwrap();

        assert!(!client.ensure_fresh_token().await.unwrap());
        assert_eq!(client.session().access_token, "token");
    }
}
