//! List query parameters and search filters.
//!
//! Akeneo list endpoints accept a `search` parameter holding a JSON object
//! that maps each property to a list of conditions:
//!
//! ```json
//! {"parent": [{"operator": "=", "value": "master"}]}
//! ```
//!
//! [`SearchFilter`] builds that object; [`ListQuery`] gathers it with the
//! other list parameters.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::config::MAX_PAGE_LIMIT;

/// One condition on a searched property.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    operator: String,
    value: Option<Value>,
    scope: Option<String>,
    locale: Option<String>,
}

impl Condition {
    /// Creates a condition with an operator and a value.
    #[must_use]
    pub fn new(operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            operator: operator.into(),
            value: Some(value.into()),
            scope: None,
            locale: None,
        }
    }

    /// Creates a condition for operators that take no value, such as `EMPTY`.
    #[must_use]
    pub fn without_value(operator: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            value: None,
            scope: None,
            locale: None,
        }
    }

    /// Restricts the condition to a channel.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Restricts the condition to a locale.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("operator".to_string(), Value::String(self.operator.clone()));
        if let Some(value) = &self.value {
            object.insert("value".to_string(), value.clone());
        }
        if let Some(scope) = &self.scope {
            object.insert("scope".to_string(), Value::String(scope.clone()));
        }
        if let Some(locale) = &self.locale {
            object.insert("locale".to_string(), Value::String(locale.clone()));
        }
        Value::Object(object)
    }
}

/// A search expression for list endpoints.
///
/// # Example
///
/// ```rust
/// use akeneo_api::rest::{Condition, SearchFilter};
///
/// let filter = SearchFilter::new()
///     .equals("enabled", true)
///     .condition("completeness", Condition::new(">", 70).scope("ecommerce"));
///
/// assert_eq!(
///     filter.to_json_string(),
///     r#"{"completeness":[{"operator":">","scope":"ecommerce","value":70}],"enabled":[{"operator":"=","value":true}]}"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchFilter {
    conditions: BTreeMap<String, Vec<Condition>>,
}

impl SearchFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition on `property`. Conditions on the same property are combined.
    #[must_use]
    pub fn condition(mut self, property: impl Into<String>, condition: Condition) -> Self {
        self.conditions
            .entry(property.into())
            .or_default()
            .push(condition);
        self
    }

    /// Adds a `property = value` condition.
    #[must_use]
    pub fn equals(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(property, Condition::new("=", value))
    }

    /// Returns `true` if the filter has no condition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns the filter as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.conditions
                .iter()
                .map(|(property, conditions)| {
                    (
                        property.clone(),
                        Value::Array(conditions.iter().map(Condition::to_value).collect()),
                    )
                })
                .collect(),
        )
    }

    /// Returns the filter serialized for the `search` query parameter.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }
}

/// Query parameters for list endpoints.
///
/// # Example
///
/// ```rust
/// use akeneo_api::rest::{ListQuery, SearchFilter};
///
/// let query = ListQuery::new()
///     .limit(50)
///     .search(SearchFilter::new().equals("family", "shoes"))
///     .scope("ecommerce")
///     .locales(["en_US", "fr_FR"]);
///
/// let params = query.to_params(100, true);
/// assert_eq!(params[0], ("pagination_type".to_string(), "search_after".to_string()));
/// assert_eq!(params[1], ("limit".to_string(), "50".to_string()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    limit: Option<u32>,
    search: Option<String>,
    scope: Option<String>,
    locales: Vec<String>,
    attributes: Vec<String>,
    extra: Vec<(String, String)>,
}

impl ListQuery {
    /// Creates an empty query. The configured page limit applies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size, clamped to `1..=100`.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.clamp(1, MAX_PAGE_LIMIT));
        self
    }

    /// Sets the search filter. An empty filter is ignored.
    #[must_use]
    pub fn search(mut self, filter: SearchFilter) -> Self {
        self.search = if filter.is_empty() {
            None
        } else {
            Some(filter.to_json_string())
        };
        self
    }

    /// Sets an already serialized search expression, sent as-is.
    #[must_use]
    pub fn search_json(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    /// Restricts values to one channel.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Restricts values to the given locales.
    #[must_use]
    pub fn locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts values to the given attributes.
    #[must_use]
    pub fn attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Adds any other query parameter, such as `with_count`.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Returns the query parameters in request order.
    ///
    /// `default_limit` applies when no limit was set. `search_after` adds
    /// `pagination_type=search_after` in front.
    #[must_use]
    pub fn to_params(&self, default_limit: u32, search_after: bool) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if search_after {
            params.push(("pagination_type".to_string(), "search_after".to_string()));
        }
        params.push((
            "limit".to_string(),
            self.limit.unwrap_or(default_limit).to_string(),
        ));
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(scope) = &self.scope {
            params.push(("scope".to_string(), scope.clone()));
        }
        if !self.locales.is_empty() {
            params.push(("locales".to_string(), self.locales.join(",")));
        }
        if !self.attributes.is_empty() {
            params.push(("attributes".to_string(), self.attributes.join(",")));
        }
        params.extend(self.extra.iter().cloned());

        params
    }
}
