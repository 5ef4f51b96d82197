//! The fully-bound request description a builder produces.
//!
//! A [`Request`] is the end of the runtime's responsibility: every key,
//! parameter, and payload is bound and typed, but nothing is serialized
//! and no transport is involved. Executing the request is the job of
//! whatever transport layer the application pairs the generated client
//! with.

use crate::spec::Operation;
use crate::value::ParamValue;

/// Payload carried by a request, tagged by operation family.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<K, V> {
    /// No payload (collection-level reads, finders).
    None,
    /// Single key (get, delete).
    Id(K),
    /// Several keys (batch get, batch delete).
    Ids(Vec<K>),
    /// Single entity (create).
    Entity(V),
    /// Several entities (batch create).
    Entities(Vec<V>),
    /// Key plus entity (update, partial update).
    IdAndEntity(K, V),
    /// Keyed entity batch (batch update, batch partial update).
    Updates(Vec<(K, V)>),
    /// Action invocation: optional entity key plus named arguments.
    ActionParams {
        /// Entity key for entity-scoped actions.
        id: Option<K>,
        /// Named action arguments in declaration order.
        params: Vec<(String, ParamValue)>,
    },
}

/// A fully-bound request against one resource.
///
/// `K` is the resource's key type and `V` its value type (for actions,
/// the action's return type).
#[derive(Debug, Clone, PartialEq)]
pub struct Request<K, V> {
    op: Operation,
    uri_template: String,
    path_keys: Vec<(String, ParamValue)>,
    query_params: Vec<(String, ParamValue)>,
    headers: Vec<(String, String)>,
    payload: Payload<K, V>,
}

impl<K, V> Request<K, V> {
    pub(crate) fn new(
        op: Operation,
        uri_template: String,
        path_keys: Vec<(String, ParamValue)>,
        query_params: Vec<(String, ParamValue)>,
        headers: Vec<(String, String)>,
        payload: Payload<K, V>,
    ) -> Self {
        Self {
            op,
            uri_template,
            path_keys,
            query_params,
            headers,
            payload,
        }
    }

    /// The operation this request performs.
    pub fn op(&self) -> Operation {
        self.op
    }

    /// The raw URI template, path keys unsubstituted.
    pub fn uri_template(&self) -> &str {
        &self.uri_template
    }

    /// Bound path keys in binding order.
    pub fn path_keys(&self) -> &[(String, ParamValue)] {
        &self.path_keys
    }

    /// Bound query parameters in binding order.
    pub fn query_params(&self) -> &[(String, ParamValue)] {
        &self.query_params
    }

    /// Request headers in binding order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The typed payload.
    pub fn payload(&self) -> &Payload<K, V> {
        &self.payload
    }

    /// Renders the resource URI: the template with bound path keys
    /// substituted and the query string appended.
    ///
    /// Unbound `{var}` placeholders are left intact. Entity keys from the
    /// payload are not rendered here; mapping them onto the wire is the
    /// transport layer's concern.
    ///
    /// ## Examples
    ///
    /// ```
    /// use restive_client::{GetRequestBuilder, ResourceSpec, Operation};
    ///
    /// let request = GetRequestBuilder::<i64, ()>::new(
    ///     "widgets/{widgetId}/orders",
    ///     ResourceSpec::new([Operation::Get]),
    /// )
    /// .path_key("widgetId", 7i64)
    /// .build();
    ///
    /// assert_eq!(request.uri(), "widgets/7/orders");
    /// ```
    pub fn uri(&self) -> String {
        let mut uri = self.uri_template.clone();
        for (name, value) in &self.path_keys {
            let placeholder = format!("{{{}}}", name);
            uri = uri.replace(&placeholder, &value.to_string());
        }

        if !self.query_params.is_empty() {
            let rendered: Vec<String> = self
                .query_params
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            uri.push('?');
            uri.push_str(&rendered.join("&"));
        }

        uri
    }
}
