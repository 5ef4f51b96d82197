//! Operation vocabulary for resource interfaces.
//!
//! This module provides the operation-related types of the resource dialect:
//!
//! - [`ResourceMethod`] - The CRUD and batch-CRUD operation vocabulary
//! - [`RestMethodSchema`] - Per-operation enrichment (doc, query parameters)
//! - [`FinderSchema`] - Named query operations
//! - [`ActionSchema`] - RPC-style operations with explicit parameters
//! - [`ParameterSchema`] - Query and action parameter declarations

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Operations a resource can support.
///
/// This is the closed operation vocabulary of the dialect: the five CRUD
/// operations plus their batch variants. Finders and actions are declared
/// separately and are not part of this enum.
///
/// ## Examples
///
/// Parse from the snake_case wire form:
///
/// ```
/// use std::str::FromStr;
/// use restive_define::ResourceMethod;
///
/// let method = ResourceMethod::from_str("partial_update").unwrap();
/// assert_eq!(method, ResourceMethod::PartialUpdate);
/// ```
///
/// Display as snake_case:
///
/// ```
/// use restive_define::ResourceMethod;
///
/// assert_eq!(ResourceMethod::BatchGet.to_string(), "batch_get");
/// ```
///
/// Iterate over all operations:
///
/// ```
/// use restive_define::ResourceMethod;
/// use strum::IntoEnumIterator;
///
/// assert_eq!(ResourceMethod::iter().count(), 10);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceMethod {
    /// Retrieve one entity by key.
    Get,
    /// Retrieve several entities by key.
    BatchGet,
    /// Create a new entity.
    Create,
    /// Create several entities.
    BatchCreate,
    /// Replace one entity entirely.
    Update,
    /// Replace several entities.
    BatchUpdate,
    /// Apply a partial update to one entity.
    PartialUpdate,
    /// Apply partial updates to several entities.
    BatchPartialUpdate,
    /// Delete one entity by key.
    Delete,
    /// Delete several entities by key.
    BatchDelete,
}

/// Per-operation schema entry in a resource's `methods` list.
///
/// The `supports` list is authoritative for which operations exist; a
/// `RestMethodSchema` enriches a supported operation with documentation
/// and query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestMethodSchema {
    /// Operation name in snake_case wire form (e.g. `"get"`, `"batch_get"`).
    pub method: String,
    /// Documentation for the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Query parameters accepted by the operation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSchema>,
}

impl RestMethodSchema {
    /// Creates a method schema for the given operation name.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            doc: None,
            parameters: Vec::new(),
        }
    }

    /// Attaches documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attaches query parameters.
    pub fn with_parameters(mut self, parameters: Vec<ParameterSchema>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// A named query operation returning a collection of entities.
///
/// Finders are parameterized by query parameters and, on association
/// resources, by a subset of the association keys.
///
/// ## Examples
///
/// ```
/// use restive_define::{FinderSchema, ParameterSchema};
///
/// let finder = FinderSchema::new("byOwner")
///     .with_parameters(vec![ParameterSchema::required("owner", "string")]);
///
/// assert_eq!(finder.name, "byOwner");
/// assert_eq!(finder.parameters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinderSchema {
    /// Finder name (becomes part of the generated builder name).
    pub name: String,
    /// Documentation for the finder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Query parameters accepted by the finder.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSchema>,
    /// Single association key the finder is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assoc_key: Option<String>,
    /// Several association keys the finder is scoped to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assoc_keys: Vec<String>,
    /// Optional metadata schema attached to finder results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataSchema>,
}

impl FinderSchema {
    /// Creates a finder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            parameters: Vec::new(),
            assoc_key: None,
            assoc_keys: Vec::new(),
            metadata: None,
        }
    }

    /// Attaches documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attaches query parameters.
    pub fn with_parameters(mut self, parameters: Vec<ParameterSchema>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Scopes the finder to a single association key.
    pub fn with_assoc_key(mut self, key: impl Into<String>) -> Self {
        self.assoc_key = Some(key.into());
        self
    }

    /// Scopes the finder to several association keys.
    pub fn with_assoc_keys(mut self, keys: Vec<String>) -> Self {
        self.assoc_keys = keys;
        self
    }

    /// Attaches a result metadata schema.
    pub fn with_metadata(mut self, type_ref: impl Into<String>) -> Self {
        self.metadata = Some(MetadataSchema {
            type_ref: type_ref.into(),
        });
        self
    }

    /// Returns the declared association keys, single and plural forms
    /// combined, in declaration order with duplicates removed.
    pub fn declared_assoc_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        if let Some(key) = &self.assoc_key {
            keys.push(key);
        }
        for key in &self.assoc_keys {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }
}

/// Metadata schema attached to finder results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSchema {
    /// Type reference for the metadata record.
    #[serde(rename = "type")]
    pub type_ref: String,
}

/// An RPC-style operation with explicit parameters and return type.
///
/// Actions are scoped to either the resource or one entity instance,
/// depending on whether they are declared on the resource's `actions`
/// list or on the entity's.
///
/// ## Examples
///
/// ```
/// use restive_define::{ActionSchema, ParameterSchema};
///
/// let action = ActionSchema::new("promote")
///     .with_parameters(vec![ParameterSchema::required("tier", "int")])
///     .with_returns("boolean");
///
/// assert_eq!(action.returns.as_deref(), Some("boolean"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSchema {
    /// Action name (becomes part of the generated builder name).
    pub name: String,
    /// Documentation for the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Action parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSchema>,
    /// Return type reference; absent means the action returns no value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
}

impl ActionSchema {
    /// Creates an action with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            parameters: Vec::new(),
            returns: None,
        }
    }

    /// Attaches documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attaches parameters.
    pub fn with_parameters(mut self, parameters: Vec<ParameterSchema>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Declares the return type.
    pub fn with_returns(mut self, returns: impl Into<String>) -> Self {
        self.returns = Some(returns.into());
        self
    }
}

/// A query or action parameter declaration.
///
/// Array-typed parameters set `type` to `"array"` and carry the element
/// type in `items`.
///
/// ## Examples
///
/// ```
/// use restive_define::ParameterSchema;
///
/// let required = ParameterSchema::required("owner", "string");
/// assert!(!required.is_optional());
///
/// let optional = ParameterSchema::optional("limit", "int");
/// assert!(optional.is_optional());
///
/// let tags = ParameterSchema::array("tags", "string");
/// assert_eq!(tags.type_ref, "array");
/// assert_eq!(tags.items.as_deref(), Some("string"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSchema {
    /// Parameter name as declared in the document.
    pub name: String,
    /// Type reference, or the literal `"array"` for array parameters.
    #[serde(rename = "type")]
    pub type_ref: String,
    /// Element type reference for array parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    /// Whether the parameter may be omitted; absent means required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Default value in its textual form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Documentation for the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl ParameterSchema {
    /// Creates a required parameter.
    pub fn required(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            items: None,
            optional: None,
            default: None,
            doc: None,
        }
    }

    /// Creates an optional parameter.
    pub fn optional(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            optional: Some(true),
            ..Self::required(name, type_ref)
        }
    }

    /// Creates a required array parameter with the given element type.
    pub fn array(name: impl Into<String>, items: impl Into<String>) -> Self {
        Self {
            type_ref: "array".to_string(),
            items: Some(items.into()),
            ..Self::required(name, "array")
        }
    }

    /// Attaches documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Returns true when the parameter may be omitted.
    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }

    /// Returns true when the parameter is array-typed.
    pub fn is_array(&self) -> bool {
        self.type_ref == "array"
    }
}
