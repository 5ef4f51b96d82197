//! The resource-schema document tree.
//!
//! A resource document describes one addressable REST resource: its path,
//! key structure, supported operations, finders, actions, and nested
//! sub-resources. Exactly one of the three shape branches (collection,
//! association, actions set) must be populated; [`ResourceSchema::kind`]
//! dispatches on the populated branch.
//!
//! Documents are JSON files deserialized with serde; structural
//! requirements beyond well-formed JSON (branch exclusivity, required
//! identifiers, known operation names) are checked by the compiler's
//! validator so that one bad resource does not fail a whole batch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::operations::{ActionSchema, FinderSchema, RestMethodSchema};

/// A node in the resource interface tree.
///
/// ## Examples
///
/// ```
/// use restive_define::ResourceSchema;
///
/// let doc = r#"{
///     "name": "widget",
///     "namespace": "com.example.widgets",
///     "path": "/widgets",
///     "schema": "com.example.widgets.Widget",
///     "collection": {
///         "identifier": {"name": "widgetId", "type": "long"},
///         "supports": ["get", "create"],
///         "entity": {"path": "/widgets/{widgetId}"}
///     }
/// }"#;
///
/// let resource: ResourceSchema = serde_json::from_str(doc).unwrap();
/// assert_eq!(resource.name, "widget");
/// assert!(resource.collection.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSchema {
    /// Resource name (becomes the generated facade name).
    pub name: String,
    /// Dotted namespace the generated code is placed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Path template for the resource (e.g. `/widgets` or
    /// `/widgets/{widgetId}/orders` for a sub-resource).
    pub path: String,
    /// Entity value-type reference; absent for action sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Documentation for the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Collection branch: keyed entities with CRUD, finders, and actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionSchema>,
    /// Association branch: entities keyed by a compound key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association: Option<AssociationSchema>,
    /// Actions-set branch: a keyless bag of actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions_set: Option<ActionsSetSchema>,
}

impl ResourceSchema {
    /// Returns the populated shape branch.
    ///
    /// ## Errors
    ///
    /// Returns [`ShapeError`] when none of the branches is populated, or
    /// when more than one is.
    pub fn kind(&self) -> Result<ResourceKind<'_>, ShapeError> {
        let populated = [
            self.collection.is_some(),
            self.association.is_some(),
            self.actions_set.is_some(),
        ]
        .iter()
        .filter(|p| **p)
        .count();

        if populated != 1 {
            return Err(ShapeError {
                resource: self.name.clone(),
            });
        }

        if let Some(collection) = &self.collection {
            Ok(ResourceKind::Collection(collection))
        } else if let Some(association) = &self.association {
            Ok(ResourceKind::Association(association))
        } else {
            Ok(ResourceKind::ActionsSet(
                self.actions_set.as_ref().expect("branch checked above"),
            ))
        }
    }
}

/// The populated shape branch of a [`ResourceSchema`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceKind<'a> {
    /// Keyed entity collection.
    Collection(&'a CollectionSchema),
    /// Compound-keyed association.
    Association(&'a AssociationSchema),
    /// Keyless action set.
    ActionsSet(&'a ActionsSetSchema),
}

/// A resource that populates zero branches, or more than one.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "resource '{resource}' must populate exactly one of collection, association, or actionsSet"
)]
pub struct ShapeError {
    /// Name of the offending resource.
    pub resource: String,
}

/// The collection branch of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSchema {
    /// Key declaration for the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<IdentifierSchema>,
    /// Supported CRUD/batch operations, snake_case wire names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supports: Vec<String>,
    /// Per-operation enrichment for entries in `supports`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<RestMethodSchema>,
    /// Finders declared on the collection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finders: Vec<FinderSchema>,
    /// Resource-level actions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSchema>,
    /// Entity-scoped declarations (entity actions, sub-resources).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntitySchema>,
}

/// The association branch of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationSchema {
    /// Ordered named key components of the compound key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assoc_keys: Vec<AssocKeySchema>,
    /// Supported CRUD/batch operations, snake_case wire names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supports: Vec<String>,
    /// Per-operation enrichment for entries in `supports`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<RestMethodSchema>,
    /// Finders declared on the association.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub finders: Vec<FinderSchema>,
    /// Resource-level actions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSchema>,
    /// Entity-scoped declarations (entity actions, sub-resources).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntitySchema>,
}

/// The actions-set branch of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionsSetSchema {
    /// Actions exposed by the set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSchema>,
}

/// Key declaration for a collection resource.
///
/// A collection with only `type` has a simple key; one with both `type`
/// and `params` has a composite key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierSchema {
    /// Path-template variable name the key binds to.
    pub name: String,
    /// Primary key type reference.
    #[serde(rename = "type")]
    pub type_ref: String,
    /// Secondary params type reference for composite keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

impl IdentifierSchema {
    /// Creates a simple-key identifier.
    pub fn new(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            params: None,
        }
    }

    /// Upgrades the identifier to a composite key with a params type.
    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }
}

/// One named component of an association's compound key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssocKeySchema {
    /// Component name.
    pub name: String,
    /// Component type reference.
    #[serde(rename = "type")]
    pub type_ref: String,
}

impl AssocKeySchema {
    /// Creates an association key component.
    pub fn new(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
        }
    }
}

/// Entity-scoped declarations of a collection or association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    /// Path template addressing one entity (e.g. `/widgets/{widgetId}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Entity-level actions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSchema>,
    /// Nested sub-resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subresources: Vec<ResourceSchema>,
}
