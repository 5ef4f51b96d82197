//! Restive Definition Library
//!
//! This crate provides the document model for declarative REST resource
//! interfaces. A resource document describes one addressable resource — its
//! path, key structure, supported CRUD operations, finder queries, actions,
//! and nested sub-resources — and is consumed by `restive-gen` to compile
//! strongly-typed request-builder clients.
//!
//! ## Core Types
//!
//! - [`ResourceSchema`] - A node in the resource interface tree
//! - [`ResourceKind`] - The populated shape branch (collection, association,
//!   actions set)
//! - [`CollectionSchema`] / [`AssociationSchema`] / [`ActionsSetSchema`] -
//!   The three resource shapes
//! - [`IdentifierSchema`] / [`AssocKeySchema`] - Key declarations
//! - [`ResourceMethod`] - The CRUD and batch-CRUD operation vocabulary
//! - [`FinderSchema`] / [`ActionSchema`] / [`ParameterSchema`] - Query and
//!   RPC-style operation declarations
//!
//! ## Examples
//!
//! Documents are JSON files; the model deserializes them with serde:
//!
//! ```
//! use restive_define::{ResourceKind, ResourceSchema};
//!
//! let doc = r#"{
//!     "name": "widget",
//!     "path": "/widgets",
//!     "schema": "com.example.Widget",
//!     "collection": {
//!         "identifier": {"name": "widgetId", "type": "long"},
//!         "supports": ["get", "create"],
//!         "finders": [{
//!             "name": "byOwner",
//!             "parameters": [{"name": "owner", "type": "string"}]
//!         }],
//!         "entity": {"path": "/widgets/{widgetId}"}
//!     }
//! }"#;
//!
//! let resource: ResourceSchema = serde_json::from_str(doc).unwrap();
//! assert!(matches!(resource.kind().unwrap(), ResourceKind::Collection(_)));
//! ```
//!
//! Structural requirements beyond well-formed JSON (exactly one shape
//! branch, known operation names, identifier presence) are enforced by the
//! compiler's validator, not by this crate, so that one malformed resource
//! does not abort a whole compilation batch.

pub mod operations;
pub mod prelude;
pub mod resource;

// Re-export main types at crate root
pub use operations::{
    ActionSchema, FinderSchema, MetadataSchema, ParameterSchema, ResourceMethod, RestMethodSchema,
};
pub use resource::{
    ActionsSetSchema, AssocKeySchema, AssociationSchema, CollectionSchema, EntitySchema,
    IdentifierSchema, ResourceKind, ResourceSchema, ShapeError,
};
