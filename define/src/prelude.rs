//! Convenience re-exports for building resource documents.
//!
//! ```
//! use restive_define::prelude::*;
//!
//! let finder = FinderSchema::new("byOwner")
//!     .with_parameters(vec![ParameterSchema::required("owner", "string")]);
//! assert_eq!(finder.name, "byOwner");
//! ```

pub use crate::operations::{
    ActionSchema, FinderSchema, MetadataSchema, ParameterSchema, ResourceMethod, RestMethodSchema,
};
pub use crate::resource::{
    ActionsSetSchema, AssocKeySchema, AssociationSchema, CollectionSchema, EntitySchema,
    IdentifierSchema, ResourceKind, ResourceSchema,
};
