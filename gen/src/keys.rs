//! Key-shape derivation from resource nodes.
//!
//! A resource's key shape is derived, not stored: action sets are
//! keyless, associations always have compound keys, and collections have
//! a simple or composite key depending on whether their identifier
//! declares a `params` type.

use restive_define::{ResourceKind, ResourceSchema};

use crate::errors::CompilerError;
use crate::resolver::{RustType, TypeResolver};

/// The derived key shape of a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyShape {
    /// Single identifier type (collection without `identifier.params`).
    Simple(RustType),
    /// Identifier plus params record (collection with `identifier.params`).
    Composite {
        /// Primary identifier type.
        key: RustType,
        /// Secondary params type.
        params: RustType,
    },
    /// Ordered named components (association).
    Compound(Vec<(String, RustType)>),
    /// Keyless (action set).
    None,
}

impl KeyShape {
    /// The key type builders are parameterized by.
    ///
    /// Composite keys wrap their components in the runtime's
    /// `ComplexKey`; compound keys use the runtime's `CompoundKey`;
    /// keyless resources use the no-value marker.
    pub fn key_type(&self) -> RustType {
        match self {
            KeyShape::Simple(ty) => ty.clone(),
            KeyShape::Composite { key, params } => RustType::generic_with_path(
                "ComplexKey",
                "restive_client",
                vec![key.clone(), params.clone()],
            ),
            KeyShape::Compound(_) => RustType::with_path("CompoundKey", "restive_client"),
            KeyShape::None => RustType::unit(),
        }
    }

    /// Named compound-key components; empty unless the shape is compound.
    pub fn assoc_keys(&self) -> &[(String, RustType)] {
        match self {
            KeyShape::Compound(keys) => keys,
            _ => &[],
        }
    }
}

/// Derives the key shape of a resource node.
///
/// Both components of a composite key are resolved independently; a
/// resolution failure in either is reported against the resource rather
/// than silently defaulted. Duplicate association-key names are an
/// error.
pub fn resolve_key(
    resource: &ResourceSchema,
    resolver: &mut TypeResolver<'_>,
) -> Result<KeyShape, CompilerError> {
    let kind = resource
        .kind()
        .map_err(|e| CompilerError::UnsupportedResourceShape {
            resource: e.resource,
        })?;

    match kind {
        ResourceKind::ActionsSet(_) => Ok(KeyShape::None),
        ResourceKind::Association(association) => {
            let mut keys: Vec<(String, RustType)> = Vec::new();
            for assoc_key in &association.assoc_keys {
                if keys.iter().any(|(name, _)| name == &assoc_key.name) {
                    return Err(CompilerError::DuplicateKeyName {
                        resource: resource.name.clone(),
                        name: assoc_key.name.clone(),
                    });
                }
                let ty = resolver.resolve_ref(&assoc_key.type_ref)?;
                keys.push((assoc_key.name.clone(), ty));
            }
            Ok(KeyShape::Compound(keys))
        }
        ResourceKind::Collection(collection) => {
            let identifier = collection.identifier.as_ref().ok_or_else(|| {
                CompilerError::SchemaValidation {
                    resource: resource.name.clone(),
                    violations: vec!["collection.identifier is required".to_string()],
                }
            })?;
            let key = resolver.resolve_ref(&identifier.type_ref)?;
            match &identifier.params {
                Some(params_ref) => {
                    let params = resolver.resolve_ref(params_ref)?;
                    Ok(KeyShape::Composite { key, params })
                }
                None => Ok(KeyShape::Simple(key)),
            }
        }
    }
}
