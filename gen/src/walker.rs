//! Recursive resource-tree traversal.
//!
//! [`walk_resource`] compiles one resource node and its sub-resources
//! into a [`FacadeDescriptor`]. A failure is fatal for the node's
//! subtree only: the walker records failed sub-resources as diagnostics
//! on the context and keeps compiling siblings.
//!
//! The incoming [`PathKeyChain`] carries the key registrations of every
//! ancestor. The walker binds builders against that chain, then extends
//! a copy with this resource's own key names before recursing, so
//! sibling branches never observe each other's keys.

use std::collections::BTreeSet;
use std::rc::Rc;
use std::str::FromStr;

use restive_define::{
    ActionSchema, FinderSchema, ResourceKind, ResourceMethod, ResourceSchema, RestMethodSchema,
};

use crate::builders::{action_builders, crud_builders, finder_builders};
use crate::context::CompilationContext;
use crate::descriptor::{FacadeDescriptor, PathKey, PathKeyChain, ResourceSpec};
use crate::errors::CompilerError;
use crate::keys::{KeyShape, resolve_key};
use crate::naming::pascal_case;
use crate::uri::UriTemplate;
use crate::validation::validate_resource;

/// The per-shape declaration lists the walker consumes.
struct ShapeParts<'a> {
    supports: &'a [String],
    methods: &'a [RestMethodSchema],
    finders: &'a [FinderSchema],
    resource_actions: &'a [ActionSchema],
    entity_actions: &'a [ActionSchema],
    subresources: &'a [ResourceSchema],
}

fn shape_parts<'a>(kind: ResourceKind<'a>) -> ShapeParts<'a> {
    match kind {
        ResourceKind::Collection(collection) => ShapeParts {
            supports: &collection.supports,
            methods: &collection.methods,
            finders: &collection.finders,
            resource_actions: &collection.actions,
            entity_actions: collection
                .entity
                .as_ref()
                .map(|e| e.actions.as_slice())
                .unwrap_or(&[]),
            subresources: collection
                .entity
                .as_ref()
                .map(|e| e.subresources.as_slice())
                .unwrap_or(&[]),
        },
        ResourceKind::Association(association) => ShapeParts {
            supports: &association.supports,
            methods: &association.methods,
            finders: &association.finders,
            resource_actions: &association.actions,
            entity_actions: association
                .entity
                .as_ref()
                .map(|e| e.actions.as_slice())
                .unwrap_or(&[]),
            subresources: association
                .entity
                .as_ref()
                .map(|e| e.subresources.as_slice())
                .unwrap_or(&[]),
        },
        ResourceKind::ActionsSet(set) => ShapeParts {
            supports: &[],
            methods: &[],
            finders: &[],
            resource_actions: &set.actions,
            entity_actions: &[],
            subresources: &[],
        },
    }
}

/// Compiles one resource node and its subtree into a facade descriptor.
///
/// ## Errors
///
/// - [`CompilerError::UnsupportedResourceShape`] when the node populates
///   no shape branch, or more than one
/// - [`CompilerError::SchemaValidation`] for structural violations,
///   including path variables no ancestor registered a key for
/// - [`CompilerError::DuplicateKeyName`] when this resource's key name
///   collides with an ancestor's
/// - [`CompilerError::TypeResolution`] when a key, value, parameter, or
///   return type reference does not resolve
///
/// A failed sub-resource becomes a diagnostic on `ctx` and is omitted
/// from the facade; its siblings still compile.
pub fn walk_resource(
    resource: &ResourceSchema,
    chain: &PathKeyChain,
    ctx: &mut CompilationContext<'_>,
) -> Result<FacadeDescriptor, CompilerError> {
    let kind = resource
        .kind()
        .map_err(|e| CompilerError::UnsupportedResourceShape {
            resource: e.resource,
        })?;

    let validation = validate_resource(resource);
    if !validation.is_ok() {
        return Err(CompilerError::SchemaValidation {
            resource: resource.name.clone(),
            violations: validation.into_violations(),
        });
    }

    let uri = UriTemplate::new(&resource.path);
    let unknown: Vec<String> = uri
        .variables()
        .into_iter()
        .filter(|&var| !chain.contains(var))
        .map(|var| {
            format!(
                "path variable '{}' has no key registered by an ancestor resource",
                var
            )
        })
        .collect();
    if !unknown.is_empty() {
        return Err(CompilerError::SchemaValidation {
            resource: resource.name.clone(),
            violations: unknown,
        });
    }

    let key = resolve_key(resource, &mut ctx.resolver)?;

    let own_keys = own_path_keys(kind, &key);
    for own_key in &own_keys {
        if chain.contains(&own_key.name) {
            return Err(CompilerError::DuplicateKeyName {
                resource: resource.name.clone(),
                name: own_key.name.clone(),
            });
        }
    }
    let extended = chain.extended(own_keys);

    let parts = shape_parts(kind);

    let supported: BTreeSet<ResourceMethod> = parts
        .supports
        .iter()
        .filter_map(|entry| ResourceMethod::from_str(entry).ok())
        .collect();

    let value_type = match (&resource.schema, kind) {
        (_, ResourceKind::ActionsSet(_)) => None,
        (Some(schema), _) => Some(ctx.resolver.resolve_ref(schema)?),
        (None, _) => None,
    };

    let spec = Rc::new(ResourceSpec {
        supported,
        assoc_keys: key.assoc_keys().to_vec(),
        key,
        value_type,
    });

    let namespace = resource.namespace.as_deref();
    let type_name = format!("{}Builders", pascal_case(&resource.name));
    ctx.claim_type_name(namespace, &type_name);

    let mut builders = crud_builders(&resource.name, namespace, &spec, chain, parts.methods, ctx)?;
    builders.extend(finder_builders(
        &resource.name,
        namespace,
        &spec,
        chain,
        parts.finders,
        ctx,
    )?);
    builders.extend(action_builders(
        &resource.name,
        namespace,
        &spec,
        chain,
        parts.resource_actions,
        parts.entity_actions,
        ctx,
    )?);

    let mut subresources = Vec::new();
    for sub in parts.subresources {
        match walk_resource(sub, &extended, ctx) {
            Ok(facade) => subresources.push(facade),
            Err(err) => ctx.diagnostic(sub.path.clone(), err.to_string()),
        }
    }

    Ok(FacadeDescriptor {
        type_name,
        resource_name: resource.name.clone(),
        namespace: resource.namespace.clone(),
        uri,
        doc: resource.doc.clone(),
        spec,
        builders,
        subresources,
    })
}

/// The key names this resource registers for its sub-resources.
fn own_path_keys(kind: ResourceKind<'_>, key: &KeyShape) -> Vec<PathKey> {
    match kind {
        ResourceKind::Collection(collection) => collection
            .identifier
            .as_ref()
            .map(|identifier| {
                vec![PathKey {
                    name: identifier.name.clone(),
                    ty: key.key_type(),
                }]
            })
            .unwrap_or_default(),
        ResourceKind::Association(_) => key
            .assoc_keys()
            .iter()
            .map(|(name, ty)| PathKey {
                name: name.clone(),
                ty: ty.clone(),
            })
            .collect(),
        ResourceKind::ActionsSet(_) => Vec::new(),
    }
}
