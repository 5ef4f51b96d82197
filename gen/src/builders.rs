//! Builder-descriptor synthesis per operation.
//!
//! For every supported CRUD/batch operation, every finder, and every
//! action of a resource, this module derives one [`BuilderDescriptor`]:
//! its type name, the base contract it binds (selected by operation
//! kind), its factory-operation name on the facade, and its path-key,
//! association-key, and parameter bindings.
//!
//! Path-key bindings cover every entry of the incoming [`PathKeyChain`],
//! so builders of nested resources expose the full ancestor addressing
//! chain.

use std::collections::HashMap;
use std::rc::Rc;
use std::str::FromStr;

use restive_define::{
    ActionSchema, FinderSchema, ParameterSchema, ResourceMethod, RestMethodSchema,
};

use crate::context::CompilationContext;
use crate::descriptor::{
    ActionLevel, AssocKeyBinding, BuilderDescriptor, OperationKind, ParamBinding, PathKeyBinding,
    PathKeyChain, ResourceSpec,
};
use crate::errors::CompilerError;
use crate::naming::{camel_case, pascal_case};
use crate::resolver::{RustType, TypeResolutionError};

/// Canonical generation order for CRUD/batch builders.
const CRUD_ORDER: [ResourceMethod; 10] = [
    ResourceMethod::Get,
    ResourceMethod::BatchGet,
    ResourceMethod::Create,
    ResourceMethod::BatchCreate,
    ResourceMethod::Update,
    ResourceMethod::BatchUpdate,
    ResourceMethod::PartialUpdate,
    ResourceMethod::BatchPartialUpdate,
    ResourceMethod::Delete,
    ResourceMethod::BatchDelete,
];

/// Derives builders for the resource's supported CRUD/batch operations.
///
/// The `methods` entries enrich supported operations with documentation
/// and query parameters; `supports` (already folded into `spec`) decides
/// which builders exist.
pub(crate) fn crud_builders(
    resource_name: &str,
    namespace: Option<&str>,
    spec: &Rc<ResourceSpec>,
    chain: &PathKeyChain,
    methods: &[RestMethodSchema],
    ctx: &mut CompilationContext<'_>,
) -> Result<Vec<BuilderDescriptor>, CompilerError> {
    let mut schema_map: HashMap<ResourceMethod, &RestMethodSchema> = HashMap::new();
    for method_schema in methods {
        if let Ok(method) = ResourceMethod::from_str(&method_schema.method) {
            schema_map.insert(method, method_schema);
        }
    }

    let pascal_resource = pascal_case(resource_name);
    let mut builders = Vec::new();

    for method in CRUD_ORDER {
        if !spec.supported.contains(&method) {
            continue;
        }
        let wire_name = method.to_string();
        let type_name = format!("{}{}Builder", pascal_resource, pascal_case(&wire_name));
        ctx.claim_type_name(namespace, &type_name);

        let method_schema = schema_map.get(&method);
        let query_params = match method_schema {
            Some(schema) => param_bindings(&schema.parameters, ctx)?,
            None => Vec::new(),
        };

        builders.push(BuilderDescriptor {
            type_name,
            kind: OperationKind::Crud(method),
            key_type: spec.key_type(),
            value_type: spec.value_type(),
            factory_method: camel_case(&wire_name),
            doc: method_schema.and_then(|schema| schema.doc.clone()),
            path_keys: path_key_bindings(chain),
            assoc_keys: Vec::new(),
            query_params,
            action_params: Vec::new(),
            return_type: None,
            metadata_type: None,
            spec: Rc::clone(spec),
        });
    }

    Ok(builders)
}

/// Derives one builder per finder, bound to the finder's association-key
/// subset and query parameters.
pub(crate) fn finder_builders(
    resource_name: &str,
    namespace: Option<&str>,
    spec: &Rc<ResourceSpec>,
    chain: &PathKeyChain,
    finders: &[FinderSchema],
    ctx: &mut CompilationContext<'_>,
) -> Result<Vec<BuilderDescriptor>, CompilerError> {
    let pascal_resource = pascal_case(resource_name);
    let mut builders = Vec::new();

    for finder in finders {
        let pascal_finder = pascal_case(&finder.name);
        let type_name = format!("{}FindBy{}Builder", pascal_resource, pascal_finder);
        ctx.claim_type_name(namespace, &type_name);

        let mut assoc_keys = Vec::new();
        for key_name in finder.declared_assoc_keys() {
            let ty = spec
                .assoc_keys
                .iter()
                .find(|(name, _)| name == key_name)
                .map(|(_, ty)| ty.clone())
                .ok_or_else(|| CompilerError::SchemaValidation {
                    resource: resource_name.to_string(),
                    violations: vec![format!(
                        "finder '{}' references undeclared association key '{}'",
                        finder.name, key_name
                    )],
                })?;
            assoc_keys.push(AssocKeyBinding {
                name: key_name.to_string(),
                method_name: camel_case(&format!("{}Key", key_name)),
                ty,
            });
        }

        let metadata_type = match &finder.metadata {
            Some(metadata) => Some(ctx.resolver.resolve_ref(&metadata.type_ref)?),
            None => None,
        };

        builders.push(BuilderDescriptor {
            type_name,
            kind: OperationKind::Finder {
                name: finder.name.clone(),
            },
            key_type: spec.key_type(),
            value_type: spec.value_type(),
            factory_method: format!("findBy{}", pascal_finder),
            doc: finder.doc.clone(),
            path_keys: path_key_bindings(chain),
            assoc_keys,
            query_params: param_bindings(&finder.parameters, ctx)?,
            action_params: Vec::new(),
            return_type: None,
            metadata_type,
            spec: Rc::clone(spec),
        });
    }

    Ok(builders)
}

/// Derives one dedicated builder per action, resource-level then
/// entity-level. Actions never share a generic base the way CRUD
/// operations do; each carries its own parameter list and return type,
/// defaulting to the no-value marker when the document omits `returns`.
pub(crate) fn action_builders(
    resource_name: &str,
    namespace: Option<&str>,
    spec: &Rc<ResourceSpec>,
    chain: &PathKeyChain,
    resource_actions: &[ActionSchema],
    entity_actions: &[ActionSchema],
    ctx: &mut CompilationContext<'_>,
) -> Result<Vec<BuilderDescriptor>, CompilerError> {
    let pascal_resource = pascal_case(resource_name);
    let mut builders = Vec::new();

    let levels = [
        (ActionLevel::Resource, resource_actions),
        (ActionLevel::Entity, entity_actions),
    ];
    for (level, actions) in levels {
        for action in actions {
            let pascal_action = pascal_case(&action.name);
            let type_name = format!("{}Do{}Builder", pascal_resource, pascal_action);
            ctx.claim_type_name(namespace, &type_name);

            let return_type = match &action.returns {
                Some(returns) => ctx.resolver.resolve_ref(returns)?,
                None => RustType::unit(),
            };

            builders.push(BuilderDescriptor {
                type_name,
                kind: OperationKind::Action {
                    name: action.name.clone(),
                    level,
                },
                key_type: spec.key_type(),
                value_type: spec.value_type(),
                factory_method: format!("action{}", pascal_action),
                doc: action.doc.clone(),
                path_keys: path_key_bindings(chain),
                assoc_keys: Vec::new(),
                query_params: Vec::new(),
                action_params: param_bindings(&action.parameters, ctx)?,
                return_type: Some(return_type),
                metadata_type: None,
                spec: Rc::clone(spec),
            });
        }
    }

    Ok(builders)
}

/// One binding per chain entry, ancestors included, root-to-leaf.
fn path_key_bindings(chain: &PathKeyChain) -> Vec<PathKeyBinding> {
    chain
        .entries()
        .iter()
        .map(|entry| PathKeyBinding {
            name: entry.name.clone(),
            method_name: camel_case(&format!("{}Key", entry.name)),
            ty: entry.ty.clone(),
        })
        .collect()
}

/// Binds declared parameters; array-typed parameters become repeated
/// bindings over their element type.
fn param_bindings(
    parameters: &[ParameterSchema],
    ctx: &mut CompilationContext<'_>,
) -> Result<Vec<ParamBinding>, CompilerError> {
    let mut bindings = Vec::new();
    for param in parameters {
        let (ty, repeated) = if param.is_array() {
            let items = param.items.as_deref().ok_or_else(|| {
                TypeResolutionError {
                    reference: "array".to_string(),
                    detail: format!("array parameter '{}' has no 'items' type", param.name),
                }
            })?;
            (ctx.resolver.resolve_ref(items)?, true)
        } else {
            (ctx.resolver.resolve_ref(&param.type_ref)?, false)
        };

        bindings.push(ParamBinding {
            name: param.name.clone(),
            method_name: camel_case(&format!("{}Param", param.name)),
            ty,
            optional: param.is_optional(),
            repeated,
            doc: param.doc.clone(),
        });
    }
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::descriptor::PathKey;
    use crate::keys::KeyShape;
    use crate::resolver::TypeRegistry;

    fn spec_with(supported: &[ResourceMethod]) -> Rc<ResourceSpec> {
        Rc::new(ResourceSpec {
            supported: supported.iter().copied().collect::<BTreeSet<_>>(),
            key: KeyShape::Simple(RustType::new("i64")),
            value_type: Some(RustType::with_path("Widget", "com::example")),
            assoc_keys: vec![],
        })
    }

    fn chain_with(names: &[&str]) -> PathKeyChain {
        PathKeyChain::new().extended(names.iter().map(|name| PathKey {
            name: name.to_string(),
            ty: RustType::new("i64"),
        }))
    }

    #[test]
    fn crud_builders_follow_supported_set() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = spec_with(&[ResourceMethod::Get, ResourceMethod::Create]);

        let builders = crud_builders(
            "widget",
            None,
            &spec,
            &PathKeyChain::new(),
            &[],
            &mut ctx,
        )
        .unwrap();

        let names: Vec<&str> = builders.iter().map(|b| b.type_name.as_str()).collect();
        assert_eq!(names, vec!["WidgetGetBuilder", "WidgetCreateBuilder"]);
        assert_eq!(builders[0].factory_method, "get");
        assert_eq!(builders[1].factory_method, "create");
    }

    #[test]
    fn crud_builder_names_normalize_underscored_operations() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = spec_with(&[ResourceMethod::BatchPartialUpdate]);

        let builders = crud_builders(
            "widget",
            None,
            &spec,
            &PathKeyChain::new(),
            &[],
            &mut ctx,
        )
        .unwrap();

        assert_eq!(builders[0].type_name, "WidgetBatchPartialUpdateBuilder");
        assert_eq!(builders[0].factory_method, "batchPartialUpdate");
    }

    #[test]
    fn crud_builders_bind_every_chain_entry() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = spec_with(&[ResourceMethod::Get]);
        let chain = chain_with(&["widgetId", "orderId"]);

        let builders = crud_builders("item", None, &spec, &chain, &[], &mut ctx).unwrap();

        let bound: Vec<&str> = builders[0]
            .path_keys
            .iter()
            .map(|k| k.method_name.as_str())
            .collect();
        assert_eq!(bound, vec!["widgetIdKey", "orderIdKey"]);
    }

    #[test]
    fn method_schema_enriches_doc_and_params() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = spec_with(&[ResourceMethod::Get]);
        let methods = vec![
            RestMethodSchema::new("get")
                .with_doc("Gets a widget.")
                .with_parameters(vec![ParameterSchema::optional("fields", "string")]),
        ];

        let builders =
            crud_builders("widget", None, &spec, &PathKeyChain::new(), &methods, &mut ctx)
                .unwrap();

        assert_eq!(builders[0].doc.as_deref(), Some("Gets a widget."));
        assert_eq!(builders[0].query_params.len(), 1);
        assert!(builders[0].query_params[0].optional);
    }

    #[test]
    fn finder_binds_required_and_optional_params() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = spec_with(&[]);
        let finders = vec![FinderSchema::new("byOwner").with_parameters(vec![
            ParameterSchema::required("owner", "string"),
            ParameterSchema::required("region", "string"),
            ParameterSchema::optional("limit", "int"),
        ])];

        let builders =
            finder_builders("widget", None, &spec, &PathKeyChain::new(), &finders, &mut ctx)
                .unwrap();

        assert_eq!(builders.len(), 1);
        let finder = &builders[0];
        assert_eq!(finder.type_name, "WidgetFindByOwnerBuilder");
        assert_eq!(finder.factory_method, "findByOwner");
        assert_eq!(finder.query_params.len(), 3);
        assert_eq!(
            finder
                .query_params
                .iter()
                .filter(|p| !p.optional)
                .count(),
            2
        );
        assert_eq!(finder.query_params[0].method_name, "ownerParam");
    }

    #[test]
    fn finder_array_param_is_repeated_over_element_type() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = spec_with(&[]);
        let finders = vec![
            FinderSchema::new("byTags")
                .with_parameters(vec![ParameterSchema::array("tags", "string")]),
        ];

        let builders =
            finder_builders("widget", None, &spec, &PathKeyChain::new(), &finders, &mut ctx)
                .unwrap();

        let param = &builders[0].query_params[0];
        assert!(param.repeated);
        assert_eq!(param.ty.full_path(), "String");
    }

    #[test]
    fn finder_assoc_keys_bind_declared_subset() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = Rc::new(ResourceSpec {
            supported: BTreeSet::new(),
            key: KeyShape::Compound(vec![
                ("memberId".to_string(), RustType::new("i64")),
                ("groupId".to_string(), RustType::new("i64")),
            ]),
            value_type: Some(RustType::with_path("Membership", "com::example")),
            assoc_keys: vec![
                ("memberId".to_string(), RustType::new("i64")),
                ("groupId".to_string(), RustType::new("i64")),
            ],
        });
        let finders = vec![FinderSchema::new("byMember").with_assoc_key("memberId")];

        let builders = finder_builders(
            "membership",
            None,
            &spec,
            &PathKeyChain::new(),
            &finders,
            &mut ctx,
        )
        .unwrap();

        assert_eq!(builders[0].assoc_keys.len(), 1);
        assert_eq!(builders[0].assoc_keys[0].method_name, "memberIdKey");
    }

    #[test]
    fn action_return_type_defaults_to_no_value() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = spec_with(&[]);
        let actions = vec![ActionSchema::new("purge")];

        let builders = action_builders(
            "widget",
            None,
            &spec,
            &PathKeyChain::new(),
            &actions,
            &[],
            &mut ctx,
        )
        .unwrap();

        assert_eq!(builders[0].type_name, "WidgetDoPurgeBuilder");
        assert_eq!(builders[0].factory_method, "actionPurge");
        assert!(builders[0].return_type.as_ref().unwrap().is_unit());
    }

    #[test]
    fn entity_actions_follow_resource_actions() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = spec_with(&[]);
        let resource_actions = vec![ActionSchema::new("reindex")];
        let entity_actions =
            vec![ActionSchema::new("promote").with_returns("boolean")];

        let builders = action_builders(
            "widget",
            None,
            &spec,
            &PathKeyChain::new(),
            &resource_actions,
            &entity_actions,
            &mut ctx,
        )
        .unwrap();

        assert_eq!(builders.len(), 2);
        assert!(matches!(
            builders[0].kind,
            OperationKind::Action {
                level: ActionLevel::Resource,
                ..
            }
        ));
        assert!(matches!(
            builders[1].kind,
            OperationKind::Action {
                level: ActionLevel::Entity,
                ..
            }
        ));
        assert_eq!(
            builders[1].return_type.as_ref().unwrap().full_path(),
            "bool"
        );
    }

    #[test]
    fn action_params_bind_in_declaration_order() {
        let registry = TypeRegistry::new();
        let mut ctx = CompilationContext::new(&registry);
        let spec = spec_with(&[]);
        let actions = vec![ActionSchema::new("transfer").with_parameters(vec![
            ParameterSchema::required("to", "long"),
            ParameterSchema::required("amount", "double"),
        ])];

        let builders = action_builders(
            "account",
            None,
            &spec,
            &PathKeyChain::new(),
            &actions,
            &[],
            &mut ctx,
        )
        .unwrap();

        let names: Vec<&str> = builders[0]
            .action_params
            .iter()
            .map(|p| p.method_name.as_str())
            .collect();
        assert_eq!(names, vec!["toParam", "amountParam"]);
    }
}
