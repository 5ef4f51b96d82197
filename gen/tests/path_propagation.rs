//! Tests for path-key propagation through nested resources and for the
//! three key shapes end to end.

use restive_define::ResourceSchema;

use restive_gen::context::CompilationContext;
use restive_gen::descriptor::PathKeyChain;
use restive_gen::emit::render_facade_module;
use restive_gen::keys::KeyShape;
use restive_gen::resolver::{RustType, TypeRegistry};
use restive_gen::walker::walk_resource;

fn compile(doc: &str) -> restive_gen::descriptor::FacadeDescriptor {
    let resource: ResourceSchema = serde_json::from_str(doc).expect("fixture parses");
    let registry = TypeRegistry::new();
    let mut ctx = CompilationContext::new(&registry);
    let facade = walk_resource(&resource, &PathKeyChain::new(), &mut ctx)
        .expect("fixture compiles");
    assert!(
        ctx.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        ctx.diagnostics
    );
    facade
}

#[test]
fn three_levels_bind_ancestor_keys_root_to_leaf() {
    let facade = compile(
        r#"{
            "name": "widget",
            "path": "/widgets",
            "schema": "com.example.Widget",
            "collection": {
                "identifier": {"name": "widgetId", "type": "long"},
                "supports": ["get"],
                "entity": {
                    "path": "/widgets/{widgetId}",
                    "subresources": [{
                        "name": "order",
                        "path": "/widgets/{widgetId}/orders",
                        "schema": "com.example.Order",
                        "collection": {
                            "identifier": {"name": "orderId", "type": "string"},
                            "supports": ["get", "delete"],
                            "entity": {
                                "path": "/widgets/{widgetId}/orders/{orderId}",
                                "subresources": [{
                                    "name": "item",
                                    "path": "/widgets/{widgetId}/orders/{orderId}/items",
                                    "schema": "com.example.Item",
                                    "collection": {
                                        "identifier": {"name": "itemId", "type": "long"},
                                        "supports": ["get", "create"],
                                        "entity": {"path": "/widgets/{widgetId}/orders/{orderId}/items/{itemId}"}
                                    }
                                }]
                            }
                        }
                    }]
                }
            }
        }"#,
    );

    // Depth 1: no ancestors, no path-key bindings.
    assert!(facade.builder("get").unwrap().path_keys.is_empty());

    // Depth 2: one ancestor key.
    let order = facade.subresource("order").unwrap();
    let order_bound: Vec<&str> = order
        .builder("get")
        .unwrap()
        .path_keys
        .iter()
        .map(|k| k.name.as_str())
        .collect();
    assert_eq!(order_bound, vec!["widgetId"]);

    // Depth 3: both ancestors, in root-to-leaf order, each with its own
    // declared type.
    let item = order.subresource("item").unwrap();
    for factory in ["get", "create"] {
        let builder = item.builder(factory).unwrap();
        let bound: Vec<(&str, String)> = builder
            .path_keys
            .iter()
            .map(|k| (k.name.as_str(), k.ty.full_path()))
            .collect();
        assert_eq!(
            bound,
            vec![
                ("widgetId", "i64".to_string()),
                ("orderId", "String".to_string()),
            ]
        );
    }
}

#[test]
fn composite_key_parameterizes_builders_with_complex_key() {
    let facade = compile(
        r#"{
            "name": "report",
            "path": "/reports",
            "schema": "com.example.Report",
            "collection": {
                "identifier": {
                    "name": "reportKey",
                    "type": "com.example.ReportKey",
                    "params": "com.example.ReportParams"
                },
                "supports": ["get", "batch_get"],
                "entity": {"path": "/reports/{reportKey}"}
            }
        }"#,
    );

    match &facade.spec.key {
        KeyShape::Composite { key, params } => {
            assert_eq!(key.full_path(), "com::example::ReportKey");
            assert_eq!(params.full_path(), "com::example::ReportParams");
        }
        other => panic!("Expected composite key, got: {:?}", other),
    }

    let expected = "restive_client::ComplexKey<com::example::ReportKey, com::example::ReportParams>";
    for builder in &facade.builders {
        assert_eq!(builder.key_type.full_path(), expected);
    }
}

#[test]
fn association_compound_key_flows_into_finders_and_children() {
    let facade = compile(
        r#"{
            "name": "membership",
            "path": "/memberships",
            "schema": "com.example.Membership",
            "association": {
                "assocKeys": [
                    {"name": "memberId", "type": "long"},
                    {"name": "groupId", "type": "long"}
                ],
                "supports": ["get", "update"],
                "finders": [{
                    "name": "byMember",
                    "assocKey": "memberId",
                    "parameters": [{"name": "since", "type": "long", "optional": true}]
                }],
                "entity": {"path": "/memberships/{memberId}/{groupId}"}
            }
        }"#,
    );

    assert_eq!(
        facade.spec.key.key_type().full_path(),
        "restive_client::CompoundKey"
    );
    assert_eq!(facade.spec.assoc_keys.len(), 2);

    assert!(
        facade.builder("byMember").is_none(),
        "finder factories are findBy-prefixed"
    );
    let finder = facade.builder("findByMember").unwrap();
    assert_eq!(finder.assoc_keys.len(), 1);
    assert_eq!(finder.assoc_keys[0].method_name, "memberIdKey");
    assert_eq!(finder.query_params.len(), 1);
    assert!(finder.query_params[0].optional);
}

#[test]
fn finder_with_two_required_and_one_optional_binds_three_operations() {
    let facade = compile(
        r#"{
            "name": "widget",
            "path": "/widgets",
            "schema": "com.example.Widget",
            "collection": {
                "identifier": {"name": "widgetId", "type": "long"},
                "supports": ["get"],
                "finders": [{
                    "name": "search",
                    "parameters": [
                        {"name": "owner", "type": "string"},
                        {"name": "region", "type": "string"},
                        {"name": "limit", "type": "int", "optional": true}
                    ]
                }],
                "entity": {"path": "/widgets/{widgetId}"}
            }
        }"#,
    );

    let finder = facade.builder("findBySearch").unwrap();
    assert_eq!(finder.query_params.len(), 3);
    let optional: Vec<bool> = finder.query_params.iter().map(|p| p.optional).collect();
    assert_eq!(optional, vec![false, false, true]);
}

#[test]
fn deep_facade_renders_every_level() {
    let facade = compile(
        r#"{
            "name": "widget",
            "path": "/widgets",
            "schema": "com.example.Widget",
            "collection": {
                "identifier": {"name": "widgetId", "type": "long"},
                "supports": ["get"],
                "entity": {
                    "path": "/widgets/{widgetId}",
                    "subresources": [{
                        "name": "order",
                        "path": "/widgets/{widgetId}/orders",
                        "schema": "com.example.Order",
                        "collection": {
                            "identifier": {"name": "orderId", "type": "long"},
                            "supports": ["get"],
                            "entity": {"path": "/widgets/{widgetId}/orders/{orderId}"}
                        }
                    }]
                }
            }
        }"#,
    );

    let code = render_facade_module(&facade).unwrap();
    assert!(code.contains("pub struct WidgetBuilders"));
    assert!(code.contains("pub struct OrderBuilders"));
    assert!(code.contains("pub fn widget_id_key(mut self, key: i64) -> Self"));
    // The nested facade's override keeps the ancestor segment.
    assert!(code.contains("\"widgets/{widgetId}\""));
}

#[test]
fn entity_and_resource_actions_bind_path_keys() {
    let facade = compile(
        r#"{
            "name": "widget",
            "path": "/widgets",
            "schema": "com.example.Widget",
            "collection": {
                "identifier": {"name": "widgetId", "type": "long"},
                "supports": ["get"],
                "actions": [{"name": "reindex"}],
                "entity": {
                    "path": "/widgets/{widgetId}",
                    "actions": [{
                        "name": "promote",
                        "parameters": [{"name": "tier", "type": "int"}],
                        "returns": "boolean"
                    }],
                    "subresources": [{
                        "name": "order",
                        "path": "/widgets/{widgetId}/orders",
                        "schema": "com.example.Order",
                        "collection": {
                            "identifier": {"name": "orderId", "type": "long"},
                            "supports": ["get"],
                            "actions": [{"name": "expedite"}],
                            "entity": {"path": "/widgets/{widgetId}/orders/{orderId}"}
                        }
                    }]
                }
            }
        }"#,
    );

    // Top-level actions have no ancestors to bind.
    let reindex = facade.builder("actionReindex").unwrap();
    assert!(reindex.path_keys.is_empty());
    assert!(reindex.return_type.as_ref().unwrap().is_unit());

    let promote = facade.builder("actionPromote").unwrap();
    assert_eq!(promote.return_type.as_ref().unwrap(), &RustType::new("bool"));
    assert_eq!(promote.action_params.len(), 1);

    // Nested action builders expose the ancestor chain.
    let expedite = facade
        .subresource("order")
        .and_then(|order| order.builder("actionExpedite"))
        .unwrap();
    let bound: Vec<&str> = expedite
        .path_keys
        .iter()
        .map(|k| k.method_name.as_str())
        .collect();
    assert_eq!(bound, vec!["widgetIdKey"]);
}
