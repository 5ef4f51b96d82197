//! Structural validation of parsed resource documents.
//!
//! Serde guarantees documents are well-formed JSON for the model; this
//! validator enforces the structural requirements on top: required
//! fields, known operation names, and cross-references within one
//! resource (finder association keys, method enrichment entries).
//! Violations are fatal for the resource but never for the batch.
//!
//! Shape exclusivity (exactly one of collection, association, actionsSet)
//! is deliberately not checked here — the walker reports it as its own
//! error kind before validation runs.

use std::collections::HashSet;
use std::str::FromStr;

use restive_define::{
    ActionSchema, FinderSchema, ResourceKind, ResourceMethod, ResourceSchema, RestMethodSchema,
};

/// Outcome of validating one resource node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    violations: Vec<String>,
}

impl ValidationResult {
    /// Returns true when no violations were recorded.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Recorded violations in document order.
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// Consumes the result, yielding the violations.
    pub fn into_violations(self) -> Vec<String> {
        self.violations
    }

    fn add(&mut self, violation: impl Into<String>) {
        self.violations.push(violation.into());
    }
}

/// Validates a resource node against the structural schema.
///
/// ## Examples
///
/// ```
/// use restive_define::ResourceSchema;
/// use restive_gen::validation::validate_resource;
///
/// let doc = r#"{
///     "name": "widget",
///     "path": "/widgets",
///     "schema": "com.example.Widget",
///     "collection": {
///         "identifier": {"name": "widgetId", "type": "long"},
///         "supports": ["get"],
///         "entity": {"path": "/widgets/{widgetId}"}
///     }
/// }"#;
/// let resource: ResourceSchema = serde_json::from_str(doc).unwrap();
///
/// assert!(validate_resource(&resource).is_ok());
/// ```
pub fn validate_resource(resource: &ResourceSchema) -> ValidationResult {
    let mut result = ValidationResult::default();

    if resource.name.trim().is_empty() {
        result.add("resource name is empty");
    }
    if resource.path.trim().is_empty() {
        result.add("resource path is empty");
    } else {
        check_path_template(&resource.path, &mut result);
    }

    // The walker reports shape errors itself; nothing more to check here.
    let Ok(kind) = resource.kind() else {
        return result;
    };

    match kind {
        ResourceKind::Collection(collection) => {
            if resource.schema.is_none() {
                result.add("collection resource requires a 'schema' value type");
            }
            match &collection.identifier {
                Some(identifier) => {
                    if identifier.name.trim().is_empty() {
                        result.add("collection.identifier.name is empty");
                    }
                    if identifier.type_ref.trim().is_empty() {
                        result.add("collection.identifier.type is empty");
                    }
                }
                None => result.add("collection.identifier is required"),
            }
            if collection.entity.is_none() {
                result.add("collection.entity is required");
            }
            check_supports(&collection.supports, &collection.methods, &mut result);
            check_finders(&collection.finders, &[], &mut result);
            let entity_actions = collection
                .entity
                .as_ref()
                .map(|e| e.actions.as_slice())
                .unwrap_or(&[]);
            check_actions(&collection.actions, entity_actions, &mut result);
        }
        ResourceKind::Association(association) => {
            if resource.schema.is_none() {
                result.add("association resource requires a 'schema' value type");
            }
            if association.assoc_keys.is_empty() {
                result.add("association.assocKeys must not be empty");
            }
            for assoc_key in &association.assoc_keys {
                if assoc_key.name.trim().is_empty() {
                    result.add("association key with empty name");
                }
                if assoc_key.type_ref.trim().is_empty() {
                    result.add(format!(
                        "association key '{}' has an empty type",
                        assoc_key.name
                    ));
                }
            }
            if association.entity.is_none() {
                result.add("association.entity is required");
            }
            check_supports(&association.supports, &association.methods, &mut result);
            let declared: Vec<&str> = association
                .assoc_keys
                .iter()
                .map(|k| k.name.as_str())
                .collect();
            check_finders(&association.finders, &declared, &mut result);
            let entity_actions = association
                .entity
                .as_ref()
                .map(|e| e.actions.as_slice())
                .unwrap_or(&[]);
            check_actions(&association.actions, entity_actions, &mut result);
        }
        ResourceKind::ActionsSet(set) => {
            check_actions(&set.actions, &[], &mut result);
        }
    }

    result
}

/// Braces must pair and every variable must be named.
fn check_path_template(path: &str, result: &mut ValidationResult) {
    let mut depth = 0usize;
    let mut var_len = 0usize;
    for c in path.chars() {
        match c {
            '{' => {
                if depth > 0 {
                    result.add(format!("malformed path template '{}'", path));
                    return;
                }
                depth = 1;
                var_len = 0;
            }
            '}' => {
                if depth == 0 || var_len == 0 {
                    result.add(format!("malformed path template '{}'", path));
                    return;
                }
                depth = 0;
            }
            _ if depth > 0 => var_len += 1,
            _ => {}
        }
    }
    if depth > 0 {
        result.add(format!("malformed path template '{}'", path));
    }
}

fn check_supports(supports: &[String], methods: &[RestMethodSchema], result: &mut ValidationResult) {
    let mut supported = HashSet::new();
    for entry in supports {
        match ResourceMethod::from_str(entry) {
            Ok(method) => {
                if !supported.insert(method) {
                    result.add(format!("operation '{}' listed twice in supports", entry));
                }
            }
            Err(_) => result.add(format!("unknown operation '{}' in supports", entry)),
        }
    }
    for method_schema in methods {
        match ResourceMethod::from_str(&method_schema.method) {
            Ok(method) => {
                if !supported.contains(&method) {
                    result.add(format!(
                        "method entry '{}' is not listed in supports",
                        method_schema.method
                    ));
                }
            }
            Err(_) => result.add(format!(
                "unknown operation '{}' in methods",
                method_schema.method
            )),
        }
        check_parameters(&method_schema.parameters, &method_schema.method, result);
    }
}

fn check_finders(finders: &[FinderSchema], declared_assoc_keys: &[&str], result: &mut ValidationResult) {
    let mut names = HashSet::new();
    for finder in finders {
        if finder.name.trim().is_empty() {
            result.add("finder with empty name");
            continue;
        }
        if !names.insert(finder.name.as_str()) {
            result.add(format!("duplicate finder name '{}'", finder.name));
        }
        for key in finder.declared_assoc_keys() {
            if declared_assoc_keys.is_empty() {
                result.add(format!(
                    "finder '{}' declares assocKey '{}' on a resource without association keys",
                    finder.name, key
                ));
            } else if !declared_assoc_keys.contains(&key) {
                result.add(format!(
                    "finder '{}' references undeclared association key '{}'",
                    finder.name, key
                ));
            }
        }
        check_parameters(&finder.parameters, &finder.name, result);
    }
}

fn check_actions(
    resource_actions: &[ActionSchema],
    entity_actions: &[ActionSchema],
    result: &mut ValidationResult,
) {
    let mut names = HashSet::new();
    for action in resource_actions.iter().chain(entity_actions) {
        if action.name.trim().is_empty() {
            result.add("action with empty name");
            continue;
        }
        if !names.insert(action.name.as_str()) {
            result.add(format!("duplicate action name '{}'", action.name));
        }
        check_parameters(&action.parameters, &action.name, result);
    }
}

fn check_parameters(
    parameters: &[restive_define::ParameterSchema],
    owner: &str,
    result: &mut ValidationResult,
) {
    let mut names = HashSet::new();
    for param in parameters {
        if param.name.trim().is_empty() {
            result.add(format!("parameter of '{}' has an empty name", owner));
            continue;
        }
        if !names.insert(param.name.as_str()) {
            result.add(format!(
                "duplicate parameter name '{}' on '{}'",
                param.name, owner
            ));
        }
        if param.is_array() && param.items.is_none() {
            result.add(format!(
                "array parameter '{}' on '{}' has no 'items' type",
                param.name, owner
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restive_define::{
        ActionsSetSchema, AssocKeySchema, AssociationSchema, CollectionSchema, EntitySchema,
        IdentifierSchema, ParameterSchema,
    };

    fn entity(path: &str) -> EntitySchema {
        EntitySchema {
            path: Some(path.to_string()),
            actions: vec![],
            subresources: vec![],
        }
    }

    fn valid_collection() -> ResourceSchema {
        ResourceSchema {
            name: "widget".to_string(),
            namespace: None,
            path: "/widgets".to_string(),
            schema: Some("com.example.Widget".to_string()),
            doc: None,
            collection: Some(CollectionSchema {
                identifier: Some(IdentifierSchema::new("widgetId", "long")),
                supports: vec!["get".to_string(), "create".to_string()],
                methods: vec![],
                finders: vec![],
                actions: vec![],
                entity: Some(entity("/widgets/{widgetId}")),
            }),
            association: None,
            actions_set: None,
        }
    }

    #[test]
    fn valid_collection_passes() {
        assert!(validate_resource(&valid_collection()).is_ok());
    }

    #[test]
    fn missing_schema_is_violation() {
        let mut resource = valid_collection();
        resource.schema = None;

        let result = validate_resource(&resource);
        assert!(!result.is_ok());
        assert!(result.violations()[0].contains("schema"));
    }

    #[test]
    fn missing_identifier_is_violation() {
        let mut resource = valid_collection();
        resource.collection.as_mut().unwrap().identifier = None;

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("identifier is required")));
    }

    #[test]
    fn missing_entity_is_violation() {
        let mut resource = valid_collection();
        resource.collection.as_mut().unwrap().entity = None;

        let result = validate_resource(&resource);
        assert!(result.violations().iter().any(|v| v.contains("entity")));
    }

    #[test]
    fn unknown_supports_entry_is_violation() {
        let mut resource = valid_collection();
        resource
            .collection
            .as_mut()
            .unwrap()
            .supports
            .push("upsert".to_string());

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("unknown operation 'upsert'")));
    }

    #[test]
    fn method_entry_must_be_supported() {
        let mut resource = valid_collection();
        resource.collection.as_mut().unwrap().methods =
            vec![restive_define::RestMethodSchema::new("delete")];

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("'delete' is not listed in supports")));
    }

    #[test]
    fn duplicate_finder_names_are_violation() {
        let mut resource = valid_collection();
        resource.collection.as_mut().unwrap().finders = vec![
            FinderSchema::new("byOwner"),
            FinderSchema::new("byOwner"),
        ];

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("duplicate finder name 'byOwner'")));
    }

    #[test]
    fn finder_assoc_key_on_collection_is_violation() {
        let mut resource = valid_collection();
        resource.collection.as_mut().unwrap().finders =
            vec![FinderSchema::new("bySrc").with_assoc_key("src")];

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("without association keys")));
    }

    #[test]
    fn finder_undeclared_assoc_key_is_violation() {
        let resource = ResourceSchema {
            name: "membership".to_string(),
            namespace: None,
            path: "/memberships".to_string(),
            schema: Some("com.example.Membership".to_string()),
            doc: None,
            collection: None,
            association: Some(AssociationSchema {
                assoc_keys: vec![
                    AssocKeySchema::new("memberId", "long"),
                    AssocKeySchema::new("groupId", "long"),
                ],
                supports: vec!["get".to_string()],
                methods: vec![],
                finders: vec![FinderSchema::new("byActor").with_assoc_key("actorId")],
                actions: vec![],
                entity: Some(entity("/memberships/{memberId}/{groupId}")),
            }),
            actions_set: None,
        };

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("undeclared association key 'actorId'")));
    }

    #[test]
    fn array_parameter_requires_items() {
        let mut resource = valid_collection();
        let mut param = ParameterSchema::required("tags", "array");
        param.items = None;
        resource.collection.as_mut().unwrap().finders =
            vec![FinderSchema::new("byTags").with_parameters(vec![param])];

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("no 'items' type")));
    }

    #[test]
    fn malformed_path_template_is_violation() {
        let mut resource = valid_collection();
        resource.path = "/widgets/{unclosed".to_string();

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("malformed path template")));
    }

    #[test]
    fn empty_shape_defers_to_walker() {
        let resource = ResourceSchema {
            name: "mystery".to_string(),
            namespace: None,
            path: "/mystery".to_string(),
            schema: None,
            doc: None,
            collection: None,
            association: None,
            actions_set: None,
        };

        // Validation records nothing; the walker raises the shape error.
        assert!(validate_resource(&resource).is_ok());
    }

    #[test]
    fn duplicate_action_across_levels_is_violation() {
        let mut resource = valid_collection();
        let collection = resource.collection.as_mut().unwrap();
        collection.actions = vec![ActionSchema::new("promote")];
        collection.entity.as_mut().unwrap().actions = vec![ActionSchema::new("promote")];

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("duplicate action name 'promote'")));
    }

    #[test]
    fn actions_set_with_empty_action_name() {
        let resource = ResourceSchema {
            name: "maintenance".to_string(),
            namespace: None,
            path: "/maintenance".to_string(),
            schema: None,
            doc: None,
            collection: None,
            association: None,
            actions_set: Some(ActionsSetSchema {
                actions: vec![ActionSchema::new("")],
            }),
        };

        let result = validate_resource(&resource);
        assert!(result
            .violations()
            .iter()
            .any(|v| v.contains("action with empty name")));
    }
}
