//! The compiled descriptor model.
//!
//! One compilation run turns each resource tree into a forest of
//! [`FacadeDescriptor`]s: one facade per resource, owning one
//! [`BuilderDescriptor`] per generated operation and its nested
//! sub-resource facades by value. The forest is read-only output — the
//! emitter renders it, the driver discards it.
//!
//! Builders do not subclass a common base the way the source dialect's
//! clients do; each descriptor is tagged with its [`OperationKind`] and
//! the emitter chooses the concrete base-operation contract to bind per
//! kind.

use std::rc::Rc;

use restive_define::ResourceMethod;
use std::collections::BTreeSet;

use crate::keys::KeyShape;
use crate::resolver::RustType;
use crate::uri::UriTemplate;

/// One path-template variable bound to its key type.
#[derive(Debug, Clone, PartialEq)]
pub struct PathKey {
    /// Variable name as it appears in path templates.
    pub name: String,
    /// Key type the variable binds to.
    pub ty: RustType,
}

/// The ordered path-key bindings from the root to the current resource.
///
/// The chain grows by copy, never by mutation in place, so sibling
/// sub-resource branches never observe each other's keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathKeyChain {
    entries: Vec<PathKey>,
}

impl PathKeyChain {
    /// Creates the empty root chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in root-to-leaf registration order.
    pub fn entries(&self) -> &[PathKey] {
        &self.entries
    }

    /// Returns true when `name` is already registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// The key type registered for `name`.
    pub fn lookup(&self, name: &str) -> Option<&RustType> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.ty)
    }

    /// Returns a copy of the chain with `additions` appended.
    pub fn extended(&self, additions: impl IntoIterator<Item = PathKey>) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(additions);
        Self { entries }
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no keys are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-resource compiled metadata, shared by reference by every builder
/// of that resource. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSpec {
    /// Supported CRUD/batch operations.
    pub supported: BTreeSet<ResourceMethod>,
    /// Derived key shape.
    pub key: KeyShape,
    /// Entity value type; absent for action sets.
    pub value_type: Option<RustType>,
    /// Association-key name to type mapping; empty unless compound.
    pub assoc_keys: Vec<(String, RustType)>,
}

impl ResourceSpec {
    /// The key type builders are parameterized by.
    pub fn key_type(&self) -> RustType {
        self.key.key_type()
    }

    /// The value type builders are parameterized by, the no-value marker
    /// for action sets.
    pub fn value_type(&self) -> RustType {
        self.value_type.clone().unwrap_or_else(RustType::unit)
    }
}

/// Whether an action is scoped to the resource or to one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLevel {
    /// Declared on the resource's action list.
    Resource,
    /// Declared on the entity's action list.
    Entity,
}

/// What operation a builder performs.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationKind {
    /// A CRUD or batch-CRUD operation.
    Crud(ResourceMethod),
    /// A named finder.
    Finder {
        /// Finder name as declared.
        name: String,
    },
    /// A named action.
    Action {
        /// Action name as declared.
        name: String,
        /// Resource- or entity-scoped.
        level: ActionLevel,
    },
}

/// One bound query or action parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamBinding {
    /// Parameter name as declared in the document.
    pub name: String,
    /// Normalized binding-operation name (e.g. `ownerParam`).
    pub method_name: String,
    /// Parameter type; the element type for repeated parameters.
    pub ty: RustType,
    /// Whether construction may omit the parameter.
    pub optional: bool,
    /// Array-typed parameters bind a finite sequence, not a single value.
    pub repeated: bool,
    /// Documentation copied verbatim from the document.
    pub doc: Option<String>,
}

/// One bound association-key component.
#[derive(Debug, Clone, PartialEq)]
pub struct AssocKeyBinding {
    /// Component name as declared.
    pub name: String,
    /// Normalized binding-operation name (e.g. `memberIdKey`).
    pub method_name: String,
    /// Component type.
    pub ty: RustType,
}

/// One bound path-template variable.
#[derive(Debug, Clone, PartialEq)]
pub struct PathKeyBinding {
    /// Variable name as it appears in path templates.
    pub name: String,
    /// Normalized binding-operation name (e.g. `widgetIdKey`).
    pub method_name: String,
    /// Key type the variable binds to.
    pub ty: RustType,
}

/// One generated request builder.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderDescriptor {
    /// Derived builder type name (e.g. `WidgetFindByOwnerBuilder`).
    pub type_name: String,
    /// Operation the builder performs; selects the base contract.
    pub kind: OperationKind,
    /// Key type parameter of the base contract.
    pub key_type: RustType,
    /// Value type parameter of the base contract.
    pub value_type: RustType,
    /// Factory-operation name on the facade (e.g. `findByOwner`).
    pub factory_method: String,
    /// Documentation copied verbatim from the document.
    pub doc: Option<String>,
    /// Path-key bindings, root-to-leaf, ancestors included.
    pub path_keys: Vec<PathKeyBinding>,
    /// Association-key bindings; finders only.
    pub assoc_keys: Vec<AssocKeyBinding>,
    /// Query-parameter bindings.
    pub query_params: Vec<ParamBinding>,
    /// Action-parameter bindings; actions only.
    pub action_params: Vec<ParamBinding>,
    /// Action return type; the no-value marker when the document omits
    /// `returns`. Absent for non-actions.
    pub return_type: Option<RustType>,
    /// Finder result metadata type, when declared.
    pub metadata_type: Option<RustType>,
    /// The owning resource's spec.
    pub spec: Rc<ResourceSpec>,
}

/// One compiled resource facade.
#[derive(Debug, Clone, PartialEq)]
pub struct FacadeDescriptor {
    /// Facade type name (e.g. `WidgetBuilders`).
    pub type_name: String,
    /// Resource name as declared.
    pub resource_name: String,
    /// Dotted namespace, when declared.
    pub namespace: Option<String>,
    /// Base-URI template for the resource.
    pub uri: UriTemplate,
    /// Documentation copied verbatim from the document.
    pub doc: Option<String>,
    /// Shared per-resource spec.
    pub spec: Rc<ResourceSpec>,
    /// Builders, one per generated operation.
    pub builders: Vec<BuilderDescriptor>,
    /// Nested sub-resource facades, owned by value.
    pub subresources: Vec<FacadeDescriptor>,
}

impl FacadeDescriptor {
    /// Finds a builder by its factory-operation name.
    pub fn builder(&self, factory_method: &str) -> Option<&BuilderDescriptor> {
        self.builders
            .iter()
            .find(|b| b.factory_method == factory_method)
    }

    /// Finds a nested facade by resource name.
    pub fn subresource(&self, resource_name: &str) -> Option<&FacadeDescriptor> {
        self.subresources
            .iter()
            .find(|f| f.resource_name == resource_name)
    }
}
