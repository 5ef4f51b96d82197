//! Runtime resource metadata shared by every builder of one resource.

use std::collections::BTreeSet;

use strum::{Display, EnumString};

/// Operations a request can represent.
///
/// The CRUD/batch vocabulary plus the two open-ended operation families
/// (finders and actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Get,
    BatchGet,
    Create,
    BatchCreate,
    Update,
    BatchUpdate,
    PartialUpdate,
    BatchPartialUpdate,
    Delete,
    BatchDelete,
    Finder,
    Action,
}

/// Immutable description of one resource, shared by all of its builders.
///
/// Carries the supported operation set and, for compound-keyed resources,
/// the named key parts with their type names.
///
/// ## Examples
///
/// ```
/// use restive_client::{Operation, ResourceSpec};
///
/// let spec = ResourceSpec::new([Operation::Get, Operation::Create]);
/// assert!(spec.is_supported(Operation::Get));
/// assert!(!spec.is_supported(Operation::Delete));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSpec {
    supported: BTreeSet<Operation>,
    key_parts: Vec<(String, String)>,
}

impl ResourceSpec {
    /// Creates a spec with the given supported operations.
    pub fn new(supported: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            supported: supported.into_iter().collect(),
            key_parts: Vec::new(),
        }
    }

    /// Creates the empty spec used by action-set resources.
    pub fn none() -> Self {
        Self::default()
    }

    /// Registers a named compound-key part and its type name.
    pub fn with_key_part(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        self.key_parts.push((name.into(), type_name.into()));
        self
    }

    /// Returns true when the resource supports `op`.
    pub fn is_supported(&self, op: Operation) -> bool {
        self.supported.contains(&op)
    }

    /// The supported operation set.
    pub fn supported(&self) -> &BTreeSet<Operation> {
        &self.supported
    }

    /// Compound-key parts in declaration order.
    pub fn key_parts(&self) -> &[(String, String)] {
        &self.key_parts
    }
}
