//! Type-resolver adapter over the external type system.
//!
//! Type references in resource documents come in three forms: a bare name
//! (`"long"`, `"com.example.Widget"`), an inline definition (a JSON
//! object), or an array-of reference (`{"type": "array", "items": ...}`).
//! The adapter canonicalizes a raw reference, delegates name resolution
//! to a [`TypeLookup`] collaborator, substitutes a typeref's native
//! override when one is declared, and memoizes results by canonical
//! reference text.
//!
//! The adapter never invents types: an unresolvable reference is an
//! error tagged with the offending reference string, which the driver
//! aggregates per resource.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A resolved target-language type descriptor.
///
/// ## Examples
///
/// ```
/// use restive_gen::resolver::RustType;
///
/// let plain = RustType::new("i64");
/// assert_eq!(plain.full_path(), "i64");
///
/// let record = RustType::with_path("Widget", "com::example");
/// assert_eq!(record.full_path(), "com::example::Widget");
///
/// let complex = RustType::generic_with_path(
///     "ComplexKey",
///     "restive_client",
///     vec![RustType::new("i64"), record],
/// );
/// assert_eq!(
///     complex.full_path(),
///     "restive_client::ComplexKey<i64, com::example::Widget>"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RustType {
    name: String,
    module_path: Option<String>,
    params: Vec<RustType>,
}

impl RustType {
    /// Creates a type with a bare name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module_path: None,
            params: Vec::new(),
        }
    }

    /// Creates a type with a module path.
    pub fn with_path(name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module_path: Some(module_path.into()),
            params: Vec::new(),
        }
    }

    /// Creates a generic type with the given parameters.
    pub fn generic(name: impl Into<String>, params: Vec<RustType>) -> Self {
        Self {
            name: name.into(),
            module_path: None,
            params,
        }
    }

    /// Creates a generic type with a module path.
    pub fn generic_with_path(
        name: impl Into<String>,
        module_path: impl Into<String>,
        params: Vec<RustType>,
    ) -> Self {
        Self {
            name: name.into(),
            module_path: Some(module_path.into()),
            params,
        }
    }

    /// The no-value marker type.
    pub fn unit() -> Self {
        Self::new("()")
    }

    /// Returns true for the no-value marker.
    pub fn is_unit(&self) -> bool {
        self.name == "()" && self.params.is_empty()
    }

    /// The unqualified type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The module path, if any.
    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref()
    }

    /// Generic parameters, empty for plain types.
    pub fn params(&self) -> &[RustType] {
        &self.params
    }

    /// The fully qualified type text, generic parameters included.
    pub fn full_path(&self) -> String {
        let base = match &self.module_path {
            Some(path) => format!("{}::{}", path, self.name),
            None => self.name.clone(),
        };
        if self.params.is_empty() {
            base
        } else {
            let rendered: Vec<String> = self.params.iter().map(RustType::full_path).collect();
            format!("{}<{}>", base, rendered.join(", "))
        }
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_path())
    }
}

/// What the external type system knows about one named schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedType {
    /// A structural schema resolved to a concrete type.
    Structural(RustType),
    /// A typeref alias, optionally carrying a native-type override that
    /// supersedes the underlying structural type.
    Alias {
        /// The aliased structural type.
        underlying: RustType,
        /// Explicit native type the alias binds to, if declared.
        native: Option<RustType>,
    },
}

/// The external type system the adapter delegates name resolution to.
pub trait TypeLookup {
    /// Resolves a schema name, or `None` when the name is unknown.
    fn resolve(&self, name: &str) -> Option<ResolvedType>;
}

/// Default [`TypeLookup`]: the primitive table, explicitly registered
/// schemas and typerefs, and derivation for namespace-qualified record
/// names.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    registered: HashMap<String, ResolvedType>,
}

impl TypeRegistry {
    /// Creates a registry with only the primitive table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a structural schema under `name`.
    pub fn register(&mut self, name: impl Into<String>, ty: RustType) {
        self.registered
            .insert(name.into(), ResolvedType::Structural(ty));
    }

    /// Registers a typeref alias, optionally with a native override.
    pub fn register_typeref(
        &mut self,
        name: impl Into<String>,
        underlying: RustType,
        native: Option<RustType>,
    ) {
        self.registered
            .insert(name.into(), ResolvedType::Alias { underlying, native });
    }

    fn primitive(name: &str) -> Option<RustType> {
        let ty = match name {
            "int" => RustType::new("i32"),
            "long" => RustType::new("i64"),
            "float" => RustType::new("f32"),
            "double" => RustType::new("f64"),
            "boolean" => RustType::new("bool"),
            "string" => RustType::new("String"),
            "bytes" => RustType::generic("Vec", vec![RustType::new("u8")]),
            _ => return None,
        };
        Some(ty)
    }

    /// Derives a descriptor for a namespace-qualified record name:
    /// `com.example.Widget` becomes `com::example::Widget`.
    fn derive_qualified(name: &str) -> Option<RustType> {
        let (namespace, type_name) = name.rsplit_once('.')?;
        if namespace.is_empty() || type_name.is_empty() {
            return None;
        }
        Some(RustType::with_path(
            type_name,
            namespace.replace('.', "::"),
        ))
    }
}

impl TypeLookup for TypeRegistry {
    fn resolve(&self, name: &str) -> Option<ResolvedType> {
        if let Some(resolved) = self.registered.get(name) {
            return Some(resolved.clone());
        }
        if let Some(primitive) = Self::primitive(name) {
            return Some(ResolvedType::Structural(primitive));
        }
        Self::derive_qualified(name).map(ResolvedType::Structural)
    }
}

/// A reference the type system could not resolve.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to resolve type reference '{reference}': {detail}")]
pub struct TypeResolutionError {
    /// The offending reference text.
    pub reference: String,
    /// What went wrong.
    pub detail: String,
}

impl TypeResolutionError {
    fn new(reference: &str, detail: impl Into<String>) -> Self {
        Self {
            reference: reference.to_string(),
            detail: detail.into(),
        }
    }
}

/// The resolver adapter: canonicalization, delegation, override
/// substitution, memoization.
pub struct TypeResolver<'a> {
    lookup: &'a dyn TypeLookup,
    cache: HashMap<String, RustType>,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver over the given type system.
    pub fn new(lookup: &'a dyn TypeLookup) -> Self {
        Self {
            lookup,
            cache: HashMap::new(),
        }
    }

    /// Resolves a raw type reference to a type descriptor.
    ///
    /// ## Errors
    ///
    /// Returns [`TypeResolutionError`] tagged with the reference text when
    /// the reference is empty, malformed, or names an unknown type.
    pub fn resolve_ref(&mut self, raw: &str) -> Result<RustType, TypeResolutionError> {
        let canonical = raw.trim();
        if canonical.is_empty() {
            return Err(TypeResolutionError::new(raw, "empty type reference"));
        }
        if let Some(hit) = self.cache.get(canonical) {
            return Ok(hit.clone());
        }

        let resolved = self.resolve_uncached(canonical)?;
        self.cache
            .insert(canonical.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn resolve_uncached(&mut self, canonical: &str) -> Result<RustType, TypeResolutionError> {
        if canonical.starts_with('{') || canonical.starts_with('"') {
            let value: serde_json::Value = serde_json::from_str(canonical)
                .map_err(|e| TypeResolutionError::new(canonical, e.to_string()))?;
            self.resolve_inline(canonical, &value)
        } else {
            self.resolve_name(canonical)
        }
    }

    fn resolve_inline(
        &mut self,
        reference: &str,
        value: &serde_json::Value,
    ) -> Result<RustType, TypeResolutionError> {
        match value {
            serde_json::Value::String(name) => self.resolve_name(name),
            serde_json::Value::Object(definition) => {
                let type_tag = definition
                    .get("type")
                    .and_then(|t| t.as_str())
                    .ok_or_else(|| {
                        TypeResolutionError::new(reference, "inline definition has no 'type'")
                    })?;
                match type_tag {
                    "array" => {
                        let items = definition.get("items").ok_or_else(|| {
                            TypeResolutionError::new(reference, "array reference has no 'items'")
                        })?;
                        let item = self.resolve_inline(reference, items)?;
                        Ok(RustType::generic("Vec", vec![item]))
                    }
                    "typeref" => {
                        let underlying = definition.get("ref").ok_or_else(|| {
                            TypeResolutionError::new(reference, "typeref has no 'ref'")
                        })?;
                        let underlying = self.resolve_inline(reference, underlying)?;
                        let native = definition
                            .get("native")
                            .and_then(|n| n.as_str())
                            .map(parse_native_path);
                        Ok(native.unwrap_or(underlying))
                    }
                    _ => {
                        // Named inline definition (record, enum, fixed):
                        // resolve by its qualified name.
                        let name = definition
                            .get("name")
                            .and_then(|n| n.as_str())
                            .ok_or_else(|| {
                                TypeResolutionError::new(
                                    reference,
                                    "inline definition has no 'name'",
                                )
                            })?;
                        let qualified = match definition.get("namespace").and_then(|n| n.as_str())
                        {
                            Some(namespace) => format!("{}.{}", namespace, name),
                            None => name.to_string(),
                        };
                        self.resolve_name(&qualified)
                    }
                }
            }
            _ => Err(TypeResolutionError::new(
                reference,
                "reference must be a string or an object",
            )),
        }
    }

    fn resolve_name(&self, name: &str) -> Result<RustType, TypeResolutionError> {
        match self.lookup.resolve(name) {
            Some(ResolvedType::Structural(ty)) => Ok(ty),
            Some(ResolvedType::Alias { underlying, native }) => Ok(native.unwrap_or(underlying)),
            None => Err(TypeResolutionError::new(name, "unknown type")),
        }
    }
}

/// Parses a native override path like `chrono::DateTime` into a descriptor.
fn parse_native_path(path: &str) -> RustType {
    match path.rsplit_once("::") {
        Some((module, name)) => RustType::with_path(name, module),
        None => RustType::new(path),
    }
}
