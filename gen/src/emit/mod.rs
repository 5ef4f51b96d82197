//! Rendering of descriptor forests into Rust source.
//!
//! The compiler core stops at descriptors; this module is the emitter
//! collaborator that renders them. Each top-level facade becomes one
//! module file containing the facade struct, its builders, and the same
//! for every nested sub-resource.
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! Descriptors carry the dialect's camelCase member names; rendering
//! maps them to snake_case here. The emitted code delegates every
//! binding to the `restive_client` runtime.

pub mod builder;
pub mod facade;

use proc_macro2::TokenStream;
use quote::quote;
use restive_define::ResourceMethod;

use crate::descriptor::{FacadeDescriptor, OperationKind};
use crate::errors::CompilerError;
use crate::resolver::RustType;

/// Renders one top-level facade (and its subtree) to formatted source.
pub fn render_facade_module(facade: &FacadeDescriptor) -> Result<String, CompilerError> {
    let module_doc = format!(
        "Generated request builders for the `{}` resource. Do not edit by hand.",
        facade.resource_name
    );
    let body = facade_tree_tokens(facade)?;
    let tokens = quote! {
        #![doc = #module_doc]
        #body
    };
    format_source(tokens, &facade.type_name)
}

fn facade_tree_tokens(facade: &FacadeDescriptor) -> Result<TokenStream, CompilerError> {
    let mut tokens = facade::generate_facade(facade)?;
    for descriptor in &facade.builders {
        tokens.extend(builder::generate_builder(descriptor)?);
    }
    for sub in &facade.subresources {
        tokens.extend(facade_tree_tokens(sub)?);
    }
    Ok(tokens)
}

/// Validates tokens as a Rust file and formats them.
pub fn format_source(tokens: TokenStream, unit: &str) -> Result<String, CompilerError> {
    let file = syn::parse2::<syn::File>(tokens).map_err(|err| CompilerError::Emit {
        unit: unit.to_string(),
        detail: err.to_string(),
    })?;
    Ok(prettyplease::unparse(&file))
}

/// The runtime base contract a builder binds, chosen by operation kind.
pub(crate) fn base_builder_name(kind: &OperationKind) -> &'static str {
    match kind {
        OperationKind::Crud(method) => match method {
            ResourceMethod::Get => "GetRequestBuilder",
            ResourceMethod::BatchGet => "BatchGetRequestBuilder",
            ResourceMethod::Create => "CreateRequestBuilder",
            ResourceMethod::BatchCreate => "BatchCreateRequestBuilder",
            ResourceMethod::Update => "UpdateRequestBuilder",
            ResourceMethod::BatchUpdate => "BatchUpdateRequestBuilder",
            ResourceMethod::PartialUpdate => "PartialUpdateRequestBuilder",
            ResourceMethod::BatchPartialUpdate => "BatchPartialUpdateRequestBuilder",
            ResourceMethod::Delete => "DeleteRequestBuilder",
            ResourceMethod::BatchDelete => "BatchDeleteRequestBuilder",
        },
        OperationKind::Finder { .. } => "FindRequestBuilder",
        OperationKind::Action { .. } => "ActionRequestBuilder",
    }
}

/// Parses a type descriptor into tokens for splicing.
pub(crate) fn type_tokens(ty: &RustType, unit: &str) -> Result<TokenStream, CompilerError> {
    let parsed: syn::Type =
        syn::parse_str(&ty.full_path()).map_err(|err| CompilerError::Emit {
            unit: unit.to_string(),
            detail: format!("type '{}': {}", ty.full_path(), err),
        })?;
    Ok(quote! { #parsed })
}
