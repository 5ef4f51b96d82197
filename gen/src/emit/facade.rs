//! Facade struct generation.
//!
//! Each [`FacadeDescriptor`] renders to a struct owning the resource's
//! base-URI template, with one factory method per builder and the
//! resource's runtime spec constructed in one place.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::descriptor::FacadeDescriptor;
use crate::errors::CompilerError;
use crate::naming::{pascal_case, snake_case};

/// Generates the facade struct and impl for one descriptor.
pub fn generate_facade(facade: &FacadeDescriptor) -> Result<TokenStream, CompilerError> {
    let type_name = format_ident!("{}", facade.type_name);
    let template = facade.uri.as_str();

    let doc = match &facade.doc {
        Some(doc) => doc.clone(),
        None => format!("Request builder factory for the `{}` resource.", facade.resource_name),
    };

    // The override constructor rewrites only the resource's own (last)
    // path component; ancestor segments survive at any nesting depth.
    let rewrite_body = match template.rfind('/') {
        Some(idx) => {
            let prefix = &template[..idx];
            quote! {
                Self {
                    base_uri_template: format!("{}/{}", #prefix, resource_name),
                }
            }
        }
        None => quote! {
            Self {
                base_uri_template: resource_name.to_string(),
            }
        },
    };

    let spec_expr = resource_spec_expr(facade);

    let factories = facade.builders.iter().map(|builder| {
        let method = format_ident!("{}", snake_case(&builder.factory_method));
        let builder_ty = format_ident!("{}", builder.type_name);
        let factory_doc = builder
            .doc
            .as_ref()
            .map(|doc| quote! { #[doc = #doc] });
        quote! {
            #factory_doc
            pub fn #method(&self) -> #builder_ty {
                #builder_ty::new(&self.base_uri_template, Self::resource_spec())
            }
        }
    });

    Ok(quote! {
        #[doc = #doc]
        pub struct #type_name {
            base_uri_template: String,
        }

        impl #type_name {
            pub fn new() -> Self {
                Self {
                    base_uri_template: #template.to_string(),
                }
            }

            /// Creates the facade with the resource's own path component
            /// replaced by `resource_name`.
            pub fn with_resource_name(resource_name: &str) -> Self {
                #rewrite_body
            }

            fn resource_spec() -> restive_client::ResourceSpec {
                #spec_expr
            }

            #(#factories)*
        }

        impl Default for #type_name {
            fn default() -> Self {
                Self::new()
            }
        }
    })
}

/// The runtime `ResourceSpec` constructor expression.
fn resource_spec_expr(facade: &FacadeDescriptor) -> TokenStream {
    let spec = &facade.spec;
    if spec.supported.is_empty() && spec.assoc_keys.is_empty() {
        return quote! { restive_client::ResourceSpec::none() };
    }

    let operations = spec.supported.iter().map(|method| {
        let variant = format_ident!("{}", pascal_case(&method.to_string()));
        quote! { restive_client::Operation::#variant }
    });
    let key_parts = spec.assoc_keys.iter().map(|(name, ty)| {
        let type_name = ty.full_path();
        quote! { .with_key_part(#name, #type_name) }
    });

    quote! {
        restive_client::ResourceSpec::new([#(#operations),*])
            #(#key_parts)*
    }
}
