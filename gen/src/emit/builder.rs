//! Builder struct generation.
//!
//! Each [`BuilderDescriptor`] renders to one struct wrapping its base
//! contract from `restive_client`, with one snake_case method per
//! binding: path keys, association keys, query parameters, action
//! parameters, and the payload methods of its operation kind.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use restive_define::ResourceMethod;

use crate::descriptor::{ActionLevel, BuilderDescriptor, OperationKind, ParamBinding};
use crate::errors::CompilerError;
use crate::naming::snake_case;
use crate::resolver::RustType;

use super::{base_builder_name, type_tokens};

/// Generates the builder struct and impl for one descriptor.
pub fn generate_builder(descriptor: &BuilderDescriptor) -> Result<TokenStream, CompilerError> {
    let unit = descriptor.type_name.as_str();
    let type_name = format_ident!("{}", descriptor.type_name);
    let base = format_ident!("{}", base_builder_name(&descriptor.kind));

    let key_ty = type_tokens(&descriptor.key_type, unit)?;
    let second = second_type(descriptor);
    let second_ty = type_tokens(&second, unit)?;

    let named = match &descriptor.kind {
        OperationKind::Finder { name } => Some(name.as_str()),
        OperationKind::Action { name, .. } => Some(name.as_str()),
        OperationKind::Crud(_) => None,
    };
    let name_call = named.map(|name| quote! { let base = base.name(#name); });

    let doc_attr = descriptor
        .doc
        .as_ref()
        .map(|doc| quote! { #[doc = #doc] })
        .unwrap_or_else(|| {
            let default = format!("Request builder produced by `{}`.", descriptor.factory_method);
            quote! { #[doc = #default] }
        });

    let path_key_methods = descriptor.path_keys.iter().map(|binding| {
        let method = format_ident!("{}", snake_case(&binding.method_name));
        let ty = type_tokens(&binding.ty, unit)?;
        let raw = &binding.name;
        Ok(quote! {
            pub fn #method(mut self, key: #ty) -> Self {
                self.base = self.base.path_key(#raw, key);
                self
            }
        })
    });
    let path_key_methods = collect(path_key_methods)?;

    let assoc_key_methods = descriptor.assoc_keys.iter().map(|binding| {
        let method = format_ident!("{}", snake_case(&binding.method_name));
        let ty = type_tokens(&binding.ty, unit)?;
        let raw = &binding.name;
        Ok(quote! {
            pub fn #method(mut self, key: #ty) -> Self {
                self.base = self.base.assoc_key(#raw, key);
                self
            }
        })
    });
    let assoc_key_methods = collect(assoc_key_methods)?;

    let query_param_methods = descriptor
        .query_params
        .iter()
        .map(|param| param_method(param, unit, false));
    let query_param_methods = collect(query_param_methods)?;

    let action_param_methods = descriptor
        .action_params
        .iter()
        .map(|param| param_method(param, unit, true));
    let action_param_methods = collect(action_param_methods)?;

    let payload_methods = payload_methods(descriptor, &key_ty, &second_ty);

    Ok(quote! {
        #doc_attr
        pub struct #type_name {
            base: restive_client::#base<#key_ty, #second_ty>,
        }

        impl #type_name {
            pub fn new(
                base_uri_template: &str,
                resource_spec: restive_client::ResourceSpec,
            ) -> Self {
                let base = restive_client::#base::new(base_uri_template, resource_spec);
                #name_call
                Self { base }
            }

            #payload_methods

            #path_key_methods

            #assoc_key_methods

            #query_param_methods

            #action_param_methods

            pub fn build(self) -> restive_client::Request<#key_ty, #second_ty> {
                self.base.build()
            }
        }
    })
}

/// The base contract's second type parameter: the value type, or the
/// return type for actions.
fn second_type(descriptor: &BuilderDescriptor) -> RustType {
    match &descriptor.kind {
        OperationKind::Action { .. } => descriptor
            .return_type
            .clone()
            .unwrap_or_else(RustType::unit),
        _ => descriptor.value_type.clone(),
    }
}

fn collect(
    methods: impl Iterator<Item = Result<TokenStream, CompilerError>>,
) -> Result<TokenStream, CompilerError> {
    let mut tokens = TokenStream::new();
    for method in methods {
        tokens.extend(method?);
    }
    Ok(tokens)
}

/// One binding method per parameter. Finder parameters use `req_param`
/// when required; action parameters always use `param`. Repeated
/// parameters accept any finite sequence of the element type.
fn param_method(
    param: &ParamBinding,
    unit: &str,
    is_action: bool,
) -> Result<TokenStream, CompilerError> {
    let method = format_ident!("{}", snake_case(&param.method_name));
    let ty = type_tokens(&param.ty, unit)?;
    let raw = &param.name;
    let setter = if is_action || param.optional {
        format_ident!("param")
    } else {
        format_ident!("req_param")
    };
    let doc_attr = param.doc.as_ref().map(|doc| quote! { #[doc = #doc] });

    if param.repeated {
        Ok(quote! {
            #doc_attr
            pub fn #method<I>(mut self, value: I) -> Self
            where
                I: IntoIterator<Item = #ty>,
            {
                self.base = self
                    .base
                    .#setter(#raw, value.into_iter().collect::<Vec<_>>());
                self
            }
        })
    } else {
        Ok(quote! {
            #doc_attr
            pub fn #method(mut self, value: #ty) -> Self {
                self.base = self.base.#setter(#raw, value);
                self
            }
        })
    }
}

/// Typed payload methods per operation kind.
fn payload_methods(
    descriptor: &BuilderDescriptor,
    key_ty: &TokenStream,
    second_ty: &TokenStream,
) -> TokenStream {
    match &descriptor.kind {
        OperationKind::Crud(method) => match method {
            ResourceMethod::Get | ResourceMethod::Delete => quote! {
                pub fn id(mut self, id: #key_ty) -> Self {
                    self.base = self.base.id(id);
                    self
                }
            },
            ResourceMethod::Create => quote! {
                pub fn input(mut self, entity: #second_ty) -> Self {
                    self.base = self.base.input(entity);
                    self
                }
            },
            ResourceMethod::Update | ResourceMethod::PartialUpdate => quote! {
                pub fn id(mut self, id: #key_ty) -> Self {
                    self.base = self.base.id(id);
                    self
                }

                pub fn input(mut self, entity: #second_ty) -> Self {
                    self.base = self.base.input(entity);
                    self
                }
            },
            ResourceMethod::BatchGet | ResourceMethod::BatchDelete => quote! {
                pub fn ids<I>(mut self, ids: I) -> Self
                where
                    I: IntoIterator<Item = #key_ty>,
                {
                    self.base = self.base.ids(ids);
                    self
                }
            },
            ResourceMethod::BatchCreate => quote! {
                pub fn inputs<I>(mut self, entities: I) -> Self
                where
                    I: IntoIterator<Item = #second_ty>,
                {
                    self.base = self.base.inputs(entities);
                    self
                }
            },
            ResourceMethod::BatchUpdate => quote! {
                pub fn update(mut self, id: #key_ty, entity: #second_ty) -> Self {
                    self.base = self.base.update(id, entity);
                    self
                }
            },
            ResourceMethod::BatchPartialUpdate => quote! {
                pub fn patch(mut self, id: #key_ty, patch: #second_ty) -> Self {
                    self.base = self.base.patch(id, patch);
                    self
                }
            },
        },
        OperationKind::Finder { .. } => TokenStream::new(),
        OperationKind::Action { level, .. } => match level {
            ActionLevel::Entity => quote! {
                pub fn id(mut self, id: #key_ty) -> Self {
                    self.base = self.base.id(id);
                    self
                }
            },
            ActionLevel::Resource => TokenStream::new(),
        },
    }
}
