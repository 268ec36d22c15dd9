//! Derive macro implementation for envmode

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;
mod types;

use attrs::FieldAttrs;

/// `Populate` derive macro
///
/// Implements `envmode::Populate` for a struct with named fields.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env(name = "CUSTOM_NAME")]`: Lookup key (defaults to the field name upper-cased)
/// - `#[env(default = "value")]`: Literal used when the variable is unset or empty
/// - `#[env(skip)]`: Never touch this field
/// - `#[env(deserializer = "func")]`: Use custom deserializer function
///
/// # Example
///
/// See the `envmode` crate documentation for usage examples.
#[proc_macro_derive(Populate, attributes(env))]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Populate only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(input, "Populate only supports structs"));
        }
    };

    let mut descriptors = Vec::new();
    let mut assignments = Vec::new();

    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        if attrs.skip {
            continue;
        }

        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let index = descriptors.len();

        // An explicitly empty name falls back to the field name
        let field_name = field_ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name);
        let key = attrs
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| field_name.to_uppercase());

        let default = match &attrs.default {
            Some(value) => quote!(::core::option::Option::Some(#value)),
            None => quote!(::core::option::Option::None),
        };
        let type_name = types::display_type(field_type);
        let dispatch = quote!(::envmode::populate::Dispatch::<#field_type>::new());

        let resolve_kind = if attrs.deserializer.is_some() {
            quote!(|| ::envmode::TargetKind::Custom)
        } else {
            quote! {
                || {
                    #[allow(unused_imports)]
                    use ::envmode::populate::{ViaFieldValue as _, ViaUnsupported as _};
                    (&#dispatch).field_kind()
                }
            }
        };

        descriptors.push(quote! {
            ::envmode::FieldDescriptor {
                name: #field_name,
                key: #key,
                default: #default,
                type_name: #type_name,
                resolve_kind: #resolve_kind,
            }
        });

        let descriptor = quote!(&<Self as ::envmode::Populate>::FIELDS[#index]);
        let working_value = quote!(::envmode::populate::working_value(source, prefix, #descriptor));

        let assignment = match &attrs.deserializer {
            Some(func) => {
                let call = quote! {
                    #func(&__value).map_err(|e| {
                        ::envmode::Error::field(
                            #descriptor,
                            ::envmode::CoerceError::custom(__value.as_str(), e),
                        )
                    })?
                };
                let value = if types::option_inner(field_type).is_some() {
                    quote!(::core::option::Option::Some(#call))
                } else {
                    call
                };
                quote! {
                    if let ::core::option::Option::Some(__value) = #working_value {
                        self.#field_ident = #value;
                    }
                }
            }
            // Unsupported types only fail once a value turns up for the field
            None => quote! {
                if let ::core::option::Option::Some(__value) = #working_value {
                    self.#field_ident = (&#dispatch).coerce_value(#descriptor, &__value)?;
                }
            },
        };
        assignments.push(assignment);
    }

    Ok(quote! {
        impl #impl_generics ::envmode::Populate for #struct_name #ty_generics #where_clause {
            const FIELDS: &'static [::envmode::FieldDescriptor] = &[
                #(#descriptors),*
            ];

            #[allow(unused_imports, unused_variables)]
            fn populate_from<S: ::envmode::Source + ?Sized>(
                &mut self,
                source: &S,
                prefix: &str,
            ) -> ::core::result::Result<(), ::envmode::Error> {
                use ::envmode::populate::{ViaFieldValue as _, ViaUnsupported as _};
                #(#assignments)*
                ::core::result::Result::Ok(())
            }
        }
    })
}
