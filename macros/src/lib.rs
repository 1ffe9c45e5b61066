//! Procedural macros for the listenbus event bus.
//!
//! - `#[derive(Event)]`: Implements `listenbus::Event` for your type, preserving generics and bounds.
//!   - enums: `name()` returns the variant name,
//!   - structs with a `name` field: `name()` returns that field,
//!   - any other struct: `name()` returns the struct's identifier.
//!
//! Usage:
//! ```rust,ignore
//! use listenbus::Event;
//!
//! #[derive(Clone, Debug, Event)]
//! enum UiEvent { Click { x: i32, y: i32 }, Hover }
//!
//! #[derive(Debug, Event)]
//! struct Lifecycle { name: String, pid: u32 }
//! ```
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(Event)]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let ident = input.ident.clone();
    let type_name = ident.to_string();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Enum(data_enum) => {
            let match_arms = data_enum.variants.iter().map(|variant| {
                let variant_ident = &variant.ident;
                let variant_name = variant_ident.to_string();

                let pattern = match &variant.fields {
                    Fields::Unit => quote! { Self::#variant_ident },
                    Fields::Unnamed(_) => quote! { Self::#variant_ident(..) },
                    Fields::Named(_) => quote! { Self::#variant_ident { .. } },
                };

                quote! {
                    #pattern => ::std::borrow::Cow::Borrowed(#variant_name)
                }
            });

            // An empty enum has no values to name.
            if data_enum.variants.is_empty() {
                quote! { match *self {} }
            } else {
                quote! {
                    match self {
                        #(#match_arms),*
                    }
                }
            }
        }
        Data::Struct(data_struct) if has_name_field(&data_struct.fields) => quote! {
            ::std::borrow::Cow::Borrowed(::core::convert::AsRef::<str>::as_ref(&self.name))
        },
        _ => quote! {
            ::std::borrow::Cow::Borrowed(#type_name)
        },
    };

    let expanded = quote! {
        impl #impl_generics ::listenbus::Event for #ident #ty_generics #where_clause {
            fn name(&self) -> ::std::borrow::Cow<'_, str> {
                #body
            }
        }
    };
    TokenStream::from(expanded)
}

fn has_name_field(fields: &Fields) -> bool {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .any(|f| f.ident.as_ref().is_some_and(|i| i == "name")),
        _ => false,
    }
}
