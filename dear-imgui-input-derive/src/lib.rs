use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Index, LitStr, parse_macro_input, parse_quote};

mod parse;

use crate::parse::parse_field_attrs;

/// Derive macro for `dear_imgui_input::Fields`.
///
/// Supports structs with named fields, tuple structs (fields are named `"0"`,
/// `"1"`, ...) and unit structs (no fields). Every visited field type must be
/// `'static`; the walk needs a handler or a `Fields` registration for it.
///
/// Supported field attributes:
///
/// - `#[input(skip)]`: the field is not visited.
/// - `#[input(name = "Label")]`: override the name the field is submitted
///   under.
#[proc_macro_derive(Fields, attributes(input))]
pub fn derive_fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = input.ident;
    let mut generics = input.generics;

    let data = match input.data {
        Data::Struct(data) => data,
        Data::Enum(e) => {
            return Err(syn::Error::new_spanned(
                e.enum_token,
                "Fields can only be derived for structs",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new_spanned(
                u.union_token,
                "Fields cannot be derived for unions",
            ));
        }
    };

    let mut visits = Vec::new();
    for (index, field) in data.fields.iter().enumerate() {
        let attrs = parse_field_attrs(field)?;
        if attrs.skip {
            continue;
        }

        let (member, default_name) = match &field.ident {
            Some(ident) => (quote!(#ident), ident.to_string()),
            None => {
                let index = Index::from(index);
                (quote!(#index), index.index.to_string())
            }
        };
        let name =
            attrs.name.unwrap_or_else(|| LitStr::new(&default_name, proc_macro2::Span::call_site()));

        visits.push(quote! {
            visitor.visit(#name, &mut self.#member)?;
        });
    }

    // The walk downcasts through `Any`, so every type parameter must be 'static.
    let type_params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for param in type_params {
        where_clause.predicates.push(parse_quote!(#param: 'static));
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let visitor_ident = if visits.is_empty() {
        quote!(_visitor)
    } else {
        quote!(visitor)
    };

    Ok(quote! {
        impl #impl_generics ::dear_imgui_input::Fields for #ident #ty_generics #where_clause {
            fn visit_fields(
                &mut self,
                #visitor_ident: &mut dyn ::dear_imgui_input::FieldVisitor,
            ) -> ::dear_imgui_input::Result<()> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }
    })
}
