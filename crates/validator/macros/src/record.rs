use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input, parse_quote};

use crate::support::{attrs, diag, utils};

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(ts) => ts,
        Err(e) => diag::to_compile_error(e),
    }
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream> {
    utils::reject_lifetimes(&input)?;
    let named = utils::require_named_fields(&input)?;

    let mut field_refs = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let field_attrs = attrs::parse_field(&field.attrs)?;
        if field_attrs.skip {
            continue;
        }

        let Some(ident) = &field.ident else {
            return Err(diag::error_spanned(field, "expected a named field"));
        };
        let name = ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name);

        let tag = field_attrs.rules.map(|rules| quote!(.with_tag(#rules)));
        let alias = field_attrs.rename.map(|alias| quote!(.with_alias(#alias)));
        let hidden = field_attrs.hidden.then(|| quote!(.hidden()));

        field_refs.push(quote! {
            ::fieldguard::FieldRef::new(#name, &self.#ident) #tag #alias #hidden
        });
    }

    let type_params: Vec<_> = input.generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = input.generics.make_where_clause();
    for param in &type_params {
        where_clause
            .predicates
            .push(parse_quote!(#param: ::fieldguard::Validatable + 'static));
    }

    let struct_name = &input.ident;
    let type_name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::fieldguard::Record for #struct_name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> ::std::vec::Vec<::fieldguard::FieldRef<'_>> {
                ::std::vec![#(#field_refs),*]
            }
        }

        impl #impl_generics ::fieldguard::Validatable for #struct_name #ty_generics #where_clause {
            fn shape(&self) -> ::fieldguard::Shape<'_> {
                ::fieldguard::Shape::Record(self)
            }
        }
    };

    Ok(expanded.into())
}
