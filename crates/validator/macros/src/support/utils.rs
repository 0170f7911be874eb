use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

/// Return named fields if the input is a struct that has them; otherwise error.
pub fn require_named_fields(input: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "Record can only be derived for structs",
            ));
        }
    };

    match fields {
        Fields::Named(named) => Ok(named),
        Fields::Unnamed(_) => Err(syn::Error::new(
            fields.span(),
            "Record requires a struct with named fields (e.g. `struct X { ... }`)",
        )),
        Fields::Unit => Err(syn::Error::new(
            fields.span(),
            "Record requires a non-unit struct with fields",
        )),
    }
}

/// Records must be `'static`, so borrowed structs are rejected up front.
pub fn reject_lifetimes(input: &DeriveInput) -> syn::Result<()> {
    match input.generics.lifetimes().next() {
        Some(lifetime) => Err(syn::Error::new(
            lifetime.span(),
            "Record cannot be derived for structs with lifetime parameters",
        )),
        None => Ok(()),
    }
}
