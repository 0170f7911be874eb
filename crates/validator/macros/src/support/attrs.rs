use syn::parse::ParseStream;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Token};

use crate::support::diag;

/// Validation metadata of one field, gathered from `#[valid]` and `#[serde]`.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Annotation string; `None` when the field has none.
    pub rules: Option<String>,
    /// External name.
    pub rename: Option<String>,
    /// `#[valid(skip)]`: not part of the record at all.
    pub skip: bool,
    /// `#[valid(hidden)]` or skipped by serde: listed, but never validated.
    pub hidden: bool,
}

/// Parse every attribute of a field.
pub fn parse_field(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    let mut serde_rename = None;

    for attr in attrs {
        if attr.path().is_ident("valid") {
            parse_valid(attr, &mut out)?;
        } else if attr.path().is_ident("serde") {
            parse_serde(attr, &mut out.hidden, &mut serde_rename);
        }
    }

    if out.rename.is_none() {
        out.rename = serde_rename;
    }
    Ok(out)
}

fn parse_valid(attr: &Attribute, out: &mut FieldAttrs) -> syn::Result<()> {
    attr.parse_args_with(|input: ParseStream<'_>| {
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            set_once(&mut out.rules, lit.value(), &lit, "rules")?;
            if !input.is_empty() {
                return Err(input.error("expected a single rule string"));
            }
            return Ok(());
        }

        let items = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;
        for meta in &items {
            match meta {
                Meta::Path(path) if path.is_ident("skip") => out.skip = true,
                Meta::Path(path) if path.is_ident("hidden") => out.hidden = true,
                Meta::NameValue(nv) if nv.path.is_ident("rules") => {
                    set_once(&mut out.rules, lit_str(&nv.value)?, nv, "rules")?;
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    set_once(&mut out.rename, lit_str(&nv.value)?, nv, "rename")?;
                }
                other => {
                    return Err(diag::error_spanned(
                        other,
                        "unknown `valid` attribute, expected `rules`, `rename`, `skip`, or `hidden`",
                    ));
                }
            }
        }
        Ok(())
    })
}

/// Picks up `rename`, `skip`, and `skip_serializing`. Anything serde itself
/// would reject is left for serde to report.
fn parse_serde(attr: &Attribute, hidden: &mut bool, rename: &mut Option<String>) {
    let Ok(items) = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated) else {
        return;
    };

    for meta in &items {
        match meta {
            Meta::Path(path) if path.is_ident("skip") || path.is_ident("skip_serializing") => {
                *hidden = true;
            }
            Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                if let Ok(value) = lit_str(&nv.value) {
                    *rename = Some(value);
                }
            }
            _ => {}
        }
    }
}

fn lit_str(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        other => Err(diag::error_spanned(other, "expected a string literal")),
    }
}

fn set_once<T: quote::ToTokens>(
    slot: &mut Option<String>,
    value: String,
    span: &T,
    key: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(diag::error_spanned(span, format!("duplicate `{key}`")));
    }
    *slot = Some(value);
    Ok(())
}
