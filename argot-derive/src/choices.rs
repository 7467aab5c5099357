use std::collections::HashMap;

use darling::{FromAttributes as _, util::SpannedValue};
use heck::ToKebabCase as _;
use lazy_format::lazy_format;
use syn::{Attribute, Fields, Ident, Variant, spanned::Spanned as _};

#[derive(darling::FromAttributes, Debug)]
#[darling(attributes(argot))]
struct VariantAttr {
    rename: Option<SpannedValue<String>>,
}

#[derive(darling::FromAttributes, Debug)]
#[darling(attributes(argot))]
pub struct EnumAttr {
    pub name: Option<String>,
}

impl EnumAttr {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        Self::from_attributes(attrs).map_err(syn::Error::from)
    }
}

/// The accepted names of a fieldless enum, in declaration order
pub struct AnalyzedEnum<'a> {
    pub variants: Vec<(String, &'a Ident)>,
}

impl<'a> AnalyzedEnum<'a> {
    pub fn from_variants(variants: impl IntoIterator<Item = &'a Variant>) -> syn::Result<Self> {
        let mut collected = Vec::new();
        let mut seen = HashMap::new();

        for variant in variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new(
                    variant.fields.span(),
                    "only fieldless variants can be decoded from a name",
                ));
            }

            let attr = VariantAttr::from_attributes(&variant.attrs)?;

            let (name, span) = match attr.rename {
                Some(rename) => (rename.as_str().to_owned(), rename.span()),
                None => (variant.ident.to_string().to_kebab_case(), variant.ident.span()),
            };

            if name.is_empty() {
                return Err(syn::Error::new(span, "variant names can't be empty"));
            }

            if let Some(&original) = seen.get(&name) {
                let mut err = syn::Error::new(span, lazy_format!("duplicate name {name:?}"));
                err.combine(syn::Error::new(original, "original use here"));
                return Err(err);
            }

            seen.insert(name.clone(), span);
            collected.push((name, &variant.ident));
        }

        Ok(AnalyzedEnum {
            variants: collected,
        })
    }
}
