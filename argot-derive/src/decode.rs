use heck::ToKebabCase as _;
use itertools::Itertools as _;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Ident, Token, Type, Variant, punctuated::Punctuated, spanned::Spanned};

use crate::choices::{AnalyzedEnum, EnumAttr};

fn derive_decode_enum(
    ident: &Ident,
    type_name: &str,
    variants: &Punctuated<Variant, Token![,]>,
) -> syn::Result<TokenStream2> {
    let analyzed = AnalyzedEnum::from_variants(variants)?;

    let arms = analyzed.variants.iter().map(|(name, variant)| {
        quote! {
            #name => ::core::result::Result::Ok(Self::#variant),
        }
    });

    let names = analyzed.variants.iter().map(|(name, _)| name.as_str());

    Ok(quote! {
        impl ::argot::value::Decode for #ident {
            const TYPE: &'static str = #type_name;

            const CHOICES: ::core::option::Option<&'static [&'static str]> =
                ::core::option::Option::Some(&[ #(#names,)* ]);

            fn decode(raw: &str) -> ::core::result::Result<Self, ::argot::value::ValueError> {
                match raw {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::argot::value::ValueError::choice(
                        <Self as ::argot::value::Decode>::TYPE,
                        raw,
                        match <Self as ::argot::value::Decode>::CHOICES {
                            ::core::option::Option::Some(choices) => choices,
                            ::core::option::Option::None => &[],
                        },
                    )),
                }
            }
        }
    })
}

/// A newtype decodes exactly as its field does
fn derive_decode_newtype(ident: &Ident, field: Option<&Ident>, ty: &Type) -> TokenStream2 {
    let struct_body = match field {
        Some(field) => quote! { { #field: value } },
        None => quote! { ( value ) },
    };

    quote! {
        impl ::argot::value::Decode for #ident {
            const TYPE: &'static str = <#ty as ::argot::value::Decode>::TYPE;
            const FLAVOR: ::argot::value::Flavor = <#ty as ::argot::value::Decode>::FLAVOR;
            const CHOICES: ::core::option::Option<&'static [&'static str]> =
                <#ty as ::argot::value::Decode>::CHOICES;

            fn decode(raw: &str) -> ::core::result::Result<Self, ::argot::value::ValueError> {
                match <#ty as ::argot::value::Decode>::decode(raw) {
                    ::core::result::Result::Ok(value) => ::core::result::Result::Ok(
                        Self #struct_body
                    ),
                    ::core::result::Result::Err(err) => ::core::result::Result::Err(err),
                }
            }
        }
    }
}

pub fn derive_decode_result(item: TokenStream2) -> syn::Result<TokenStream2> {
    let input: DeriveInput = syn::parse2(item)?;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "can't derive `Decode` on generic types",
        ));
    }

    let attr = EnumAttr::parse(&input.attrs)?;

    match input.data {
        Data::Struct(ref data) => {
            let field = data.fields.iter().exactly_one().map_err(|_| {
                syn::Error::new(
                    input.span(),
                    "can only derive `Decode` on structs with exactly one field",
                )
            })?;

            if attr.name.is_some() {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "`name` is only supported on enums",
                ));
            }

            Ok(derive_decode_newtype(
                &input.ident,
                field.ident.as_ref(),
                &field.ty,
            ))
        }
        Data::Enum(ref data) => {
            let type_name = attr
                .name
                .unwrap_or_else(|| input.ident.to_string().to_kebab_case());

            derive_decode_enum(&input.ident, &type_name, &data.variants)
        }
        Data::Union(_) => Err(syn::Error::new(
            input.span(),
            "can't derive `Decode` on a union",
        )),
    }
}
