//! `#[derive(Introspect)]`: registers a user type with the predicate and
//! transform tables.
//!
//! | Emitted | When |
//! |---------|------|
//! | `Transform` | always (unqualified, non-reference table) |
//! | `IsObject`, `IsCompound`, `IsFinal` | always |
//! | `IsClass` / `IsEnum` / `IsUnion` | by item kind |
//! | `IsEmpty` | struct without fields |
//! | `IsAggregate` | struct whose fields are all `pub` |
//! | `IsStandardLayout` | `#[repr(C)]`, `#[repr(transparent)]` or an integer repr |
//! | `IsScalar` | enum whose variants carry no data |
//! | `Underlying` | enum whose variants carry no data (`isize` unless a repr says otherwise) |

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Visibility};

const INT_REPRS: &[&str] = &[
    "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "isize",
];

pub fn expand_derive_introspect(input: DeriveInput) -> TokenStream {
    expand(&input).unwrap_or_else(syn::Error::into_compile_error)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let reprs = repr_hints(input)?;

    let int_repr = reprs
        .iter()
        .find(|r| INT_REPRS.contains(&r.to_string().as_str()))
        .cloned();
    let standard_layout = int_repr.is_some()
        || reprs.iter().any(|r| r == "C" || r == "transparent");

    let mut markers: Vec<TokenStream> = vec![
        quote! { IsObject },
        quote! { IsCompound },
        quote! { IsFinal },
    ];
    let mut underlying = None;

    match &input.data {
        Data::Struct(data) => {
            markers.push(quote! { IsClass });
            if data.fields.is_empty() {
                markers.push(quote! { IsEmpty });
            }
            if data.fields.iter().all(|f| matches!(f.vis, Visibility::Public(_))) {
                markers.push(quote! { IsAggregate });
            }
        }
        Data::Enum(data) => {
            markers.push(quote! { IsEnum });
            if data.variants.iter().all(|v| matches!(v.fields, Fields::Unit)) {
                markers.push(quote! { IsScalar });
                let repr = int_repr.unwrap_or_else(|| Ident::new("isize", name.span()));
                underlying = Some(repr);
            }
        }
        Data::Union(_) => {
            markers.push(quote! { IsUnion });
        }
    }

    if standard_layout {
        markers.push(quote! { IsStandardLayout });
    }

    let marker_impls = markers.iter().map(|marker| {
        quote! {
            impl #impl_generics ::tola_concepts::traits::#marker
                for #name #ty_generics #where_clause {}
        }
    });

    let underlying_impl = underlying.map(|repr| {
        quote! {
            impl #impl_generics ::tola_concepts::transform::Underlying
                for #name #ty_generics #where_clause
            {
                type Type = #repr;
            }
        }
    });

    let transform_impl = transform_table(input);

    Ok(quote! {
        #(#marker_impls)*
        #underlying_impl
        #transform_impl
    })
}

/// Identifiers listed in `#[repr(...)]` attributes.
fn repr_hints(input: &DeriveInput) -> syn::Result<Vec<Ident>> {
    let mut reprs = Vec::new();
    for attr in &input.attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                reprs.push(ident.clone());
            }
            // `align(N)` / `packed(N)`
            if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                content.parse::<TokenStream>()?;
            }
            Ok(())
        })?;
    }
    Ok(reprs)
}

/// The plain row of the transform table: every transform that does not
/// change the type yields `Self`.
fn transform_table(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();

    let mut where_clause = input.generics.where_clause.clone().unwrap_or_else(|| {
        syn::WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        }
    });
    // Reference forms are `&'static`
    where_clause.predicates.push(syn::parse_quote! { Self: 'static });

    quote! {
        impl #impl_generics ::tola_concepts::transform::Transform
            for #name #ty_generics #where_clause
        {
            type Pointer = ::tola_concepts::Absent;
            type Array = ::tola_concepts::Absent;
            type Void = ::tola_concepts::Absent;
            type RemoveConst = Self;
            type RemoveVolatile = Self;
            type AddConst = ::tola_concepts::transform::Const<Self>;
            type AddVolatile = ::tola_concepts::transform::Volatile<Self>;
            type RemoveReference = Self;
            type AddLvalueReference = &'static mut Self;
            type AddRvalueReference = Self;
            type RemovePointer = Self;
            type AddPointer = *mut Self;
            type RemoveExtent = Self;
            type RemoveAllExtents = Self;
            type Decay = Self;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(src: &str) -> String {
        let input: DeriveInput = syn::parse_str(src).unwrap();
        expand(&input).unwrap().to_string()
    }

    #[test]
    fn test_unit_struct() {
        let out = expand_str("struct Marker;");
        assert!(out.contains("IsClass"));
        assert!(out.contains("IsEmpty"));
        assert!(out.contains("IsAggregate"));
        assert!(!out.contains("IsStandardLayout"));
        assert!(out.contains("type Void = :: tola_concepts :: Absent"));
    }

    #[test]
    fn test_private_field_is_not_aggregate() {
        let out = expand_str("#[repr(C)] pub struct Handle { pub id: u32, secret: u64 }");
        assert!(!out.contains("IsAggregate"));
        assert!(!out.contains("IsEmpty"));
        assert!(out.contains("IsStandardLayout"));
    }

    #[test]
    fn test_fieldless_enum_repr() {
        let out = expand_str("#[repr(u8)] enum Color { Red, Green }");
        assert!(out.contains("IsEnum"));
        assert!(out.contains("IsScalar"));
        assert!(out.contains("type Type = u8"));
    }

    #[test]
    fn test_data_enum_has_no_underlying() {
        let out = expand_str("#[repr(align(8))] enum Shape { Dot, Line(u32) }");
        assert!(!out.contains("Underlying"));
        assert!(!out.contains("IsScalar"));
        assert!(!out.contains("IsStandardLayout"));
    }

    #[test]
    fn test_generic_transform_bound() {
        let out = expand_str("struct Wrapper<T> { pub inner: T }");
        assert!(out.contains("Self : 'static"));
    }
}
