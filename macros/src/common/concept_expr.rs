// Concept expressions: `Regular & !IsEmpty | (IsSame<bool> | Boolean)`

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Token, Type,
    parse::{Parse, ParseStream},
};

// =============================================================================
// Expression Tree
// =============================================================================

/// A query over one subject type. Leaves are trait bounds; `&` binds
/// tighter than `|`, and `!` tighter than both.
#[derive(Clone, Debug)]
pub enum ConceptExpr {
    Concept(Type),
    All(Box<ConceptExpr>, Box<ConceptExpr>),
    Any(Box<ConceptExpr>, Box<ConceptExpr>),
    Negate(Box<ConceptExpr>),
}

impl Parse for ConceptExpr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        disjunction(input)
    }
}

/// Left fold over `operand (sep operand)*`. The doubled separator
/// (`&&`, `||`) is rejected rather than read as two operators.
fn fold_chain(
    input: ParseStream,
    single: fn(ParseStream) -> bool,
    double: fn(ParseStream) -> bool,
    hint: &str,
    operand: fn(ParseStream) -> syn::Result<ConceptExpr>,
    join: fn(Box<ConceptExpr>, Box<ConceptExpr>) -> ConceptExpr,
) -> syn::Result<ConceptExpr> {
    let mut acc = operand(input)?;
    loop {
        if double(input) {
            return Err(input.error(hint));
        }
        if !single(input) {
            return Ok(acc);
        }
        // Single-character punctuation
        input.parse::<proc_macro2::Punct>()?;
        let next = operand(input)?;
        acc = join(Box::new(acc), Box::new(next));
    }
}

fn disjunction(input: ParseStream) -> syn::Result<ConceptExpr> {
    fold_chain(
        input,
        |i| i.peek(Token![|]),
        |i| i.peek(Token![||]),
        "use `|` to combine concepts",
        conjunction,
        ConceptExpr::Any,
    )
}

fn conjunction(input: ParseStream) -> syn::Result<ConceptExpr> {
    fold_chain(
        input,
        |i| i.peek(Token![&]),
        |i| i.peek(Token![&&]),
        "use `&` to combine concepts",
        negation,
        ConceptExpr::All,
    )
}

fn negation(input: ParseStream) -> syn::Result<ConceptExpr> {
    if input.parse::<Option<Token![!]>>()?.is_some() {
        return Ok(ConceptExpr::Negate(Box::new(negation(input)?)));
    }
    if input.peek(syn::token::Paren) {
        let inner;
        syn::parenthesized!(inner in input);
        return inner.parse();
    }
    Ok(ConceptExpr::Concept(input.parse()?))
}

/// Canonical, fully parenthesized spelling. Used by the parser tests.
#[allow(dead_code)]
pub fn render(expr: &ConceptExpr) -> String {
    match expr {
        ConceptExpr::Concept(ty) => quote!(#ty).to_string().replace(' ', ""),
        ConceptExpr::All(l, r) => format!("({} & {})", render(l), render(r)),
        ConceptExpr::Any(l, r) => format!("({} | {})", render(l), render(r)),
        ConceptExpr::Negate(e) => format!("!{}", render(e)),
    }
}

// =============================================================================
// Expansion
// =============================================================================

/// Const expression answering `expr` for `subject`.
///
/// Each leaf becomes its own query block and the connectives become
/// `&&`, `||` and `!` over their answers. Negation applies to the answer,
/// so `!Concept` on a subject the query cannot see through (a generic
/// parameter) is `true`.
pub fn expand_query(expr: &ConceptExpr, subject: &Type) -> TokenStream {
    match expr {
        ConceptExpr::Concept(bound) => leaf_query(bound, subject),
        ConceptExpr::All(l, r) => {
            let (l, r) = (expand_query(l, subject), expand_query(r, subject));
            quote! { (#l && #r) }
        }
        ConceptExpr::Any(l, r) => {
            let (l, r) = (expand_query(l, subject), expand_query(r, subject));
            quote! { (#l || #r) }
        }
        ConceptExpr::Negate(e) => {
            let e = expand_query(e, subject);
            quote! { (!#e) }
        }
    }
}

fn leaf_query(bound: &Type, subject: &Type) -> TokenStream {
    quote! {
        {
            trait __QueryFallback {
                const HOLDS: bool = false;
            }
            struct __Query<S: ?Sized>(::core::marker::PhantomData<S>);
            impl<S: ?Sized> __QueryFallback for __Query<S> {}
            impl<S: ?Sized + #bound> __Query<S> {
                const HOLDS: bool = true;
            }
            __Query::<#subject>::HOLDS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(src: &str) -> String {
        render(&syn::parse_str::<ConceptExpr>(src).unwrap())
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parsed("A | B & !C"), "(A | (B & !C))");
        assert_eq!(parsed("A & B & C"), "((A & B) & C)");
    }

    #[test]
    fn test_parentheses_and_generics() {
        assert_eq!(
            parsed("(IsSame<bool> | IsConvertible<bool>) & Moveable"),
            "((IsSame<bool> | IsConvertible<bool>) & Moveable)"
        );
        assert_eq!(parsed("!!Predicate<(i32,)>"), "!!Predicate<(i32,)>");
    }

    #[test]
    fn test_doubled_operators_rejected() {
        assert!(syn::parse_str::<ConceptExpr>("A && B").is_err());
        assert!(syn::parse_str::<ConceptExpr>("A || B").is_err());
    }

    #[test]
    fn test_one_block_per_leaf() {
        let expr: ConceptExpr = syn::parse_str("Copy & !Default").unwrap();
        let subject: Type = syn::parse_str("u8").unwrap();
        let out = expand_query(&expr, &subject).to_string();
        assert_eq!(out.matches("struct __Query").count(), 2);
        // Fallback const, inherent const and the read, per leaf
        assert_eq!(out.matches("HOLDS").count(), 6);
    }
}
