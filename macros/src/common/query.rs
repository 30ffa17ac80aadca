//! `satisfies!` input: `Subject: Expr, Subject: Expr, ...`
//!
//! Shared with `assert_concept!`, which forwards its tokens unchanged.

use syn::{
    Token, Type,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use super::ConceptExpr;

/// `Subject: Expr`
pub struct Query {
    pub subject: Type,
    pub expr: ConceptExpr,
}

impl Parse for Query {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let subject = input.parse()?;
        input.parse::<Token![:]>()?;
        let expr = input.parse()?;
        Ok(Query { subject, expr })
    }
}

/// Comma-separated queries, all of which must hold. A trailing comma is
/// accepted; an empty list is not.
pub struct QueryList {
    pub queries: Vec<Query>,
}

impl Parse for QueryList {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Err(input.error("expected `Type: Concept`"));
        }
        let queries = Punctuated::<Query, Token![,]>::parse_terminated(input)?;
        Ok(QueryList {
            queries: queries.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::render;

    #[test]
    fn test_multiple_queries() {
        let list: QueryList = syn::parse_str("u8: Copy, String: Clone & !Copy,").unwrap();
        assert_eq!(list.queries.len(), 2);
        assert_eq!(render(&list.queries[1].expr), "(Clone & !Copy)");
    }

    #[test]
    fn test_function_pointer_subject() {
        let list: QueryList = syn::parse_str("fn(i32) -> bool: Predicate<(i32,)>").unwrap();
        assert_eq!(list.queries.len(), 1);
    }

    #[test]
    fn test_malformed() {
        assert!(syn::parse_str::<QueryList>("u8 Copy").is_err());
        assert!(syn::parse_str::<QueryList>("").is_err());
        assert!(syn::parse_str::<QueryList>("u8: Copy u16: Clone").is_err());
    }
}
