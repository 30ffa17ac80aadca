//! `satisfies!` expansion.
//!
//! The expansion is a block expression made only of item definitions,
//! `let` bindings and associated-const reads, so it can initialize a
//! `const` item.

use proc_macro2::TokenStream;
use quote::quote;

use crate::common::{QueryList, expand_query};

pub fn expand_satisfies(input: QueryList) -> TokenStream {
    let mut mentions = TokenStream::new();
    let mut answers = Vec::with_capacity(input.queries.len());

    for query in &input.queries {
        let subject = &query.subject;
        // Names the subject once, so a type imported only for the query
        // counts as used
        mentions.extend(quote! {
            let _: ::core::marker::PhantomData<#subject> = ::core::marker::PhantomData;
        });
        answers.push(expand_query(&query.expr, subject));
    }

    quote! {
        {
            #mentions
            (#(#answers)&&*)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_query_block_per_concept() {
        let input: QueryList = syn::parse_str("u8: Copy & !Default, String: Clone").unwrap();
        let out = expand_satisfies(input).to_string();
        assert_eq!(out.matches("struct __Query").count(), 3);
        assert!(out.contains("&&"));
    }
}
