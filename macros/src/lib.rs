//! Procedural macros for tola-concepts
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `satisfies!` | - | Boolean query over trait bounds, usable in `const` |
//! | `#[derive(Introspect)]` | struct/enum/union | Category markers + transform table |
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Clone, Default, PartialEq, Introspect)]
//! #[repr(C)]
//! struct Pixel { pub r: u8, pub g: u8, pub b: u8 }
//!
//! const OK: bool = satisfies!(Pixel: Regular & IsStandardLayout & !IsEmpty);
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

// =============================================================================
// Module Declarations
// =============================================================================

mod common;
mod user;

// =============================================================================
// satisfies!
// =============================================================================

/// Evaluate a boolean expression over trait bounds for concrete types.
///
/// Supports multiple checks in one call. All checks must pass for the
/// result to be true.
///
/// ```ignore
/// use tola_concepts::satisfies;
/// use tola_concepts::concepts::{Regular, Integral};
///
/// // Single check
/// assert!(satisfies!(i32: Regular));
/// assert!(!satisfies!(f32: Integral));
///
/// // Boolean expressions: `&`, `|`, `!`, parentheses
/// assert!(satisfies!(u8: Integral & !IsSigned));
/// assert!(satisfies!(bool: IsSame<bool> | IsConvertible<bool>));
///
/// // Multiple checks (all must pass)
/// assert!(satisfies!(i32: Regular, u64: Integral));
///
/// // Const context
/// const REGULAR: bool = satisfies!(String: Regular);
/// ```
///
/// An unsatisfied bound never fails the build; it yields `false`. Only
/// types concrete at the call site are inspected.
#[proc_macro]
pub fn satisfies(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as common::QueryList);
    user::expand_satisfies(input).into()
}

// =============================================================================
// #[derive(Introspect)]
// =============================================================================

/// Register a type with the category predicates and the transform table.
///
/// # Usage
/// ```ignore
/// #[derive(Introspect)]
/// #[repr(u8)]
/// enum Level { Low, High }
///
/// assert!(satisfies!(Level: IsEnum & IsScalar));
/// type Repr = UnderlyingType<Level>; // u8
/// ```
#[proc_macro_derive(Introspect)]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_introspect(input).into()
}
