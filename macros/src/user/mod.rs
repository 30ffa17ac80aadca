//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `satisfies!` | function macro | Const concept query |
//! | `#[derive(Introspect)]` | on struct/enum/union | Register type with the tables |

mod introspect;
mod satisfies;

pub use introspect::expand_derive_introspect;
pub use satisfies::expand_satisfies;
