// Parsing and expansion shared by the user-facing macros
//
// - concept_expr: `&` / `|` / `!` expressions over bounds, and their
//   const query blocks
// - query: `Type: Expr, ...` lists

mod concept_expr;
mod query;

pub use concept_expr::*;
pub use query::*;
