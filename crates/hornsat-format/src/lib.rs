//! # hornsat-format
//!
//! Formula model and file formats for hornsat.
//!
//! Supports:
//! - **Formula JSON**: native format, one tagged object per clause
//! - **Horn text**: line-oriented `a, b -> c` / `-a -b c` notation
//! - **Literal sets**: clauses as sets of signed literal strings
//! - **Horn cases**: literal-set formulas bundled with expected outcomes

pub mod cases;
pub mod formula;
pub mod input;
pub mod literals;
pub mod text;

pub use cases::{HornCase, HornCases};
pub use formula::{ClauseSpec, Formula};
pub use input::InputFormat;
pub use literals::{Literal, LiteralClause};
