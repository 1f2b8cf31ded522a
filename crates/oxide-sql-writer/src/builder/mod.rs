//! Statement composition.
//!
//! [`SqlWriter`] accumulates clause fragments in a [`ClauseState`] and hands
//! them to the pure functions in [`render`] to produce the statement text.
//!
//! # Example
//!
//! ```rust
//! use oxide_sql_writer::builder::SqlWriter;
//!
//! let mut writer = SqlWriter::new();
//! writer
//!     .select_fields(["x"])
//!     .from("t")
//!     .where_clause([("ModificationType", "=", 1)]);
//!
//! assert_eq!(writer.build().unwrap(), "SELECT x FROM t WHERE (ModificationType = 1)");
//! ```

mod expr;
pub mod render;
mod state;
pub mod value;
mod writer;

pub use expr::{verify_operator, Join, JoinKind, Order, Predicate, OPERATORS};
pub use state::{Aliased, ClauseState, QueryKind};
pub use value::{bind, Parameter, ToParameter};
pub use writer::SqlWriter;
