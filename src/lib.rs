//! Turns a MySQL `CREATE TABLE` statement into a Go struct with json and gorm tags.
//!
//! ```
//! let conversion = sql2struct::convert(
//!     "CREATE TABLE `users` (\n\
//!        `id` int(11) NOT NULL AUTO_INCREMENT,\n\
//!        PRIMARY KEY (`id`)\n\
//!      ) ENGINE=InnoDB;",
//! );
//!
//! assert_eq!(conversion.table_name, "users");
//! assert!(conversion.code.contains("type Users struct {"));
//! assert!(conversion.diagnostics.is_empty());
//! ```
mod engine;
mod error;

pub use engine::{convert, convert_with, normalize, Conversion, Diagnostic, Options};

/// The table model the conversion builds internally. Handy if you want to inspect what was parsed.
pub mod ddl {
    pub use crate::engine::structure::*;
    pub use crate::engine::types::{lookup, TypeFamily, TypeMapping, UNKNOWN_TYPE};
}

pub use error::{Error, ErrorKind, InternalError};
