//! SQL dialect support.
//!
//! The writer produces one statement text per dialect. Dialects differ in how
//! row limits are expressed (`LIMIT` vs `TOP`) and in whether an upsert can be
//! written at all.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Target SQL engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `MySQL` / `MariaDB`.
    #[default]
    MySql,
    /// Microsoft SQL Server.
    Microsoft,
    /// `PostgreSQL`.
    PostgreSql,
    /// Oracle. Recognised as a tag, but has no limit rendering.
    Oracle,
}

impl Dialect {
    /// Returns the name of the dialect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Microsoft => "microsoft",
            Self::PostgreSql => "postgresql",
            Self::Oracle => "oracle",
        }
    }

    /// Returns whether `ON DUPLICATE KEY UPDATE` upserts can be rendered.
    #[must_use]
    pub const fn supports_upsert(self) -> bool {
        matches!(self, Self::MySql)
    }

    /// Returns whether the row limit goes into the SELECT clause as `TOP n`.
    #[must_use]
    pub const fn limit_in_select(self) -> bool {
        matches!(self, Self::Microsoft)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "microsoft" | "mssql" => Ok(Self::Microsoft),
            "postgresql" | "postgres" => Ok(Self::PostgreSql),
            "oracle" => Ok(Self::Oracle),
            _ => Err(Error::UnknownDialect(s.to_string())),
        }
    }
}
