//! Statement parameters and their literal rendering.

use std::fmt;

/// A typed value written into a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value. NaN and infinities are written as `NULL`.
    Float(f64),
    /// Text value, written single-quoted.
    Text(String),
    /// Named placeholder resolved by the execution layer.
    ///
    /// The name may already carry a `:` or `?` marker; otherwise `:` is added.
    Bind(String),
}

impl Parameter {
    /// Returns the SQL text for this value.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => format!("{n}"),
            Self::Float(f) if !f.is_finite() => String::from("NULL"),
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => {
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Bind(name) => {
                if name.starts_with(':') || name.starts_with('?') {
                    name.clone()
                } else {
                    format!(":{name}")
                }
            }
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql_inline())
    }
}

/// Creates a bind placeholder parameter.
#[must_use]
pub fn bind(name: &str) -> Parameter {
    Parameter::Bind(String::from(name))
}

/// Trait for types that can be written as statement parameters.
pub trait ToParameter {
    /// Converts the value to a `Parameter`.
    fn to_parameter(self) -> Parameter;
}

impl ToParameter for Parameter {
    fn to_parameter(self) -> Parameter {
        self
    }
}

impl ToParameter for bool {
    fn to_parameter(self) -> Parameter {
        Parameter::Bool(self)
    }
}

impl ToParameter for i64 {
    fn to_parameter(self) -> Parameter {
        Parameter::Int(self)
    }
}

impl ToParameter for i32 {
    fn to_parameter(self) -> Parameter {
        Parameter::Int(i64::from(self))
    }
}

impl ToParameter for i16 {
    fn to_parameter(self) -> Parameter {
        Parameter::Int(i64::from(self))
    }
}

impl ToParameter for u32 {
    fn to_parameter(self) -> Parameter {
        Parameter::Int(i64::from(self))
    }
}

impl ToParameter for u16 {
    fn to_parameter(self) -> Parameter {
        Parameter::Int(i64::from(self))
    }
}

impl ToParameter for u8 {
    fn to_parameter(self) -> Parameter {
        Parameter::Int(i64::from(self))
    }
}

impl ToParameter for f64 {
    fn to_parameter(self) -> Parameter {
        Parameter::Float(self)
    }
}

impl ToParameter for f32 {
    fn to_parameter(self) -> Parameter {
        Parameter::Float(f64::from(self))
    }
}

impl ToParameter for String {
    fn to_parameter(self) -> Parameter {
        Parameter::Text(self)
    }
}

impl ToParameter for &str {
    fn to_parameter(self) -> Parameter {
        Parameter::Text(String::from(self))
    }
}

impl<T: ToParameter> ToParameter for Option<T> {
    fn to_parameter(self) -> Parameter {
        match self {
            Some(v) => v.to_parameter(),
            None => Parameter::Null,
        }
    }
}
