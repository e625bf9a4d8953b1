use std::rc::Rc;

use crate::{
    ast::{LiteralValue, TypeName},
    error::RuntimeErrorKind,
    interpreter::value::matrix::Matrix,
};

/// Represents a runtime value in the evaluator.
///
/// This enum models every type a kestrel expression can produce. All
/// operations match exhaustively over it, so an unhandled combination is
/// a compile-time error rather than a latent runtime bug.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean, produced by comparisons, logic operators, and literals.
    Boolean(bool),
    /// An owned string.
    Str(String),
    /// A rectangular matrix of numeric scalars. Reference-counted so
    /// copies through bindings stay cheap.
    Matrix(Rc<Matrix>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Matrix> for Value {
    fn from(v: Matrix) -> Self {
        Self::Matrix(Rc::new(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Float(r) => Self::Float(*r),
            LiteralValue::Boolean(b) => Self::Boolean(*b),
            LiteralValue::Str(s) => Self::Str(s.clone()),
        }
    }
}

impl Value {
    /// Returns `true` if the value is [`Integer`](Self::Integer).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Float`](Self::Float).
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(..))
    }

    /// Returns `true` if the value is numeric (integer or float).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Float(..))
    }

    /// The numeric value as `f64`, or `None` for non-numeric values.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(r) => Some(*r),
            _ => None,
        }
    }

    /// The kind of the value as a lowercase noun, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(..) => "integer",
            Self::Float(..) => "float",
            Self::Boolean(..) => "boolean",
            Self::Str(..) => "string",
            Self::Matrix(..) => "matrix",
        }
    }

    /// Coerces the value to a boolean by truthiness.
    ///
    /// The falsy set is fixed: integer and float zero, the empty string,
    /// and `false`. Everything else is truthy, matrices included.
    /// (String-to-bool *casts* use a different rule; see [`Value::cast`].)
    ///
    /// ## Example
    /// ```
    /// use kestrel::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Integer(0).truthy());
    /// assert!(!Value::Float(0.0).truthy());
    /// assert!(!Value::Str(String::new()).truthy());
    /// assert!(Value::Str("false".to_string()).truthy());
    /// ```
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Float(r) => *r != 0.0,
            Self::Boolean(b) => *b,
            Self::Str(s) => !s.is_empty(),
            Self::Matrix(_) => true,
        }
    }

    /// Narrows a float with zero fractional part to an integer.
    ///
    /// Applied only when a value is stored into an *untyped* binding
    /// (plain declaration or reassignment without a declared type), never
    /// on intermediate arithmetic results.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn narrowed_for_untyped_store(self) -> Self {
        match self {
            Self::Float(r) if r.is_finite() && r.fract() == 0.0 => Self::Integer(r as i64),
            other => other,
        }
    }

    /// Casts the value to the named target type.
    ///
    /// This single routine backs both explicit cast expressions and
    /// declared-type annotations:
    /// - `int`: truncating numeric conversion; booleans become 0/1;
    ///   numeric strings are parsed first.
    /// - `float`: numeric conversion; booleans become 1.0/0.0; strings
    ///   are parsed.
    /// - `bool`: strings compare case-insensitively against `"true"`;
    ///   everything else falls back to general truthiness.
    /// - `string`: the canonical textual form.
    /// - `matrix`: only an existing matrix qualifies.
    ///
    /// ## Example
    /// ```
    /// use kestrel::{ast::TypeName, interpreter::value::core::Value};
    ///
    /// let v = Value::Str("3.9".to_string()).cast(TypeName::Int).unwrap();
    /// assert_eq!(v, Value::Integer(3));
    ///
    /// let b = Value::Str("TRUE".to_string()).cast(TypeName::Bool).unwrap();
    /// assert_eq!(b, Value::Boolean(true));
    ///
    /// assert!(Value::Str("abc".to_string()).cast(TypeName::Float).is_err());
    /// ```
    ///
    /// # Errors
    /// `InvalidCast` when the value cannot represent the target type.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cast(&self, target: TypeName) -> Result<Self, RuntimeErrorKind> {
        let invalid = || RuntimeErrorKind::InvalidCast { value:  self.to_string(),
                                                        target: target.to_string(), };

        match target {
            TypeName::Int => match self {
                Self::Integer(n) => Ok(Self::Integer(*n)),
                Self::Float(r) => Ok(Self::Integer(*r as i64)),
                Self::Boolean(b) => Ok(Self::Integer(i64::from(*b))),
                Self::Str(s) => s.trim()
                                 .parse::<f64>()
                                 .map(|r| Self::Integer(r as i64))
                                 .map_err(|_| invalid()),
                Self::Matrix(_) => Err(invalid()),
            },
            TypeName::Float => match self {
                Self::Integer(_) | Self::Float(_) => {
                    // is_numeric guarantees as_f64 is Some here
                    self.as_f64().map(Self::Float).ok_or_else(invalid)
                },
                Self::Boolean(b) => Ok(Self::Float(if *b { 1.0 } else { 0.0 })),
                Self::Str(s) => s.trim()
                                 .parse::<f64>()
                                 .map(Self::Float)
                                 .map_err(|_| invalid()),
                Self::Matrix(_) => Err(invalid()),
            },
            TypeName::Bool => match self {
                Self::Str(s) => Ok(Self::Boolean(s.eq_ignore_ascii_case("true"))),
                other => Ok(Self::Boolean(other.truthy())),
            },
            TypeName::Str => Ok(Self::Str(self.to_string())),
            TypeName::Matrix => match self {
                Self::Matrix(m) => Ok(Self::Matrix(Rc::clone(m))),
                _ => Err(invalid()),
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(r) => {
                // Keep a visible fractional part so `1.0` and `1` stay
                // distinguishable in the output log.
                if r.is_finite() && r.fract() == 0.0 {
                    write!(f, "{r:.1}")
                } else {
                    write!(f, "{r}")
                }
            },
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Matrix(m) => write!(f, "{m}"),
        }
    }
}
