//! # Types Module
//!
//! The value model shared by submissions, solutions and the grading pipeline.
//!
//! Callables exchange [`Value`]s and advertise their signatures with
//! [`TypeDesc`]s. Both render to the text that ends up in the report, and the
//! array comparison mode compares exactly those renderings.

use std::fmt;

/// Declared type of a parameter or return slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    /// No return value. Only meaningful as a return type.
    Void,
    Bool,
    Int,
    Float,
    Char,
    Str,
    Array(Box<TypeDesc>),
}

impl TypeDesc {
    /// Shorthand for `TypeDesc::Array(Box::new(elem))`.
    pub fn array_of(elem: TypeDesc) -> Self {
        TypeDesc::Array(Box::new(elem))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeDesc::Void)
    }

    /// Whether `null` is a legal value for this type.
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeDesc::Str | TypeDesc::Array(_))
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Void => f.write_str("void"),
            TypeDesc::Bool => f.write_str("bool"),
            TypeDesc::Int => f.write_str("int"),
            TypeDesc::Float => f.write_str("float"),
            TypeDesc::Char => f.write_str("char"),
            TypeDesc::Str => f.write_str("string"),
            TypeDesc::Array(elem) => write!(f, "{elem}[]"),
        }
    }
}

/// A value produced by, or passed to, a callable under test.
///
/// Equality is structural and never coerces between variants, so `Int(5)` and
/// `Float(5.0)` are different values even though they render the same.
/// Floats compare by value identity: `NaN` equals `NaN`, `0.0` differs from
/// `-0.0`.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Array(Vec<Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Builds an array value from anything convertible into values.
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime type of the value. `Null` has none.
    ///
    /// Arrays report the type of their first element; an empty array is
    /// reported as `void[]` since nothing more specific is known.
    pub fn type_desc(&self) -> Option<TypeDesc> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(TypeDesc::Bool),
            Value::Int(_) => Some(TypeDesc::Int),
            Value::Float(_) => Some(TypeDesc::Float),
            Value::Char(_) => Some(TypeDesc::Char),
            Value::Str(_) => Some(TypeDesc::Str),
            Value::Array(items) => {
                let elem = items
                    .iter()
                    .find_map(Value::type_desc)
                    .unwrap_or(TypeDesc::Void);
                Some(TypeDesc::array_of(elem))
            }
        }
    }

    /// Whether this value may be passed where `ty` is declared.
    pub fn conforms_to(&self, ty: &TypeDesc) -> bool {
        match (self, ty) {
            (Value::Null, ty) => ty.is_nullable(),
            (Value::Bool(_), TypeDesc::Bool)
            | (Value::Int(_), TypeDesc::Int)
            | (Value::Float(_), TypeDesc::Float)
            | (Value::Char(_), TypeDesc::Char)
            | (Value::Str(_), TypeDesc::Str) => true,
            (Value::Array(items), TypeDesc::Array(elem)) => {
                items.iter().all(|item| item.conforms_to(elem))
            }
            _ => false,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Str(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Result of one test, as reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub passed: bool,
    /// Rendering of the student's result.
    pub student: String,
    /// Rendering of the reference result.
    pub expected: String,
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_desc_rendering() {
        assert_eq!(TypeDesc::Void.to_string(), "void");
        assert_eq!(TypeDesc::array_of(TypeDesc::Str).to_string(), "string[]");
        assert_eq!(
            TypeDesc::array_of(TypeDesc::array_of(TypeDesc::Int)).to_string(),
            "int[][]"
        );
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(-3).to_string(), "-3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from('x').to_string(), "x");
        assert_eq!(Value::from("hi there").to_string(), "hi there");
        assert_eq!(Value::array(["a", "b", "c"]).to_string(), "[a, b, c]");
        assert_eq!(Value::Array(vec![]).to_string(), "[]");
        assert_eq!(
            Value::Array(vec![Value::from("a"), Value::Null]).to_string(),
            "[a, null]"
        );
    }

    #[test]
    fn test_whole_floats_render_like_ints() {
        assert_eq!(Value::from(5.0).to_string(), Value::from(5).to_string());
        assert_ne!(Value::from(5.0), Value::from(5));
    }

    #[test]
    fn test_float_equality_is_by_identity() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(
            Value::Array(vec![Value::Float(f64::NAN), Value::Int(1)]),
            Value::Array(vec![Value::Float(f64::NAN), Value::Int(1)])
        );
    }

    #[test]
    fn test_runtime_type() {
        assert_eq!(Value::Null.type_desc(), None);
        assert_eq!(Value::from(1).type_desc(), Some(TypeDesc::Int));
        assert_eq!(
            Value::array(["a"]).type_desc(),
            Some(TypeDesc::array_of(TypeDesc::Str))
        );
        assert_eq!(
            Value::Array(vec![]).type_desc(),
            Some(TypeDesc::array_of(TypeDesc::Void))
        );
    }

    #[test]
    fn test_conformance() {
        assert!(Value::from(1).conforms_to(&TypeDesc::Int));
        assert!(!Value::from(1).conforms_to(&TypeDesc::Float));
        assert!(Value::Null.conforms_to(&TypeDesc::Str));
        assert!(Value::Null.conforms_to(&TypeDesc::array_of(TypeDesc::Int)));
        assert!(!Value::Null.conforms_to(&TypeDesc::Int));
        assert!(Value::array([1, 2]).conforms_to(&TypeDesc::array_of(TypeDesc::Int)));
        assert!(!Value::array([1, 2]).conforms_to(&TypeDesc::array_of(TypeDesc::Str)));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
