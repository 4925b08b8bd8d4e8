//! Host-side values exchanged with the scripting runtime.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;

pub use arguments::Arguments;
pub use callable::{Builtin, Callable, CallableKind, Function, Invocable};
pub use module::{Module, WeakModule};

use crate::mock::MockError;

mod arguments;
mod callable;
mod module;

/// A value of the scripting language.
///
/// Data values compare structurally. Modules and callables compare by identity.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<Value>),
    Dict(IndexMap<String, Value>),
    Struct(Struct),
    Module(Module),
    Callable(Callable),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
            Self::Struct(_) => "struct",
            Self::Module(_) => "module",
            Self::Callable(callable) => match callable.kind() {
                CallableKind::Builtin => "builtin_function_or_method",
                CallableKind::Function => "function",
            },
        }
    }

    /// The truth value of `self`, following the scripting language rules.
    pub fn truth(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
            Self::String(value) => !value.is_empty(),
            Self::List(values) => !values.is_empty(),
            Self::Dict(entries) => !entries.is_empty(),
            Self::Struct(_) | Self::Module(_) | Self::Callable(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_module(&self) -> Option<&Module> {
        match self {
            Self::Module(module) => Some(module),
            _ => None,
        }
    }

    pub const fn as_callable(&self) -> Option<&Callable> {
        match self {
            Self::Callable(callable) => Some(callable),
            _ => None,
        }
    }

    /// Orders two values of the same comparable type.
    ///
    /// Returns `None` when the values cannot be ordered, for example an `int`
    /// against a `string`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => Some(left.cmp(right)),
            (Self::Int(left), Self::Int(right)) => Some(left.cmp(right)),
            (Self::String(left), Self::String(right)) => Some(left.cmp(right)),
            (Self::List(left), Self::List(right)) => {
                for (left, right) in left.iter().zip(right) {
                    match left.compare(right)? {
                        Ordering::Equal => {}
                        ordering => return Some(ordering),
                    }
                }
                Some(left.len().cmp(&right.len()))
            }
            _ => None,
        }
    }

    /// Membership test, as in `needle in self`.
    pub fn contains(&self, needle: &Self) -> Result<bool, CallError> {
        match (self, needle) {
            (Self::List(values), _) => Ok(values.contains(needle)),
            (Self::Dict(entries), Self::String(key)) => Ok(entries.contains_key(key)),
            (Self::Dict(_), _) => Ok(false),
            (Self::String(haystack), Self::String(needle)) => Ok(haystack.contains(needle.as_str())),
            _ => Err(CallError::failed(format!(
                "unknown binary op: {} in {}",
                needle.type_name(),
                self.type_name()
            ))),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Dict(left), Self::Dict(right)) => left == right,
            (Self::Struct(left), Self::Struct(right)) => left == right,
            (Self::Module(left), Self::Module(right)) => left.ptr_eq(right),
            (Self::Callable(left), Self::Callable(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
            Self::List(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Self::Dict(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Struct(value) => write!(f, "{value}"),
            Self::Module(module) => write!(f, "<module {}>", module.name()),
            Self::Callable(callable) => write!(f, "{callable}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(values: Vec<Self>) -> Self {
        Self::List(values)
    }
}

impl From<IndexMap<String, Self>> for Value {
    fn from(entries: IndexMap<String, Self>) -> Self {
        Self::Dict(entries)
    }
}

impl From<Struct> for Value {
    fn from(value: Struct) -> Self {
        Self::Struct(value)
    }
}

impl From<Module> for Value {
    fn from(module: Module) -> Self {
        Self::Module(module)
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Self::Callable(callable)
    }
}

/// An immutable record with named fields, `struct(a = 1)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Struct {
    fields: IndexMap<String, Value>,
}

impl Struct {
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("struct(")?;
        for (index, (name, value)) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        f.write_str(")")
    }
}

/// A failed call made through the scripting runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error(transparent)]
    Mock(#[from] MockError),

    #[error("{function}: {message}")]
    InvalidArguments { function: String, message: String },

    #[error("{0}")]
    Failed(String),
}

impl CallError {
    pub fn invalid_arguments(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn dict(entries: &[(&str, Value)]) -> Value {
        Value::Dict(
            entries
                .iter()
                .map(|(key, value)| ((*key).to_string(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_display() {
        let value = Value::List(vec![
            Value::None,
            true.into(),
            Value::Int(1),
            "a\"b".into(),
            dict(&[("k", "v".into())]),
            Struct::new([("a", Value::Int(1)), ("b", Value::List(vec![]))]).into(),
            Module::new("lib").into(),
        ]);

        insta::assert_snapshot!(
            value,
            @r#"[None, True, 1, "a\"b", {"k": "v"}, struct(a = 1, b = []), <module lib>]"#
        );
    }

    #[test]
    fn test_callable_display() {
        let builtin = Callable::builtin("len", |_| Ok(Value::None));
        let function = Callable::function("helper", ["plan"], |_| Ok(Value::None));

        assert_eq!(builtin.to_string(), "<built-in function len>");
        assert_eq!(function.to_string(), "<function helper>");
    }

    #[test]
    fn test_modules_compare_by_identity() {
        let module = Module::new("lib");
        let alias = module.clone();

        assert_eq!(Value::from(module.clone()), Value::from(alias));
        assert_ne!(Value::from(module), Value::from(Module::new("lib")));
    }

    #[test]
    fn test_dicts_compare_regardless_of_order() {
        let left = dict(&[("a", Value::Int(1)), ("b", Value::Int(2))]);
        let right = dict(&[("b", Value::Int(2)), ("a", Value::Int(1))]);

        assert_eq!(left, right);
    }

    #[rstest]
    #[case(Value::None, false)]
    #[case(Value::Int(0), false)]
    #[case(Value::Int(3), true)]
    #[case(Value::from(""), false)]
    #[case(Value::from("x"), true)]
    #[case(Value::List(vec![]), false)]
    #[case(Value::from(Module::new("lib")), true)]
    fn test_truth(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.truth(), expected);
    }

    #[rstest]
    #[case(Value::Int(1), Value::Int(2), Some(Ordering::Less))]
    #[case(Value::from("b"), Value::from("a"), Some(Ordering::Greater))]
    #[case(Value::List(vec![Value::Int(1)]), Value::List(vec![Value::Int(1), Value::Int(0)]), Some(Ordering::Less))]
    #[case(Value::Int(1), Value::from("1"), None)]
    fn test_compare(#[case] left: Value, #[case] right: Value, #[case] expected: Option<Ordering>) {
        assert_eq!(left.compare(&right), expected);
    }

    #[test]
    fn test_contains() {
        let list = Value::List(vec![Value::Int(1), "a".into()]);

        assert!(list.contains(&"a".into()).unwrap());
        assert!(!list.contains(&Value::Int(2)).unwrap());
        assert!(dict(&[("k", Value::None)]).contains(&"k".into()).unwrap());
        assert!(Value::from("kurtosis").contains(&"tosis".into()).unwrap());

        let error = Value::Int(1).contains(&Value::Int(1)).unwrap_err();
        insta::assert_snapshot!(error, @"unknown binary op: int in int");
    }
}
