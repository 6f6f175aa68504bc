//! The basic building block of the render context: the value.
//! All values like floats, integers, strings, lists, hashes, etc.
//! are represented using the value.
use super::Error;

use std::collections::HashMap;

/// A context value, e.g. `5` or `"hello world"`.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    List(Vec<Value>),
    Hash(HashMap<String, Value>),
    Null,
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    write!(f, "{}", v)?;
                    if i < l.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
            Value::Hash(h) => {
                write!(f, "{{")?;
                for (i, (k, v)) in h.iter().enumerate() {
                    write!(f, "{}: {}", k, v)?;
                    if i < h.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "}}")
            }
            Value::Null => write!(f, "null"),
        }
    }
}

impl Value {
    /// If the value, when evaluated as a `{{#section}}`, would result in
    /// the section body being rendered.
    ///
    /// e.g. `{{#games}}game night{{/games}}` outputs "game night" when
    /// `games` is a non-empty list, a hash, or any other truthy value.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Null => false,
            Value::List(list) => !list.is_empty(),
            Value::Hash(hash) => !hash.is_empty(),
        }
    }

    /// Text produced when the value is interpolated into a template.
    /// Unlike [`std::fmt::Display`], null renders as nothing.
    pub fn interpolate(&self) -> String {
        match self {
            Value::Null => String::new(),
            value => value.to_string(),
        }
    }
}

pub trait ToTemplateValue: Clone {
    fn to_template_value(&self) -> Result<Value, Error>;
}

impl ToTemplateValue for String {
    fn to_template_value(&self) -> Result<Value, Error> {
        Ok(Value::String(self.clone()))
    }
}

impl ToTemplateValue for &str {
    fn to_template_value(&self) -> Result<Value, Error> {
        Ok(Value::String(self.to_string()))
    }
}

macro_rules! impl_integer {
    ($ty:ty) => {
        impl ToTemplateValue for $ty {
            fn to_template_value(&self) -> Result<Value, Error> {
                Ok(Value::Integer(*self as i64))
            }
        }
    };
}

impl_integer!(i64);
impl_integer!(i32);
impl_integer!(i16);
impl_integer!(i8);
impl_integer!(u64); // Could very much overflow
impl_integer!(u32);
impl_integer!(u16);
impl_integer!(u8);

impl ToTemplateValue for time::OffsetDateTime {
    fn to_template_value(&self) -> Result<Value, Error> {
        let fmt = time::format_description::well_known::Rfc2822;
        Ok(Value::String(self.format(&fmt)?))
    }
}

impl ToTemplateValue for f64 {
    fn to_template_value(&self) -> Result<Value, Error> {
        Ok(Value::Float(*self))
    }
}

impl ToTemplateValue for f32 {
    fn to_template_value(&self) -> Result<Value, Error> {
        Ok(Value::Float(*self as f64))
    }
}

impl ToTemplateValue for bool {
    fn to_template_value(&self) -> Result<Value, Error> {
        Ok(Value::Boolean(*self))
    }
}

impl<T: ToTemplateValue> ToTemplateValue for Option<T> {
    fn to_template_value(&self) -> Result<Value, Error> {
        match self {
            Some(value) => value.to_template_value(),
            None => Ok(Value::Null),
        }
    }
}

impl ToTemplateValue for Value {
    fn to_template_value(&self) -> Result<Value, Error> {
        Ok(self.clone())
    }
}

impl<T: ToTemplateValue> ToTemplateValue for Vec<T> {
    fn to_template_value(&self) -> Result<Value, Error> {
        let mut list = vec![];

        for value in self.iter() {
            list.push(value.to_template_value()?);
        }

        Ok(Value::List(list))
    }
}

impl ToTemplateValue for HashMap<String, Value> {
    fn to_template_value(&self) -> Result<Value, Error> {
        Ok(Value::Hash(self.clone()))
    }
}

impl ToTemplateValue for serde_json::Value {
    fn to_template_value(&self) -> Result<Value, Error> {
        use serde_json::Value as Json;

        Ok(match self {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().ok_or(Error::SerializationError)?)
                }
            }
            Json::String(s) => Value::String(s.clone()),
            Json::Array(list) => {
                let mut values = vec![];
                for v in list {
                    values.push(v.to_template_value()?);
                }
                Value::List(values)
            }
            Json::Object(map) => {
                let mut hash = HashMap::new();
                for (k, v) in map {
                    hash.insert(k.clone(), v.to_template_value()?);
                }
                Value::Hash(hash)
            }
        })
    }
}

impl TryInto<serde_json::Value> for Value {
    type Error = Error;

    fn try_into(self) -> Result<serde_json::Value, Self::Error> {
        use serde_json::value::Number;
        match self {
            Value::Integer(i) => Ok(serde_json::Value::Number(i.into())),
            Value::Float(f) => Ok(serde_json::Value::Number(
                Number::from_f64(f).ok_or(Error::SerializationError)?,
            )),
            Value::String(s) => Ok(serde_json::Value::String(s)),
            Value::Boolean(b) => Ok(serde_json::Value::Bool(b)),
            Value::List(l) => {
                let mut list = vec![];
                for v in l {
                    list.push(v.try_into()?);
                }
                Ok(serde_json::Value::Array(list))
            }
            Value::Hash(h) => {
                let mut hash = serde_json::Map::new();
                for (k, v) in h {
                    hash.insert(k, v.try_into()?);
                }
                Ok(serde_json::Value::Object(hash))
            }
            Value::Null => Ok(serde_json::Value::Null),
        }
    }
}
