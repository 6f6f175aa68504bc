//! Variables and helper functions available to a template while it renders.
//!
//! A context is assembled fresh for every render request. The builder
//! methods ([`Context::standalone`], [`Context::for_page`]) return a new,
//! augmented context and never mutate the caller's copy.
use crate::config::Config;
use crate::template::{Error, ToTemplateValue, Value};

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

/// A helper callable from a template as `{{helper(name)}}`.
pub type Helper = fn(&Value) -> Value;

#[derive(Debug, Default, Clone)]
pub struct Context {
    values: HashMap<String, Value>,
    helpers: HashMap<String, Helper>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: impl ToTemplateValue) -> Result<&mut Self, Error> {
        self.values.insert(key.to_string(), value.to_template_value()?);
        Ok(self)
    }

    pub fn set_helper(&mut self, name: &str, helper: Helper) -> &mut Self {
        self.helpers.insert(name.to_string(), helper);
        self
    }

    pub fn helper(&self, name: &str) -> Option<Helper> {
        self.helpers.get(name).copied()
    }

    /// All variables, as the root scope for a render pass.
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// New context with the caller's entries plus the standard helpers.
    /// Used when rendering a template without the layout.
    pub fn standalone(&self) -> Context {
        let mut context = self.clone();
        context.set_helper("urlencode", helpers::urlencode);
        context
    }

    /// New context with the standard helpers plus the path variables the
    /// layout relies on: `root_path` and `static_path`.
    pub fn for_page(&self, config: &Config) -> Result<Context, Error> {
        let mut context = self.standalone();
        context.set("root_path", config.root_path.as_str())?;
        context.set("static_path", config.static_path().as_str())?;
        Ok(context)
    }
}

mod helpers {
    use super::Value;

    pub fn urlencode(value: &Value) -> Value {
        Value::String(crate::url::urlencode(&value.interpolate()))
    }
}

impl TryFrom<HashMap<String, Value>> for Context {
    type Error = Error;

    fn try_from(values: HashMap<String, Value>) -> Result<Context, Self::Error> {
        Ok(Context {
            values,
            helpers: HashMap::new(),
        })
    }
}

impl TryFrom<&Context> for Context {
    type Error = Error;

    fn try_from(context: &Context) -> Result<Context, Self::Error> {
        Ok(context.clone())
    }
}

macro_rules! impl_string {
    ($ty:ty) => {
        impl TryFrom<$ty> for Context {
            type Error = Error;

            fn try_from(values: $ty) -> Result<Context, Self::Error> {
                let mut result = HashMap::<String, Value>::new();
                for (key, value) in values {
                    result.insert(key.to_string(), Value::String(value.to_string()));
                }

                Ok(Context {
                    values: result,
                    helpers: HashMap::new(),
                })
            }
        }
    };
}

macro_rules! impl_integer {
    ($ty:ty) => {
        impl TryFrom<$ty> for Context {
            type Error = Error;

            fn try_from(values: $ty) -> Result<Context, Self::Error> {
                let mut result = HashMap::<String, Value>::new();
                for (key, value) in values {
                    result.insert(key.to_string(), Value::Integer(value as i64));
                }

                Ok(Context {
                    values: result,
                    helpers: HashMap::new(),
                })
            }
        }
    };
}

macro_rules! impl_impl_integer {
    ($ty:ty) => {
        impl_integer!(HashMap<String, $ty>);
        impl_integer!(HashMap<&str, $ty>);
        impl_integer!(Vec<(&str, $ty)>);
        impl_integer!([(&str, $ty); 1]);
        impl_integer!([(&str, $ty); 2]);
        impl_integer!([(&str, $ty); 3]);
        impl_integer!([(&str, $ty); 4]);
        impl_integer!([(&str, $ty); 5]);
        impl_integer!([(&str, $ty); 6]);
    }
}

impl_string!(HashMap<String, String>);
impl_string!(HashMap<&str, &str>);
impl_string!(Vec<(&str, &str)>);
impl_string!([(&str, &str); 1]);
impl_string!([(&str, &str); 2]);
impl_string!([(&str, &str); 3]);
impl_string!([(&str, &str); 4]);
impl_string!([(&str, &str); 5]);
impl_string!([(&str, &str); 6]);

impl_string!([(&str, String); 1]);
impl_string!([(&str, String); 2]);
impl_string!([(&str, String); 3]);
impl_string!([(&str, String); 4]);
impl_string!([(&str, String); 5]);
impl_string!([(&str, String); 6]);

impl_impl_integer!(i64);
impl_impl_integer!(i32);

impl Index<&str> for Context {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        self.values.get(key).unwrap_or(&Value::Null)
    }
}

impl IndexMut<&str> for Context {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        if let Some(_value) = self.values.get(key) {
            self.values.get_mut(key).unwrap()
        } else {
            self.values.insert(key.to_string(), Value::Null);
            self.values.get_mut(key).unwrap()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_context_index() {
        let mut context = Context::default();
        context["test"] = "value".to_template_value().expect("to_template_value");

        assert_eq!(context["test"], Value::String("value".to_string()));
    }

    #[test]
    fn test_standalone_does_not_mutate_caller() {
        let mut context = Context::new();
        context.set("title", "X").unwrap();

        let augmented = context.standalone();
        assert!(augmented.helper("urlencode").is_some());
        assert!(context.helper("urlencode").is_none());
    }

    #[test]
    fn test_for_page_injects_paths() {
        let config = Config::default();
        let context = Context::new().for_page(&config).unwrap();

        assert_eq!(context["root_path"], Value::String("/".into()));
        assert_eq!(context["static_path"], Value::String("/static/".into()));
        assert!(context.helper("urlencode").is_some());
    }

    #[test]
    fn test_urlencode_helper() {
        let helper = Context::new().standalone().helper("urlencode").unwrap();
        assert_eq!(helper(&Value::String("a b".into())), Value::String("a%20b".into()));
    }
}
