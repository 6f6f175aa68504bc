//! Commonly used types, re-exported for convenience.
pub use crate::config::{get_config, Config};
pub use crate::logging::Logger;
pub use crate::template::{
    Context, Error, Renderer, Store, Template, ToTemplateValue, Value, SCAFFOLD,
};
