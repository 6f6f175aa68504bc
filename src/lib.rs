//! Stencil is an asynchronous, mustache-style template engine with automatic
//! partial resolution. Given the identifier of a root template, it discovers
//! every partial the template transitively references, loads each one from disk
//! exactly once, and renders the result against a caller-supplied context.
//!
//! # Getting started
//!
//! Templates live in a directory (configurable via `stencil.toml`) and are
//! addressed by identifier: `templates/home.mustache` is the template `home`.
//!
//! ```rust,ignore
//! use stencil::prelude::*;
//!
//! let renderer = Renderer::from_config();
//! let mut context = Context::new();
//! context.set("title", "Hello from Stencil!")?;
//!
//! // Renders `home`, then wraps it in the `scaffold` layout.
//! let html = renderer.render_page("home", &context).await?;
//! ```
//!
//! Rendering a template without the layout is done with [`Renderer::render_one`],
//! which is useful for non-HTML output or fragments embedded in other pages.
//!
//! Partials referenced with `{{> name}}` are discovered recursively, including
//! inside `{{#section}}` and `{{^inverted}}` blocks at any nesting depth.
//! Self-referencing and mutually-referencing partials are handled: each
//! template is fetched at most once per render.
pub mod config;
pub mod logging;
pub mod prelude;
pub mod template;
pub mod url;

/// Serde is used for (de)serialization.
pub use serde;
/// Tokio is an asynchronous runtime for Rust.
pub use tokio;

/// Remove unsafe characters from a string printed
/// inside an HTML template.
pub fn safe_html(string: &str) -> String {
    string
        .replace("&", "&amp;")
        .replace("<", "&lt;")
        .replace(">", "&gt;")
        .replace("\"", "&quot;")
        .replace("'", "&#39;")
}
