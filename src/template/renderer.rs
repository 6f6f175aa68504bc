//! Two-stage rendering: render the requested template, then wrap its
//! output in the `scaffold` layout.
//!
//! Each render request resolves its own partial closure and builds its
//! own context; nothing is shared or cached across requests.
use super::{resolve, Context, Error, Store};
use crate::config::get_config;

use tracing::debug;

/// Identifier of the layout template. Must always exist in the store
/// for [`Renderer::render_page`] to succeed.
pub const SCAFFOLD: &str = "scaffold";

#[derive(Clone, Debug)]
pub struct Renderer {
    store: Store,
}

impl Renderer {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn from_config() -> Self {
        Self {
            store: Store::from_config(),
        }
    }

    /// Render a single template without the layout, e.g. for non-HTML
    /// or embedded output. Standard helpers are injected; the caller's
    /// context is not modified.
    pub async fn render_one(&self, identifier: &str, context: &Context) -> Result<String, Error> {
        let context = context.standalone();
        self.render_resolved(identifier, &context).await
    }

    /// Render a full page: the requested template first, then the
    /// [`SCAFFOLD`] layout with the page's output attached to the
    /// context as `content`. The inner render completes before the
    /// layout render begins; failure of either pass aborts the whole
    /// operation.
    pub async fn render_page(&self, identifier: &str, context: &Context) -> Result<String, Error> {
        let context = context.for_page(get_config())?;
        let content = self.render_resolved(identifier, &context).await?;

        let mut layout_context = context.clone();
        layout_context.set("content", content)?;

        self.render_resolved(SCAFFOLD, &layout_context).await
    }

    async fn render_resolved(&self, identifier: &str, context: &Context) -> Result<String, Error> {
        let partials = resolve(&self.store, identifier).await?;

        debug!("rendering \"{}\"", identifier);

        let template = match partials.get(identifier) {
            Some(template) => template,
            None => return Err(Error::TemplateDoesNotExist(identifier.to_string())),
        };

        template.render_with_partials(context, &partials)
    }
}
