//! Mustache-style templates: parse once, render against a context and a
//! map of partials.
//!
//! # Example
//!
//! ```
//! # use stencil::template::*;
//! let template = Template::from_str("<h1>{{title}}</h1>").unwrap();
//! let mut context = Context::new();
//!
//! context.set("title", "Hello from Stencil!").unwrap();
//!
//! let rendered = template.render(&context).unwrap();
//!
//! assert_eq!(rendered, "<h1>Hello from Stencil!</h1>");
//! ```
pub mod context;
pub mod error;
pub mod renderer;
pub mod resolver;
pub mod store;
pub mod syntax;
pub mod value;

pub use context::{Context, Helper};
pub use error::Error;
pub use renderer::{Renderer, SCAFFOLD};
pub use resolver::resolve;
pub use store::Store;
pub use value::{ToTemplateValue, Value};

use syntax::{Node, Target};

use std::collections::HashMap;

/// A parsed template, identified by name.
#[derive(Clone, Debug)]
pub struct Template {
    identifier: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source. The identifier is attached to any syntax
    /// error, and names the template in a partial map.
    pub fn new(identifier: &str, source: &str) -> Result<Self, Error> {
        let nodes = syntax::parse(source).map_err(|source| Error::Syntax {
            identifier: identifier.to_string(),
            source,
        })?;

        Ok(Template {
            identifier: identifier.to_string(),
            nodes,
        })
    }

    pub fn from_str(source: &str) -> Result<Self, Error> {
        Self::new("inline", source)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Identifiers of all partials this template directly references,
    /// in document order.
    pub fn references(&self) -> Vec<String> {
        syntax::references(&self.nodes)
    }

    /// Render without partials. Fails if the template references any.
    pub fn render(&self, context: impl TryInto<Context, Error = Error>) -> Result<String, Error> {
        self.render_with_partials(context, &HashMap::new())
    }

    /// Render, expanding `{{> name}}` tags from the partial map.
    pub fn render_with_partials(
        &self,
        context: impl TryInto<Context, Error = Error>,
        partials: &HashMap<String, Template>,
    ) -> Result<String, Error> {
        let context: Context = context.try_into()?;

        let mut output = String::new();
        let mut scopes = vec![Value::Hash(context.values().clone())];

        evaluate(&self.nodes, &mut scopes, &context, partials, &mut output)?;

        Ok(output)
    }
}

/// One rendering pass over a node tree. `scopes` is the stack of values
/// pushed by enclosing sections, innermost last.
fn evaluate(
    nodes: &[Node],
    scopes: &mut Vec<Value>,
    context: &Context,
    partials: &HashMap<String, Template>,
    output: &mut String,
) -> Result<(), Error> {
    for node in nodes {
        match node {
            Node::Text(text) => output.push_str(text),

            Node::Comment => {}

            Node::Variable { target, escape } => {
                let value = match target {
                    Target::Path(path) => lookup(path, scopes),

                    Target::Call { helper, arg } => {
                        let function = context
                            .helper(helper)
                            .ok_or_else(|| Error::UnknownHelper(helper.clone()))?;

                        function(&lookup(arg, scopes))
                    }
                };

                let text = value.interpolate();

                if *escape {
                    output.push_str(&crate::safe_html(&text));
                } else {
                    output.push_str(&text);
                }
            }

            Node::Section { name, nodes } => {
                let value = lookup(name, scopes);

                if !value.truthy() {
                    continue;
                }

                match value {
                    Value::List(items) => {
                        for item in items {
                            scopes.push(item);
                            let result = evaluate(nodes, scopes, context, partials, output);
                            scopes.pop();
                            result?;
                        }
                    }

                    value @ Value::Hash(_) => {
                        scopes.push(value);
                        let result = evaluate(nodes, scopes, context, partials, output);
                        scopes.pop();
                        result?;
                    }

                    // Truthy scalar: render the body once, no new scope.
                    _ => evaluate(nodes, scopes, context, partials, output)?,
                }
            }

            Node::Inverted { name, nodes } => {
                if !lookup(name, scopes).truthy() {
                    evaluate(nodes, scopes, context, partials, output)?;
                }
            }

            Node::Partial(name) => {
                let template = partials
                    .get(name)
                    .ok_or_else(|| Error::TemplateDoesNotExist(name.clone()))?;

                evaluate(&template.nodes, scopes, context, partials, output)?;
            }
        }
    }

    Ok(())
}

/// Resolve a dotted name against the scope stack, innermost scope first.
/// `.` names the innermost scope value itself. Missing names are null.
fn lookup(path: &str, scopes: &[Value]) -> Value {
    if path == "." {
        return match scopes.last() {
            Some(value) => value.clone(),
            None => Value::Null,
        };
    }

    let mut parts = path.split('.');
    let first = match parts.next() {
        Some(first) => first,
        None => return Value::Null,
    };

    for scope in scopes.iter().rev() {
        let hash = match scope {
            Value::Hash(hash) => hash,
            _ => continue,
        };

        let value = match hash.get(first) {
            Some(value) => value,
            None => continue,
        };

        let mut current = value.clone();
        for part in parts.clone() {
            current = match current {
                Value::Hash(hash) => match hash.get(part) {
                    Some(value) => value.clone(),
                    None => Value::Null,
                },
                _ => Value::Null,
            };
        }

        return current;
    }

    Value::Null
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_substitution_and_escaping() -> Result<(), Error> {
        let template = Template::from_str("{{greeting}} {{{greeting}}}")?;
        let mut context = Context::new();
        context.set("greeting", "<b>hi</b>")?;

        assert_eq!(
            template.render(&context)?,
            "&lt;b&gt;hi&lt;/b&gt; <b>hi</b>"
        );

        Ok(())
    }

    #[test]
    fn test_missing_variable_renders_nothing() -> Result<(), Error> {
        let template = Template::from_str("[{{absent}}]")?;
        assert_eq!(template.render(&Context::new())?, "[]");

        Ok(())
    }

    #[test]
    fn test_section_over_list() -> Result<(), Error> {
        let template = Template::from_str("{{#teams}}<li>{{.}}</li>{{/teams}}")?;
        let mut context = Context::new();
        context.set("teams", vec!["alpha", "beta"])?;

        assert_eq!(template.render(&context)?, "<li>alpha</li><li>beta</li>");

        Ok(())
    }

    #[test]
    fn test_section_over_hash_and_dotted_names() -> Result<(), Error> {
        let template = Template::from_str("{{#game}}{{home.name}} vs {{away.name}}{{/game}}")?;

        let mut context = Context::new();
        context.set(
            "game",
            Value::Hash(HashMap::from([
                (
                    "home".to_string(),
                    Value::Hash(HashMap::from([(
                        "name".to_string(),
                        Value::String("Lions".into()),
                    )])),
                ),
                (
                    "away".to_string(),
                    Value::Hash(HashMap::from([(
                        "name".to_string(),
                        Value::String("Bears".into()),
                    )])),
                ),
            ])),
        )?;

        assert_eq!(template.render(&context)?, "Lions vs Bears");

        Ok(())
    }

    #[test]
    fn test_inverted_section() -> Result<(), Error> {
        let template = Template::from_str("{{#games}}on{{/games}}{{^games}}no games today{{/games}}")?;

        let mut context = Context::new();
        context.set("games", Vec::<&str>::new())?;

        assert_eq!(template.render(&context)?, "no games today");

        Ok(())
    }

    #[test]
    fn test_outer_scope_visible_in_section() -> Result<(), Error> {
        let template = Template::from_str("{{#rows}}{{title}}:{{n}} {{/rows}}")?;

        let mut context = Context::new();
        context.set("title", "scores")?;
        context.set(
            "rows",
            vec![
                Value::Hash(HashMap::from([("n".to_string(), Value::Integer(1))])),
                Value::Hash(HashMap::from([("n".to_string(), Value::Integer(2))])),
            ],
        )?;

        assert_eq!(template.render(&context)?, "scores:1 scores:2 ");

        Ok(())
    }

    #[test]
    fn test_partial_expansion() -> Result<(), Error> {
        let template = Template::new("list", "<ul>{{#items}}{{> item}}{{/items}}</ul>")?;
        let partials = HashMap::from([(
            "item".to_string(),
            Template::new("item", "<li>{{.}}</li>")?,
        )]);

        let mut context = Context::new();
        context.set("items", vec!["one", "two"])?;

        assert_eq!(
            template.render_with_partials(&context, &partials)?,
            "<ul><li>one</li><li>two</li></ul>"
        );

        Ok(())
    }

    #[test]
    fn test_missing_partial_fails() -> Result<(), Error> {
        let template = Template::from_str("{{> gone}}")?;
        let err = template.render(&Context::new()).unwrap_err();

        match err {
            Error::TemplateDoesNotExist(identifier) => assert_eq!(identifier, "gone"),
            err => panic!("expected NotFound, got {:?}", err),
        }

        Ok(())
    }

    #[test]
    fn test_helper_invocation() -> Result<(), Error> {
        let template = Template::from_str(r#"<a href="?q={{urlencode(query)}}">search</a>"#)?;

        let mut context = Context::new();
        context.set("query", "a b")?;
        let context = context.standalone();

        assert_eq!(
            template.render(&context)?,
            r#"<a href="?q=a%20b">search</a>"#
        );

        Ok(())
    }

    #[test]
    fn test_unknown_helper_fails() -> Result<(), Error> {
        let template = Template::from_str("{{shout(name)}}")?;
        let err = template.render(&Context::new()).unwrap_err();

        assert!(matches!(err, Error::UnknownHelper(helper) if helper == "shout"));

        Ok(())
    }

    #[test]
    fn test_syntax_error_carries_identifier() {
        let err = Template::new("widget", "{{#open}}").unwrap_err();
        assert_eq!(err.identifier(), Some("widget"));
    }
}
