//! Transitive partial discovery.
//!
//! Starting from a root identifier, discovers every template the root
//! transitively references via `{{> partial}}` tags, loading each one
//! from the store exactly once. The closure is computed with an explicit
//! worklist and a visited map rather than recursion, so resolution depth
//! is bounded by memory, not call-stack depth.
use super::{Error, Store, Template};

use std::collections::HashMap;
use tracing::debug;

/// Load the root template and every partial needed to render it.
///
/// Tolerates self-referencing and mutually-referencing partials: an
/// identifier already present in the result is never fetched again. The
/// first failing load aborts the whole resolution.
pub async fn resolve(store: &Store, root: &str) -> Result<HashMap<String, Template>, Error> {
    let mut found = HashMap::new();
    let mut outstanding = vec![root.to_string()];

    while let Some(identifier) = outstanding.pop() {
        // Duplicates can be enqueued before de-duplication runs.
        if found.contains_key(&identifier) {
            continue;
        }

        let text = store.load(&identifier).await?;
        let template = Template::new(&identifier, &text)?;
        let referenced = template.references();

        // Insert before enqueueing references: a template referencing
        // itself, directly or through a cycle, is already discovered.
        found.insert(identifier, template);

        outstanding.extend(referenced);
        outstanding.retain(|identifier| !found.contains_key(identifier));
    }

    debug!("resolved {} template(s) for \"{}\"", found.len(), root);

    Ok(found)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;
    use tempdir::TempDir;

    fn write(dir: &TempDir, identifier: &str, text: &str) {
        std::fs::write(dir.path().join(format!("{}.mustache", identifier)), text).unwrap();
    }

    fn keys(found: &HashMap<String, Template>) -> HashSet<&str> {
        found.keys().map(|k| k.as_str()).collect()
    }

    #[tokio::test]
    async fn test_no_partials() -> Result<(), Error> {
        let dir = TempDir::new("stencil").unwrap();
        write(&dir, "home", "<h1>{{title}}</h1>");

        let found = resolve(&Store::new(dir.path()), "home").await?;
        assert_eq!(keys(&found), HashSet::from(["home"]));

        Ok(())
    }

    #[tokio::test]
    async fn test_three_level_chain() -> Result<(), Error> {
        let dir = TempDir::new("stencil").unwrap();
        // `b` referenced twice at different nesting depths, `c` from
        // inside a doubly-nested section.
        write(&dir, "a", "{{> b}}{{#rows}}{{> b}}{{#cells}}{{> c}}{{/cells}}{{/rows}}");
        write(&dir, "b", "{{#on}}{{> c}}{{/on}}");
        write(&dir, "c", "leaf");

        let found = resolve(&Store::new(dir.path()), "a").await?;
        assert_eq!(keys(&found), HashSet::from(["a", "b", "c"]));

        Ok(())
    }

    #[tokio::test]
    async fn test_cycle_terminates() -> Result<(), Error> {
        let dir = TempDir::new("stencil").unwrap();
        write(&dir, "a", "{{#more}}{{> b}}{{/more}}");
        write(&dir, "b", "{{#more}}{{> a}}{{/more}}");

        let found = resolve(&Store::new(dir.path()), "a").await?;
        assert_eq!(keys(&found), HashSet::from(["a", "b"]));

        Ok(())
    }

    #[tokio::test]
    async fn test_self_reference_terminates() -> Result<(), Error> {
        let dir = TempDir::new("stencil").unwrap();
        write(&dir, "tree", "{{name}}{{#children}}{{> tree}}{{/children}}");

        let found = resolve(&Store::new(dir.path()), "tree").await?;
        assert_eq!(keys(&found), HashSet::from(["tree"]));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_partial_aborts() {
        let dir = TempDir::new("stencil").unwrap();
        write(&dir, "a", "{{> gone}}");

        let err = resolve(&Store::new(dir.path()), "a").await.unwrap_err();
        match err {
            Error::TemplateDoesNotExist(identifier) => assert_eq!(identifier, "gone"),
            err => panic!("expected NotFound, got {:?}", err),
        }
    }

    #[tokio::test]
    async fn test_syntax_error_names_partial() {
        let dir = TempDir::new("stencil").unwrap();
        write(&dir, "a", "{{> broken}}");
        write(&dir, "broken", "{{#open}}");

        let err = resolve(&Store::new(dir.path()), "a").await.unwrap_err();
        assert_eq!(err.identifier(), Some("broken"));
    }
}
