/// A parsed template construct, e.g. a variable tag or a section.
///
/// A template is an ordered sequence of nodes; sections own their
/// nested sequence, so the tree nests to arbitrary depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // e.g. `<ul><li>` between tags
    Text(String),
    // `{{name}}`, `{{{name}}}`, `{{& name}}`, `{{helper(name)}}`
    Variable { target: Target, escape: bool },
    // `{{#name}} ... {{/name}}`
    Section { name: String, nodes: Vec<Node> },
    // `{{^name}} ... {{/name}}`
    Inverted { name: String, nodes: Vec<Node> },
    // `{{> name}}`
    Partial(String),
    // `{{! ... }}`
    Comment,
}

/// What a variable tag interpolates: a dotted path looked up in the
/// scope stack, or a helper applied to the value of such a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Path(String),
    Call { helper: String, arg: String },
}

/// Collect the identifiers of all partials directly referenced by the
/// node tree, in document order, descending into sections and inverted
/// sections at any depth.
pub fn references(nodes: &[Node]) -> Vec<String> {
    let mut found = vec![];
    collect(nodes, &mut found);
    found
}

fn collect(nodes: &[Node], found: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Partial(name) => found.push(name.clone()),
            Node::Section { nodes, .. } | Node::Inverted { nodes, .. } => collect(nodes, found),
            _ => {}
        }
    }
}
