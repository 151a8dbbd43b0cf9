//! # Element Accessor
//!
//! A thin, copyable wrapper around one node of the parsed document. Every model
//! type holds one of these and answers its field accessors through it.
//!
//! Queries use a small path language, enough to walk a scan file:
//! * `a/b` selects `b` elements under `a` elements, relative to the node.
//! * A leading `/` anchors the path at the document root.
//! * `//` selects descendants-or-self, so `//Report/ReportHost` matches anywhere.
//! * `.` is the node itself, `..` its parent and `*` any child element.
//! * `text()` and `@name` end a path and yield text instead of nodes.

use std::collections::HashMap;

use roxmltree::Node;

use crate::error::{NessusError, Result};

/// One result of [`Element::xpath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Match<'a, 'input: 'a> {
    Node(Node<'a, 'input>),
    Text(&'a str),
}

impl<'a, 'input: 'a> Match<'a, 'input> {
    pub fn as_node(&self) -> Option<Node<'a, 'input>> {
        match self {
            Match::Node(node) => Some(*node),
            Match::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Match::Node(_) => None,
            Match::Text(text) => Some(*text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<'p> {
    Root,
    DescendantOrSelf,
    SelfNode,
    Parent,
    AnyElement,
    Element(&'p str),
    Text,
    Attribute(&'p str),
}

fn parse_steps(expression: &str) -> Vec<Step<'_>> {
    let mut steps = Vec::new();

    let relative = match expression.strip_prefix('/') {
        Some(rest) => {
            steps.push(Step::Root);
            rest
        }
        None => expression,
    };

    if relative.is_empty() {
        return steps;
    }

    let segments: Vec<&str> = relative.split('/').collect();
    let last = segments.len() - 1;

    for (idx, segment) in segments.into_iter().enumerate() {
        let step = match segment {
            // "a//b" splits into an empty segment; a trailing "/" selects nothing extra
            "" if idx == last => continue,
            "" => Step::DescendantOrSelf,
            "." => Step::SelfNode,
            ".." => Step::Parent,
            "*" => Step::AnyElement,
            "text()" => Step::Text,
            other => match other.strip_prefix('@') {
                Some(attribute) => Step::Attribute(attribute),
                None => Step::Element(other),
            },
        };
        steps.push(step);
    }

    steps
}

/// Sorts nodes into document order and drops duplicates.
///
/// Node ids are handed out in parse order, so their index is document order.
fn normalize<'a, 'input: 'a>(mut nodes: Vec<Node<'a, 'input>>) -> Vec<Node<'a, 'input>> {
    nodes.sort_by_key(|node| node.id().get());
    nodes.dedup_by_key(|node| node.id());
    nodes
}

/// Query-capable handle on a single document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a, 'input: 'a> {
    node: Node<'a, 'input>,
}

impl<'a, 'input: 'a> Element<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    pub fn node(&self) -> Node<'a, 'input> {
        self.node
    }

    /// Local tag name, empty for the document root.
    pub fn tag_name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Evaluates `expression` relative to this node.
    ///
    /// Results come back in document order. An expression that matches nothing
    /// yields an empty vector, never an error.
    pub fn xpath(&self, expression: &str) -> Vec<Match<'a, 'input>> {
        let steps = parse_steps(expression);
        let last = steps.len().saturating_sub(1);
        let mut context: Vec<Node<'a, 'input>> = vec![self.node];

        for (idx, step) in steps.into_iter().enumerate() {
            let next: Vec<Node<'a, 'input>> = match step {
                Step::Root => vec![self.node.document().root()],
                Step::DescendantOrSelf => context
                    .iter()
                    .flat_map(|node| node.descendants())
                    .collect(),
                Step::SelfNode => context,
                Step::Parent => context.iter().filter_map(|node| node.parent()).collect(),
                Step::AnyElement => context
                    .iter()
                    .flat_map(|node| node.children())
                    .filter(|child| child.is_element())
                    .collect(),
                Step::Element(name) => context
                    .iter()
                    .flat_map(|node| node.children())
                    .filter(|child| child.is_element() && child.tag_name().name() == name)
                    .collect(),
                Step::Text | Step::Attribute(_) if idx != last => return Vec::new(),
                Step::Text => {
                    return context
                        .iter()
                        .flat_map(|node| node.children())
                        .filter(|child| child.is_text())
                        .filter_map(|child| child.text())
                        .map(Match::Text)
                        .collect();
                }
                Step::Attribute(name) => {
                    return context
                        .iter()
                        .filter_map(|node| node.attribute(name))
                        .map(Match::Text)
                        .collect();
                }
            };
            context = normalize(next);
        }

        context.into_iter().map(Match::Node).collect()
    }

    /// Element nodes matched by `expression`, in document order.
    pub fn nodes(&self, expression: &str) -> impl Iterator<Item = Node<'a, 'input>> + use<'a, 'input> {
        self.xpath(expression)
            .into_iter()
            .filter_map(|found| found.as_node())
            .filter(|node| node.is_element())
    }

    /// First text under `./{path}`, or `None` when the field is blank or missing.
    pub fn query_text(&self, path: &str) -> Option<&'a str> {
        let expression = text_expression(path);
        self.xpath(&expression)
            .into_iter()
            .find_map(|found| found.as_text())
    }

    /// Like [`Element::query_text`], but a missing match is an error.
    pub fn require_text(&self, path: &str) -> Result<&'a str> {
        let expression = text_expression(path);
        self.xpath(&expression)
            .into_iter()
            .find_map(|found| found.as_text())
            .ok_or(NessusError::NoMatches { expression })
    }

    pub fn attributes(&self) -> HashMap<&'a str, &'a str> {
        self.node
            .attributes()
            .map(|attribute| (attribute.name(), attribute.value()))
            .collect()
    }

    pub fn optional_attribute(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    pub fn attribute(&self, name: &str) -> Result<&'a str> {
        self.node
            .attribute(name)
            .ok_or_else(|| NessusError::AttributeNotFound {
                attribute: name.to_string(),
                element: self.tag_name().to_string(),
            })
    }
}

fn text_expression(path: &str) -> String {
    format!("./{path}/text()")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const XML: &str = r#"<root kind="test">
        <a id="1"><b>first</b><b>second</b></a>
        <a id="2"><c><b>nested</b></c><empty/></a>
    </root>"#;

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_steps(""), vec![]);
        assert_eq!(parse_steps("."), vec![Step::SelfNode]);
        assert_eq!(
            parse_steps("//Report/ReportHost"),
            vec![
                Step::Root,
                Step::DescendantOrSelf,
                Step::Element("Report"),
                Step::Element("ReportHost"),
            ]
        );
        assert_eq!(
            parse_steps("./a/@id"),
            vec![Step::SelfNode, Step::Element("a"), Step::Attribute("id")]
        );
        assert_eq!(
            parse_steps("a//b/text()"),
            vec![
                Step::Element("a"),
                Step::DescendantOrSelf,
                Step::Element("b"),
                Step::Text,
            ]
        );
    }

    #[test]
    fn test_xpath_child_text_in_document_order() {
        let doc = Document::parse(XML).unwrap();
        let root = Element::new(doc.root_element());

        let texts: Vec<&str> = root
            .xpath("./a/b/text()")
            .iter()
            .filter_map(|m| m.as_text())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_xpath_descendants_and_attributes() {
        let doc = Document::parse(XML).unwrap();
        let root = Element::new(doc.root_element());

        assert_eq!(root.nodes("//b").count(), 3);
        assert_eq!(root.nodes("/root/a").count(), 2);

        let ids: Vec<&str> = root
            .xpath("./a/@id")
            .iter()
            .filter_map(|m| m.as_text())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);

        // Nested context nodes must not produce duplicates
        assert_eq!(root.nodes("//a//b").count(), 3);
    }

    #[test]
    fn test_parent_step_keeps_document_order() {
        let doc = Document::parse(XML).unwrap();
        let root = Element::new(doc.root_element());

        // the two <b> under the first <a> share a parent, "nested" sits under <c>
        let parents: Vec<&str> = root
            .nodes("//b/..")
            .map(|node| node.tag_name().name())
            .collect();
        assert_eq!(parents, vec!["a", "c"]);

        let ids: Vec<&str> = root
            .nodes("//b/../..")
            .filter_map(|node| node.attribute("id"))
            .collect();
        assert_eq!(ids, vec!["2"]);

        let order: Vec<u32> = root.nodes("//*").map(|node| node.id().get()).collect();
        assert_eq!(order.len(), 8);
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_xpath_no_match_is_empty() {
        let doc = Document::parse(XML).unwrap();
        let root = Element::new(doc.root_element());

        assert!(root.xpath("./missing").is_empty());
        assert!(root.xpath("./a/text()/b").is_empty());
        assert!(root.xpath("./a/@nope").is_empty());
    }

    #[test]
    fn test_query_text_optional_and_required() {
        let doc = Document::parse(XML).unwrap();
        let first_a = Element::new(doc.root_element().first_element_child().unwrap());

        assert_eq!(first_a.query_text("b"), Some("first"));
        assert_eq!(first_a.query_text("missing"), None);
        assert_eq!(first_a.require_text("b").unwrap(), "first");

        let err = first_a.require_text("missing").unwrap_err();
        assert!(matches!(err, NessusError::NoMatches { .. }));
        assert_eq!(
            err.to_string(),
            "no matching elements for expression './missing/text()'"
        );
    }

    #[test]
    fn test_query_text_on_self() {
        let doc = Document::parse(XML).unwrap();
        let b = doc.descendants().find(|n| n.has_tag_name("b")).unwrap();
        assert_eq!(Element::new(b).query_text("."), Some("first"));

        let empty = doc.descendants().find(|n| n.has_tag_name("empty")).unwrap();
        assert_eq!(Element::new(empty).query_text("."), None);
    }

    #[test]
    fn test_attributes() {
        let doc = Document::parse(XML).unwrap();
        let root = Element::new(doc.root_element());

        assert_eq!(root.attribute("kind").unwrap(), "test");
        assert_eq!(root.attributes().get("kind"), Some(&"test"));
        assert_eq!(root.optional_attribute("missing"), None);

        let err = root.attribute("missing").unwrap_err();
        assert_eq!(err.to_string(), "attribute 'missing' not found on <root>");
    }
}
