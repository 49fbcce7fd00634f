use std::collections::BTreeMap;

/// A node in a translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Translatable text, possibly containing `{name}` placeholders.
    StringLeaf(String),
    /// A branch keyed by path segment.
    SubTree(BTreeMap<String, Node>),
}

impl Node {
    /// Get the leaf text, if this node is a leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::StringLeaf(text) => Some(text),
            Node::SubTree(_) => None,
        }
    }

    /// Get the children, if this node is a subtree.
    pub fn as_subtree(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::SubTree(children) => Some(children),
            Node::StringLeaf(_) => None,
        }
    }
}

/// The decoded translation tree for one language.
///
/// A catalog is built once from a decoded resource and never mutated
/// afterwards; the registry hands out shared references to it.
///
/// # Example
///
/// ```
/// use glossa::Catalog;
///
/// let catalog = Catalog::from_json_str(r#"{"tabs": {"write": "Write"}}"#).unwrap();
/// assert_eq!(catalog.key_paths('.'), vec!["tabs.write".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    root: BTreeMap<String, Node>,
}

impl Catalog {
    pub fn new(root: BTreeMap<String, Node>) -> Self {
        Self { root }
    }

    /// Top-level entries of the tree.
    pub fn root(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of string leaves in the whole tree.
    pub fn leaf_count(&self) -> usize {
        fn count(children: &BTreeMap<String, Node>) -> usize {
            children
                .values()
                .map(|node| match node {
                    Node::StringLeaf(_) => 1,
                    Node::SubTree(nested) => count(nested),
                })
                .sum()
        }
        count(&self.root)
    }

    /// Every leaf key path, joined with `separator`, in sorted order.
    pub fn key_paths(&self, separator: char) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.root, &mut String::new(), separator, &mut paths);
        paths
    }
}

fn collect_paths(
    children: &BTreeMap<String, Node>,
    prefix: &mut String,
    separator: char,
    out: &mut Vec<String>,
) {
    for (segment, node) in children {
        let restore = prefix.len();
        if !prefix.is_empty() {
            prefix.push(separator);
        }
        prefix.push_str(segment);
        match node {
            Node::StringLeaf(_) => out.push(prefix.clone()),
            Node::SubTree(nested) => collect_paths(nested, prefix, separator, out),
        }
        prefix.truncate(restore);
    }
}
