//! XML node tree, the staging structure between raw bytes and the content
//! tree

use indexmap::IndexMap;

/// Parsed XML document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// The `<?xml ...?>` declaration, if the document carries one
    pub declaration: Option<Declaration>,
    pub root: Element,
}

/// The `<?xml ...?>` declaration with its pseudo-attributes
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Declaration {
    pub attributes: IndexMap<String, String>,
}

/// XML element
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

/// XML content node
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    /// Non-whitespace character data (whitespace-only text is discarded at
    /// parse time)
    Text(String),
    Comment(String),
    CData(String),
}
