//! XML codec: parse bytes into a content tree and render a tree back
//!
//! XML has no native notion of arrays or primitives, so the codec applies a
//! structural convention: every element becomes an object, repeated sibling
//! tags become arrays, attributes live in a reserved `#attributes` bag, and
//! the `<?xml?>` declaration wraps the document root under `#declaration`.

pub mod model;
pub mod parser;
pub mod tree;
pub mod writer;

pub use model::{Declaration, Document, Element, Node};
pub use parser::Parser;
pub use tree::document_to_content;
pub use writer::render;
