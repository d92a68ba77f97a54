//! Streaming JSON parser events

use crate::content::Scalar;

/// Events emitted by the streaming JSON parser
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Start of a JSON object
    ObjectStart,
    /// End of a JSON object
    ObjectEnd,
    /// Start of a JSON array
    ArrayStart,
    /// End of a JSON array
    ArrayEnd,
    /// Object key (always followed by a value event)
    Key(String),
    /// Scalar value
    Primitive(Scalar),
}
