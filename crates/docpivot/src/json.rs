//! JSON codec: parse bytes into a content tree and render a tree back

pub mod event;
pub mod parser;
pub mod writer;

pub use event::Event;
pub use parser::{Config, Parser};
pub use writer::render;
