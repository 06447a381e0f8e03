//! Markup compiler: a resumable scanner, an element builder and the tag and
//! attribute tables that drive them.

pub mod builder;
pub mod registry;
pub mod stream;
pub mod tokenizer;

pub use builder::MarkupParser;
pub use registry::{AttributeEntry, AttributeSetter, Factory, Registry};
pub use stream::MarkupStream;
pub use tokenizer::{MarkupOp, Scanner};
