pub mod document;
pub mod io;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use document::CardDocument;
pub use io::*;
pub use parsing::{CardIds, CardRange, ParseResult, parse_cards};
