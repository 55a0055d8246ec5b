/// Statement processing pipeline.
///
/// ```text
/// Statement text
///       ↓
/// Tokenizer              (token.rs)
///       ↓
/// Classifier + matchers  (parser.rs)
///       ↓
/// Tagged statement       (types.rs)
///       ↓
/// Translator             (../translate.rs)
/// ```
///
/// Parsing is deliberately forgiving: classification is an ordered keyword
/// scan and a statement that fails its structural match degrades to
/// `Statement::Unrecognized` instead of raising. Errors only enter the
/// picture once the translator talks to the backend store.
pub mod parser;
pub mod token;
pub mod types;

// Re-export key types for convenience
pub use parser::{bind_by_digit, bind_by_position, classify, parse_statement};
pub use token::{tokenize, Token};
pub use types::*;
