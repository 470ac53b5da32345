//! # Query Parser
//!
//! Turns query text into a [`SelectQuery`]: the tokenizer splits the text,
//! the recursive-descent parser builds the expression trees and validates
//! the `where`, `order by` and `limit` clauses, and the source directory is
//! resolved and checked.

mod ast;
mod errors;
mod parser;
mod source;
mod tokenizer;

pub use ast::{Expression, OrderKey, SelectQuery, SortDirection};
pub use errors::{ParserError, ParserErrorCode, ParserResult};
pub use parser::{parse_query, Parser};
pub use source::Source;
pub use tokenizer::{tokenize, Token, TokenKind};
