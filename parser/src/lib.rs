//! Argv parsing for argot verbs.
//!
//! A [`Parser`] takes one argv group (verb first), picks the syntax, splits
//! it into name/value pairs, and resolves every declared option:
//!
//! 1. [`select_syntax`] chooses [`StandardTokenizer`] (`--name value`) or
//!    [`NaturalTokenizer`] (`where name is value`).
//! 2. Each option is looked up by long name, short name, then alias.
//! 3. [`rules`] checks mutual relationships and settings constraints.
//! 4. [`convert()`] turns the raw text into a typed [`Value`](argot_core::Value).
//! 5. The collected [`ParsedArgs`] are bound to the caller's [`FromArgs`] type.
//!
//! The first failure ends the parse and is returned inside the
//! [`ParsingResult`], never raised.
//!
//! # Example
//!
//! ```
//! use argot_core::{OptionSpec, ValueKind, Verb};
//! use argot_parser::{ParsedArgs, Parser};
//!
//! let add = Verb::builder("add")
//!     .option(OptionSpec::builder("read", ValueKind::String).build().unwrap())
//!     .option(OptionSpec::builder("verbose", ValueKind::Bool).build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let argv: Vec<String> = ["add", "where", "read", "is", "notes.txt", "verbose", "is", "true"]
//!     .map(String::from)
//!     .to_vec();
//!
//! let result = Parser::default().parse::<ParsedArgs>(&add, &argv);
//! let args = result.into_instance().unwrap();
//! assert_eq!(args.get_str("read"), Some("notes.txt"));
//! assert_eq!(args.get_bool("verbose"), Some(true));
//! ```

mod args;
mod config;
mod convert;
mod error;
mod parser;
mod pipeline;
pub mod rules;
mod tokenizer;

pub use args::{FromArgs, ParsedArgs, ParsedOption, ParsingResult};
pub use config::{
    DEFAULT_GROUP_SEPARATOR, DEFAULT_LONG_PREFIX, DEFAULT_SHORT_PREFIX, ParserConfig,
};
pub use convert::{convert, normalize};
pub use error::{ConfigError, ErrorKind, ParseError};
pub use parser::Parser;
pub use pipeline::ParsingPipeline;
pub use tokenizer::{
    NaturalTokenizer, ParsedValues, StandardTokenizer, Syntax, Tokenizer, select_syntax,
};
