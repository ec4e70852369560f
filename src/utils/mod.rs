//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Command execution with error handling
//! - `io` - File I/O with consistent error handling
//! - `parser` - Text extraction primitives
//! - `shell` - Shell escaping and quoting

pub mod command;
pub mod io;
pub mod parser;
pub mod shell;
