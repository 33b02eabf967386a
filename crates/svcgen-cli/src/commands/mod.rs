//! Command implementations.
//!
//! Each command reads its input, runs the generator and reports through
//! the selected output format. Plugin mode talks protoc's wire protocol
//! instead.

pub mod completions;
pub mod inspect;
pub mod plugin;
pub mod scan;
