//! CLI parsing and end-to-end invocation tests

mod parse_flags;
