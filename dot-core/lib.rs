//! Character-level primitives shared by the editing crates.

pub mod chars;
