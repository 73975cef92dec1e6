//! Directive tree model and its text rendering

pub mod ast;
pub mod writer;

pub use ast::{Block, Directive};
pub use writer::stringify;
