//! Main module for moon library functionality

pub mod ast;
pub mod composing;
pub mod constructing;
pub mod cursor;
pub mod emitting;
pub mod error;
pub mod event;
pub mod fileio;
pub mod hooks;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod representing;
pub mod serializing;
pub mod token;
pub mod value;
