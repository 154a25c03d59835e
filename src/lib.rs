pub mod api;
pub mod ast;
pub mod catalog;
pub mod converter;
pub mod deployment;
pub mod error;
pub mod presence;
pub mod resolver;
pub mod serialization;
pub mod utils;
pub mod validator;

pub use api::{convert, validate, ConversionResult, ConvertArgs, ValidationMode};
