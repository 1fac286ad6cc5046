pub mod conflict;
pub mod export;
pub mod validator;

pub use validator::{validate, BasicField, ValidationError};
