//! Conjugation lookup and learner-answer validation.

pub mod normalize;
pub mod validator;

pub use validator::{validate, validate_batch, BatchItem, ValidationResult};
