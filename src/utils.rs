pub mod dates;
pub mod input_validation;
