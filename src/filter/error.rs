use thiserror::Error;

/// Filter token rejected while parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Token is not of the form `name:value`
    #[error("Invalid option specification: {0}")]
    MalformedToken(String),

    #[error("There is no filter option for {0}")]
    UnknownOption(String),

    #[error("There is no {option} of type {value}")]
    UnknownEnumerant { option: String, value: String },

    /// A value of the wrong type was assigned to an option
    #[error("Option {option} does not take a {found} value")]
    TypeMismatch { option: String, found: String },
}
