//! Error types for canonical string joining.
//!
//! Every failure is local to a single call and is returned to the caller; no
//! partial output is ever produced alongside an error.
//!
//! ## Error Categories
//!
//! - **Unsupported types**: the input (or one of its fields) is not a string,
//!   struct, map or scalar
//! - **Parse errors**: a query string contains malformed escapes or separators
//! - **Config errors**: the options cannot drive a join (e.g. defined ordering
//!   without an order list)
//!
//! ## Examples
//!
//! ```rust
//! use serde_kvjoin::{join, Error};
//!
//! let result = join(&vec![1, 2, 3]);
//! assert!(matches!(result, Err(Error::UnsupportedType(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while joining a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input's outer type, or a field's type, cannot be flattened.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Malformed query-string syntax.
    #[error("invalid query string {input:?}: {msg}")]
    Parse { input: String, msg: String },

    /// The options cannot be used as given.
    #[error("invalid options: {0}")]
    Config(String),

    /// Raised by a user `Serialize` impl through `serde::ser::Error::custom`.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error naming the offending type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kvjoin::Error;
    ///
    /// let err = Error::unsupported_type("seq");
    /// assert_eq!(err.to_string(), "unsupported type: seq");
    /// ```
    pub fn unsupported_type(name: &str) -> Self {
        Error::UnsupportedType(name.to_string())
    }

    /// Creates a parse error for the given query input.
    pub fn parse(input: &str, msg: &str) -> Self {
        Error::Parse {
            input: input.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a configuration error.
    pub fn config(msg: &str) -> Self {
        Error::Config(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
