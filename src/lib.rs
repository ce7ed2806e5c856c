//! # serde_kvjoin
//!
//! Flattens structs, maps and URL query strings into a single canonical
//! `key=value&key=value` string, the usual input for request signatures.
//!
//! ## How it works
//!
//! A join runs two stages:
//!
//! 1. **Extraction**: the input's `Serialize` impl is driven through an
//!    [`Extractor`], producing a [`FlatMap`] of string keys to scalar
//!    [`Value`]s. Nested structures are not flattened recursively; sequences
//!    are never expanded.
//! 2. **Joining**: a [`Joiner`] orders the keys (ascending by default),
//!    drops excluded and empty entries, formats and optionally URL-codes each
//!    value, and joins the tokens.
//!
//! Both stages are driven by [`JoinOptions`]. Nothing is shared between calls.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use serde_kvjoin::join;
//!
//! #[derive(Serialize)]
//! struct PayRequest {
//!     appid: String,
//!     mch_id: String,
//!     total_fee: u32,
//!     attach: Option<String>,
//!     remark: String,
//! }
//!
//! let request = PayRequest {
//!     appid: "wxd930ea5d5a258f4f".to_string(),
//!     mch_id: "10000100".to_string(),
//!     total_fee: 1,
//!     attach: None,
//!     remark: String::new(),
//! };
//!
//! let canonical = join(&request).unwrap();
//! assert_eq!(canonical, "appid=wxd930ea5d5a258f4f&mch_id=10000100&total_fee=1");
//! ```
//!
//! ### Query strings
//!
//! ```rust
//! use serde_kvjoin::join;
//!
//! let canonical = join("https://api.example.com/notify?sign=x&b=2&a=1").unwrap();
//! assert_eq!(canonical, "a=1&b=2&sign=x");
//! ```
//!
//! ### Field keys and modifiers
//!
//! Field keys come from serde (so `#[serde(rename = "...")]` applies) or from a
//! tag table set with [`JoinOptions::with_field_tag`]. A key may carry
//! comma-separated modifiers: `omitempty` drops the entry when its value is
//! zero even if [`JoinOptions::ignore_empty`] is off, and a key of `-` drops
//! the field.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_kvjoin::{join_with_options, JoinOptions};
//!
//! #[derive(Serialize)]
//! struct Callback {
//!     flag: bool,
//!     app_id: String,
//!     app_no: String,
//!     count: i32,
//! }
//!
//! let callback = Callback {
//!     flag: true,
//!     app_id: "secret".to_string(),
//!     app_no: "A1".to_string(),
//!     count: 0,
//! };
//! let options = JoinOptions::new()
//!     .with_ignore_empty(false)
//!     .with_field_tag("flag", "b,omitempty")
//!     .with_field_tag("app_id", "-")
//!     .with_field_tag("count", "count,omitempty");
//!
//! assert_eq!(join_with_options(&callback, options).unwrap(), "app_no=A1&b=true");
//! ```
//!
//! ## Logging
//!
//! Skipped fields and overwritten keys are reported at `trace` level and each
//! join is summarised at `debug` level through the [`log`] facade.

pub mod error;
pub mod join;
pub mod macros;
pub mod map;
pub mod options;
pub mod query;
pub mod ser;
pub mod value;

pub use error::{Error, Result};
pub use join::Joiner;
pub use map::FlatMap;
pub use options::{FieldNames, JoinOptions, Order, UrlCoding};
pub use query::UrlValues;
pub use ser::Extractor;
pub use value::{Number, Value};

use serde::Serialize;

/// Joins any `T: Serialize` with the default options.
///
/// # Examples
///
/// ```rust
/// use serde_kvjoin::join;
/// use std::collections::HashMap;
///
/// let map = HashMap::from([("x", "1"), ("y", "")]);
/// assert_eq!(join(&map).unwrap(), "x=1");
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a string, struct or map, contains an
/// unsupported field, or is a malformed query string.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn join<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    join_with_options(value, JoinOptions::default())
}

/// Joins any `T: Serialize` with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_kvjoin::{join_with_options, JoinOptions, Order};
/// use std::collections::BTreeMap;
///
/// let map = BTreeMap::from([("a", "1"), ("b", "2")]);
/// let options = JoinOptions::new().with_order(Order::Defined, vec!["b".into(), "a".into()]);
/// assert_eq!(join_with_options(&map, options).unwrap(), "b=2&a=1");
/// ```
///
/// # Errors
///
/// Returns an error if extraction fails or the options are invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn join_with_options<T>(value: &T, options: JoinOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let entries = to_flat_map(value, &options)?;
    join_flat_map(&entries, &options)
}

/// Runs only the extraction stage.
///
/// # Examples
///
/// ```rust
/// use serde_kvjoin::{to_flat_map, JoinOptions, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32, path: Vec<i32> }
///
/// let entries = to_flat_map(&Point { x: 1, y: 2, path: vec![3] }, &JoinOptions::new()).unwrap();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries.get("x"), Some(&Value::from(1)));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be flattened.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_map<T>(value: &T, options: &JoinOptions) -> Result<FlatMap>
where
    T: ?Sized + Serialize,
{
    let mut extractor = Extractor::new(options);
    value.serialize(&mut extractor)?;
    Ok(extractor.into_inner())
}

/// Runs only the joining stage over an existing [`FlatMap`].
///
/// # Errors
///
/// Returns [`Error::Config`] for [`Order::Defined`] without an order list.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn join_flat_map(entries: &FlatMap, options: &JoinOptions) -> Result<String> {
    Joiner::new(options).join(entries)
}
