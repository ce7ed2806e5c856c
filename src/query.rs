//! URL query strings.
//!
//! [`UrlValues`] holds parsed query parameters, the ordered key-value
//! container accepted directly by [`join`](crate::join). It serializes as a map
//! from each key to its first value, so a parsed query and a plain map of
//! strings produce the same canonical string.
//!
//! The component helpers follow `application/x-www-form-urlencoded` rules:
//! `+` stands for a space and every byte outside `A-Z a-z 0-9 - _ . ~` is
//! written as `%XX`.
//!
//! ```rust
//! use serde_kvjoin::{join, UrlValues};
//!
//! let values: UrlValues = "b=2&a=1&a=3".parse().unwrap();
//! assert_eq!(values.get("a"), Some("1"));
//! assert_eq!(join(&values).unwrap(), "a=1&b=2");
//! ```

use crate::{Error, Result};
use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Serialize, Serializer};
use std::str::FromStr;
use url::form_urlencoded;

/// Bytes escaped inside a query component. Spaces are handled separately.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Parsed query parameters: each key maps to every value it appeared with, in
/// order. Keys keep the order of their first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlValues(IndexMap<String, Vec<String>>);

impl UrlValues {
    #[must_use]
    pub fn new() -> Self {
        UrlValues(IndexMap::new())
    }

    /// Parses a query (the part after `?`, without it).
    ///
    /// Empty segments are ignored and a segment without `=` maps to an empty
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when a segment contains `;`, a `%` is not
    /// followed by two hex digits, or a decoded component is not UTF-8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kvjoin::UrlValues;
    ///
    /// let values = UrlValues::parse("name=Ada+Lovelace&flag&x=%41").unwrap();
    /// assert_eq!(values.get("name"), Some("Ada Lovelace"));
    /// assert_eq!(values.get("flag"), Some(""));
    /// assert_eq!(values.get("x"), Some("A"));
    ///
    /// assert!(UrlValues::parse("a=%zz").is_err());
    /// ```
    pub fn parse(query: &str) -> Result<Self> {
        if query.contains(';') {
            return Err(Error::parse(query, "invalid semicolon separator in query"));
        }
        check_escapes(query)?;
        percent_decode_str(query)
            .decode_utf8()
            .map_err(|_| Error::parse(query, "decoded component is not valid UTF-8"))?;

        Ok(form_urlencoded::parse(query.as_bytes()).collect())
    }

    /// Adds a value to the key, after any values it already has.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Returns the first value for the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|values| values.first().map_or("", String::as_str))
    }

    /// Returns every value for the key.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Vec<String>> {
        self.0.keys()
    }
}

impl FromStr for UrlValues {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        UrlValues::parse(s)
    }
}

impl<K, V> FromIterator<(K, V)> for UrlValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut values = UrlValues::new();
        for (key, value) in iter {
            values.append(key, value);
        }
        values
    }
}

impl Serialize for UrlValues {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(key, values)| (key, values.first().map_or("", String::as_str))),
        )
    }
}

/// Returns the query part of a URL: everything after the first `?`, or the
/// whole input when there is none.
///
/// # Examples
///
/// ```rust
/// use serde_kvjoin::query::query_part;
///
/// assert_eq!(query_part("https://api.example.com/pay?a=1&b=2"), "a=1&b=2");
/// assert_eq!(query_part("a=1"), "a=1");
/// ```
#[must_use]
pub fn query_part(input: &str) -> &str {
    input.split_once('?').map_or(input, |(_, query)| query)
}

/// Escapes a string for use as a query component.
///
/// Unlike `form_urlencoded::byte_serialize`, `~` is left alone and `*` is
/// escaped.
///
/// # Examples
///
/// ```rust
/// use serde_kvjoin::query::encode_component;
///
/// assert_eq!(encode_component("a b&c=d~"), "a+b%26c%3Dd~");
/// assert_eq!(encode_component("*"), "%2A");
/// ```
#[must_use]
pub fn encode_component(input: &str) -> String {
    input
        .split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Unescapes a query component, turning `+` into a space.
///
/// # Errors
///
/// Returns [`Error::Parse`] for a malformed `%` escape or a non-UTF-8 result.
pub fn decode_component(input: &str) -> Result<String> {
    check_escapes(input)?;
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| Error::parse(input, "decoded component is not valid UTF-8"))
}

/// Rejects a `%` not followed by two hex digits.
fn check_escapes(input: &str) -> Result<()> {
    let bytes = input.as_bytes();
    for (i, &byte) in bytes.iter().enumerate() {
        if byte != b'%' {
            continue;
        }
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            let end = bytes.len().min(i + 3);
            let bad = String::from_utf8_lossy(&bytes[i..end]);
            return Err(Error::parse(
                input,
                &format!("invalid URL escape {:?}", bad),
            ));
        }
    }
    Ok(())
}
