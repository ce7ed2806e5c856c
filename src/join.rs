//! Ordering, filtering and formatting of a [`FlatMap`] into the canonical string.
//!
//! Each candidate key, in the configured [`Order`], goes through these steps:
//!
//! 1. keys listed in [`JoinOptions::except_keys`] are dropped
//! 2. a key carrying an `omitempty` modifier (`"count,omitempty"`) is dropped
//!    when its value is zero, whatever `ignore_empty` says
//! 3. with `ignore_empty`, zero values are dropped
//! 4. modifiers are stripped from the key (`"count,omitempty"` becomes `"count"`)
//! 5. the value is formatted and URL-coded
//! 6. the token is `key{kv_sep}value`, or just the value with `ignore_key`
//!
//! Tokens are joined with [`JoinOptions::sep`].

use crate::query;
use crate::{Error, FlatMap, JoinOptions, Order, Result, UrlCoding, Value};
use log::debug;

const OMIT_EMPTY: &str = "omitempty";

/// Joins the entries of a [`FlatMap`] according to a set of options.
///
/// # Examples
///
/// ```rust
/// use serde_kvjoin::{flat_map, Joiner, JoinOptions, Order};
///
/// let entries = flat_map! { "a" => "1", "b" => "2", "c" => "" };
///
/// let options = JoinOptions::new();
/// assert_eq!(Joiner::new(&options).join(&entries).unwrap(), "a=1&b=2");
///
/// let options = JoinOptions::new().with_order(Order::AsciiDesc, vec![]);
/// assert_eq!(Joiner::new(&options).join(&entries).unwrap(), "b=2&a=1");
/// ```
pub struct Joiner<'o> {
    options: &'o JoinOptions,
}

impl<'o> Joiner<'o> {
    pub fn new(options: &'o JoinOptions) -> Self {
        Joiner { options }
    }

    /// Produces the canonical string. An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when [`Order::Defined`] is selected without
    /// any [`JoinOptions::defined_orders`].
    pub fn join(&self, entries: &FlatMap) -> Result<String> {
        let keys = self.ordered_keys(entries)?;
        let tokens: Vec<String> = keys
            .into_iter()
            .filter_map(|key| {
                let value = entries.get(key)?;
                self.token(key, value)
            })
            .collect();

        debug!(
            "joined {} of {} entries in {:?} order",
            tokens.len(),
            entries.len(),
            self.options.order
        );
        Ok(tokens.join(&self.options.sep))
    }

    fn ordered_keys<'m>(&'m self, entries: &'m FlatMap) -> Result<Vec<&'m str>> {
        match self.options.order {
            Order::Ascii | Order::AsciiDesc => {
                let mut keys: Vec<&str> = entries.keys().map(String::as_str).collect();
                keys.sort_unstable();
                if self.options.order == Order::AsciiDesc {
                    keys.reverse();
                }
                Ok(keys)
            }
            Order::Defined => {
                if self.options.defined_orders.is_empty() {
                    return Err(Error::config(
                        "defined order requires a non-empty list of keys",
                    ));
                }
                Ok(self
                    .options
                    .defined_orders
                    .iter()
                    .map(String::as_str)
                    .filter(|key| entries.contains_key(key))
                    .collect())
            }
        }
    }

    /// Formats one entry, or returns `None` when it is filtered out.
    fn token(&self, key: &str, value: &Value) -> Option<String> {
        if self.options.except_keys.iter().any(|except| except == key) {
            return None;
        }

        let mut parts = key.split(',');
        let display_key = parts.next().unwrap_or_default();
        let omit_empty = parts.any(|modifier| modifier == OMIT_EMPTY);
        if value.is_zero() && (omit_empty || self.options.ignore_empty) {
            return None;
        }

        let value = self.format_value(value);
        if self.options.ignore_key {
            Some(value)
        } else {
            Some(format!("{}{}{}", display_key, self.options.kv_sep, value))
        }
    }

    fn format_value(&self, value: &Value) -> String {
        let text = value.to_string();
        match self.options.url_coding {
            UrlCoding::None => text,
            UrlCoding::Encode => query::encode_component(&text),
            UrlCoding::Decode => query::decode_component(&text).unwrap_or(text),
        }
    }
}
