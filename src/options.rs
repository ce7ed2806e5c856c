//! Configuration options for canonical string joining.
//!
//! This module provides the types that control every stage of a join:
//!
//! - [`JoinOptions`]: Main configuration struct
//! - [`Order`]: Key ordering strategy (ascending, descending or caller-defined)
//! - [`UrlCoding`]: Whether values are percent-encoded, decoded or left alone
//! - [`FieldNames`]: Where struct field keys come from
//!
//! ## Examples
//!
//! ```rust
//! use serde_kvjoin::{join_with_options, JoinOptions, Order};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//!
//! // Pipe-separated pairs
//! let options = JoinOptions::new().with_sep("|");
//! assert_eq!(join_with_options(&data, options).unwrap(), "x=1|y=2");
//!
//! // Caller-defined order
//! let options = JoinOptions::new().with_order(Order::Defined, vec!["y".into(), "x".into()]);
//! assert_eq!(join_with_options(&data, options).unwrap(), "y=2&x=1");
//! ```

use crate::Error;
use indexmap::IndexMap;
use std::str::FromStr;

/// Ordering strategy for the joined keys.
///
/// # Examples
///
/// ```rust
/// use serde_kvjoin::Order;
///
/// assert_eq!("desc".parse::<Order>().unwrap(), Order::AsciiDesc);
/// assert!("random".parse::<Order>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Order {
    /// Keys sorted by byte value, ascending.
    #[default]
    Ascii,
    /// Keys sorted by byte value, descending.
    AsciiDesc,
    /// Keys follow [`JoinOptions::defined_orders`].
    Defined,
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascii" => Ok(Order::Ascii),
            "desc" | "ascii_desc" => Ok(Order::AsciiDesc),
            "defined" | "explicit" => Ok(Order::Defined),
            other => Err(Error::config(&format!("unsupported order {:?}", other))),
        }
    }
}

/// URL coding applied to each formatted value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UrlCoding {
    #[default]
    None,
    /// Query-component escaping (`a b&c` becomes `a+b%26c`).
    Encode,
    /// Query-component unescaping. Values that fail to decode pass through unchanged.
    Decode,
}

impl FromStr for UrlCoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(UrlCoding::None),
            "encode" | "encoding" => Ok(UrlCoding::Encode),
            "decode" | "decoding" => Ok(UrlCoding::Decode),
            other => Err(Error::config(&format!("unsupported url coding {:?}", other))),
        }
    }
}

/// Source of the key used for each struct field.
///
/// A key may carry comma-separated modifiers after the name, in the style of
/// struct tags: `"count,omitempty"` drops the entry when its value is zero, and
/// a key of exactly `"-"` drops the field altogether.
///
/// # Examples
///
/// ```rust
/// use serde_kvjoin::{join_with_options, JoinOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Callback {
///     app_no: String,
///     #[serde(rename = "count,omitempty")]
///     count: u32,
/// }
///
/// let cb = Callback { app_no: "A1".into(), count: 0 };
/// let options = JoinOptions::new()
///     .with_ignore_empty(false)
///     .with_field_tag("app_no", "no");
/// assert_eq!(join_with_options(&cb, options).unwrap(), "no=A1");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FieldNames {
    /// The name reported by the type's `Serialize` impl, including any
    /// `#[serde(rename = "...")]`.
    #[default]
    Serialized,
    /// A tag table from serialized field name to key. Fields missing from the
    /// table keep their serialized name.
    Tagged(IndexMap<String, String>),
}

impl FieldNames {
    /// Returns the tag for a struct field.
    #[must_use]
    pub fn resolve<'a>(&'a self, field: &'a str) -> &'a str {
        match self {
            FieldNames::Serialized => field,
            FieldNames::Tagged(tags) => tags.get(field).map_or(field, String::as_str),
        }
    }
}

/// Configuration options for joining.
///
/// Builder methods apply in call order; a later call overrides an earlier one
/// for the same field.
///
/// # Examples
///
/// ```rust
/// use serde_kvjoin::{JoinOptions, Order, UrlCoding};
///
/// let options = JoinOptions::new();
/// assert_eq!(options.sep, "&");
/// assert_eq!(options.kv_sep, "=");
/// assert!(options.ignore_empty);
/// assert_eq!(options.order, Order::Ascii);
///
/// let options = JoinOptions::new()
///     .with_sep(";")
///     .with_url_coding(UrlCoding::Encode)
///     .with_unwrap(true);
/// assert!(options.unwrap);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct JoinOptions {
    /// Separator between pairs.
    pub sep: String,
    /// Separator between a key and its value.
    pub kv_sep: String,
    /// Emit values only.
    pub ignore_key: bool,
    /// Drop entries whose value is zero (`false`, `0`, `""`, unit).
    pub ignore_empty: bool,
    /// Keys dropped from the output.
    pub except_keys: Vec<String>,
    /// Key ordering strategy.
    pub order: Order,
    /// Key order used with [`Order::Defined`].
    pub defined_orders: Vec<String>,
    /// Where struct field keys come from.
    pub field_names: FieldNames,
    /// Transformation applied to each value before it is written.
    pub url_coding: UrlCoding,
    /// Merge the entries of nested structs and maps (one level) into the
    /// parent. Duplicate keys are overwritten by the later entry.
    pub unwrap: bool,
}

impl Default for JoinOptions {
    fn default() -> Self {
        JoinOptions {
            sep: "&".to_string(),
            kv_sep: "=".to_string(),
            ignore_key: false,
            ignore_empty: true,
            except_keys: Vec::new(),
            order: Order::default(),
            defined_orders: Vec::new(),
            field_names: FieldNames::default(),
            url_coding: UrlCoding::default(),
            unwrap: false,
        }
    }
}

impl JoinOptions {
    /// Creates default options (`&` and `=` separators, ascending order, empty values dropped).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the separator between pairs.
    #[must_use]
    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    /// Sets the separator between a key and its value.
    #[must_use]
    pub fn with_kv_sep(mut self, kv_sep: impl Into<String>) -> Self {
        self.kv_sep = kv_sep.into();
        self
    }

    /// Emits values without their keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kvjoin::{join_with_options, JoinOptions};
    /// use std::collections::BTreeMap;
    ///
    /// let map = BTreeMap::from([("a", "1"), ("b", "2")]);
    /// let options = JoinOptions::new().with_ignore_key(true).with_sep("");
    /// assert_eq!(join_with_options(&map, options).unwrap(), "12");
    /// ```
    #[must_use]
    pub fn with_ignore_key(mut self, ignore_key: bool) -> Self {
        self.ignore_key = ignore_key;
        self
    }

    /// Controls whether zero values are dropped. Enabled by default.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kvjoin::{join_with_options, JoinOptions};
    /// use std::collections::BTreeMap;
    ///
    /// let map = BTreeMap::from([("a", 0), ("b", 2)]);
    /// assert_eq!(join_with_options(&map, JoinOptions::new()).unwrap(), "b=2");
    ///
    /// let options = JoinOptions::new().with_ignore_empty(false);
    /// assert_eq!(join_with_options(&map, options).unwrap(), "a=0&b=2");
    /// ```
    #[must_use]
    pub fn with_ignore_empty(mut self, ignore_empty: bool) -> Self {
        self.ignore_empty = ignore_empty;
        self
    }

    /// Accepted for compatibility but has no effect: the keys are not recorded.
    ///
    /// Set [`JoinOptions::except_keys`] directly to exclude keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kvjoin::JoinOptions;
    ///
    /// let options = JoinOptions::new().with_except_keys(vec!["sign".into()]);
    /// assert!(options.except_keys.is_empty());
    /// ```
    #[must_use]
    pub fn with_except_keys(self, _except_keys: Vec<String>) -> Self {
        self
    }

    /// Sets the ordering strategy.
    ///
    /// The order list is only recorded when `order` is [`Order::Defined`] and
    /// the list is non-empty; otherwise any previously recorded list is kept.
    #[must_use]
    pub fn with_order(mut self, order: Order, defined_orders: Vec<String>) -> Self {
        if order == Order::Defined && !defined_orders.is_empty() {
            self.defined_orders = defined_orders;
        }
        self.order = order;
        self
    }

    /// Replaces the field name source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indexmap::IndexMap;
    /// use serde::Serialize;
    /// use serde_kvjoin::{join_with_options, FieldNames, JoinOptions};
    ///
    /// #[derive(Serialize)]
    /// struct Pay {
    ///     app_id: String,
    ///     fee: u32,
    /// }
    ///
    /// let tags = IndexMap::from([("app_id".to_string(), "appid".to_string())]);
    /// let options = JoinOptions::new().with_field_names(FieldNames::Tagged(tags));
    /// let pay = Pay { app_id: "wx1".into(), fee: 5 };
    /// assert_eq!(join_with_options(&pay, options).unwrap(), "appid=wx1&fee=5");
    /// ```
    #[must_use]
    pub fn with_field_names(mut self, field_names: FieldNames) -> Self {
        self.field_names = field_names;
        self
    }

    /// Adds a tag for one struct field, switching to [`FieldNames::Tagged`].
    #[must_use]
    pub fn with_field_tag(mut self, field: impl Into<String>, tag: impl Into<String>) -> Self {
        match &mut self.field_names {
            FieldNames::Tagged(tags) => {
                tags.insert(field.into(), tag.into());
            }
            FieldNames::Serialized => {
                let mut tags = IndexMap::new();
                tags.insert(field.into(), tag.into());
                self.field_names = FieldNames::Tagged(tags);
            }
        }
        self
    }

    /// Sets how values are URL-coded before they are written. Keys are left as-is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kvjoin::{join_with_options, JoinOptions, UrlCoding};
    /// use std::collections::BTreeMap;
    ///
    /// let map = BTreeMap::from([("q", "a b&c")]);
    /// let options = JoinOptions::new().with_url_coding(UrlCoding::Encode);
    /// assert_eq!(join_with_options(&map, options).unwrap(), "q=a+b%26c");
    /// ```
    #[must_use]
    pub fn with_url_coding(mut self, url_coding: UrlCoding) -> Self {
        self.url_coding = url_coding;
        self
    }

    /// Enables one-level unwrapping of nested structs and maps.
    #[must_use]
    pub fn with_unwrap(mut self, unwrap: bool) -> Self {
        self.unwrap = unwrap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = JoinOptions::default();
        assert_eq!(options.sep, "&");
        assert_eq!(options.kv_sep, "=");
        assert!(!options.ignore_key);
        assert!(options.ignore_empty);
        assert_eq!(options.order, Order::Ascii);
        assert_eq!(options.url_coding, UrlCoding::None);
        assert_eq!(options.field_names, FieldNames::Serialized);
        assert!(!options.unwrap);
    }

    #[test]
    fn test_later_options_override() {
        let options = JoinOptions::new().with_sep("|").with_sep(",");
        assert_eq!(options.sep, ",");
    }

    #[test]
    fn test_with_order_keeps_list_on_empty() {
        let options = JoinOptions::new()
            .with_order(Order::Defined, vec!["a".to_string()])
            .with_order(Order::Defined, Vec::new());
        assert_eq!(options.defined_orders, vec!["a".to_string()]);

        let options = JoinOptions::new().with_order(Order::AsciiDesc, vec!["a".to_string()]);
        assert!(options.defined_orders.is_empty());
        assert_eq!(options.order, Order::AsciiDesc);
    }

    #[test]
    fn test_except_keys_builder_is_inert() {
        let options = JoinOptions::new().with_except_keys(vec!["a".to_string()]);
        assert!(options.except_keys.is_empty());
    }

    #[test]
    fn test_field_tags() {
        let options = JoinOptions::new()
            .with_field_tag("flag", "b,omitempty")
            .with_field_tag("secret", "-");
        assert_eq!(options.field_names.resolve("flag"), "b,omitempty");
        assert_eq!(options.field_names.resolve("secret"), "-");
        assert_eq!(options.field_names.resolve("other"), "other");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("ascii".parse::<Order>().unwrap(), Order::Ascii);
        assert_eq!("explicit".parse::<Order>().unwrap(), Order::Defined);
        assert!(matches!("sideways".parse::<Order>(), Err(Error::Config(_))));
        assert_eq!("encode".parse::<UrlCoding>().unwrap(), UrlCoding::Encode);
        assert!(matches!("rot13".parse::<UrlCoding>(), Err(Error::Config(_))));
    }
}
