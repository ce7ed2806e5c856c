//! Extraction of a flat key/value map from any `Serialize` value.
//!
//! This module provides the [`Extractor`], a serde serializer whose output is a
//! [`FlatMap`] rather than text. The value's `Serialize` impl is the field
//! enumerator: it yields each field in declaration order and the extractor
//! decides what becomes an entry.
//!
//! ## Accepted inputs
//!
//! - **Strings**: treated as a URL or query string. Everything after the first
//!   `?` (or the whole string) is parsed as `key=value` pairs
//! - **Structs**: one entry per scalar field, keyed by the configured
//!   [`FieldNames`](crate::FieldNames) source
//! - **Maps**: keys are stringified, values follow the struct field rules
//! - `Option::Some`, references and newtype structs are looked through
//!
//! Anything else at the top level is an [`Error::UnsupportedType`].
//!
//! ## Field values
//!
//! | value                       | result                                   |
//! |-----------------------------|------------------------------------------|
//! | `None`, `()`, JSON `null`   | skipped                                  |
//! | bool, number, char, string  | stored as-is                             |
//! | unit-only enum variant      | stored as the variant name               |
//! | unit struct                 | stored as [`Value::Empty`]               |
//! | nested struct or map        | skipped, or merged one level with unwrap |
//! | sequence, tuple, bytes      | always skipped                           |
//! | enum variant carrying data  | [`Error::UnsupportedType`]               |
//!
//! ## Direct usage
//!
//! ```rust
//! use serde_kvjoin::{Extractor, JoinOptions, Value};
//! use serde::Serialize;
//! use std::collections::BTreeMap;
//!
//! let options = JoinOptions::new();
//! let mut extractor = Extractor::new(&options);
//!
//! let map = BTreeMap::from([(1, "one"), (2, "two")]);
//! map.serialize(&mut extractor).unwrap();
//!
//! let entries = extractor.into_inner();
//! assert_eq!(entries.get("2"), Some(&Value::from("two")));
//! ```

use crate::query::{self, UrlValues};
use crate::{Error, FlatMap, JoinOptions, Result, Value};
use log::trace;
use serde::ser::{self, Impossible, Serialize};

/// Field tag that removes a struct field from the output.
const SKIP_TAG: &str = "-";

/// Serde serializer that collects a value's entries into a [`FlatMap`].
pub struct Extractor<'o> {
    options: &'o JoinOptions,
    entries: FlatMap,
}

impl<'o> Extractor<'o> {
    pub fn new(options: &'o JoinOptions) -> Self {
        Extractor {
            options,
            entries: FlatMap::new(),
        }
    }

    pub fn into_inner(self) -> FlatMap {
        self.entries
    }

    fn insert(&mut self, key: String, value: Value) {
        if let Some(previous) = self.entries.get(&key) {
            trace!("key {:?} overwritten, previous value {:?}", key, previous);
        }
        self.entries.insert(key, value);
    }

    fn extract_query(&mut self, input: &str) -> Result<()> {
        let values = UrlValues::parse(query::query_part(input))?;
        for key in values.keys() {
            let value = values.get(key).unwrap_or_default();
            self.insert(key.clone(), Value::from(value));
        }
        Ok(())
    }

    fn extract_field<T>(&mut self, key: String, value: &T, depth: usize) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(FieldSerializer {
            extractor: self,
            key,
            depth,
        })
    }
}

fn unsupported<T>(name: &str) -> Result<T> {
    Err(Error::unsupported_type(name))
}

impl<'a, 'o> ser::Serializer for &'a mut Extractor<'o> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Compound<'a, 'o>;
    type SerializeStruct = Compound<'a, 'o>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<()> {
        unsupported("bool")
    }

    fn serialize_i8(self, _v: i8) -> Result<()> {
        unsupported("i8")
    }

    fn serialize_i16(self, _v: i16) -> Result<()> {
        unsupported("i16")
    }

    fn serialize_i32(self, _v: i32) -> Result<()> {
        unsupported("i32")
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        unsupported("i64")
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        unsupported("i128")
    }

    fn serialize_u8(self, _v: u8) -> Result<()> {
        unsupported("u8")
    }

    fn serialize_u16(self, _v: u16) -> Result<()> {
        unsupported("u16")
    }

    fn serialize_u32(self, _v: u32) -> Result<()> {
        unsupported("u32")
    }

    fn serialize_u64(self, _v: u64) -> Result<()> {
        unsupported("u64")
    }

    fn serialize_u128(self, _v: u128) -> Result<()> {
        unsupported("u128")
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        unsupported("f32")
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        unsupported("f64")
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        unsupported("char")
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.extract_query(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        unsupported("bytes")
    }

    fn serialize_none(self) -> Result<()> {
        unsupported("none")
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        unsupported("unit")
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        unsupported(name)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        unsupported(&format!("{}::{}", name, variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        unsupported(&format!("{}::{}", name, variant))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        unsupported("seq")
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        unsupported("tuple")
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        unsupported(name)
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported(&format!("{}::{}", name, variant))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'a, 'o>> {
        Ok(Compound::collect(self, 0))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Compound<'a, 'o>> {
        Ok(Compound::collect(self, 0))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        unsupported(&format!("{}::{}", name, variant))
    }
}

/// Struct or map whose entries are either collected at `depth` or dropped.
pub enum Compound<'a, 'o> {
    Collect {
        extractor: &'a mut Extractor<'o>,
        depth: usize,
        key: Option<String>,
    },
    Skip,
}

impl<'a, 'o> Compound<'a, 'o> {
    fn collect(extractor: &'a mut Extractor<'o>, depth: usize) -> Self {
        Compound::Collect {
            extractor,
            depth,
            key: None,
        }
    }
}

impl ser::SerializeStruct for Compound<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let Compound::Collect {
            extractor, depth, ..
        } = self
        else {
            return Ok(());
        };

        let options = extractor.options;
        let tag = options.field_names.resolve(name);
        if tag == SKIP_TAG {
            trace!("field {:?} skipped by tag", name);
            return Ok(());
        }
        extractor.extract_field(tag.to_string(), value, *depth)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeMap for Compound<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Compound::Collect { key: pending, .. } = self {
            *pending = Some(key.serialize(KeySerializer)?);
        }
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let Compound::Collect {
            extractor,
            depth,
            key,
        } = self
        else {
            return Ok(());
        };

        let key = key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        extractor.extract_field(key, value, *depth)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Sequence whose elements are never flattened.
pub struct Skipped;

impl ser::SerializeSeq for Skipped {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, _value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTuple for Skipped {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, _value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for Skipped {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Serializes one field value under `key`.
struct FieldSerializer<'a, 'o> {
    extractor: &'a mut Extractor<'o>,
    key: String,
    depth: usize,
}

impl<'a, 'o> FieldSerializer<'a, 'o> {
    fn store(self, value: Value) -> Result<()> {
        self.extractor.insert(self.key, value);
        Ok(())
    }

    fn skip(self, kind: &str) {
        trace!("field {:?} skipped: {}", self.key, kind);
    }

    fn nested(self, kind: &str) -> Compound<'a, 'o> {
        if self.extractor.options.unwrap && self.depth == 0 {
            Compound::collect(self.extractor, self.depth + 1)
        } else {
            self.skip(kind);
            Compound::Skip
        }
    }
}

impl<'a, 'o> ser::Serializer for FieldSerializer<'a, 'o> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Skipped;
    type SerializeTuple = Skipped;
    type SerializeTupleStruct = Skipped;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Compound<'a, 'o>;
    type SerializeStruct = Compound<'a, 'o>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        unsupported("i128")
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_u128(self, _v: u128) -> Result<()> {
        unsupported("u128")
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.store(Value::from(v))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        self.skip("bytes");
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        self.skip("none");
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.skip("unit");
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.store(Value::Empty)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.store(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        unsupported(&format!("{}::{}", name, variant))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Skipped> {
        self.skip("seq");
        Ok(Skipped)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Skipped> {
        self.skip("tuple");
        Ok(Skipped)
    }

    fn serialize_tuple_struct(self, name: &'static str, _len: usize) -> Result<Skipped> {
        self.skip(name);
        Ok(Skipped)
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported(&format!("{}::{}", name, variant))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'a, 'o>> {
        Ok(self.nested("map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Compound<'a, 'o>> {
        Ok(self.nested(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        unsupported(&format!("{}::{}", name, variant))
    }
}

/// Stringifies map keys.
struct KeySerializer;

fn unsupported_key(kind: &str) -> Result<String> {
    Err(Error::unsupported_type(&format!("map key {}", kind)))
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        unsupported_key("bytes")
    }

    fn serialize_none(self) -> Result<String> {
        unsupported_key("none")
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        unsupported_key("option")
    }

    fn serialize_unit(self) -> Result<String> {
        unsupported_key("unit")
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String> {
        unsupported_key(name)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        unsupported_key(&format!("{}::{}", name, variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        unsupported_key(&format!("{}::{}", name, variant))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_type("map key seq"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_type("map key tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type(&format!("map key {}", name)))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type(&format!(
            "map key {}::{}",
            name, variant
        )))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_type("map key map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::unsupported_type(&format!("map key {}", name)))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type(&format!(
            "map key {}::{}",
            name, variant
        )))
    }
}
