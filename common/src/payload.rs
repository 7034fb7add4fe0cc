//! Validated JSON payloads.
//!
//! A [`Payload`] is only ever built from bytes that parse as a JSON object or
//! array. Scalars such as `true` or `"text"` are rejected even though they are
//! well-formed JSON, because no reference table has that shape.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Immutable, cheaply clonable view of one loaded reference table.
#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    inner: Arc<Inner>,
}

#[derive(Debug, PartialEq)]
struct Inner {
    uri: String,
    raw: String,
    value: Value,
}

impl Payload {
    /// Validate `bytes` loaded for `uri` and wrap them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContent`] when the bytes are not UTF-8, do not
    /// parse as JSON, or parse to something other than an object or array.
    ///
    /// # Examples
    ///
    /// ```
    /// use mercator_common::Payload;
    ///
    /// let payload = Payload::from_bytes("language.codes.json", b"[\"en\", \"ru\"]".to_vec())
    ///     .expect("arrays are valid payloads");
    /// assert_eq!(payload.as_array().map(Vec::len), Some(2));
    /// assert!(Payload::from_bytes("flag.json", b"true".to_vec()).is_err());
    /// ```
    pub fn from_bytes(uri: &str, bytes: Vec<u8>) -> Result<Self> {
        let raw = String::from_utf8(bytes).map_err(|error| invalid(uri, &error))?;
        let value: Value = serde_json::from_str(&raw).map_err(|error| invalid(uri, &error))?;

        if !(value.is_object() || value.is_array()) {
            return Err(Error::InvalidContent {
                uri: uri.to_owned(),
                reason: "top-level value must be an object or an array".to_owned(),
            });
        }

        Ok(Self {
            inner: Arc::new(Inner {
                uri: uri.to_owned(),
                raw,
                value,
            }),
        })
    }

    /// Logical URI the payload was loaded for.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.inner.uri
    }

    /// The payload exactly as read.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner.raw
    }

    /// Parsed JSON document.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.inner.value
    }

    /// The document as an array, if it is one.
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        self.inner.value.as_array()
    }

    /// The document as an object, if it is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.inner.value.as_object()
    }

    /// Deserialise the document into a typed table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContent`] when the document does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.inner.value).map_err(|error| invalid(&self.inner.uri, &error))
    }
}

fn invalid(uri: &str, error: &dyn std::fmt::Display) -> Error {
    Error::InvalidContent {
        uri: uri.to_owned(),
        reason: error.to_string(),
    }
}
