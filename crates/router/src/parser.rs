//! Strategies turning the drained request text into a value.
//!
//! [`JsonParser`] is the router's default strategy, [`IdentityParser`] hands the raw text back,
//! and [`JsonAs`] deserializes straight into a typed value.

use crate::error::BodyError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

pub trait BodyParser: Send + Sync {
    type Output;

    fn parse(&self, text: String) -> Result<Self::Output, BodyError>;
}

/// The strategy used by [`BodyReader::parse`](crate::BodyReader::parse)
pub type DefaultParser = dyn BodyParser<Output = Value>;

/// Parses the text as a json document, malformed input is an error
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParser;

impl BodyParser for JsonParser {
    type Output = Value;

    fn parse(&self, text: String) -> Result<Self::Output, BodyError> {
        Ok(serde_json::from_str(&text)?)
    }
}

/// Returns the text unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityParser;

impl BodyParser for IdentityParser {
    type Output = String;

    #[inline]
    fn parse(&self, text: String) -> Result<Self::Output, BodyError> {
        Ok(text)
    }
}

/// Deserializes the text as json into `T`
pub struct JsonAs<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> JsonAs<T> {
    pub fn new() -> Self {
        Self { _phantom: PhantomData }
    }
}

impl<T> Default for JsonAs<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonAs<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonAs").field("type", &std::any::type_name::<T>()).finish()
    }
}

impl<T: DeserializeOwned> BodyParser for JsonAs<T> {
    type Output = T;

    fn parse(&self, text: String) -> Result<Self::Output, BodyError> {
        Ok(serde_json::from_str(&text)?)
    }
}
