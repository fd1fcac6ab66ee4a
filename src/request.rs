//! Request descriptors and per-call options.

use crate::{Error, Result};
use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A query string value: Chargify takes both strings and numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
}

impl QueryValue {
    /// The value as an integer, parsing strings when possible.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            QueryValue::Int(n) => Some(*n),
            QueryValue::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Str(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Str(s)
    }
}

impl From<i64> for QueryValue {
    fn from(n: i64) -> Self {
        QueryValue::Int(n)
    }
}

impl From<u32> for QueryValue {
    fn from(n: u32) -> Self {
        QueryValue::Int(i64::from(n))
    }
}

impl From<usize> for QueryValue {
    fn from(n: usize) -> Self {
        QueryValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

/// The path suffix appended before the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// `.json`, with a JSON response body.
    #[default]
    Json,
    /// `.pdf`, with the raw bytes returned untouched.
    Pdf,
}

impl Format {
    /// The suffix inserted into the URL path.
    pub fn suffix(&self) -> &'static str {
        match self {
            Format::Json => ".json",
            Format::Pdf => ".pdf",
        }
    }
}

/// Everything needed to issue a single request.
///
/// A descriptor is built fresh for every call and never shared.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// The HTTP method.
    pub method: Method,

    /// The request path, optionally carrying its own `?query`.
    pub path: String,

    /// Additional query parameters, appended after any query in `path`.
    pub query: Vec<(String, QueryValue)>,

    /// The JSON body. Ignored for GET; defaults to `{}` for other verbs.
    pub body: Option<Value>,

    /// The envelope tag used to unwrap the response.
    pub result_tag: Option<String>,

    /// Extra attempts allowed after the first on transport failures.
    /// `None` uses the client's default.
    pub retries: Option<u32>,

    /// The response format.
    pub format: Format,
}

impl RequestDescriptor {
    /// Creates a descriptor with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            result_tag: None,
            retries: None,
            format: Format::Json,
        }
    }

    /// Adds a query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the result tag.
    pub fn with_result_tag(mut self, tag: impl Into<String>) -> Self {
        self.result_tag = Some(tag.into());
        self
    }

    /// Overrides the retry budget for this request.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Sets the response format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// The body actually put on the wire: nothing for GET, `{}` by default.
    pub(crate) fn wire_body(&self) -> Option<Value> {
        if self.method == Method::GET {
            return None;
        }
        Some(
            self.body
                .clone()
                .unwrap_or_else(|| Value::Object(Default::default())),
        )
    }
}

/// Options accepted by the verb methods of [`Client`](crate::Client).
///
/// This replaces positional optional arguments: set only what you need.
///
/// # Examples
///
/// ```
/// use chargify_api::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::tagged("customer")
///     .body(json!({"email": "jo@example.com"}))
///     .retries(3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub(crate) query: Vec<(String, QueryValue)>,
    pub(crate) body: Option<Value>,
    pub(crate) tag: Option<String>,
    pub(crate) retries: Option<u32>,
    pub(crate) amount: Option<usize>,
    pub(crate) concurrency: Option<i64>,
}

impl RequestOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying only a result tag.
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self::new().tag(tag)
    }

    /// Sets the envelope tag used for the body and the result.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Adds a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `body` and sets it as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the body cannot be serialized.
    pub fn json_body<B: Serialize>(self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(self.body(value))
    }

    /// Overrides the client's retry budget for this call.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Asks a list request for this many records, paging as needed.
    pub fn amount(mut self, amount: usize) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Number of pages fetched at once when paging. Values outside `1..=10`
    /// are clamped.
    pub fn concurrency(mut self, concurrency: i64) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Extracts the legacy `amount` / `max` query aliases, removing them from
    /// the query so they are never sent. An explicit [`amount`](Self::amount)
    /// takes precedence over the aliases.
    ///
    /// # Errors
    ///
    /// [`Error::BadParameter`] if the alias that would be used is not a
    /// non-negative integer.
    pub(crate) fn take_amount(&mut self) -> Result<Option<usize>> {
        let mut alias = None;
        self.query.retain(|(key, value)| {
            let is_alias = key == "amount" || key == "max";
            if is_alias && alias.is_none() {
                alias = Some((key.clone(), value.clone()));
            }
            !is_alias
        });

        match (self.amount, alias) {
            (Some(amount), _) => Ok(Some(amount)),
            (None, None) => Ok(None),
            (None, Some((key, value))) => value
                .as_i64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| {
                    Error::BadParameter(format!("`{key}` must be a record count, got `{value}`"))
                }),
        }
    }

    /// The explicit `per_page` query value, if any.
    pub(crate) fn per_page(&self) -> Option<usize> {
        self.query
            .iter()
            .find(|(key, _)| key == "per_page")
            .and_then(|(_, value)| value.as_i64())
            .and_then(|n| usize::try_from(n).ok())
    }

    pub(crate) fn into_descriptor(self, method: Method, path: impl Into<String>) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor::new(method, path);
        descriptor.query = self.query;
        descriptor.retries = self.retries;
        descriptor.body = match (self.body, self.tag.as_deref()) {
            (Some(body), Some(tag)) => Some(crate::unwrap::envelope(body, tag)),
            (body, _) => body,
        };
        descriptor.result_tag = self.tag;
        descriptor
    }
}
