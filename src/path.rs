//! Resource identifiers and path segment encoding.
//!
//! Chargify addresses most records either by numeric id or by a string handle
//! (a customer reference, a product handle, a coupon code). [`ResourceId`]
//! captures both, and [`encode_segment`] turns one into a URL path segment.

use crate::{Error, Result};
use serde_json::Value;
use std::fmt;

/// Identifier of a remote record: a numeric id or a string handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceId {
    /// A numeric record id.
    Id(u64),
    /// A string handle, reference or code.
    Handle(String),
}

impl ResourceId {
    /// Returns `true` for numeric ids and for handles made only of ASCII digits.
    pub fn is_numeric(&self) -> bool {
        match self {
            ResourceId::Id(_) => true,
            ResourceId::Handle(h) => !h.is_empty() && h.bytes().all(|b| b.is_ascii_digit()),
        }
    }

    /// Checks the identifier is usable in a path.
    pub fn validate(&self) -> Result<()> {
        match self {
            ResourceId::Handle(h) if h.is_empty() => Err(Error::BadParameter(
                "identifier must not be an empty string".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Id(id) => write!(f, "{id}"),
            ResourceId::Handle(h) => f.write_str(h),
        }
    }
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for ResourceId {
            fn from(id: $t) -> Self {
                ResourceId::Id(u64::from(id))
            }
        })*
    };
}

from_unsigned!(u8, u16, u32, u64);

impl TryFrom<i64> for ResourceId {
    type Error = Error;

    fn try_from(id: i64) -> Result<Self> {
        u64::try_from(id)
            .map(ResourceId::Id)
            .map_err(|_| Error::BadParameter(format!("negative identifier: {id}")))
    }
}

impl TryFrom<f64> for ResourceId {
    type Error = Error;

    fn try_from(id: f64) -> Result<Self> {
        if !id.is_finite() {
            return Err(Error::BadParameter(format!("non-finite identifier: {id}")));
        }
        if id < 0.0 || id.fract() != 0.0 || id > u64::MAX as f64 {
            return Err(Error::BadParameter(format!("not a record id: {id}")));
        }
        Ok(ResourceId::Id(id as u64))
    }
}

impl From<&str> for ResourceId {
    fn from(handle: &str) -> Self {
        ResourceId::Handle(handle.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(handle: String) -> Self {
        ResourceId::Handle(handle)
    }
}

impl From<&String> for ResourceId {
    fn from(handle: &String) -> Self {
        ResourceId::Handle(handle.clone())
    }
}

impl TryFrom<&Value> for ResourceId {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(ResourceId::Handle(s.clone())),
            Value::Number(n) => match n.as_u64() {
                Some(id) => Ok(ResourceId::Id(id)),
                None => n
                    .as_f64()
                    .ok_or_else(|| Error::BadParameter(format!("not a record id: {n}")))
                    .and_then(ResourceId::try_from),
            },
            other => Err(Error::BadParameter(format!(
                "unsupported identifier type: {other}"
            ))),
        }
    }
}

/// Percent-encodes an identifier into a single path segment.
///
/// The output matches JavaScript's `encodeURIComponent`: ASCII letters,
/// digits and `-_.!~*'()` are kept; every other byte is `%XX` encoded.
///
/// # Errors
///
/// Returns [`Error::BadParameter`] for empty handles.
///
/// # Examples
///
/// ```
/// use chargify_api::path::encode_segment;
///
/// assert_eq!(encode_segment(42u64).unwrap(), "42");
/// assert_eq!(encode_segment("john doe/1").unwrap(), "john%20doe%2F1");
/// assert!(encode_segment("").is_err());
/// ```
pub fn encode_segment(id: impl Into<ResourceId>) -> Result<String> {
    let id = id.into();
    id.validate()?;
    Ok(encode_component(&id.to_string()))
}

/// `encodeURIComponent` over an arbitrary string.
pub(crate) fn encode_component(raw: &str) -> String {
    // urlencoding only keeps RFC 3986 unreserved characters.
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// How identifiers are turned into path segments before a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdMode {
    /// Every identifier is used as-is, as if it were a numeric id. Handles
    /// passed to id-only endpoints fail at the server.
    #[default]
    Passthrough,
    /// Only pure-digit identifiers are treated as ids; everything else is
    /// resolved to an id through a lookup request first.
    Smart,
}

/// Lookup endpoint used to resolve a handle to a numeric id in
/// [`IdMode::Smart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// `/customers/lookup?reference={handle}`
    CustomerReference,
    /// `/products/handle/{handle}`
    ProductHandle,
    /// `/coupons/find?code={handle}`
    CouponCode,
}

impl Lookup {
    /// The request path for looking `handle` up.
    pub(crate) fn path(&self, handle: &str) -> String {
        let encoded = encode_component(handle);
        match self {
            Lookup::CustomerReference => format!("/customers/lookup?reference={encoded}"),
            Lookup::ProductHandle => format!("/products/handle/{encoded}"),
            Lookup::CouponCode => format!("/coupons/find?code={encoded}"),
        }
    }

    /// The envelope tag of the looked-up record.
    pub(crate) fn tag(&self) -> &'static str {
        match self {
            Lookup::CustomerReference => "customer",
            Lookup::ProductHandle => "product",
            Lookup::CouponCode => "coupon",
        }
    }
}
