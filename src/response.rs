//! Successful responses together with their transport details.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful response from [`Client::call`](crate::Client::call).
///
/// `data` holds the unwrapped result; the other fields describe how it was
/// obtained.
///
/// # Examples
///
/// ```no_run
/// use chargify_api::{Client, RequestDescriptor};
/// use http::Method;
///
/// # async fn example() -> Result<(), chargify_api::Error> {
/// let client = Client::builder().subdomain("acme").api_key("secret").build()?;
///
/// let descriptor = RequestDescriptor::new(Method::GET, "/customers/1").with_result_tag("customer");
/// let response = client.call(descriptor).await?;
///
/// println!("Customer: {}", response.data);
/// println!("Took {:?} over {} attempt(s)", response.latency, response.attempts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The result value.
    pub data: T,

    /// The HTTP status code of the final attempt.
    pub status: StatusCode,

    /// The response headers of the final attempt.
    pub headers: HeaderMap,

    /// Time from the first attempt until the final response, retries included.
    pub latency: Duration,

    /// Number of attempts made; `1` when the first one succeeded.
    pub attempts: u32,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(
        data: T,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: u32,
    ) -> Self {
        Self {
            data,
            status,
            headers,
            latency,
            attempts,
        }
    }

    /// Maps the data, keeping the metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chargify_api::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(42, StatusCode::OK, HeaderMap::new(), Duration::ZERO, 1);
    /// let text = response.map(|n| n.to_string());
    /// assert_eq!(text.data, "42");
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Returns `true` if the request needed more than one attempt.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Consumes the response, returning only the data.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> AsRef<T> for Response<T> {
    fn as_ref(&self) -> &T {
        &self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_header_lookup_and_retry_flag() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        let response = Response::new((), StatusCode::OK, headers, Duration::ZERO, 3);

        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(response.was_retried());
    }
}
