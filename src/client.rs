//! The Chargify client: request building, response classification, retries
//! and the per-verb entry points.
//!
//! The [`Client`] type is the main entry point for making calls.
//! Use [`ClientBuilder`] to configure and create clients.

use crate::{
    error::{TransportCause, UNABLE_TO_PROCESS, UNPARSEABLE},
    paginate::{clamp_concurrency, default_page_size, resource_of, PageRequest},
    path::{encode_segment, IdMode, Lookup, ResourceId},
    request::{Format, RequestDescriptor, RequestOptions},
    retry::RetryPolicy,
    unwrap::{is_blank, is_truthy, unwrap},
    Error, Response, Result,
};
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Host that account subdomains live under.
pub(crate) const API_HOST: &str = "chargify.com";

/// The account a client talks to and the key it authenticates with.
///
/// Fixed at construction. The `Debug` output never shows the API key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// The account subdomain (`{subdomain}.chargify.com`).
    pub subdomain: String,
    /// The API key, sent as the basic-auth user name.
    pub api_key: String,
    /// The site shared key, used to sign hosted page links.
    pub site_key: Option<String>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("subdomain", &self.subdomain)
            .field("api_key", &"[REDACTED]")
            .field("site_key", &self.site_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// An async Chargify API client.
///
/// Cheap to clone; clones share the connection pool and configuration.
///
/// # Examples
///
/// ```no_run
/// use chargify_api::{Client, RequestOptions};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Customer {
///     id: u64,
///     reference: Option<String>,
/// }
///
/// # async fn example() -> Result<(), chargify_api::Error> {
/// let client = Client::builder()
///     .subdomain("acme")
///     .api_key("secret")
///     .build()?;
///
/// let customer: Customer = client
///     .get("/customers/lookup?reference=jo", RequestOptions::tagged("customer"))
///     .await?;
/// println!("Customer {} ({:?})", customer.id, customer.reference);
///
/// let created: Customer = client
///     .post(
///         "/customers",
///         RequestOptions::tagged("customer").body(json!({"email": "jo@example.com"})),
///     )
///     .await?;
/// println!("Created {}", created.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    credential: Credential,
    base_url: Url,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
    debug: bool,
    id_mode: IdMode,
    page_sizes: HashMap<String, usize>,
    default_family: Option<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("credential", &self.inner.credential)
            .field("retry_policy", &self.inner.retry_policy)
            .field("id_mode", &self.inner.id_mode)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The credential this client was built with.
    pub fn credential(&self) -> &Credential {
        &self.inner.credential
    }

    /// How identifiers are resolved.
    pub fn id_mode(&self) -> IdMode {
        self.inner.id_mode
    }

    /// The product family used when a component call names none.
    pub fn default_family(&self) -> Option<&str> {
        self.inner.default_family.as_deref()
    }

    /// Per-page cap for a list resource, honouring builder overrides.
    pub fn page_size_for(&self, resource: &str) -> Option<usize> {
        self.inner
            .page_sizes
            .get(resource)
            .copied()
            .or_else(|| default_page_size(resource))
    }

    /// Issues one logical request: retries transport failures, then unwraps
    /// the result by the descriptor's tag.
    ///
    /// # Errors
    ///
    /// Returns the classified error of the last attempt.
    pub async fn call(&self, descriptor: RequestDescriptor) -> Result<Response<Value>> {
        let tag = descriptor.result_tag.clone();
        let descriptor = &descriptor;
        let response = self
            .with_retries(descriptor, move |attempt| self.invoke(descriptor, attempt))
            .await?;
        Ok(response.map(|body| unwrap(body, tag.as_deref())))
    }

    /// Issues one logical request and returns the raw body bytes, for
    /// binary downloads such as statement PDFs.
    ///
    /// # Errors
    ///
    /// Returns the classified error of the last attempt.
    pub async fn call_raw(&self, descriptor: RequestDescriptor) -> Result<Response<Vec<u8>>> {
        let descriptor = &descriptor;
        self.with_retries(descriptor, move |attempt| self.invoke_raw(descriptor, attempt))
            .await
    }

    /// Runs `attempt_fn` until it succeeds, fails terminally, or the retry
    /// budget is spent.
    async fn with_retries<T, F, Fut>(
        &self,
        descriptor: &RequestDescriptor,
        attempt_fn: F,
    ) -> Result<Response<T>>
    where
        F: Fn(u32) -> Fut,
        Fut: Future<Output = Result<(T, StatusCode, HeaderMap)>>,
    {
        let start_time = Instant::now();
        let policy = match descriptor.retries {
            Some(retries) => self.inner.retry_policy.with_retries(retries),
            None => self.inner.retry_policy,
        };
        let mut attempt = 0;

        loop {
            attempt += 1;

            match attempt_fn(attempt).await {
                Ok((data, status, headers)) => {
                    return Ok(Response::new(
                        data,
                        status,
                        headers,
                        start_time.elapsed(),
                        attempt,
                    ));
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt,
                        method = %descriptor.method,
                        path = %descriptor.path,
                        "Request failed"
                    );

                    if !e.is_retryable() {
                        return Err(e);
                    }

                    match policy.delay_for_attempt(attempt) {
                        Some(delay) => {
                            tracing::info!(
                                delay_ms = delay.as_millis(),
                                attempt = attempt,
                                "Retrying request after delay"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => return Err(e),
                    }
                }
            }
        }
    }

    /// Executes a single attempt and classifies the JSON result.
    async fn invoke(
        &self,
        descriptor: &RequestDescriptor,
        attempt: u32,
    ) -> Result<(Value, StatusCode, HeaderMap)> {
        let response = self.execute_request(descriptor, attempt).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.text().await?;

        let body = self.classify(status, raw_body)?;
        Ok((body, status, headers))
    }

    /// Executes a single attempt and returns the body untouched.
    async fn invoke_raw(
        &self,
        descriptor: &RequestDescriptor,
        attempt: u32,
    ) -> Result<(Vec<u8>, StatusCode, HeaderMap)> {
        let response = self.execute_request(descriptor, attempt).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        Ok((bytes.to_vec(), status, headers))
    }

    /// Sends the request and sorts out statuses that make the body irrelevant.
    async fn execute_request(
        &self,
        descriptor: &RequestDescriptor,
        attempt: u32,
    ) -> Result<reqwest::Response> {
        let url = self.build_url(descriptor)?;

        tracing::debug!(
            method = %descriptor.method,
            path = %url.path(),
            attempt = attempt,
            "Executing Chargify request"
        );

        let mut request = self
            .inner
            .http_client
            .request(descriptor.method.clone(), url);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = descriptor.wire_body() {
            request = request.json(&body);
        }

        let start_time = Instant::now();
        let response = request.send().await?;
        let status = response.status();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            attempt = attempt,
            "Received Chargify response"
        );

        match status {
            StatusCode::FORBIDDEN => Err(Error::Forbidden),
            StatusCode::NOT_FOUND => Err(Error::NotFound),
            s if s.is_server_error() => {
                let raw_response = response.text().await.unwrap_or_default();
                Err(Error::Transport(TransportCause::Server {
                    status: s,
                    raw_response,
                }))
            }
            _ => Ok(response),
        }
    }

    /// Turns a response body into a JSON value or a classified error.
    fn classify(&self, status: StatusCode, raw_body: String) -> Result<Value> {
        if raw_body.trim().is_empty() {
            // Some endpoints (metadata deletion) answer 200 with nothing.
            return if status.is_success() {
                Ok(Value::Null)
            } else {
                Err(Error::NoBody { status })
            };
        }

        let body: Value = match serde_json::from_str(&raw_body) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    status = status.as_u16(),
                    "Failed to parse Chargify response"
                );
                let message = if self.inner.debug {
                    format!("{e}\nJSON: \"{raw_body}\"")
                } else {
                    UNPARSEABLE.to_string()
                };
                return Err(Error::Unparseable {
                    message,
                    raw_response: raw_body,
                    status,
                });
            }
        };

        if !is_truthy(&body) {
            return Err(Error::NoBody { status });
        }

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            let mut messages: Vec<String> = errors
                .iter()
                .map(|e| match e {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            if messages.is_empty() {
                messages.push(UNABLE_TO_PROCESS.to_string());
            }
            return Err(Error::ApiValidation(messages));
        }

        Ok(body)
    }

    /// Builds the request URL: credential, path, format suffix, query.
    pub(crate) fn build_url(&self, descriptor: &RequestDescriptor) -> Result<Url> {
        let (path, inline_query) = match descriptor.path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (descriptor.path.as_str(), None),
        };

        let mut url = self.inner.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        let path = path.trim_start_matches('/');
        url.set_path(&format!("{base_path}/{path}{}", descriptor.format.suffix()));
        url.set_query(inline_query.filter(|q| !q.is_empty()));

        if !descriptor.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &descriptor.query {
                pairs.append_pair(key, &value.to_string());
            }
        }

        Ok(url)
    }

    /// Resolves an identifier to a path segment.
    ///
    /// In [`IdMode::Smart`], handles that are not all digits are looked up
    /// with an extra request and replaced by the record's numeric id. In
    /// [`IdMode::Passthrough`] the identifier is only encoded.
    ///
    /// # Errors
    ///
    /// [`Error::BadParameter`] for unusable identifiers, or any error of the
    /// lookup request.
    pub async fn resolve_id(&self, lookup: Lookup, id: impl Into<ResourceId>) -> Result<String> {
        let id = id.into();
        id.validate()?;

        if self.inner.id_mode == IdMode::Passthrough || id.is_numeric() {
            return encode_segment(id);
        }

        let handle = id.to_string();
        let record: Value = self
            .get(&lookup.path(&handle), RequestOptions::tagged(lookup.tag()))
            .await?;
        let resolved = record.get("id").ok_or(Error::NotFound)?;
        encode_segment(ResourceId::try_from(resolved)?)
    }

    /// GET `path`, unwrapped by the options' tag and decoded into `T`.
    ///
    /// List requests asking for more records than one page holds are paged
    /// transparently: set [`RequestOptions::amount`] (or the `amount` / `max`
    /// query keys), or a `per_page` above the resource's cap.
    ///
    /// # Errors
    ///
    /// Any classified error, or [`Error::DeserializationFailed`] if the result
    /// does not fit `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let value = self.get_value(path, options).await?;
        decode(value)
    }

    /// POST `path` with the options' body (enveloped by the tag).
    ///
    /// # Errors
    ///
    /// Any classified error, or [`Error::DeserializationFailed`].
    pub async fn post<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.dispatch(Method::POST, path, options).await
    }

    /// PUT `path` with the options' body (enveloped by the tag).
    ///
    /// # Errors
    ///
    /// Any classified error, or [`Error::DeserializationFailed`].
    pub async fn put<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.dispatch(Method::PUT, path, options).await
    }

    /// DELETE `path`, sending the options' body if any.
    ///
    /// # Errors
    ///
    /// Any classified error, or [`Error::DeserializationFailed`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        self.dispatch(Method::DELETE, path, options).await
    }

    /// GET `path` with the `.pdf` suffix, returning the bytes.
    ///
    /// # Errors
    ///
    /// Any classified transport or status error.
    pub async fn get_raw(&self, path: &str, options: RequestOptions) -> Result<Vec<u8>> {
        let descriptor = options
            .into_descriptor(Method::GET, path)
            .with_format(Format::Pdf);
        Ok(self.call_raw(descriptor).await?.data)
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let response = self.call(options.into_descriptor(method, path)).await?;
        decode(response.data)
    }

    async fn get_value(&self, path: &str, mut options: RequestOptions) -> Result<Value> {
        let amount = options.take_amount()?;
        let cap = self.page_size_for(resource_of(path));
        let wanted = amount.or_else(|| {
            options
                .per_page()
                .filter(|per_page| cap.is_some_and(|cap| *per_page > cap))
        });

        let Some(total_wanted) = wanted else {
            let response = self.call(options.into_descriptor(Method::GET, path)).await?;
            return Ok(response.data);
        };

        options
            .query
            .retain(|(key, _)| key != "page" && key != "per_page");

        let request = PageRequest {
            path: path.to_string(),
            base_query: options.query,
            page_size: cap,
            total_wanted,
            concurrency: clamp_concurrency(options.concurrency.unwrap_or(1)),
            result_tag: options.tag,
            retries: options.retries,
        };
        Ok(Value::Array(self.fetch_many(request).await?))
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    <T as serde::Deserialize>::deserialize(&value)
        .or_else(|e| {
            // An empty body on a list endpoint means an empty list.
            if is_blank(&value) {
                <T as serde::Deserialize>::deserialize(&Value::Array(Vec::new())).map_err(|_| e)
            } else {
                Err(e)
            }
        })
        .map_err(|e| Error::DeserializationFailed {
            raw_response: value.to_string(),
            serde_error: e.to_string(),
        })
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use chargify_api::{ClientBuilder, IdMode};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), chargify_api::Error> {
/// let client = ClientBuilder::new()
///     .subdomain("acme")
///     .api_key("secret")
///     .site_key("shared")
///     .timeout(Duration::from_secs(30))
///     .retries(2)
///     .id_mode(IdMode::Smart)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    subdomain: Option<String>,
    api_key: Option<String>,
    site_key: Option<String>,
    base_url: Option<String>,
    retry_policy: RetryPolicy,
    timeout: Option<Duration>,
    debug: bool,
    id_mode: IdMode,
    page_sizes: HashMap<String, usize>,
    default_family: Option<String>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            subdomain: None,
            api_key: None,
            site_key: None,
            base_url: None,
            retry_policy: RetryPolicy::default(),
            timeout: None,
            debug: false,
            id_mode: IdMode::default(),
            page_sizes: HashMap::new(),
            default_family: None,
        }
    }

    /// Sets the account subdomain.
    pub fn subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = Some(subdomain.into());
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the site shared key.
    pub fn site_key(mut self, site_key: impl Into<String>) -> Self {
        self.site_key = Some(site_key.into());
        self
    }

    /// Sends requests to `url` instead of `https://{subdomain}.chargify.com`.
    /// The API key is still attached as the URL user name.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the default number of extra attempts after a transport failure.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retry_policy.retries = retries;
        self
    }

    /// Sets the pause between attempts.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_policy.delay = delay;
        self
    }

    /// Surfaces JSON decoder errors and raw bodies instead of a generic
    /// message.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets how identifiers are resolved.
    pub fn id_mode(mut self, id_mode: IdMode) -> Self {
        self.id_mode = id_mode;
        self
    }

    /// Sets the product family used by component calls that name none.
    pub fn default_family(mut self, family: impl Into<String>) -> Self {
        self.default_family = Some(family.into());
        self
    }

    /// Overrides the per-page cap of a list resource.
    pub fn page_size(mut self, resource: impl Into<String>, page_size: usize) -> Self {
        self.page_sizes.insert(resource.into(), page_size.max(1));
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the subdomain or API key is missing
    /// or empty, and [`Error::InvalidUrl`] for a malformed base URL.
    pub fn build(self) -> Result<Client> {
        let subdomain = self
            .subdomain
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::Configuration("a subdomain is required".to_string()))?;
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Configuration("an API key is required".to_string()))?;

        let raw_base = self
            .base_url
            .unwrap_or_else(|| format!("https://{subdomain}.{API_HOST}"));
        let mut base_url = Url::parse(&raw_base)?;
        base_url
            .set_username(&api_key)
            .and_then(|()| base_url.set_password(Some("x")))
            .map_err(|()| {
                Error::Configuration(format!("cannot attach credentials to {raw_base}"))
            })?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                credential: Credential {
                    subdomain,
                    api_key,
                    site_key: self.site_key,
                },
                base_url,
                retry_policy: self.retry_policy,
                timeout: self.timeout,
                debug: self.debug,
                id_mode: self.id_mode,
                page_sizes: self.page_sizes,
                default_family: self.default_family.filter(|f| !f.is_empty()),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> Client {
        Client::builder()
            .subdomain("acme")
            .api_key("secret")
            .build()
            .unwrap()
    }

    #[test]
    fn test_url_embeds_credentials_and_suffix() {
        let url = client()
            .build_url(&RequestDescriptor::new(Method::GET, "/customers"))
            .unwrap();
        assert_eq!(url.as_str(), "https://secret:x@acme.chargify.com/customers.json");
    }

    #[test]
    fn test_suffix_goes_before_inline_query() {
        let descriptor = RequestDescriptor::new(Method::GET, "/customers/lookup?reference=foo")
            .with_query_param("page", 2u32);
        let url = client().build_url(&descriptor).unwrap();
        assert_eq!(url.path(), "/customers/lookup.json");
        assert_eq!(url.query(), Some("reference=foo&page=2"));
    }

    #[test]
    fn test_pdf_suffix() {
        let descriptor =
            RequestDescriptor::new(Method::GET, "/statements/9").with_format(Format::Pdf);
        let url = client().build_url(&descriptor).unwrap();
        assert_eq!(url.path(), "/statements/9.pdf");
    }

    #[test]
    fn test_base_url_override_keeps_credentials() {
        let client = Client::builder()
            .subdomain("acme")
            .api_key("secret")
            .base_url("http://127.0.0.1:8080")
            .build()
            .unwrap();
        let url = client
            .build_url(&RequestDescriptor::new(Method::POST, "/subscriptions"))
            .unwrap();
        assert_eq!(url.as_str(), "http://secret:x@127.0.0.1:8080/subscriptions.json");
    }

    #[test]
    fn test_build_requires_subdomain_and_key() {
        assert!(matches!(
            Client::builder().api_key("k").build(),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            Client::builder().subdomain("acme").api_key("").build(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_output_hides_api_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("acme"));
    }

    #[test]
    fn test_classify() {
        let client = client();
        assert_eq!(client.classify(StatusCode::OK, "  \n".into()).unwrap(), Value::Null);
        assert!(matches!(
            client.classify(StatusCode::UNPROCESSABLE_ENTITY, String::new()),
            Err(Error::NoBody { .. })
        ));
        assert!(matches!(
            client.classify(StatusCode::OK, "null".into()),
            Err(Error::NoBody { .. })
        ));
        assert_eq!(
            client.classify(StatusCode::OK, r#"{"customer":{"id":1}}"#.into()).unwrap(),
            json!({"customer": {"id": 1}})
        );

        match client.classify(StatusCode::OK, "<html>".into()) {
            Err(Error::Unparseable { message, .. }) => assert_eq!(message, UNPARSEABLE),
            other => panic!("Expected Unparseable, got {:?}", other),
        }

        match client.classify(StatusCode::UNPROCESSABLE_ENTITY, r#"{"errors":[]}"#.into()) {
            Err(Error::ApiValidation(messages)) => assert_eq!(messages, vec![UNABLE_TO_PROCESS]),
            other => panic!("Expected ApiValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_mode_surfaces_parse_detail() {
        let client = Client::builder()
            .subdomain("acme")
            .api_key("secret")
            .debug(true)
            .build()
            .unwrap();
        match client.classify(StatusCode::OK, "not json".into()) {
            Err(Error::Unparseable { message, .. }) => {
                assert_ne!(message, UNPARSEABLE);
                assert!(message.contains("not json"));
            }
            other => panic!("Expected Unparseable, got {:?}", other),
        }
    }

    #[test]
    fn test_page_size_overrides() {
        let client = Client::builder()
            .subdomain("acme")
            .api_key("secret")
            .page_size("coupons", 25)
            .build()
            .unwrap();
        assert_eq!(client.page_size_for("coupons"), Some(25));
        assert_eq!(client.page_size_for("customers"), Some(50));
        assert_eq!(client.page_size_for("components"), None);
    }

    #[test]
    fn test_blank_result_decodes_as_empty_list() {
        let records: Vec<Value> = decode(json!({})).unwrap();
        assert!(records.is_empty());
        let records: Vec<Value> = decode(Value::Null).unwrap();
        assert!(records.is_empty());

        assert_eq!(decode::<Value>(json!({})).unwrap(), json!({}));
        assert!(matches!(
            decode::<Vec<Value>>(json!({"id": 1})),
            Err(Error::DeserializationFailed { .. })
        ));
    }
}
