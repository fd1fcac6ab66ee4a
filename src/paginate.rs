//! Fetching more records than one page holds.
//!
//! Chargify list endpoints are paged with `page` (1-indexed) and `per_page`,
//! and each resource silently caps `per_page` at its own limit. To honour a
//! request for `n` records the paginator walks pages, keeping up to
//! `concurrency` page requests in flight, until it has `n` records or the
//! source runs dry.

use crate::{
    request::{QueryValue, RequestDescriptor},
    unwrap::is_blank,
    Client, Result,
};
use futures::stream::{FuturesUnordered, StreamExt};
use http::Method;
use serde_json::Value;

/// Upper bound on simultaneous page requests.
pub const MAX_CONCURRENCY: usize = 10;

/// Per-page cap for a list resource, or `None` when pages are not capped (or
/// the cap is unknown) and the requested amount is passed straight through.
///
/// | resource | cap |
/// |---|---|
/// | `subscriptions`, `events`, `metadata`, `transactions` | 200 |
/// | `customers` | 50 |
/// | everything else | none |
pub fn default_page_size(resource: &str) -> Option<usize> {
    match resource {
        "subscriptions" | "events" | "metadata" | "transactions" => Some(200),
        "customers" => Some(50),
        _ => None,
    }
}

/// The list resource a path addresses: its last non-numeric segment.
///
/// # Examples
///
/// ```
/// use chargify_api::paginate::resource_of;
///
/// assert_eq!(resource_of("/customers"), "customers");
/// assert_eq!(resource_of("/subscriptions/42/events?since_id=9"), "events");
/// ```
pub fn resource_of(path: &str) -> &str {
    let path = path.split('?').next().unwrap_or_default();
    path.rsplit('/')
        .find(|segment| !segment.is_empty() && !segment.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or_default()
}

/// Clamps a requested concurrency into `1..=MAX_CONCURRENCY`.
pub fn clamp_concurrency(requested: i64) -> usize {
    if requested < 1 {
        1
    } else {
        usize::try_from(requested).map_or(MAX_CONCURRENCY, |n| n.min(MAX_CONCURRENCY))
    }
}

/// A request for `total_wanted` records from a paged list endpoint.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// The list path.
    pub path: String,
    /// Query parameters sent with every page, besides `page` and `per_page`.
    pub base_query: Vec<(String, QueryValue)>,
    /// Records per page, or `None` to fetch one page of `total_wanted`.
    pub page_size: Option<usize>,
    /// Number of records wanted.
    pub total_wanted: usize,
    /// Simultaneous page requests, within `1..=MAX_CONCURRENCY`.
    pub concurrency: usize,
    /// Envelope tag of each record.
    pub result_tag: Option<String>,
    /// Retry budget override for each page request.
    pub retries: Option<u32>,
}

impl PageRequest {
    /// A sequential request for `total_wanted` records with no page cap.
    pub fn new(path: impl Into<String>, total_wanted: usize) -> Self {
        Self {
            path: path.into(),
            base_query: Vec::new(),
            page_size: None,
            total_wanted,
            concurrency: 1,
            result_tag: None,
            retries: None,
        }
    }

    /// Sets the page size. Zero is treated as one.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    /// Sets the concurrency, clamped into `1..=MAX_CONCURRENCY`.
    pub fn concurrency(mut self, concurrency: i64) -> Self {
        self.concurrency = clamp_concurrency(concurrency);
        self
    }

    /// Sets the envelope tag.
    pub fn result_tag(mut self, tag: impl Into<String>) -> Self {
        self.result_tag = Some(tag.into());
        self
    }

    /// Adds a query parameter sent with every page.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.base_query.push((key.into(), value.into()));
        self
    }

    fn page_descriptor(&self, page: usize, per_page: usize) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor::new(Method::GET, self.path.clone())
            .with_query_param("page", page)
            .with_query_param("per_page", per_page);
        descriptor.query.extend(self.base_query.iter().cloned());
        descriptor.result_tag = self.result_tag.clone();
        descriptor.retries = self.retries;
        descriptor
    }
}

impl Client {
    /// Collects up to `request.total_wanted` records from a paged list.
    ///
    /// The result holds `min(total_wanted, available)` records. A page that
    /// comes back empty or shorter than the page size marks the end of the
    /// data; requests already in flight are still collected. With
    /// `concurrency > 1` records are not guaranteed to be in server order.
    ///
    /// # Errors
    ///
    /// The first failing page fails the whole call; records gathered so far
    /// are discarded.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chargify_api::{Client, PageRequest};
    ///
    /// # async fn example() -> Result<(), chargify_api::Error> {
    /// let client = Client::builder().subdomain("acme").api_key("secret").build()?;
    ///
    /// let request = PageRequest::new("/subscriptions", 500)
    ///     .page_size(200)
    ///     .concurrency(3)
    ///     .result_tag("subscription");
    /// let subscriptions = client.fetch_many(request).await?;
    /// println!("fetched {}", subscriptions.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_many(&self, request: PageRequest) -> Result<Vec<Value>> {
        let wanted = request.total_wanted;
        if wanted == 0 {
            return Ok(Vec::new());
        }

        let Some(cap) = request.page_size else {
            let mut items = self.fetch_page(&request, 1, wanted).await?;
            items.truncate(wanted);
            return Ok(items);
        };
        // Every page must share one size for the offsets to line up.
        let page_size = cap.min(wanted);

        let mut cursor = 0;
        let mut exhausted = false;
        let mut items: Vec<Value> = Vec::with_capacity(wanted);
        let mut in_flight = FuturesUnordered::new();

        let pages_needed = |have: usize| (wanted - have).div_ceil(page_size);

        while in_flight.len() < request.concurrency.min(pages_needed(0)) {
            cursor += 1;
            in_flight.push(self.fetch_page(&request, cursor, page_size));
        }

        while let Some(result) = in_flight.next().await {
            let page = result?;

            tracing::debug!(
                path = %request.path,
                records = page.len(),
                collected = items.len(),
                "Page received"
            );

            if page.len() < page_size {
                exhausted = true;
            }
            items.extend(page);

            if items.len() >= wanted {
                items.truncate(wanted);
                return Ok(items);
            }

            if !exhausted {
                // Count in-flight pages as if full so we never over-fetch.
                let outstanding = items.len() + in_flight.len() * page_size;
                let limit = request
                    .concurrency
                    .min(pages_needed(outstanding.min(wanted)) + in_flight.len());
                while in_flight.len() < limit {
                    cursor += 1;
                    in_flight.push(self.fetch_page(&request, cursor, page_size));
                }
            }
        }

        tracing::debug!(
            path = %request.path,
            collected = items.len(),
            wanted = wanted,
            "Source exhausted before the requested amount"
        );

        Ok(items)
    }

    async fn fetch_page(
        &self,
        request: &PageRequest,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<Value>> {
        let response = self.call(request.page_descriptor(page, per_page)).await?;
        Ok(match response.data {
            Value::Array(items) => items,
            blank if is_blank(&blank) => Vec::new(),
            other => vec![other],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_table() {
        assert_eq!(default_page_size("subscriptions"), Some(200));
        assert_eq!(default_page_size("customers"), Some(50));
        assert_eq!(default_page_size("events"), Some(200));
        assert_eq!(default_page_size("metadata"), Some(200));
        assert_eq!(default_page_size("transactions"), Some(200));
        assert_eq!(default_page_size("webhooks"), None);
        assert_eq!(default_page_size("coupons"), None);
        assert_eq!(default_page_size("invoices"), None);
    }

    #[test]
    fn test_resource_of() {
        assert_eq!(resource_of("/subscriptions"), "subscriptions");
        assert_eq!(resource_of("/subscriptions/12/transactions"), "transactions");
        assert_eq!(resource_of("/customers/7"), "customers");
        assert_eq!(resource_of("/webhooks?per_page=1000"), "webhooks");
        assert_eq!(resource_of("/"), "");
    }

    #[test]
    fn test_concurrency_is_clamped() {
        assert_eq!(clamp_concurrency(0), 1);
        assert_eq!(clamp_concurrency(-4), 1);
        assert_eq!(clamp_concurrency(5), 5);
        assert_eq!(clamp_concurrency(50), MAX_CONCURRENCY);
    }

    #[test]
    fn test_page_descriptor_carries_paging_and_base_query() {
        let request = PageRequest::new("/events", 10)
            .query("direction", "asc")
            .result_tag("event");
        let descriptor = request.page_descriptor(3, 200);

        assert_eq!(descriptor.method, Method::GET);
        assert_eq!(descriptor.query[0], ("page".to_string(), QueryValue::Int(3)));
        assert_eq!(descriptor.query[1], ("per_page".to_string(), QueryValue::Int(200)));
        assert_eq!(descriptor.query[2], ("direction".to_string(), QueryValue::from("asc")));
        assert_eq!(descriptor.result_tag.as_deref(), Some("event"));
    }
}
