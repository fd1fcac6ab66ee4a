//! # chargify-api - an async Chargify binding
//!
//! A high-level client for the Chargify subscription billing API, built on
//! `reqwest`. Calls are turned into requests against Chargify's resource
//! endpoints; responses come back as plain values with their envelopes
//! removed, or as a classified [`Error`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use chargify_api::{Client, RequestOptions};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chargify_api::Error> {
//!     let client = Client::builder()
//!         .subdomain("acme")
//!         .api_key("secret")
//!         .timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     // One customer, unwrapped from {"customer": {...}}
//!     let customer = client.customer_by_reference("jo").await?;
//!     println!("Customer: {customer}");
//!
//!     // 500 subscriptions, paged 200 at a time, 3 pages in flight
//!     let subscriptions = client
//!         .list_subscriptions(RequestOptions::new().amount(500).concurrency(3))
//!         .await?;
//!     println!("Fetched {} subscriptions", subscriptions.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Envelope handling** - `{"customer": {...}}` in, plain record out; bodies are enveloped on the way out
//! - **Error classification** - not found, forbidden, validation messages, unparseable bodies and transport failures
//! - **Bounded retry** - transport failures retried with a fixed delay, configurable per call
//! - **Transparent paging** - ask for `n` records and the client walks pages with bounded concurrency
//! - **Hosted pages** - signed links to payment update and signup pages
//! - **Structured logging** - every attempt is traced with `tracing`
//!
//! ## Error Handling
//!
//! ```no_run
//! use chargify_api::{Client, Error};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder().subdomain("acme").api_key("secret").build()?;
//! match client.create_customer(json!({"email": "not-an-email"})).await {
//!     Ok(customer) => println!("Created: {customer}"),
//!     Err(Error::ApiValidation(messages)) => {
//!         for message in messages {
//!             eprintln!("rejected: {message}");
//!         }
//!     }
//!     Err(e) if e.is_retryable() => eprintln!("Chargify unreachable: {e}"),
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod hosted;
pub mod paginate;
pub mod path;
mod request;
mod resources;
mod response;
pub mod retry;
pub mod unwrap;

pub use client::{Client, ClientBuilder, Credential};
pub use error::{Error, Result, TransportCause};
pub use paginate::PageRequest;
pub use path::{IdMode, Lookup, ResourceId};
pub use request::{Format, QueryValue, RequestDescriptor, RequestOptions};
pub use response::Response;
pub use retry::RetryPolicy;
