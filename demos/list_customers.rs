//! Lists customers and looks one up by reference.
//!
//! This example shows how to:
//! - Create a client from an account subdomain and API key
//! - Fetch more records than one page holds
//! - Look a record up by its reference
//! - Tell validation failures from transport failures
//!
//! Run with:
//! `CHARGIFY_SUBDOMAIN=acme CHARGIFY_API_KEY=... cargo run --example list_customers -- some-reference`

use chargify_api::{Client, Error, RequestOptions};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("chargify_api=debug,list_customers=info")
        .init();

    let subdomain = std::env::var("CHARGIFY_SUBDOMAIN").unwrap_or_default();
    let api_key = std::env::var("CHARGIFY_API_KEY").unwrap_or_default();

    let client = Client::builder()
        .subdomain(subdomain)
        .api_key(api_key)
        .build()?;

    println!("=== First 120 customers ===");
    let customers = client
        .list_customers(RequestOptions::new().amount(120).concurrency(3))
        .await?;
    for customer in &customers {
        println!("{} {}", customer["id"], customer["email"]);
    }
    println!("Fetched {} customers", customers.len());
    println!();

    let Some(reference) = std::env::args().nth(1) else {
        return Ok(());
    };

    println!("=== Lookup by reference ===");
    match client.customer_by_reference(&reference).await {
        Ok(customer) => println!("Found: {customer}"),
        Err(Error::NotFound) => println!("No customer with reference {reference}"),
        Err(e) if e.is_retryable() => println!("Chargify unreachable: {e}"),
        Err(e) => return Err(e),
    }

    Ok(())
}
