//! Convenience methods for individual Chargify resources.
//!
//! Each method only picks a path template and an envelope tag; the actual
//! work happens in the verb methods of [`Client`]. Results are returned as
//! plain JSON values with the envelope removed.

use crate::{
    path::{encode_component, encode_segment, Lookup, ResourceId},
    Client, Error, RequestOptions, Result,
};
use serde_json::Value;

impl Client {
    // Customers

    /// Lists customers. Use [`RequestOptions::amount`] to page past 50.
    pub async fn list_customers(&self, options: RequestOptions) -> Result<Vec<Value>> {
        self.get("/customers", options.tag("customer")).await
    }

    /// Fetches a customer by id (or by reference in smart id mode).
    pub async fn customer(&self, id: impl Into<ResourceId>) -> Result<Value> {
        let id = self.resolve_id(Lookup::CustomerReference, id).await?;
        self.get(&format!("/customers/{id}"), RequestOptions::tagged("customer"))
            .await
    }

    /// Fetches a customer by its reference.
    pub async fn customer_by_reference(&self, reference: &str) -> Result<Value> {
        let path = Lookup::CustomerReference.path(non_empty(reference)?);
        self.get(&path, RequestOptions::tagged("customer")).await
    }

    /// Creates a customer from its attributes.
    pub async fn create_customer(&self, attributes: Value) -> Result<Value> {
        self.post("/customers", RequestOptions::tagged("customer").body(attributes))
            .await
    }

    /// Updates a customer.
    pub async fn update_customer(&self, id: impl Into<ResourceId>, attributes: Value) -> Result<Value> {
        let id = self.resolve_id(Lookup::CustomerReference, id).await?;
        self.put(
            &format!("/customers/{id}"),
            RequestOptions::tagged("customer").body(attributes),
        )
        .await
    }

    /// Deletes a customer.
    pub async fn delete_customer(&self, id: impl Into<ResourceId>) -> Result<Value> {
        let id = self.resolve_id(Lookup::CustomerReference, id).await?;
        self.delete(&format!("/customers/{id}"), RequestOptions::tagged("customer"))
            .await
    }

    /// Lists a customer's subscriptions.
    pub async fn customer_subscriptions(&self, id: impl Into<ResourceId>) -> Result<Vec<Value>> {
        let id = self.resolve_id(Lookup::CustomerReference, id).await?;
        self.get(
            &format!("/customers/{id}/subscriptions"),
            RequestOptions::tagged("subscription"),
        )
        .await
    }

    // Subscriptions

    /// Lists subscriptions. Use [`RequestOptions::amount`] to page past 200.
    pub async fn list_subscriptions(&self, options: RequestOptions) -> Result<Vec<Value>> {
        self.get("/subscriptions", options.tag("subscription")).await
    }

    /// Fetches a subscription.
    pub async fn subscription(&self, id: impl Into<ResourceId>) -> Result<Value> {
        let id = encode_segment(id)?;
        self.get(&format!("/subscriptions/{id}"), RequestOptions::tagged("subscription"))
            .await
    }

    /// Creates a subscription.
    pub async fn create_subscription(&self, attributes: Value) -> Result<Value> {
        self.post(
            "/subscriptions",
            RequestOptions::tagged("subscription").body(attributes),
        )
        .await
    }

    /// Updates a subscription.
    pub async fn update_subscription(&self, id: impl Into<ResourceId>, attributes: Value) -> Result<Value> {
        self.subscription_call(id, "", attributes, Verb::Put, "subscription")
            .await
    }

    /// Cancels a subscription immediately. `attributes` may carry a
    /// `cancellation_message`.
    pub async fn cancel_subscription(&self, id: impl Into<ResourceId>, attributes: Value) -> Result<Value> {
        self.subscription_call(id, "", attributes, Verb::Delete, "subscription")
            .await
    }

    /// Reactivates a cancelled subscription.
    pub async fn reactivate_subscription(&self, id: impl Into<ResourceId>, attributes: Value) -> Result<Value> {
        self.subscription_call(id, "/reactivate", attributes, Verb::Put, "subscription")
            .await
    }

    /// Creates a one-time charge on a subscription.
    pub async fn charge_subscription(&self, id: impl Into<ResourceId>, charge: Value) -> Result<Value> {
        self.subscription_call(id, "/charges", charge, Verb::Post, "charge")
            .await
    }

    /// Adjusts a subscription's balance.
    pub async fn adjust_subscription(&self, id: impl Into<ResourceId>, adjustment: Value) -> Result<Value> {
        self.subscription_call(id, "/adjustments", adjustment, Verb::Post, "adjustment")
            .await
    }

    /// Credits a subscription.
    pub async fn credit_subscription(&self, id: impl Into<ResourceId>, credit: Value) -> Result<Value> {
        self.subscription_call(id, "/credits", credit, Verb::Post, "credit")
            .await
    }

    /// Moves a subscription to another product.
    pub async fn migrate_subscription(&self, id: impl Into<ResourceId>, migration: Value) -> Result<Value> {
        self.subscription_call(id, "/migrations", migration, Verb::Post, "migration")
            .await
    }

    /// Previews the cost of a product migration.
    pub async fn preview_subscription_migration(
        &self,
        id: impl Into<ResourceId>,
        migration: Value,
    ) -> Result<Value> {
        self.subscription_call(id, "/migrations/preview", migration, Verb::Post, "migration")
            .await
    }

    /// Applies a coupon code to a subscription.
    pub async fn add_subscription_coupon(&self, id: impl Into<ResourceId>, code: &str) -> Result<Value> {
        let id = encode_segment(id)?;
        let code = encode_component(non_empty(code)?);
        self.post(
            &format!("/subscriptions/{id}/add_coupon?code={code}"),
            RequestOptions::tagged("subscription"),
        )
        .await
    }

    /// Removes a coupon code from a subscription.
    pub async fn remove_subscription_coupon(&self, id: impl Into<ResourceId>, code: &str) -> Result<Value> {
        let id = encode_segment(id)?;
        let code = encode_component(non_empty(code)?);
        self.delete(
            &format!("/subscriptions/{id}/remove_coupon?code={code}"),
            RequestOptions::tagged("subscription"),
        )
        .await
    }

    /// Lists a subscription's transactions.
    pub async fn subscription_transactions(
        &self,
        id: impl Into<ResourceId>,
        options: RequestOptions,
    ) -> Result<Vec<Value>> {
        let id = encode_segment(id)?;
        self.get(
            &format!("/subscriptions/{id}/transactions"),
            options.tag("transaction"),
        )
        .await
    }

    /// Lists a subscription's statements.
    pub async fn subscription_statements(&self, id: impl Into<ResourceId>) -> Result<Vec<Value>> {
        let id = encode_segment(id)?;
        self.get(
            &format!("/subscriptions/{id}/statements"),
            RequestOptions::tagged("statement"),
        )
        .await
    }

    /// Lists a subscription's events.
    pub async fn subscription_events(
        &self,
        id: impl Into<ResourceId>,
        options: RequestOptions,
    ) -> Result<Vec<Value>> {
        let id = encode_segment(id)?;
        self.get(&format!("/subscriptions/{id}/events"), options.tag("event"))
            .await
    }

    // Components and usage

    /// Lists the components defined in a product family, or in the client's
    /// default family when `family` is `None`.
    pub async fn product_family_components(&self, family: Option<ResourceId>) -> Result<Vec<Value>> {
        let family = self.family_segment(family)?;
        self.get(
            &format!("/product_families/{family}/components"),
            RequestOptions::tagged("component"),
        )
        .await
    }

    /// Fetches one component definition of a product family (the default
    /// family when `family` is `None`).
    pub async fn product_family_component(
        &self,
        family: Option<ResourceId>,
        component: impl Into<ResourceId>,
    ) -> Result<Value> {
        let (family, component) = (self.family_segment(family)?, encode_segment(component)?);
        self.get(
            &format!("/product_families/{family}/components/{component}"),
            RequestOptions::tagged("component"),
        )
        .await
    }

    /// Lists the components attached to a subscription.
    pub async fn subscription_components(&self, id: impl Into<ResourceId>) -> Result<Vec<Value>> {
        let id = encode_segment(id)?;
        self.get(
            &format!("/subscriptions/{id}/components"),
            RequestOptions::tagged("component"),
        )
        .await
    }

    /// Fetches one component of a subscription.
    pub async fn subscription_component(
        &self,
        id: impl Into<ResourceId>,
        component: impl Into<ResourceId>,
    ) -> Result<Value> {
        let (id, component) = (encode_segment(id)?, encode_segment(component)?);
        self.get(
            &format!("/subscriptions/{id}/components/{component}"),
            RequestOptions::tagged("component"),
        )
        .await
    }

    /// Updates the allocated quantity of a subscription component.
    pub async fn update_subscription_component(
        &self,
        id: impl Into<ResourceId>,
        component: impl Into<ResourceId>,
        attributes: Value,
    ) -> Result<Value> {
        let (id, component) = (encode_segment(id)?, encode_segment(component)?);
        self.put(
            &format!("/subscriptions/{id}/components/{component}"),
            RequestOptions::tagged("component").body(attributes),
        )
        .await
    }

    /// Lists metered usage recorded for a subscription component.
    pub async fn component_usages(
        &self,
        id: impl Into<ResourceId>,
        component: impl Into<ResourceId>,
    ) -> Result<Vec<Value>> {
        let (id, component) = (encode_segment(id)?, encode_segment(component)?);
        self.get(
            &format!("/subscriptions/{id}/components/{component}/usages"),
            RequestOptions::tagged("usage"),
        )
        .await
    }

    /// Records metered usage for a subscription component.
    pub async fn record_component_usage(
        &self,
        id: impl Into<ResourceId>,
        component: impl Into<ResourceId>,
        usage: Value,
    ) -> Result<Value> {
        let (id, component) = (encode_segment(id)?, encode_segment(component)?);
        self.post(
            &format!("/subscriptions/{id}/components/{component}/usages"),
            RequestOptions::tagged("usage").body(usage),
        )
        .await
    }

    // Coupons

    /// Fetches a coupon by id (or by code in smart id mode).
    pub async fn coupon(&self, id: impl Into<ResourceId>) -> Result<Value> {
        let id = self.resolve_id(Lookup::CouponCode, id).await?;
        self.get(&format!("/coupons/{id}"), RequestOptions::tagged("coupon"))
            .await
    }

    /// Finds a coupon by its code.
    pub async fn coupon_by_code(&self, code: &str) -> Result<Value> {
        let path = Lookup::CouponCode.path(non_empty(code)?);
        self.get(&path, RequestOptions::tagged("coupon")).await
    }

    /// Checks whether a coupon code is currently valid.
    pub async fn validate_coupon(&self, code: &str) -> Result<Value> {
        let code = encode_component(non_empty(code)?);
        self.get(
            &format!("/coupons/validate?code={code}"),
            RequestOptions::tagged("coupon"),
        )
        .await
    }

    // Products

    /// Lists products.
    pub async fn list_products(&self) -> Result<Vec<Value>> {
        self.get("/products", RequestOptions::tagged("product")).await
    }

    /// Fetches a product by id (or by handle in smart id mode).
    pub async fn product(&self, id: impl Into<ResourceId>) -> Result<Value> {
        let id = self.resolve_id(Lookup::ProductHandle, id).await?;
        self.get(&format!("/products/{id}"), RequestOptions::tagged("product"))
            .await
    }

    /// Fetches a product by its handle.
    pub async fn product_by_handle(&self, handle: &str) -> Result<Value> {
        let path = Lookup::ProductHandle.path(non_empty(handle)?);
        self.get(&path, RequestOptions::tagged("product")).await
    }

    // Site-wide lists

    /// Lists transactions across the site.
    pub async fn list_transactions(&self, options: RequestOptions) -> Result<Vec<Value>> {
        self.get("/transactions", options.tag("transaction")).await
    }

    /// Lists events across the site.
    pub async fn list_events(&self, options: RequestOptions) -> Result<Vec<Value>> {
        self.get("/events", options.tag("event")).await
    }

    /// Lists configured webhooks.
    pub async fn list_webhooks(&self, options: RequestOptions) -> Result<Vec<Value>> {
        self.get("/webhooks", options.tag("webhook")).await
    }

    // Statements

    /// Fetches a statement.
    pub async fn statement(&self, id: impl Into<ResourceId>) -> Result<Value> {
        let id = encode_segment(id)?;
        self.get(&format!("/statements/{id}"), RequestOptions::tagged("statement"))
            .await
    }

    /// Downloads a statement as PDF bytes.
    pub async fn statement_pdf(&self, id: impl Into<ResourceId>) -> Result<Vec<u8>> {
        let id = encode_segment(id)?;
        self.get_raw(&format!("/statements/{id}"), RequestOptions::new())
            .await
    }

    // Metadata

    /// Lists the metadata of a subscription.
    pub async fn subscription_metadata(&self, id: impl Into<ResourceId>) -> Result<Vec<Value>> {
        let id = encode_segment(id)?;
        self.get(
            &format!("/subscriptions/{id}/metadata"),
            RequestOptions::tagged("metadata"),
        )
        .await
    }

    /// Sets metadata entries on a subscription.
    pub async fn set_subscription_metadata(&self, id: impl Into<ResourceId>, entries: Value) -> Result<Value> {
        let id = encode_segment(id)?;
        self.post(
            &format!("/subscriptions/{id}/metadata"),
            RequestOptions::tagged("metadata").body(entries),
        )
        .await
    }

    /// Deletes one metadata entry from a subscription. The API answers with
    /// an empty body, so the result is `null`.
    pub async fn delete_subscription_metadata(&self, id: impl Into<ResourceId>, name: &str) -> Result<Value> {
        let id = encode_segment(id)?;
        let name = encode_component(non_empty(name)?);
        self.delete(
            &format!("/subscriptions/{id}/metadata?name={name}"),
            RequestOptions::new(),
        )
        .await
    }

    async fn subscription_call(
        &self,
        id: impl Into<ResourceId>,
        suffix: &str,
        body: Value,
        verb: Verb,
        tag: &str,
    ) -> Result<Value> {
        let id = encode_segment(id)?;
        let path = format!("/subscriptions/{id}{suffix}");
        let options = RequestOptions::tagged(tag).body(body);
        match verb {
            Verb::Post => self.post(&path, options).await,
            Verb::Put => self.put(&path, options).await,
            Verb::Delete => self.delete(&path, options).await,
        }
    }

    fn family_segment(&self, family: Option<ResourceId>) -> Result<String> {
        match family {
            Some(family) => encode_segment(family),
            None => self
                .default_family()
                .map(encode_component)
                .ok_or_else(|| Error::BadParameter("No family specified.".to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Post,
    Put,
    Delete,
}

fn non_empty(value: &str) -> Result<&str> {
    ResourceId::from(value).validate()?;
    Ok(value)
}
