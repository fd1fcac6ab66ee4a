//! Links to Chargify's hosted pages.
//!
//! Hosted pages are served from the account's public host and never carry the
//! API key. Pages that act on an existing record are signed with a short
//! token derived from the site shared key.

use crate::{
    client::API_HOST,
    path::{encode_component, encode_segment, ResourceId},
    Client, Error, Result,
};
use sha1::{Digest, Sha1};
use url::Url;

/// The hosted page used when no page name is given.
pub const UPDATE_PAYMENT: &str = "update_payment";

/// Hex characters of the SHA-1 digest kept in a hosted page token.
const TOKEN_LEN: usize = 10;

/// Signs a hosted page link: the first ten hex characters of
/// `sha1("{page}--{id}--{site_key}")`.
///
/// # Examples
///
/// ```
/// use chargify_api::hosted::page_token;
///
/// assert_eq!(page_token("update_payment", "42", "shared"), "b534b2c504");
/// ```
pub fn page_token(page: &str, id: &str, site_key: &str) -> String {
    let digest = Sha1::digest(format!("{page}--{id}--{site_key}").as_bytes());
    let mut token = hex::encode(digest);
    token.truncate(TOKEN_LEN);
    token
}

impl Client {
    /// Link to the hosted page `page` for record `id`, e.g. the
    /// `update_payment` page of a subscription.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if the client has no site shared key, and
    /// [`Error::BadParameter`] for an empty page name or identifier.
    pub fn hosted_page_url(&self, page: &str, id: impl Into<ResourceId>) -> Result<Url> {
        let site_key = self.credential().site_key.as_deref().ok_or_else(|| {
            Error::Configuration("a site shared key is required for hosted pages".to_string())
        })?;
        if page.is_empty() {
            return Err(Error::BadParameter("hosted page name is empty".to_string()));
        }

        let id = id.into();
        id.validate()?;
        let token = page_token(page, &id.to_string(), site_key);

        let mut url = self.public_url()?;
        url.set_path(&format!(
            "{}/{}/{token}",
            encode_component(page),
            encode_segment(id)?
        ));
        Ok(url)
    }

    /// Link to the payment update page of subscription `id`.
    ///
    /// # Errors
    ///
    /// As [`Client::hosted_page_url`].
    pub fn update_payment_url(&self, id: impl Into<ResourceId>) -> Result<Url> {
        self.hosted_page_url(UPDATE_PAYMENT, id)
    }

    /// Link to the public signup page of a product.
    ///
    /// # Errors
    ///
    /// [`Error::BadParameter`] for an empty product identifier.
    pub fn signup_page_url(&self, product: impl Into<ResourceId>) -> Result<Url> {
        let product = encode_segment(product)?;
        let mut url = self.public_url()?;
        url.set_path(&format!("h/{product}/subscriptions/new"));
        Ok(url)
    }

    fn public_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!(
            "https://{}.{API_HOST}/",
            self.credential().subdomain
        ))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(site_key: Option<&str>) -> Client {
        let builder = Client::builder().subdomain("acme").api_key("secret");
        match site_key {
            Some(key) => builder.site_key(key).build().unwrap(),
            None => builder.build().unwrap(),
        }
    }

    #[test]
    fn test_page_token_matches_known_digests() {
        // sha1("update_payment--42--shared") = b534b2c504fe1861ae40e4d8c1aab3cef4ad4b58
        assert_eq!(page_token("update_payment", "42", "shared"), "b534b2c504");
        // sha1("billing_portal--7--shared") = 212cf789c6bc26960723a61693b1dc76c99ba43b
        assert_eq!(page_token("billing_portal", "7", "shared"), "212cf789c6");
    }

    #[test]
    fn test_hosted_page_url() {
        let client = client(Some("shared"));
        assert_eq!(
            client.update_payment_url(42u64).unwrap().as_str(),
            "https://acme.chargify.com/update_payment/42/b534b2c504"
        );
        assert_eq!(
            client.hosted_page_url("billing_portal", 7u64).unwrap().as_str(),
            "https://acme.chargify.com/billing_portal/7/212cf789c6"
        );
    }

    #[test]
    fn test_hosted_page_url_never_carries_the_api_key() {
        let client = Client::builder()
            .subdomain("acme")
            .api_key("secret")
            .site_key("shared")
            .base_url("http://127.0.0.1:9999")
            .build()
            .unwrap();
        let url = client.update_payment_url(42u64).unwrap();
        assert_eq!(url.username(), "");
        assert_eq!(url.host_str(), Some("acme.chargify.com"));
    }

    #[test]
    fn test_hosted_page_requires_site_key() {
        assert!(matches!(
            client(None).update_payment_url(42u64),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            client(Some("shared")).update_payment_url(""),
            Err(Error::BadParameter(_))
        ));
    }

    #[test]
    fn test_signup_page_url() {
        let url = client(None).signup_page_url("pro-plan").unwrap();
        assert_eq!(url.as_str(), "https://acme.chargify.com/h/pro-plan/subscriptions/new");
    }
}
