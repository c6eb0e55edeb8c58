// Steam storefront HTTP client.
// Builds the shared reqwest client and issues wishlist page requests.

use std::time::Duration;

use reqwest::{
    Client, Response,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{Result, WishwatchError};

// A hung page fetch must not stall the poll loop indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one profile's wishlist data endpoint.
pub struct SteamClient {
    client: Client,
    wishlist_url: String,
}

impl SteamClient {
    /// Create a new client for the given wishlist data URL.
    pub fn new(wishlist_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("wishwatch"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WishwatchError::Api)?;

        Ok(Self {
            client,
            wishlist_url: wishlist_url.into(),
        })
    }

    /// Issue the GET for one wishlist page.
    pub(crate) async fn get_page(&self, page: u32) -> Result<Response> {
        let params = [("p", page.to_string()), ("v", "2".to_string())];
        let response = self
            .client
            .get(&self.wishlist_url)
            .query(&params)
            .send()
            .await
            .map_err(WishwatchError::Api)?;
        Ok(response)
    }
}
