// Wishlist endpoint functions.
// Typed access to the paginated wishlist data endpoint.

use std::collections::HashMap;

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::Result;

use super::client::SteamClient;

/// One page of raw wishlist records, keyed by store item id.
pub type WishlistPage = HashMap<String, Value>;

impl SteamClient {
    /// Fetch one wishlist page.
    ///
    /// `Ok(None)` means pagination is over: a non-200 status or an empty body.
    /// The endpoint does not distinguish "last page" from a server error, so
    /// neither do we.
    pub async fn get_wishlist_page(&self, page: u32) -> Result<Option<WishlistPage>> {
        let response = self.get_page(page).await?;

        if response.status() != StatusCode::OK {
            tracing::debug!(page, status = %response.status(), "wishlist paging ended");
            return Ok(None);
        }

        let records: WishlistPage = response.json().await?;
        if records.is_empty() {
            tracing::debug!(page, "wishlist paging ended on empty page");
            return Ok(None);
        }

        Ok(Some(records))
    }
}
