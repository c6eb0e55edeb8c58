// Wishlist poller.
// Walks the paginated wishlist endpoint and feeds discounted, not-yet-notified
// items into the notification queue.

use chrono::Utc;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::Profile;
use crate::error::Result;
use crate::notifier::PendingSet;
use crate::steam::{SteamClient, WishlistItem, WishlistPage, WishlistRecord};
use crate::store::SharedCache;

/// Source of wishlist pages. Production uses [`SteamClient`]; tests substitute
/// a scripted source.
pub trait WishlistSource {
    /// Fetch one page. `Ok(None)` means pagination is over.
    async fn fetch_page(&self, page: u32) -> Result<Option<WishlistPage>>;
}

impl WishlistSource for SteamClient {
    async fn fetch_page(&self, page: u32) -> Result<Option<WishlistPage>> {
        self.get_wishlist_page(page).await
    }
}

/// Drives the polling cycles and decides which items get queued.
pub struct Poller<S> {
    source: S,
    profile: Profile,
    cache: SharedCache,
    pending: PendingSet,
    queue: UnboundedSender<WishlistItem>,
}

impl<S: WishlistSource> Poller<S> {
    pub fn new(
        source: S,
        profile: Profile,
        cache: SharedCache,
        pending: PendingSet,
        queue: UnboundedSender<WishlistItem>,
    ) -> Self {
        Self {
            source,
            profile,
            cache,
            pending,
            queue,
        }
    }

    /// Poll forever: one cycle, then sleep the request interval, repeat.
    pub async fn run(mut self) {
        loop {
            self.run_cycle().await;
            tracing::debug!(
                secs = self.profile.request_interval.as_secs(),
                "cycle finished, sleeping until the next one"
            );
            tokio::time::sleep(self.profile.request_interval).await;
        }
    }

    /// Walk pages from 0 until the source reports the end of pagination.
    ///
    /// A fetch error ends the cycle the same way a non-200 page does: no
    /// retry, remaining pages are left for the next cycle.
    pub async fn run_cycle(&mut self) {
        let mut page = 0;
        loop {
            match self.source.fetch_page(page).await {
                Ok(Some(records)) => self.process_page(records).await,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(page, error = %e, "wishlist page fetch failed, ending cycle");
                    break;
                }
            }
            page += 1;
            tokio::time::sleep(self.profile.page_delay).await;
        }
    }

    async fn process_page(&self, records: WishlistPage) {
        let expiration_date =
            (Utc::now() + chrono::Duration::days(self.profile.expiration_days)).timestamp();

        for (id, value) in records {
            let record: WishlistRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "skipping malformed wishlist record");
                    continue;
                }
            };

            let item = WishlistItem::from_record(record, expiration_date);
            if !item.has_discount(self.profile.min_discount) {
                continue;
            }
            if self.cache.lock().await.contains(&item) {
                continue;
            }
            // Marked before sending so a later cycle cannot queue the same
            // item while this one still sits in the channel undelivered.
            if !self.pending.lock().await.insert(item.name.clone()) {
                continue;
            }

            tracing::info!(name = %item.name, "queueing discounted item");
            if self.queue.send(item).is_err() {
                tracing::error!("notification worker is gone, dropping item");
            }
        }
    }
}
