// Local persistence module.
// Stores the settings document and the notified-items cache on disk.

pub mod cache;
pub mod paths;

pub use cache::{CacheStore, SharedCache};
pub use paths::{cached_data_path, settings_path};
