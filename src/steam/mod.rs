// Steam storefront module.
// Client and types for the public wishlist data endpoint.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::SteamClient;
pub use endpoints::WishlistPage;
pub use types::{DiscountOffer, WishlistItem, WishlistRecord};
