// Wishlist item types.
// Defines the item model, its discount evaluation, and identity semantics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single discount offer attached to a wishlist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountOffer {
    /// Percentage off the regular price.
    pub discount_pct: i64,
    /// Discounted price in minor currency units (cents).
    pub price: i64,
}

impl fmt::Display for DiscountOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Discount: {}% | Value: ~{}",
            self.discount_pct,
            self.price as f64 / 100.0
        )
    }
}

/// Wishlist record as returned by the store endpoint.
/// Only `name` and `subs` are consumed; every other upstream field is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WishlistRecord {
    pub name: String,
    pub subs: Vec<DiscountOffer>,
}

/// A wishlist item together with its offers and cache eviction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    /// Item name, unique within one wishlist snapshot.
    pub name: String,
    /// Epoch seconds after which a cached copy of this record is evicted.
    pub expiration_date: i64,
    /// Offers currently attached to the item. May be empty.
    pub subs: Vec<DiscountOffer>,
}

impl WishlistItem {
    /// Build an item from an upstream record, stamping the cache eviction time.
    pub fn from_record(record: WishlistRecord, expiration_date: i64) -> Self {
        Self {
            name: record.name,
            expiration_date,
            subs: record.subs,
        }
    }

    /// True iff any offer meets the minimum discount percentage.
    pub fn has_discount(&self, min_discount: i64) -> bool {
        self.subs.iter().any(|sub| sub.discount_pct >= min_discount)
    }

    /// Human-readable offer list, one offer per line.
    pub fn describe_offers(&self) -> String {
        self.subs
            .iter()
            .map(|sub| sub.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Identity is name + offers. Two snapshots of the same item compare equal no
/// matter when each one would fall out of the cache.
impl PartialEq for WishlistItem {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.subs == other.subs
    }
}

impl Eq for WishlistItem {}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, expiration_date: i64, offers: &[(i64, i64)]) -> WishlistItem {
        WishlistItem {
            name: name.to_string(),
            expiration_date,
            subs: offers
                .iter()
                .map(|&(discount_pct, price)| DiscountOffer { discount_pct, price })
                .collect(),
        }
    }

    #[test]
    fn test_equality_ignores_expiration() {
        let a = item("Game A", 100, &[(40, 999)]);
        let b = item("Game A", 999_999, &[(40, 999)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_respects_offers() {
        let a = item("Game A", 100, &[(40, 999)]);
        let b = item("Game A", 100, &[(50, 849)]);
        assert_ne!(a, b);

        let c = item("Game B", 100, &[(40, 999)]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_has_discount_threshold() {
        let it = item("Game A", 0, &[(10, 999), (40, 599)]);
        assert!(it.has_discount(30));
        assert!(it.has_discount(40));
        assert!(!it.has_discount(41));
    }

    #[test]
    fn test_has_discount_empty_offers() {
        let it = item("Game A", 0, &[]);
        assert!(!it.has_discount(0));
        assert!(!it.has_discount(30));
    }

    #[test]
    fn test_describe_offers() {
        let it = item("Game A", 0, &[(40, 999), (50, 849)]);
        assert_eq!(
            it.describe_offers(),
            "Discount: 40% | Value: ~9.99\nDiscount: 50% | Value: ~8.49"
        );
    }

    #[test]
    fn test_record_ignores_extra_fields() {
        let raw = serde_json::json!({
            "name": "Game A",
            "subs": [{"discount_pct": 40, "price": 999, "discount_block": "<div/>"}],
            "capsule": "https://example.invalid/capsule.jpg",
            "priority": 7,
        });
        let record: WishlistRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.name, "Game A");
        assert_eq!(record.subs.len(), 1);
    }

    #[test]
    fn test_record_requires_name_and_subs() {
        let missing_name = serde_json::json!({"subs": []});
        assert!(serde_json::from_value::<WishlistRecord>(missing_name).is_err());

        let missing_subs = serde_json::json!({"name": "Game A"});
        assert!(serde_json::from_value::<WishlistRecord>(missing_subs).is_err());
    }

    #[test]
    fn test_cache_document_round_trip() {
        let it = item("Game A", 1_700_000_000, &[(40, 999)]);
        let json = serde_json::to_string(&it).unwrap();
        let back: WishlistItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, it);
        assert_eq!(back.expiration_date, 1_700_000_000);
    }
}
