// Settings provider.
// Loads the persisted settings document, writes defaults on first run, and
// resolves the effective runtime profile once at startup.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WishwatchError};

const WISHLIST_URL_BASE: &str = "https://store.steampowered.com";
const SECS_IN_HOUR: f64 = 3600.0;

/// Poll interval used instead of the configured hours when debugging.
const DEBUG_REQUEST_INTERVAL: Duration = Duration::from_secs(10);

/// Persisted settings document. All stored values are numeric; the debug flag
/// lives only in memory and is never written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Steam profile id owning the wishlist. Null until the user fills it in.
    pub profile_id: Option<u64>,
    /// Hours between polling cycles.
    pub interval: f64,
    /// Minimum discount percentage worth notifying about.
    pub min_discount: i64,
    /// Seconds to wait between wishlist pages.
    pub page_delay: f64,
    /// Seconds a notification popup stays visible.
    pub notification_duration: f64,
    /// Days a cached entry keeps suppressing re-notification.
    pub expiration_days: i64,
    /// Minutes to wait after process start before the first cycle.
    pub start_delay: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile_id: None,
            interval: 4.0,
            min_discount: 30,
            page_delay: 1.0,
            notification_duration: 5.0,
            expiration_days: 7,
            start_delay: 3.0,
        }
    }
}

/// Command line overrides for the settings document.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile_id: Option<u64>,
    pub interval_minutes: Option<u64>,
    pub min_discount: Option<i64>,
}

/// Effective runtime values, resolved once from settings + debug flag so the
/// rest of the code never branches on debug mode.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Wishlist data URL with the profile id substituted in.
    pub wishlist_url: String,
    /// Minimum discount percentage worth notifying about.
    pub min_discount: i64,
    /// Days until a cached entry expires. Negative in debug mode, which makes
    /// every cached entry immediately eligible for re-notification on reload.
    pub expiration_days: i64,
    /// Delay between wishlist pages.
    pub page_delay: Duration,
    /// Delay between polling cycles.
    pub request_interval: Duration,
    /// Delay before the first cycle after process start.
    pub start_delay: Duration,
    /// How long a notification popup stays visible.
    pub notification_timeout: Duration,
    /// Minimum spacing between consecutive notifications.
    pub notification_spacing: Duration,
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// On first run the default document is written out and `ConfigMissing` is
    /// returned so the caller can stop and let the user fill it in. An
    /// unreadable or non-numeric document is `ConfigInvalid`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "no settings found, writing defaults");
                Self::default().write(path)?;
                return Err(WishwatchError::ConfigMissing {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map_err(|e| WishwatchError::ConfigInvalid {
            reason: format!("{}: {e}", path.display()),
        })
    }

    /// Write this settings document as pretty JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the effective runtime profile, applying command line overrides
    /// and debug substitutions in one place.
    pub fn resolve(&self, debug: bool, overrides: &Overrides) -> Result<Profile> {
        let profile_id = overrides
            .profile_id
            .or(self.profile_id)
            .ok_or_else(|| WishwatchError::ConfigInvalid {
                reason: "profile_id is not set".to_string(),
            })?;

        let interval_secs = match overrides.interval_minutes {
            Some(minutes) => (minutes * 60) as f64,
            None => non_negative(self.interval, "interval")? * SECS_IN_HOUR,
        };

        Ok(Profile {
            wishlist_url: format!(
                "{WISHLIST_URL_BASE}/wishlist/profiles/{profile_id}/wishlistdata"
            ),
            min_discount: overrides.min_discount.unwrap_or(self.min_discount),
            expiration_days: if debug { -1 } else { self.expiration_days },
            page_delay: Duration::from_secs_f64(non_negative(self.page_delay, "page_delay")?),
            request_interval: if debug {
                DEBUG_REQUEST_INTERVAL
            } else {
                Duration::from_secs_f64(interval_secs)
            },
            start_delay: if debug {
                Duration::ZERO
            } else {
                Duration::from_secs_f64(non_negative(self.start_delay, "start_delay")? * 60.0)
            },
            notification_timeout: Duration::from_secs_f64(non_negative(
                self.notification_duration,
                "notification_duration",
            )?),
            notification_spacing: Duration::from_secs_f64(
                non_negative(self.notification_duration, "notification_duration")? + 1.0,
            ),
        })
    }
}

fn non_negative(value: f64, key: &str) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(WishwatchError::ConfigInvalid {
            reason: format!("{key} must be a non-negative number, got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn configured() -> Settings {
        Settings {
            profile_id: Some(76561198000000000),
            ..Settings::default()
        }
    }

    #[test]
    fn test_first_run_writes_defaults_and_signals_exit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, WishwatchError::ConfigMissing { .. }));

        // The written document is the default one, ready for the user to edit.
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written["profile_id"].is_null());
        assert_eq!(written["interval"], 4.0);
        assert_eq!(written["min_discount"], 30);
        assert!(written.get("debug").is_none());
    }

    #[test]
    fn test_second_run_loads_written_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let _ = Settings::load(&path);
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.profile_id, None);
        assert_eq!(settings.min_discount, 30);
        assert_eq!(settings.expiration_days, 7);
    }

    #[test]
    fn test_non_numeric_value_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{"profile_id": 1, "interval": "four"}"#).unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, WishwatchError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_stray_debug_key_is_tolerated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        let mut doc = serde_json::to_value(configured()).unwrap();
        doc["debug"] = serde_json::Value::Bool(true);
        fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

        assert!(Settings::load(&path).is_ok());
    }

    #[test]
    fn test_resolve_requires_profile_id() {
        let err = Settings::default()
            .resolve(false, &Overrides::default())
            .unwrap_err();
        assert!(matches!(err, WishwatchError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_resolve_builds_wishlist_url() {
        let profile = configured().resolve(false, &Overrides::default()).unwrap();
        assert_eq!(
            profile.wishlist_url,
            "https://store.steampowered.com/wishlist/profiles/76561198000000000/wishlistdata"
        );
    }

    #[test]
    fn test_resolve_converts_units() {
        let profile = configured().resolve(false, &Overrides::default()).unwrap();
        assert_eq!(profile.request_interval, Duration::from_secs(4 * 3600));
        assert_eq!(profile.start_delay, Duration::from_secs(3 * 60));
        assert_eq!(profile.page_delay, Duration::from_secs(1));
        assert_eq!(profile.notification_timeout, Duration::from_secs(5));
        assert_eq!(profile.notification_spacing, Duration::from_secs(6));
        assert_eq!(profile.expiration_days, 7);
    }

    #[test]
    fn test_resolve_accepts_fractional_hours() {
        let settings = Settings {
            interval: 0.5,
            ..configured()
        };
        let profile = settings.resolve(false, &Overrides::default()).unwrap();
        assert_eq!(profile.request_interval, Duration::from_secs(1800));
    }

    #[test]
    fn test_debug_substitutions() {
        let profile = configured().resolve(true, &Overrides::default()).unwrap();
        assert_eq!(profile.request_interval, Duration::from_secs(10));
        assert_eq!(profile.start_delay, Duration::ZERO);
        assert_eq!(profile.expiration_days, -1);
    }

    #[test]
    fn test_overrides_win_over_document() {
        let overrides = Overrides {
            profile_id: Some(42),
            interval_minutes: Some(15),
            min_discount: Some(50),
        };
        let profile = Settings::default().resolve(false, &overrides).unwrap();
        assert!(profile.wishlist_url.contains("/profiles/42/"));
        assert_eq!(profile.request_interval, Duration::from_secs(15 * 60));
        assert_eq!(profile.min_discount, 50);
    }

    #[test]
    fn test_negative_delay_is_invalid() {
        let settings = Settings {
            page_delay: -1.0,
            ..configured()
        };
        let err = settings.resolve(false, &Overrides::default()).unwrap_err();
        assert!(matches!(err, WishwatchError::ConfigInvalid { .. }));
    }
}
