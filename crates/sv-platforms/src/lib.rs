//! # Simulated Platform Adapters
//!
//! Maps (content, wallet, platform) to an opaque [`PlatformReceipt`].
//! Adapters are pure: they generate a synthetic external post id and
//! permalink without any network I/O. A real integration would swap the
//! receipt construction for the platform's API client behind the same
//! registry surface.

use chrono::Utc;
use sv_types::{PlatformReceipt, PostingStatus};
use thiserror::Error;
use uuid::Uuid;

/// The platforms this backend can simulate posting to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
    Linkedin,
    Youtube,
}

impl Platform {
    /// All supported platforms, in default fan-out order.
    pub const ALL: [Platform; 5] = [
        Platform::Twitter,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Youtube,
    ];

    /// Canonical lowercase name used in API payloads and status maps.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Linkedin => "linkedin",
            Platform::Youtube => "youtube",
        }
    }

    /// Short prefix used in synthetic external post ids.
    fn id_prefix(self) -> &'static str {
        match self {
            Platform::Twitter => "tw",
            Platform::Facebook => "fb",
            Platform::Instagram => "ig",
            Platform::Linkedin => "li",
            Platform::Youtube => "yt",
        }
    }

    /// Posting charge in tokens, consulted by the paid posting route.
    pub fn posting_charge(self) -> f64 {
        match self {
            Platform::Twitter => 0.001,
            Platform::Facebook => 0.001,
            Platform::Instagram => 0.0015,
            Platform::Linkedin => 0.002,
            Platform::Youtube => 0.003,
        }
    }

    /// Synthetic permalink for an external post id.
    fn permalink(self, post_id: &str) -> String {
        match self {
            Platform::Twitter => format!("https://twitter.com/user/status/{post_id}"),
            Platform::Facebook => format!("https://facebook.com/posts/{post_id}"),
            Platform::Instagram => format!("https://instagram.com/p/{post_id}"),
            Platform::Linkedin => format!("https://linkedin.com/posts/{post_id}"),
            Platform::Youtube => format!("https://youtube.com/post/{post_id}"),
        }
    }

    /// Parse a platform from its canonical API name.
    pub fn parse(name: &str) -> Result<Self, PlatformError> {
        match name {
            "twitter" => Ok(Platform::Twitter),
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            "linkedin" => Ok(Platform::Linkedin),
            "youtube" => Ok(Platform::Youtube),
            other => Err(PlatformError::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// Errors from the adapter registry.
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    /// No adapter variant exists for the requested platform name.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

/// Registry dispatching posting requests to the simulated adapters.
///
/// Held in the gateway's shared state; stateless and cheap to share.
#[derive(Debug, Clone, Default)]
pub struct PlatformRegistry;

impl PlatformRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Simulate posting `content` on behalf of `wallet` to one platform.
    pub fn publish(
        &self,
        platform: Platform,
        content: &str,
        wallet: &str,
    ) -> PlatformReceipt {
        let external_post_id = format!(
            "{}_{}",
            platform.id_prefix(),
            &Uuid::new_v4().simple().to_string()[..8]
        );
        tracing::debug!(
            platform = platform.name(),
            wallet,
            content_len = content.len(),
            external_post_id = %external_post_id,
            "simulated platform post"
        );
        PlatformReceipt {
            platform: platform.name().to_string(),
            url: platform.permalink(&external_post_id),
            external_post_id,
            timestamp: Utc::now(),
        }
    }

    /// Simulate posting to a named platform, failing on unknown names.
    pub fn publish_named(
        &self,
        platform: &str,
        content: &str,
        wallet: &str,
    ) -> Result<PlatformReceipt, PlatformError> {
        Ok(self.publish(Platform::parse(platform)?, content, wallet))
    }

    /// Fan out to the requested platforms and aggregate the receipts.
    ///
    /// Unknown names fail the whole call rather than being skipped, so a
    /// typo never silently drops a platform.
    pub fn publish_all(
        &self,
        platforms: &[String],
        content: &str,
        wallet: &str,
    ) -> Result<PostingStatus, PlatformError> {
        let mut status = PostingStatus::default();
        for name in platforms {
            status.record(self.publish_named(name, content, wallet)?);
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_carries_platform_prefix_and_permalink() {
        let registry = PlatformRegistry::new();
        let receipt = registry.publish(Platform::Twitter, "hello", "0xw1");
        assert_eq!(receipt.platform, "twitter");
        assert!(receipt.external_post_id.starts_with("tw_"));
        assert!(receipt.url.contains(&receipt.external_post_id));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let registry = PlatformRegistry::new();
        let err = registry.publish_named("myspace", "hello", "0xw1").unwrap_err();
        assert!(matches!(err, PlatformError::UnsupportedPlatform(_)));
    }

    #[test]
    fn fan_out_aggregates_one_receipt_per_platform() {
        let registry = PlatformRegistry::new();
        let names: Vec<String> = Platform::ALL.iter().map(|p| p.name().to_string()).collect();
        let status = registry.publish_all(&names, "hello", "0xw1").unwrap();
        assert_eq!(status.0.len(), Platform::ALL.len());
        assert!(status.0.contains_key("youtube"));
    }

    #[test]
    fn fan_out_fails_closed_on_typo() {
        let registry = PlatformRegistry::new();
        let names = vec!["twitter".to_string(), "twitterr".to_string()];
        assert!(registry.publish_all(&names, "hello", "0xw1").is_err());
    }

    #[test]
    fn charges_match_schedule() {
        assert_eq!(Platform::Twitter.posting_charge(), 0.001);
        assert_eq!(Platform::Youtube.posting_charge(), 0.003);
    }
}
