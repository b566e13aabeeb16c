//! Shared configuration types for the IDEAL MENA site.
//!
//! Everything here is plain serde data so the same definitions can be parsed
//! on native targets (tests, tooling) and inside the wasm frontend.

pub mod social;

use serde::{Deserialize, Serialize};

pub use social::{SocialConfig, SocialLink, SocialLinks, SocialPlatform};

/// Splash duration used when the caller does not supply one.
pub const DEFAULT_SPLASH_DURATION_MS: u64 = 3000;

/// Clamp a caller-supplied duration to a non-negative millisecond count.
///
/// Negative values are treated as zero rather than rejected.
///
/// # Examples
/// ```
/// use ideal_types::clamp_duration_ms;
/// assert_eq!(clamp_duration_ms(3500), 3500);
/// assert_eq!(clamp_duration_ms(0), 0);
/// assert_eq!(clamp_duration_ms(-250), 0);
/// ```
pub fn clamp_duration_ms(ms: i64) -> u64 {
    ms.max(0) as u64
}

// ─────────────────────────────────────────────────────────────────────────────
// Site Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Complete configuration for the coming-soon page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub meta: PageMeta,
    pub logo: LogoConfig,
    pub splash: SplashConfig,
    pub social: SocialConfig,
    pub footer: FooterConfig,
}

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub lang: String,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: "IDEAL MENA | Transform • Lead • Inspire".to_string(),
            description: "Empowering people, strengthening institutions, inspiring change across the MENA region".to_string(),
            lang: "en".to_string(),
        }
    }
}

/// Logo image, consumed by reference only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    /// Path or URL of the image
    pub src: String,
    pub alt: String,
    /// Emit a `<link rel="preload">` for the image
    pub preload: bool,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            src: "/Ideal-Logo.png".to_string(),
            alt: "IDEAL Logo".to_string(),
            preload: true,
        }
    }
}

/// Loading overlay settings and copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// Activation flag handed to the overlay by the root shell
    pub active: bool,
    /// Display duration in milliseconds. Negative values clamp to zero.
    pub duration_ms: i64,
    pub message: String,
    pub tagline: String,
    /// Caption under the progress bar
    pub status_text: String,
}

impl SplashConfig {
    /// Display duration with negative values clamped to zero.
    pub fn duration_ms(&self) -> u64 {
        clamp_duration_ms(self.duration_ms)
    }
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            active: true,
            duration_ms: DEFAULT_SPLASH_DURATION_MS as i64,
            message: "We're working on a new look, a new feel, and a better experience."
                .to_string(),
            tagline: "Our website will be live soon.".to_string(),
            status_text: "INITIALIZING EXPERIENCE".to_string(),
        }
    }
}

/// Fixed footer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub brand: String,
    pub region: String,
    pub year: u16,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            brand: "IDEAL".to_string(),
            region: "MENA".to_string(),
            year: 2026,
        }
    }
}
