//! Embedded site configuration

use std::path::Path;

use dioxus_logger::tracing;

use ideal_core::parse_site_config;
use ideal_types::SiteConfig;

const SITE_TOML: &str = include_str!("../site.toml");

/// Parse the embedded `site.toml`, falling back to defaults if it is invalid.
pub fn site_config() -> SiteConfig {
    match parse_site_config(Path::new("site.toml"), SITE_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid embedded site config, using defaults");
            SiteConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = parse_site_config(Path::new("site.toml"), SITE_TOML).unwrap();
        assert!(config.splash.active);
        assert_eq!(config.splash.duration_ms(), 3500);
        assert_eq!(config.logo.src, "/Ideal-Logo.png");
        // Shipped without the social row
        assert!(config.social.visible_links().is_empty());
    }
}
