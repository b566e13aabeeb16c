//! Site configuration loading
//!
//! The site is configured from a single TOML document. The web frontend
//! embeds it at compile time and calls [`parse_site_config`]; native callers
//! can read it from disk with [`load_site_config`]. Missing keys fall back to
//! the defaults in `ideal-types`.

use std::fs;
use std::path::{Path, PathBuf};

use ideal_types::SiteConfig;

/// Errors that can occur during config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parse a TOML document. `path` only appears in error messages.
pub fn parse_site_config(path: &Path, contents: &str) -> Result<SiteConfig, ConfigError> {
    toml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a site config file from disk
pub fn load_site_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = parse_site_config(path, &contents)?;
    tracing::info!(
        path = %path.display(),
        duration_ms = config.splash.duration_ms(),
        social = config.social.show_social_links,
        "Loaded site config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideal_types::SocialPlatform;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ideal-core-{}-{}", std::process::id(), name))
    }

    #[test]
    fn parses_full_document() {
        let config = parse_site_config(
            Path::new("inline.toml"),
            r#"
            [meta]
            title = "Coming soon"

            [splash]
            active = true
            duration_ms = 3500
            status_text = "LOADING"

            [social]
            show_social_links = true

            [social.links]
            linkedin = "https://www.linkedin.com/company/ideal-mena"
            whatsapp = "https://wa.me/000000000"

            [footer]
            year = 2027
            "#,
        )
        .unwrap();

        assert_eq!(config.meta.title, "Coming soon");
        assert_eq!(config.meta.lang, "en");
        assert_eq!(config.splash.duration_ms(), 3500);
        assert_eq!(config.splash.status_text, "LOADING");
        assert_eq!(config.footer.year, 2027);
        assert_eq!(config.footer.brand, "IDEAL");

        let platforms: Vec<_> = config
            .social
            .visible_links()
            .into_iter()
            .map(|l| l.platform)
            .collect();
        assert_eq!(platforms, vec![SocialPlatform::LinkedIn, SocialPlatform::WhatsApp]);
    }

    #[test]
    fn empty_document_is_default() {
        let config = parse_site_config(Path::new("empty.toml"), "").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn parse_error_carries_path() {
        let err = parse_site_config(Path::new("site.toml"), "[splash\nduration_ms = 1").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse site.toml"));
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, PathBuf::from("site.toml")),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = parse_site_config(Path::new("inline.toml"), "[splash]\nduration_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let path = temp_path("missing.toml");
        let err = load_site_config(&path).unwrap_err();
        match err {
            ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = temp_path("site.toml");
        fs::write(&path, "[splash]\nduration_ms = -40\n").unwrap();

        let config = load_site_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.splash.duration_ms, -40);
        assert_eq!(config.splash.duration_ms(), 0);
    }
}
