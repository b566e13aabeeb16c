//! Social media links shown under the progress bar.

use serde::{Deserialize, Serialize};

/// Supported social platforms, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    LinkedIn,
    Instagram,
    WhatsApp,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 3] = [Self::LinkedIn, Self::Instagram, Self::WhatsApp];

    /// Human readable name, used for link labels
    pub fn label(self) -> &'static str {
        match self {
            Self::LinkedIn => "LinkedIn",
            Self::Instagram => "Instagram",
            Self::WhatsApp => "WhatsApp",
        }
    }

    /// Font Awesome brand icon class
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::LinkedIn => "fa-brands fa-linkedin-in",
            Self::Instagram => "fa-brands fa-instagram",
            Self::WhatsApp => "fa-brands fa-whatsapp",
        }
    }
}

/// Per-platform URLs. Missing or blank entries are not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub whatsapp: Option<String>,
}

impl SocialLinks {
    pub fn get(&self, platform: SocialPlatform) -> Option<&str> {
        let url = match platform {
            SocialPlatform::LinkedIn => self.linkedin.as_deref(),
            SocialPlatform::Instagram => self.instagram.as_deref(),
            SocialPlatform::WhatsApp => self.whatsapp.as_deref(),
        };
        url.map(str::trim).filter(|u| !u.is_empty())
    }
}

/// A resolved link ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

/// Optional social row on the loading overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub show_social_links: bool,
    pub links: Option<SocialLinks>,
}

impl SocialConfig {
    /// Links to render, empty when the row is disabled.
    pub fn visible_links(&self) -> Vec<SocialLink> {
        if !self.show_social_links {
            return Vec::new();
        }
        let Some(links) = &self.links else {
            return Vec::new();
        };
        SocialPlatform::ALL
            .into_iter()
            .filter_map(|platform| {
                links.get(platform).map(|url| SocialLink {
                    platform,
                    url: url.to_string(),
                })
            })
            .collect()
    }
}
