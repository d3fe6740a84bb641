//! # Share Dialog Configuration
//!
//! Product content that differs between deployments: the dialog title, tab
//! labels, which variant is excluded from QR generation, the seeded values
//! and the QR visual parameters.
//!
//! Two presets ship built in. [`ShareConfig::standard`] is the Iframe
//! branding with the embed snippet excluded from QR codes;
//! [`ShareConfig::ice_cream`] is the older Ice Cream branding where the raw
//! URL is excluded instead.
//!
//! Configs are plain JSON:
//!
//! ```rust
//! use link_core::config::ShareConfig;
//! use link_core::variant::LinkKind;
//!
//! let json = serde_json::to_string(&ShareConfig::ice_cream()).unwrap();
//! let config = ShareConfig::from_json(&json).unwrap();
//! assert_eq!(config.qr_excluded, LinkKind::Url);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ShareError, ShareResult};
use crate::qr::{QrStyle, MAX_MARGIN, MAX_PIXEL_WIDTH};
use crate::variant::{LinkKind, LinkValues, DEFAULT_ANONYMOUS, DEFAULT_URL};

/// The variant kind that may not be rendered as a QR code by default
pub const DEFAULT_QR_EXCLUDED: LinkKind = LinkKind::Embed;

/// Environment variable the GUI reads a config path from
pub const CONFIG_ENV: &str = "LINKSHARE_CONFIG";

/// Display text for one tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantLabel {
    /// Tab and field label
    pub label: String,
    /// Placeholder shown in an empty input
    pub placeholder: String,
    /// Short explanation under the input
    pub hint: String,
}

impl VariantLabel {
    fn new(label: &str, placeholder: &str, hint: &str) -> Self {
        VariantLabel {
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            hint: hint.to_string(),
        }
    }
}

/// Labels for every tab, one per [`LinkKind`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantLabels {
    pub url: VariantLabel,
    pub embed: VariantLabel,
    pub anonymous: VariantLabel,
}

impl VariantLabels {
    pub fn get(&self, kind: LinkKind) -> &VariantLabel {
        match kind {
            LinkKind::Url => &self.url,
            LinkKind::Embed => &self.embed,
            LinkKind::Anonymous => &self.anonymous,
        }
    }
}

/// Share dialog configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Dialog title
    pub title: String,
    pub labels: VariantLabels,
    /// The one kind for which QR generation is not offered
    #[serde(default = "default_qr_excluded")]
    pub qr_excluded: LinkKind,
    /// Values the dialog starts with
    #[serde(default)]
    pub seeds: LinkValues,
    #[serde(default)]
    pub qr: QrStyle,
}

fn default_qr_excluded() -> LinkKind {
    DEFAULT_QR_EXCLUDED
}

impl Default for ShareConfig {
    fn default() -> Self {
        ShareConfig::standard()
    }
}

impl ShareConfig {
    /// Iframe branding; the embed snippet gets no QR code
    pub fn standard() -> Self {
        ShareConfig {
            title: "Share a link".to_string(),
            labels: VariantLabels {
                url: VariantLabel::new(
                    "URL Link",
                    "Enter your URL",
                    "Share your regular URL link.",
                ),
                embed: VariantLabel::new(
                    "Iframe",
                    "Enter your iframe code",
                    "Embed your content on another page. QR code generation is not available for iframe snippets.",
                ),
                anonymous: VariantLabel::new(
                    "Anonymous",
                    "Enter your anonymous link",
                    "Share content anonymously without revealing your identity.",
                ),
            },
            qr_excluded: DEFAULT_QR_EXCLUDED,
            seeds: LinkValues::default(),
            qr: QrStyle::default(),
        }
    }

    /// Ice Cream branding; the raw URL gets no QR code
    pub fn ice_cream() -> Self {
        ShareConfig {
            title: "Share a link".to_string(),
            labels: VariantLabels {
                url: VariantLabel::new(
                    "URL Link",
                    "Enter your URL",
                    "Share your regular URL link. QR code generation is not available for URL links.",
                ),
                embed: VariantLabel::new(
                    "Ice Cream",
                    "Enter your ice cream link",
                    "Share your sweet ice cream content with a special themed link.",
                ),
                anonymous: VariantLabel::new(
                    "Anonymous",
                    "Enter your anonymous link",
                    "Share content anonymously without revealing your identity.",
                ),
            },
            qr_excluded: LinkKind::Url,
            seeds: LinkValues::new(
                DEFAULT_URL,
                "https://icecream.app/sweet-treats/12345",
                DEFAULT_ANONYMOUS,
            ),
            qr: QrStyle::default(),
        }
    }

    /// Whether a QR code may be generated for `kind`
    pub fn is_qr_eligible(&self, kind: LinkKind) -> bool {
        kind != self.qr_excluded
    }

    pub fn label(&self, kind: LinkKind) -> &VariantLabel {
        self.labels.get(kind)
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> ShareResult<Self> {
        let config: ShareConfig = serde_json::from_str(json)
            .map_err(|e| ShareError::invalid_config("<document>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> ShareResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            ShareError::invalid_config(path.display().to_string(), format!("Failed to read: {}", e))
        })?;
        Self::from_json(&json)
    }

    /// Load `path` if given, falling back to [`ShareConfig::standard`] on any problem
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::standard();
        };
        match Self::load(path) {
            Ok(config) => {
                log::debug!("Loaded share config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Error loading config, using defaults: {}", err);
                Self::standard()
            }
        }
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> ShareResult<()> {
        if self.title.trim().is_empty() {
            return Err(ShareError::invalid_config("title", "must not be empty"));
        }
        for kind in LinkKind::ALL {
            if self.label(kind).label.trim().is_empty() {
                return Err(ShareError::invalid_config(
                    format!("labels.{}.label", kind),
                    "must not be empty",
                ));
            }
        }
        if self.qr.pixel_width == 0 || self.qr.pixel_width > MAX_PIXEL_WIDTH {
            return Err(ShareError::invalid_config(
                "qr.pixel_width",
                format!("must be between 1 and {}", MAX_PIXEL_WIDTH),
            ));
        }
        if self.qr.margin > MAX_MARGIN {
            return Err(ShareError::invalid_config(
                "qr.margin",
                format!("must be at most {} modules", MAX_MARGIN),
            ));
        }
        if self.qr.filename.trim().is_empty() {
            return Err(ShareError::invalid_config("qr.filename", "must not be empty"));
        }
        Ok(())
    }
}
