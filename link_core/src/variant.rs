//! # Link Variants
//!
//! A shared link comes in three independent flavours. Each is edited and
//! copied on its own; nothing ties one variant's text to another's.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which representation of the shared link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Plain URL
    #[default]
    Url,
    /// Embeddable markup snippet (an `<iframe>`)
    Embed,
    /// Anonymous link that hides the sharer
    Anonymous,
}

impl LinkKind {
    /// All kinds, in tab order
    pub const ALL: [LinkKind; 3] = [LinkKind::Url, LinkKind::Embed, LinkKind::Anonymous];

    /// Stable lowercase identifier
    pub fn key(self) -> &'static str {
        match self {
            LinkKind::Url => "url",
            LinkKind::Embed => "embed",
            LinkKind::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Seeded URL value
pub const DEFAULT_URL: &str = "https://example.com/your-content";
/// Seeded embed snippet
pub const DEFAULT_EMBED: &str = r#"<iframe src="https://example.com/embed/your-content" width="560" height="315" frameborder="0" allowfullscreen></iframe>"#;
/// Seeded anonymous link
pub const DEFAULT_ANONYMOUS: &str = "https://anon.link/secret/abc123def";

/// The text of every variant, one slot per [`LinkKind`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkValues {
    pub url: String,
    pub embed: String,
    pub anonymous: String,
}

impl Default for LinkValues {
    fn default() -> Self {
        LinkValues {
            url: DEFAULT_URL.to_string(),
            embed: DEFAULT_EMBED.to_string(),
            anonymous: DEFAULT_ANONYMOUS.to_string(),
        }
    }
}

impl LinkValues {
    pub fn new(url: impl Into<String>, embed: impl Into<String>, anonymous: impl Into<String>) -> Self {
        LinkValues {
            url: url.into(),
            embed: embed.into(),
            anonymous: anonymous.into(),
        }
    }

    pub fn get(&self, kind: LinkKind) -> &str {
        match kind {
            LinkKind::Url => &self.url,
            LinkKind::Embed => &self.embed,
            LinkKind::Anonymous => &self.anonymous,
        }
    }

    /// Overwrite a slot. No validation: empty strings and broken markup are kept as-is.
    pub fn set(&mut self, kind: LinkKind, text: impl Into<String>) {
        let slot = match kind {
            LinkKind::Url => &mut self.url,
            LinkKind::Embed => &mut self.embed,
            LinkKind::Anonymous => &mut self.anonymous,
        };
        *slot = text.into();
    }
}
