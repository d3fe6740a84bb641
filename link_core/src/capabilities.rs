//! # Host Capabilities
//!
//! The share dialog never talks to the operating system directly. Everything
//! with a side effect goes through one of these traits, handed to the
//! components when they are built:
//!
//! - [`Notifier`] - the only user-facing reporting channel (toasts)
//! - [`Clipboard`] - text and image clipboard writes
//! - [`FileSaver`] - writes the rendered QR bitmap to a picked destination
//!
//! All methods take `&self`; implementations that need mutation keep it
//! behind interior mutability. Everything runs on the UI thread, so `Rc`
//! handles are enough.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::errors::ShareResult;
use crate::qr::Bitmap;

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A single user notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Notice {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Shorthand for a success notice
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notice::new(title, description, Severity::Success)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Reports success and failure to the user
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// System clipboard access
pub trait Clipboard {
    /// Place `text` on the clipboard verbatim
    fn write_text(&self, text: &str) -> ShareResult<()>;

    /// Place a raster image on the clipboard.
    ///
    /// Hosts without image clipboard support return
    /// [`ShareError::ClipboardUnsupported`](crate::errors::ShareError::ClipboardUnsupported).
    fn write_image(&self, bitmap: &Bitmap) -> ShareResult<()>;
}

/// Where the user chose to put a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDestination {
    /// Write the bitmap to this path
    Chosen(PathBuf),
    /// The user dismissed the save dialog
    Cancelled,
}

impl From<Option<PathBuf>> for SaveDestination {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(SaveDestination::Cancelled, SaveDestination::Chosen)
    }
}

/// Exports a bitmap as an image file.
///
/// Picking the destination is the host's job and may take as long as the
/// user likes, so it happens before this is called, off the update loop.
pub trait FileSaver {
    fn save_as(&self, path: &Path, bitmap: &Bitmap) -> ShareResult<()>;
}

/// Capability handles shared by the modal and its QR panel
#[derive(Clone)]
pub struct Services {
    pub notifier: Rc<dyn Notifier>,
    pub clipboard: Rc<dyn Clipboard>,
    pub saver: Rc<dyn FileSaver>,
}

impl Services {
    pub fn new(
        notifier: Rc<dyn Notifier>,
        clipboard: Rc<dyn Clipboard>,
        saver: Rc<dyn FileSaver>,
    ) -> Self {
        Services {
            notifier,
            clipboard,
            saver,
        }
    }

    /// Forward a notice to the notifier
    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
