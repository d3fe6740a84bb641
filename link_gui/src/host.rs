//! Host capabilities for the desktop build.
//!
//! - `SystemClipboard` - arboard, kept alive for the whole session so X11
//!   selections survive after a write
//! - `pick_destination` - native "Save As" dialog via rfd, awaited in a task
//! - `PngSaver` - writes the picked file as PNG
//! - `ToastQueue` - notifier backing the toast stack in the UI

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use chrono::{DateTime, Duration, Local};
use uuid::Uuid;

use link_core::{
    Bitmap, Clipboard, FileSaver, Notice, Notifier, SaveDestination, ShareError, ShareResult,
};

/// How long a toast stays on screen
pub const TOAST_LIFETIME_SECS: i64 = 4;

/// Maximum toasts shown at once; older ones are dropped first
const MAX_TOASTS: usize = 4;

/// System clipboard via arboard
#[derive(Default)]
pub struct SystemClipboard {
    inner: RefCell<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    fn with_clipboard<T>(
        &self,
        payload: &str,
        write: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> ShareResult<T> {
        let mut slot = self.inner.borrow_mut();
        if slot.is_none() {
            *slot = Some(arboard::Clipboard::new().map_err(|e| map_clipboard_error(payload, e))?);
        }
        match slot.as_mut() {
            Some(clipboard) => write(clipboard).map_err(|e| map_clipboard_error(payload, e)),
            None => Err(ShareError::clipboard_unsupported(payload)),
        }
    }
}

fn map_clipboard_error(payload: &str, err: arboard::Error) -> ShareError {
    match err {
        arboard::Error::ClipboardNotSupported => ShareError::clipboard_unsupported(payload),
        arboard::Error::ConversionFailure if payload == "image" => {
            ShareError::clipboard_unsupported(payload)
        }
        other => ShareError::clipboard_write(other.to_string()),
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> ShareResult<()> {
        self.with_clipboard("text", |clipboard| clipboard.set_text(text))
    }

    fn write_image(&self, bitmap: &Bitmap) -> ShareResult<()> {
        let image = arboard::ImageData {
            width: bitmap.width() as usize,
            height: bitmap.height() as usize,
            bytes: bitmap.as_raw().into(),
        };
        self.with_clipboard("image", |clipboard| clipboard.set_image(image))
    }
}

/// Ask for a destination with the native "Save As" dialog.
///
/// Async so the dialog stays open without stalling the update loop; run it
/// through `Task::perform`.
pub async fn pick_destination(filename: String) -> SaveDestination {
    rfd::AsyncFileDialog::new()
        .set_file_name(filename)
        .add_filter("PNG image", &["png"])
        .save_file()
        .await
        .map(|handle| handle.path().to_path_buf())
        .into()
}

/// Writes the bitmap as a PNG file
#[derive(Debug, Default)]
pub struct PngSaver;

impl FileSaver for PngSaver {
    fn save_as(&self, path: &Path, bitmap: &Bitmap) -> ShareResult<()> {
        let target = path.display().to_string();
        let png = bitmap
            .to_png()
            .map_err(|e| ShareError::save_failure(target.clone(), e.to_string()))?;
        fs::write(path, png).map_err(|e| ShareError::save_failure(target, e.to_string()))
    }
}

/// A notice on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub notice: Notice,
    pub shown_at: DateTime<Local>,
}

/// Shared toast list. Cloning shares the same list.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Rc<RefCell<Vec<Toast>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&self, notice: Notice, shown_at: DateTime<Local>) {
        let mut toasts = self.toasts.borrow_mut();
        toasts.push(Toast {
            id: Uuid::new_v4(),
            notice,
            shown_at,
        });
        let overflow = toasts.len().saturating_sub(MAX_TOASTS);
        toasts.drain(..overflow);
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.borrow_mut().retain(|t| t.id != id);
    }

    /// Drop toasts older than the lifetime. Returns true if any were removed.
    pub fn expire(&self, now: DateTime<Local>) -> bool {
        let mut toasts = self.toasts.borrow_mut();
        let before = toasts.len();
        toasts.retain(|t| now - t.shown_at < Duration::seconds(TOAST_LIFETIME_SECS));
        toasts.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.borrow().is_empty()
    }

    /// Copy of the current toasts, oldest first
    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notice: Notice) {
        log::info!("{}", notice);
        self.push_at(notice, Local::now());
    }
}
