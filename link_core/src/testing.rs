//! Recording fakes for the host capabilities, shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::capabilities::{Clipboard, FileSaver, Notice, Notifier, Services};
use crate::errors::{ShareError, ShareResult};
use crate::qr::Bitmap;

#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

/// What reached the fake clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardWrite {
    Text(String),
    Image(u32, u32),
}

#[derive(Default)]
pub struct FakeClipboard {
    writes: RefCell<Vec<ClipboardWrite>>,
    denied: Cell<bool>,
    no_images: Cell<bool>,
}

impl FakeClipboard {
    pub fn deny(&self) {
        self.denied.set(true);
    }

    pub fn disable_images(&self) {
        self.no_images.set(true);
    }

    pub fn writes(&self) -> Vec<ClipboardWrite> {
        self.writes.borrow().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&self, text: &str) -> ShareResult<()> {
        if self.denied.get() {
            return Err(ShareError::clipboard_write("permission denied"));
        }
        self.writes.borrow_mut().push(ClipboardWrite::Text(text.to_string()));
        Ok(())
    }

    fn write_image(&self, bitmap: &Bitmap) -> ShareResult<()> {
        if self.no_images.get() {
            return Err(ShareError::clipboard_unsupported("image"));
        }
        if self.denied.get() {
            return Err(ShareError::clipboard_write("permission denied"));
        }
        self.writes
            .borrow_mut()
            .push(ClipboardWrite::Image(bitmap.width(), bitmap.height()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSaver {
    saved: RefCell<Vec<PathBuf>>,
    failure: RefCell<Option<String>>,
}

impl FakeSaver {
    pub fn fail_next(&self, reason: &str) {
        *self.failure.borrow_mut() = Some(reason.to_string());
    }
}

impl FileSaver for FakeSaver {
    fn save_as(&self, path: &Path, _bitmap: &Bitmap) -> ShareResult<()> {
        if let Some(reason) = self.failure.take() {
            return Err(ShareError::save_failure(path.display().to_string(), reason));
        }
        self.saved.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// All three fakes, plus accessors for what they recorded
pub struct Harness {
    pub notifier: Rc<RecordingNotifier>,
    pub clipboard: Rc<FakeClipboard>,
    pub saver: Rc<FakeSaver>,
}

impl Harness {
    pub fn new() -> Self {
        Harness {
            notifier: Rc::new(RecordingNotifier::default()),
            clipboard: Rc::new(FakeClipboard::default()),
            saver: Rc::new(FakeSaver::default()),
        }
    }

    pub fn services(&self) -> Services {
        Services::new(
            self.notifier.clone(),
            self.clipboard.clone(),
            self.saver.clone(),
        )
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notifier.notices.borrow().clone()
    }

    pub fn saved(&self) -> Vec<PathBuf> {
        self.saver.saved.borrow().clone()
    }
}
