//! # QR Panel
//!
//! Renders the text of one link variant as a QR bitmap and offers download
//! and copy-image actions on the result.
//!
//! Rendering is split in three steps so the host can run the encoder off
//! the event loop:
//!
//! 1. [`QrPanel::render`] issues a [`RenderRequest`] stamped with a fresh
//!    sequence number and moves the panel to `Generating`.
//! 2. [`RenderRequest::run`] does the actual encoding. It owns everything it
//!    needs, so it can run inside an async task.
//! 3. [`QrPanel::complete`] applies the [`RenderOutcome`], but only if it
//!    belongs to the most recent request. Older outcomes are dropped, so the
//!    last `render` call always wins.
//!
//! ```rust
//! use std::rc::Rc;
//! use link_core::qr::{ModuleEncoder, PanelState, QrPanel, QrStyle};
//! # use link_core::capabilities::*;
//! # use link_core::errors::ShareResult;
//! # use link_core::qr::Bitmap;
//! # struct Quiet;
//! # impl Notifier for Quiet { fn notify(&self, _: Notice) {} }
//! # impl Clipboard for Quiet {
//! #     fn write_text(&self, _: &str) -> ShareResult<()> { Ok(()) }
//! #     fn write_image(&self, _: &Bitmap) -> ShareResult<()> { Ok(()) }
//! # }
//! # impl FileSaver for Quiet {
//! #     fn save_as(&self, _: &std::path::Path, _: &Bitmap) -> ShareResult<()> { Ok(()) }
//! # }
//! # let services = Services::new(Rc::new(Quiet), Rc::new(Quiet), Rc::new(Quiet));
//! let mut panel = QrPanel::new(QrStyle::default(), services);
//!
//! let first = panel.render("https://example.com/a");
//! let second = panel.render("https://example.com/b");
//!
//! // The second request finishes first; the first one arrives late.
//! assert!(panel.complete(second.run(&ModuleEncoder)));
//! assert!(!panel.complete(first.run(&ModuleEncoder)));
//! assert!(matches!(panel.state(), PanelState::Ready(_)));
//! ```

use std::fmt;
use std::io::Cursor;

use image::{imageops, ImageFormat, Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::capabilities::{Notice, SaveDestination, Services};
use crate::errors::{ShareError, ShareResult};

/// Largest accepted `pixel_width`
pub const MAX_PIXEL_WIDTH: u32 = 4096;

/// Largest accepted quiet zone, in modules
pub const MAX_MARGIN: u32 = 32;

/// Pixels per module when the requested width is too small to fit the code
const FALLBACK_SCALE: u32 = 4;

/// An sRGB color, stored in config files as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> ShareResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || ShareError::invalid_config("color", format!("'{}' is not a #RRGGBB color", hex));
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }

    fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ShareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

/// Fixed visual parameters handed to the encoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrStyle {
    /// Target image width (and height) in pixels
    pub pixel_width: u32,
    /// Quiet zone around the code, in modules
    pub margin: u32,
    pub dark: Rgb,
    pub light: Rgb,
    #[serde(default)]
    pub error_correction: ErrorCorrection,
    /// File name offered by the download action
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "qrcode.png".to_string()
}

impl Default for QrStyle {
    fn default() -> Self {
        QrStyle {
            pixel_width: 200,
            margin: 2,
            dark: Rgb::BLACK,
            light: Rgb::WHITE,
            error_correction: ErrorCorrection::M,
            filename: default_filename(),
        }
    }
}

/// A rendered QR code raster
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    pub fn from_image(image: RgbaImage) -> Self {
        Bitmap { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// RGB value at a pixel (alpha is always opaque)
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b, _] = self.image.get_pixel(x, y).0;
        Rgb::new(r, g, b)
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[cfg(test)]
    pub(crate) fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encode as PNG
    pub fn to_png(&self) -> ShareResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ShareError::encoding_failure(format!("PNG export failed: {}", e)))?;
        Ok(bytes)
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitmap({}x{})", self.width(), self.height())
    }
}

/// Turns text into a QR bitmap
pub trait QrEncoder {
    fn encode(&self, text: &str, style: &QrStyle) -> ShareResult<Bitmap>;
}

/// Default encoder: the `qrcode` crate's image renderer, centred on a
/// `pixel_width` square canvas in the light color
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleEncoder;

impl QrEncoder for ModuleEncoder {
    fn encode(&self, text: &str, style: &QrStyle) -> ShareResult<Bitmap> {
        if text.is_empty() {
            return Err(ShareError::encoding_failure("No input text"));
        }
        if style.pixel_width > MAX_PIXEL_WIDTH || style.margin > MAX_MARGIN {
            return Err(ShareError::encoding_failure(format!(
                "Image size out of range (width {}px, margin {} modules)",
                style.pixel_width, style.margin
            )));
        }
        let code = QrCode::with_error_correction_level(text.as_bytes(), style.error_correction.into())
            .map_err(|e| ShareError::encoding_failure(e.to_string()))?;
        let modules = u32::try_from(code.width())
            .map_err(|_| ShareError::encoding_failure("QR symbol too large"))?;
        let layout = Layout::fit(modules, style)?;

        let symbol = code
            .render::<Rgba<u8>>()
            .quiet_zone(false)
            .module_dimensions(layout.scale, layout.scale)
            .dark_color(style.dark.to_rgba())
            .light_color(style.light.to_rgba())
            .build();
        let mut canvas = RgbaImage::from_pixel(layout.size, layout.size, style.light.to_rgba());
        imageops::overlay(&mut canvas, &symbol, i64::from(layout.offset), i64::from(layout.offset));
        Ok(Bitmap::from_image(canvas))
    }
}

/// Where the symbol lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Canvas side in pixels
    size: u32,
    /// Pixels per module, always whole
    scale: u32,
    /// Distance from the canvas edge to the first module
    offset: u32,
}

impl Layout {
    /// Largest whole module size that fits `modules` plus the quiet zone in
    /// `pixel_width`. Falls back to `FALLBACK_SCALE` (and a larger canvas)
    /// when not even one pixel per module fits.
    fn fit(modules: u32, style: &QrStyle) -> ShareResult<Layout> {
        let overflow = || ShareError::encoding_failure("QR image dimensions overflow");
        let full = style
            .margin
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(modules))
            .ok_or_else(overflow)?;
        let (size, scale) = if full > 0 && style.pixel_width >= full {
            (style.pixel_width, style.pixel_width / full)
        } else {
            (full.checked_mul(FALLBACK_SCALE).ok_or_else(overflow)?, FALLBACK_SCALE)
        };
        let symbol = modules.checked_mul(scale).ok_or_else(overflow)?;
        Ok(Layout {
            size,
            scale,
            offset: (size - symbol) / 2,
        })
    }
}

/// A pending encode job, detached from the panel
#[derive(Debug, Clone)]
pub struct RenderRequest {
    seq: u64,
    text: String,
    style: QrStyle,
}

impl RenderRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Run the encoder. Pure; safe to call from any task.
    pub fn run(self, encoder: &dyn QrEncoder) -> RenderOutcome {
        let result = encoder.encode(&self.text, &self.style);
        RenderOutcome {
            seq: self.seq,
            text: self.text,
            result,
        }
    }
}

/// Result of a finished [`RenderRequest`]
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub seq: u64,
    pub text: String,
    pub result: ShareResult<Bitmap>,
}

/// Panel lifecycle
#[derive(Debug, Clone, Default)]
pub enum PanelState {
    /// Nothing rendered (initially, or after a failed render)
    #[default]
    Idle,
    /// Waiting for the request with this sequence number
    Generating { seq: u64 },
    /// Showing a bitmap
    Ready(Bitmap),
}

/// QR display for a single piece of text
#[derive(Debug)]
pub struct QrPanel {
    style: QrStyle,
    services: Services,
    /// Last sequence number handed out
    issued: u64,
    text: Option<String>,
    state: PanelState,
}

impl QrPanel {
    pub fn new(style: QrStyle, services: Services) -> Self {
        QrPanel {
            style,
            services,
            issued: 0,
            text: None,
            state: PanelState::Idle,
        }
    }

    /// A panel whose sequence numbers continue after `seq`, so outcomes
    /// addressed to an earlier panel can never match this one.
    pub fn starting_after(style: QrStyle, services: Services, seq: u64) -> Self {
        QrPanel {
            issued: seq,
            ..QrPanel::new(style, services)
        }
    }

    /// Sequence number of the most recent render request
    pub fn last_seq(&self) -> u64 {
        self.issued
    }

    pub fn style(&self) -> &QrStyle {
        &self.style
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Text of the most recent render request
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The displayed bitmap, if any
    pub fn bitmap(&self) -> Option<&Bitmap> {
        match &self.state {
            PanelState::Ready(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.state, PanelState::Generating { .. })
    }

    /// Start rendering `text`, superseding any request still in flight
    pub fn render(&mut self, text: impl Into<String>) -> RenderRequest {
        self.issued += 1;
        let text = text.into();
        log::debug!("QR render #{} requested ({} bytes)", self.issued, text.len());
        self.text = Some(text.clone());
        self.state = PanelState::Generating { seq: self.issued };
        RenderRequest {
            seq: self.issued,
            text,
            style: self.style.clone(),
        }
    }

    /// Apply a finished render. Returns `false` if it was stale and dropped.
    pub fn complete(&mut self, outcome: RenderOutcome) -> bool {
        match self.state {
            PanelState::Generating { seq } if seq == outcome.seq => {}
            _ => {
                log::debug!(
                    "Discarding stale QR render #{} (latest #{})",
                    outcome.seq,
                    self.issued
                );
                return false;
            }
        }

        match outcome.result {
            Ok(bitmap) => {
                log::debug!("QR render #{} ready: {:?}", outcome.seq, bitmap);
                self.state = PanelState::Ready(bitmap);
            }
            Err(err) => {
                log::warn!("QR render #{} failed: {}", outcome.seq, err);
                self.state = PanelState::Idle;
                self.services.notify(err.notice("Failed to generate QR code."));
            }
        }
        true
    }

    /// Render synchronously with `encoder`
    #[cfg(test)]
    pub(crate) fn render_now(&mut self, text: impl Into<String>, encoder: &dyn QrEncoder) -> bool {
        let request = self.render(text);
        self.complete(request.run(encoder))
    }

    /// Start a download: the file name to offer in the save dialog.
    ///
    /// Returns `None` (and does nothing) while there is no bitmap. The host
    /// asks the user for a destination, then hands it to
    /// [`finish_download`](Self::finish_download).
    pub fn download(&self) -> Option<String> {
        if self.bitmap().is_none() {
            log::debug!("Download ignored: no QR bitmap yet");
            return None;
        }
        Some(self.style.filename.clone())
    }

    /// Write the current bitmap to the destination picked for a download
    pub fn finish_download(&self, destination: SaveDestination) {
        let path = match destination {
            SaveDestination::Chosen(path) => path,
            SaveDestination::Cancelled => {
                log::info!("QR download cancelled");
                return;
            }
        };
        let Some(bitmap) = self.bitmap() else {
            log::warn!("QR download to {} dropped: bitmap no longer shown", path.display());
            return;
        };
        match self.services.saver.save_as(&path, bitmap) {
            Ok(()) => {
                log::info!("QR code saved to {}", path.display());
                self.services
                    .notify(Notice::success("Downloaded", "QR code has been downloaded."));
            }
            Err(err) => {
                log::warn!("QR download failed: {}", err);
                self.services.notify(err.notice("Failed to download QR code."));
            }
        }
    }

    /// Put the current bitmap on the clipboard. No-op without one.
    pub fn copy_image(&self) {
        let Some(bitmap) = self.bitmap() else {
            log::debug!("Copy image ignored: no QR bitmap yet");
            return;
        };
        match self.services.clipboard.write_image(bitmap) {
            Ok(()) => self
                .services
                .notify(Notice::success("Copied", "QR code has been copied to clipboard.")),
            Err(err) => {
                log::warn!("QR image copy failed: {}", err);
                self.services.notify(err.notice("Failed to copy QR code."));
            }
        }
    }
}
