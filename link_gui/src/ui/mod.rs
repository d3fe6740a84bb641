//! UI module for the Linkshare GUI
//!
//! # Layers (bottom to top)
//! - `landing` - page with the "Share a Link" button
//! - `share_modal` - backdrop plus the dialog with variant tabs
//! - `qr_panel` - QR card embedded in the dialog
//! - `toasts` - notification stack, always on top

pub mod landing;
pub mod qr_panel;
pub mod share_modal;
pub mod toasts;
