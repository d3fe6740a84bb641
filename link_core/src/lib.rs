//! # link_core - Link Sharing Engine
//!
//! `link_core` holds everything behind the "Share a link" dialog that is not
//! drawing pixels on screen: the three link variants, the dialog state
//! machine, the QR panel with its last-write-wins render pipeline, and the
//! capability traits through which the dialog reaches the clipboard, the file
//! system and the user.
//!
//! ## Design Philosophy
//!
//! - **Toolkit-free**: no UI framework types; a GUI drives it through plain method calls
//! - **Injected side effects**: clipboard, save dialog and notifications are traits
//!   passed in at construction, never globals
//! - **Closed variants**: [`LinkKind`] is an enum, matched exhaustively
//! - **Non-fatal errors**: every failure becomes a notification at the call site
//!
//! ## Quick Start
//!
//! ```rust
//! use link_core::config::ShareConfig;
//! use link_core::variant::LinkKind;
//!
//! let config = ShareConfig::standard();
//! assert!(config.is_qr_eligible(LinkKind::Anonymous));
//! assert!(!config.is_qr_eligible(LinkKind::Embed));
//! ```
//!
//! ## Modules
//!
//! - [`variant`] - Link kinds and their values
//! - [`modal`] - The share dialog state machine
//! - [`qr`] - QR encoding, bitmaps and the QR panel
//! - [`capabilities`] - Host traits (clipboard, file save, notifications)
//! - [`config`] - Branding, QR eligibility and visual parameters
//! - [`errors`] - Structured error types

pub mod capabilities;
pub mod config;
pub mod errors;
pub mod modal;
pub mod qr;
pub mod variant;

#[cfg(test)]
mod testing;

// Re-export commonly used types at crate root for convenience
pub use capabilities::{Clipboard, FileSaver, Notice, Notifier, SaveDestination, Services, Severity};
pub use config::ShareConfig;
pub use errors::{ShareError, ShareResult};
pub use modal::{ModalState, ShareModal};
pub use qr::{Bitmap, ModuleEncoder, QrEncoder, QrPanel, QrStyle, RenderOutcome, RenderRequest};
pub use variant::{LinkKind, LinkValues};
