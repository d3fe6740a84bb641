//! # Linkshare GUI Application
//!
//! Landing page plus the "Share a link" dialog: edit and copy the URL,
//! embed and anonymous variants of a link, and show a QR code for the
//! QR-eligible ones. Built with Iced.
//!
//! Set `LINKSHARE_CONFIG` to a JSON file to change branding, QR eligibility
//! or QR visuals; `RUST_LOG` controls logging.

mod app;
mod host;
mod ui;

use std::path::PathBuf;

use link_core::config::CONFIG_ENV;
use link_core::ShareConfig;

pub use app::{App, Message};

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = ShareConfig::load_or_default(config_path.as_deref());

    iced::application(move || App::new(config.clone()), App::update, App::view)
        .title("Link Sharing Hub")
        .subscription(App::subscription)
        .window_size((900.0, 700.0))
        .run()
}
