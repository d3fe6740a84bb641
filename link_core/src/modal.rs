//! # Share Modal
//!
//! State and operations behind the "Share a link" dialog: three editable
//! link variants, one of them active, and an optional QR panel bound to a
//! single QR-eligible variant.
//!
//! The modal owns its [`QrPanel`] and creates it only while a QR code is
//! shown. Operations that need the panel to (re)render hand back a
//! [`RenderRequest`]; the host runs it and passes the outcome to
//! [`ShareModal::complete_render`].

use crate::capabilities::{Notice, SaveDestination, Services};
use crate::config::{ShareConfig, VariantLabel};
use crate::qr::{QrPanel, RenderOutcome, RenderRequest};
use crate::variant::{LinkKind, LinkValues};

/// Observable dialog state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    pub visible: bool,
    pub active: LinkKind,
    pub values: LinkValues,
    /// Variant whose QR code is shown, if any. Always QR-eligible.
    pub qr_visible_for: Option<LinkKind>,
}

/// The share dialog
#[derive(Debug)]
pub struct ShareModal {
    config: ShareConfig,
    services: Services,
    state: ModalState,
    qr_panel: Option<QrPanel>,
    /// Last render sequence issued by any panel this modal created
    render_seq: u64,
}

impl ShareModal {
    /// Build a hidden dialog seeded from `config`
    pub fn new(config: ShareConfig, services: Services) -> Self {
        let state = ModalState {
            visible: false,
            active: LinkKind::default(),
            values: config.seeds.clone(),
            qr_visible_for: None,
        };
        ShareModal {
            config,
            services,
            state,
            qr_panel: None,
            render_seq: 0,
        }
    }

    pub fn config(&self) -> &ShareConfig {
        &self.config
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn active(&self) -> LinkKind {
        self.state.active
    }

    pub fn value(&self, kind: LinkKind) -> &str {
        self.state.values.get(kind)
    }

    pub fn values(&self) -> &LinkValues {
        &self.state.values
    }

    /// Text of the active variant
    pub fn current_text(&self) -> &str {
        self.value(self.state.active)
    }

    pub fn qr_visible_for(&self) -> Option<LinkKind> {
        self.state.qr_visible_for
    }

    pub fn label(&self, kind: LinkKind) -> &VariantLabel {
        self.config.label(kind)
    }

    /// Whether the QR control for `kind` should be offered
    pub fn can_toggle_qr(&self, kind: LinkKind) -> bool {
        self.config.is_qr_eligible(kind)
    }

    /// Text the QR panel is showing
    pub fn qr_text(&self) -> Option<&str> {
        self.state.qr_visible_for.map(|kind| self.value(kind))
    }

    pub fn qr_panel(&self) -> Option<&QrPanel> {
        self.qr_panel.as_ref()
    }

    /// Show or hide the dialog. Hiding always removes the QR panel; values are kept.
    pub fn open(&mut self, visible: bool) {
        log::debug!("Share modal {}", if visible { "opened" } else { "closed" });
        self.state.visible = visible;
        if !visible {
            self.hide_qr();
        }
    }

    /// Switch tabs. A QR panel bound to another variant is hidden.
    pub fn select_variant(&mut self, kind: LinkKind) {
        self.state.active = kind;
        if self.state.qr_visible_for.is_some_and(|shown| shown != kind) {
            self.hide_qr();
        }
    }

    /// Replace a variant's text, unvalidated.
    ///
    /// Returns a render request when the edited variant is the one on display.
    pub fn edit_value(&mut self, kind: LinkKind, text: impl Into<String>) -> Option<RenderRequest> {
        self.state.values.set(kind, text);
        if self.state.qr_visible_for != Some(kind) {
            return None;
        }
        let text = self.state.values.get(kind).to_string();
        self.qr_panel.as_mut().map(|panel| panel.render(text))
    }

    /// Copy a variant's text to the clipboard and report the result
    pub fn copy(&self, kind: LinkKind) {
        match self.services.clipboard.write_text(self.value(kind)) {
            Ok(()) => self.services.notify(Notice::success(
                "Copied to clipboard",
                "Link has been copied to your clipboard.",
            )),
            Err(err) => {
                log::warn!("Copying {} link failed: {}", kind, err);
                self.services.notify(err.notice("Failed to copy link."));
            }
        }
    }

    /// Show the QR panel for `kind`, or hide it if it is already shown.
    ///
    /// Ineligible kinds are ignored. Returns the render request for a newly
    /// shown panel.
    pub fn toggle_qr(&mut self, kind: LinkKind) -> Option<RenderRequest> {
        if self.state.qr_visible_for == Some(kind) {
            self.hide_qr();
            return None;
        }
        if !self.can_toggle_qr(kind) {
            log::debug!("QR toggle ignored: {} is not QR-eligible", kind);
            return None;
        }

        self.hide_qr();
        self.state.qr_visible_for = Some(kind);
        let mut panel = QrPanel::starting_after(
            self.config.qr.clone(),
            self.services.clone(),
            self.render_seq,
        );
        let request = panel.render(self.value(kind).to_string());
        self.qr_panel = Some(panel);
        Some(request)
    }

    /// Hand a finished render to the panel. Returns `false` if it was dropped.
    pub fn complete_render(&mut self, outcome: RenderOutcome) -> bool {
        match self.qr_panel.as_mut() {
            Some(panel) => panel.complete(outcome),
            None => {
                log::debug!("Discarding QR render #{}: panel is closed", outcome.seq);
                false
            }
        }
    }

    /// Start a download from the panel: the file name to offer, if there
    /// is a bitmap to save
    pub fn download_qr(&self) -> Option<String> {
        self.qr_panel.as_ref().and_then(QrPanel::download)
    }

    /// Finish a download once the host has a destination
    pub fn finish_qr_download(&self, destination: SaveDestination) {
        match &self.qr_panel {
            Some(panel) => panel.finish_download(destination),
            None => log::debug!("QR download dropped: panel is closed"),
        }
    }

    /// Forward to the panel's copy-image action
    pub fn copy_qr_image(&self) {
        if let Some(panel) = &self.qr_panel {
            panel.copy_image();
        }
    }

    fn hide_qr(&mut self) {
        self.state.qr_visible_for = None;
        if let Some(panel) = self.qr_panel.take() {
            self.render_seq = panel.last_seq();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::capabilities::Severity;
    use crate::config::DEFAULT_QR_EXCLUDED;
    use crate::qr::{ModuleEncoder, PanelState};
    use crate::testing::{ClipboardWrite, Harness};
    use crate::variant::{DEFAULT_ANONYMOUS, DEFAULT_URL};

    fn modal(harness: &Harness) -> ShareModal {
        let mut modal = ShareModal::new(ShareConfig::standard(), harness.services());
        modal.open(true);
        modal
    }

    #[test]
    fn test_seeded_on_construction() {
        let harness = Harness::new();
        let modal = ShareModal::new(ShareConfig::standard(), harness.services());
        assert!(!modal.is_visible());
        assert_eq!(modal.active(), LinkKind::Url);
        assert_eq!(modal.value(LinkKind::Url), DEFAULT_URL);
        assert!(modal.value(LinkKind::Embed).starts_with("<iframe"));
        assert_eq!(modal.value(LinkKind::Anonymous), DEFAULT_ANONYMOUS);
        assert_eq!(modal.qr_visible_for(), None);
    }

    #[test]
    fn test_edit_then_read_is_exact() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        for kind in LinkKind::ALL {
            for text in ["", "<iframe src=", "plain words", "https://x.y/?q=<b>"] {
                modal.edit_value(kind, text);
                assert_eq!(modal.value(kind), text);
            }
        }
    }

    #[test]
    fn test_select_variant_keeps_values() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        modal.edit_value(LinkKind::Embed, "custom");
        let before = modal.values().clone();
        for kind in LinkKind::ALL {
            modal.select_variant(kind);
            assert_eq!(modal.active(), kind);
            assert_eq!(modal.values(), &before);
        }
        assert_eq!(modal.current_text(), DEFAULT_ANONYMOUS);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        for kind in LinkKind::ALL {
            let original = modal.qr_visible_for();
            modal.toggle_qr(kind);
            modal.toggle_qr(kind);
            assert_eq!(modal.qr_visible_for(), original, "kind {kind}");
        }

        modal.toggle_qr(LinkKind::Anonymous);
        let original = modal.qr_visible_for();
        modal.toggle_qr(LinkKind::Url);
        modal.toggle_qr(LinkKind::Url);
        // Showing another variant replaced the panel; toggling it off leaves none
        assert_ne!(modal.qr_visible_for(), original);
        assert_eq!(modal.qr_visible_for(), None);
    }

    #[test]
    fn test_toggle_ineligible_never_changes_state() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        assert!(!modal.can_toggle_qr(DEFAULT_QR_EXCLUDED));

        assert!(modal.toggle_qr(DEFAULT_QR_EXCLUDED).is_none());
        assert_eq!(modal.qr_visible_for(), None);

        modal.toggle_qr(LinkKind::Anonymous);
        assert!(modal.toggle_qr(DEFAULT_QR_EXCLUDED).is_none());
        assert_eq!(modal.qr_visible_for(), Some(LinkKind::Anonymous));
        assert!(modal.qr_panel().is_some());
    }

    #[test]
    fn test_ice_cream_excludes_url() {
        let harness = Harness::new();
        let mut modal = ShareModal::new(ShareConfig::ice_cream(), harness.services());
        modal.open(true);
        assert!(modal.toggle_qr(LinkKind::Url).is_none());
        let request = modal.toggle_qr(LinkKind::Embed).unwrap();
        assert_eq!(request.text(), "https://icecream.app/sweet-treats/12345");
    }

    #[test]
    fn test_anonymous_qr_scenario() {
        let harness = Harness::new();
        let mut modal = ShareModal::new(ShareConfig::standard(), harness.services());
        modal.open(true);
        modal.edit_value(LinkKind::Url, "https://example.com/your-content");
        modal.edit_value(LinkKind::Embed, "<iframe ...></iframe>");
        modal.edit_value(LinkKind::Anonymous, "https://anon.link/secret/abc123def");

        modal.select_variant(LinkKind::Anonymous);
        let request = modal.toggle_qr(LinkKind::Anonymous).unwrap();
        assert_eq!(modal.qr_visible_for(), Some(LinkKind::Anonymous));
        assert_eq!(request.text(), "https://anon.link/secret/abc123def");
        assert_eq!(modal.qr_text(), Some("https://anon.link/secret/abc123def"));

        assert!(modal.complete_render(request.run(&ModuleEncoder)));
        let panel = modal.qr_panel().unwrap();
        assert_eq!(panel.text(), Some("https://anon.link/secret/abc123def"));
        assert!(matches!(panel.state(), PanelState::Ready(_)));

        assert!(modal.toggle_qr(LinkKind::Anonymous).is_none());
        assert_eq!(modal.qr_visible_for(), None);
        assert!(modal.qr_panel().is_none());
    }

    #[test]
    fn test_toggle_replaces_shown_panel() {
        let harness = Harness::new();
        let mut modal = ShareModal::new(ShareConfig::ice_cream(), harness.services());
        modal.open(true);
        let first = modal.toggle_qr(LinkKind::Embed).unwrap();
        let second = modal.toggle_qr(LinkKind::Anonymous).unwrap();
        assert_eq!(modal.qr_visible_for(), Some(LinkKind::Anonymous));
        assert!(second.seq() > first.seq());
        // Old panel's render must not land on the new one
        assert!(!modal.complete_render(first.run(&ModuleEncoder)));
        assert!(modal.complete_render(second.run(&ModuleEncoder)));
    }

    #[test]
    fn test_close_clears_qr_and_keeps_values() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        modal.edit_value(LinkKind::Anonymous, "https://anon.link/other");
        let pending = modal.toggle_qr(LinkKind::Anonymous).unwrap();

        modal.open(false);
        assert_eq!(modal.qr_visible_for(), None);
        assert!(modal.qr_panel().is_none());
        assert!(!modal.complete_render(pending.run(&ModuleEncoder)));

        modal.open(true);
        assert_eq!(modal.qr_visible_for(), None);
        assert_eq!(modal.value(LinkKind::Anonymous), "https://anon.link/other");
    }

    #[test]
    fn test_render_from_previous_open_is_discarded() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        let stale = modal.toggle_qr(LinkKind::Anonymous).unwrap();
        modal.open(false);
        modal.open(true);
        let fresh = modal.toggle_qr(LinkKind::Anonymous).unwrap();

        assert!(!modal.complete_render(stale.run(&ModuleEncoder)));
        assert!(modal.qr_panel().unwrap().is_generating());
        assert!(modal.complete_render(fresh.run(&ModuleEncoder)));
    }

    #[test]
    fn test_switching_tab_hides_other_panel() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        modal.select_variant(LinkKind::Anonymous);
        modal.toggle_qr(LinkKind::Anonymous);

        modal.select_variant(LinkKind::Anonymous);
        assert_eq!(modal.qr_visible_for(), Some(LinkKind::Anonymous));

        modal.select_variant(LinkKind::Url);
        assert_eq!(modal.qr_visible_for(), None);
        assert!(modal.qr_panel().is_none());
    }

    #[test]
    fn test_editing_shown_variant_rerenders() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        let first = modal.toggle_qr(LinkKind::Anonymous).unwrap();

        assert!(modal.edit_value(LinkKind::Url, "https://elsewhere").is_none());
        let second = modal.edit_value(LinkKind::Anonymous, "https://anon.link/new").unwrap();
        assert_eq!(second.text(), "https://anon.link/new");

        assert!(modal.complete_render(second.run(&ModuleEncoder)));
        assert!(!modal.complete_render(first.run(&ModuleEncoder)));
        assert_eq!(modal.qr_panel().unwrap().text(), Some("https://anon.link/new"));
    }

    #[test]
    fn test_editing_shown_variant_to_empty_reports() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        let first = modal.toggle_qr(LinkKind::Anonymous).unwrap();
        modal.complete_render(first.run(&ModuleEncoder));

        let empty = modal.edit_value(LinkKind::Anonymous, "").unwrap();
        assert!(modal.complete_render(empty.run(&ModuleEncoder)));
        assert!(modal.qr_panel().unwrap().bitmap().is_none());
        assert_eq!(modal.qr_visible_for(), Some(LinkKind::Anonymous));
        assert_eq!(harness.notices()[0].severity, Severity::Error);
    }

    #[test]
    fn test_copy_writes_verbatim() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        modal.edit_value(LinkKind::Embed, "<iframe broken");
        modal.copy(LinkKind::Embed);

        assert_eq!(
            harness.clipboard.writes(),
            vec![ClipboardWrite::Text("<iframe broken".to_string())]
        );
        let notices = harness.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Copied to clipboard");
        assert_eq!(notices[0].severity, Severity::Success);
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let harness = Harness::new();
        harness.clipboard.deny();
        let modal = modal(&harness);
        modal.copy(LinkKind::Url);

        let notices = harness.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
        assert!(notices[0].description.contains("permission denied"));
    }

    #[test]
    fn test_panel_actions_forward() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        assert_eq!(modal.download_qr(), None);
        modal.copy_qr_image();
        assert!(harness.notices().is_empty());

        let request = modal.toggle_qr(LinkKind::Anonymous).unwrap();
        modal.complete_render(request.run(&ModuleEncoder));
        let filename = modal.download_qr().unwrap();
        let path = PathBuf::from("/downloads").join(filename);
        modal.finish_qr_download(SaveDestination::Chosen(path.clone()));
        modal.copy_qr_image();

        assert_eq!(harness.saved(), vec![path]);
        assert_eq!(harness.clipboard.writes(), vec![ClipboardWrite::Image(200, 200)]);
        let titles: Vec<_> = harness.notices().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Downloaded", "Copied"]);
    }

    #[test]
    fn test_download_after_close_is_dropped() {
        let harness = Harness::new();
        let mut modal = modal(&harness);
        let request = modal.toggle_qr(LinkKind::Anonymous).unwrap();
        modal.complete_render(request.run(&ModuleEncoder));
        assert!(modal.download_qr().is_some());

        modal.open(false);
        modal.finish_qr_download(SaveDestination::Chosen(PathBuf::from("/downloads/qrcode.png")));
        assert!(harness.saved().is_empty());
        assert!(harness.notices().is_empty());
    }
}
