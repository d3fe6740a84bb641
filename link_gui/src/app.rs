//! Application state and message handling.

use std::rc::Rc;
use std::time::Duration;

use chrono::Local;
use iced::widget::{image, stack};
use iced::{Element, Subscription, Task};
use uuid::Uuid;

use link_core::{
    LinkKind, ModuleEncoder, RenderOutcome, RenderRequest, SaveDestination, Services, ShareConfig,
    ShareModal,
};

use crate::host::{self, PngSaver, SystemClipboard, ToastQueue};
use crate::ui;

/// Messages produced by the UI
#[derive(Debug, Clone)]
pub enum Message {
    // Dialog visibility
    OpenShare,
    CloseShare,

    // Variant tabs and fields
    SelectVariant(LinkKind),
    EditValue(LinkKind, String),
    CopyLink(LinkKind),

    // QR panel
    ToggleQr(LinkKind),
    QrRendered(RenderOutcome),
    DownloadQr,
    QrDestinationPicked(SaveDestination),
    CopyQrImage,

    // Toasts
    DismissToast(Uuid),
    Tick,
}

pub struct App {
    modal: ShareModal,
    toasts: ToastQueue,
    /// GPU image for the displayed QR bitmap, tagged with its render sequence
    qr_image: Option<(u64, image::Handle)>,
}

impl App {
    pub fn new(config: ShareConfig) -> Self {
        let toasts = ToastQueue::new();
        let services = Services::new(
            Rc::new(toasts.clone()),
            Rc::new(SystemClipboard::default()),
            Rc::new(PngSaver),
        );
        Self::with_services(config, services, toasts)
    }

    /// Build with explicit capabilities. `toasts` is the queue the view
    /// draws; it should also be the notifier inside `services`.
    pub fn with_services(config: ShareConfig, services: Services, toasts: ToastQueue) -> Self {
        App {
            modal: ShareModal::new(config, services),
            toasts,
            qr_image: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::OpenShare => {
                self.modal.open(true);
                Task::none()
            }
            Message::CloseShare => {
                self.modal.open(false);
                Task::none()
            }
            Message::SelectVariant(kind) => {
                self.modal.select_variant(kind);
                Task::none()
            }
            Message::EditValue(kind, text) => spawn_render(self.modal.edit_value(kind, text)),
            Message::CopyLink(kind) => {
                self.modal.copy(kind);
                Task::none()
            }
            Message::ToggleQr(kind) => spawn_render(self.modal.toggle_qr(kind)),
            Message::QrRendered(outcome) => {
                self.modal.complete_render(outcome);
                Task::none()
            }
            Message::DownloadQr => match self.modal.download_qr() {
                Some(filename) => {
                    Task::perform(host::pick_destination(filename), Message::QrDestinationPicked)
                }
                None => Task::none(),
            },
            Message::QrDestinationPicked(destination) => {
                self.modal.finish_qr_download(destination);
                Task::none()
            }
            Message::CopyQrImage => {
                self.modal.copy_qr_image();
                Task::none()
            }
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
            Message::Tick => {
                self.toasts.expire(Local::now());
                Task::none()
            }
        };
        self.sync_qr_image();
        task
    }

    /// Keep the uploaded image in step with the panel's bitmap
    fn sync_qr_image(&mut self) {
        let Some(panel) = self.modal.qr_panel() else {
            self.qr_image = None;
            return;
        };
        let Some(bitmap) = panel.bitmap() else {
            self.qr_image = None;
            return;
        };
        let seq = panel.last_seq();
        if self.qr_image.as_ref().is_some_and(|(cached, _)| *cached == seq) {
            return;
        }
        let handle = image::Handle::from_rgba(bitmap.width(), bitmap.height(), bitmap.as_raw().to_vec());
        self.qr_image = Some((seq, handle));
    }

    pub fn view(&self) -> Element<'_, Message> {
        let page = ui::landing::view(self.modal.config());
        let toasts = ui::toasts::view(self.toasts.snapshot());

        if self.modal.is_visible() {
            let qr = self.qr_image.as_ref().map(|(_, handle)| handle);
            stack![
                page,
                ui::share_modal::view_backdrop(),
                ui::share_modal::view(&self.modal, qr),
                toasts,
            ]
            .into()
        } else {
            stack![page, toasts].into()
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.toasts.is_empty() {
            Subscription::none()
        } else {
            iced::time::every(Duration::from_millis(500)).map(|_| Message::Tick)
        }
    }
}

/// Run a render request off the update loop
fn spawn_render(request: Option<RenderRequest>) -> Task<Message> {
    match request {
        Some(request) => {
            log::debug!("Spawning QR render #{}", request.seq());
            Task::perform(async move { request.run(&ModuleEncoder) }, Message::QrRendered)
        }
        None => Task::none(),
    }
}
