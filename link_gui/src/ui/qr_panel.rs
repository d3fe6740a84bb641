//! QR panel card
//!
//! Shows the rendered bitmap with Download and Copy actions. Both actions
//! stay disabled until a bitmap exists.

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Element, Length, Padding};

use link_core::qr::PanelState;
use link_core::QrPanel;

use crate::Message;

/// Render the QR card
pub fn view<'a>(panel: &'a QrPanel, qr_image: Option<&'a image::Handle>) -> Element<'a, Message> {
    let side = panel.style().pixel_width as f32;

    let picture: Element<'a, Message> = match (panel.state(), qr_image) {
        (PanelState::Ready(_), Some(handle)) => image(handle.clone())
            .width(Length::Fixed(side))
            .height(Length::Fixed(side))
            .into(),
        (PanelState::Generating { .. }, _) => placeholder("Generating…", side),
        _ => placeholder("QR code unavailable", side),
    };

    let has_bitmap = panel.bitmap().is_some();
    let actions = row![
        button(text("Download").size(11))
            .on_press_maybe(has_bitmap.then_some(Message::DownloadQr))
            .padding(Padding::from([4, 12]))
            .style(button::secondary),
        button(text("Copy").size(11))
            .on_press_maybe(has_bitmap.then_some(Message::CopyQrImage))
            .padding(Padding::from([4, 12]))
            .style(button::secondary),
    ]
    .spacing(8);

    let card = column![
        picture,
        actions,
        text("Scan this QR code to access the link")
            .size(10)
            .color([0.5, 0.5, 0.5]),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    container(container(card).padding(16).style(container::bordered_box))
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center)
        .into()
}

fn placeholder(label: &'static str, side: f32) -> Element<'static, Message> {
    container(text(label).size(11).color([0.5, 0.5, 0.5]))
        .width(Length::Fixed(side))
        .height(Length::Fixed(side))
        .align_x(iced::alignment::Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .into()
}
