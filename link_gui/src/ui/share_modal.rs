//! Share dialog
//!
//! Title, one tab per link variant, the active variant's editor with copy
//! and QR buttons, and the QR panel when one is shown.

use iced::widget::{button, column, container, image, opaque, row, rule, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use link_core::{LinkKind, ShareModal};

use crate::ui::qr_panel;
use crate::Message;

/// Semi-transparent overlay; clicking it closes the dialog
pub fn view_backdrop() -> Element<'static, Message> {
    button(Space::new())
        .on_press(Message::CloseShare)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_, _| {
            iced::widget::button::Style::default()
                .with_background(iced::Color::from_rgba(0.0, 0.0, 0.0, 0.5))
        })
        .into()
}

/// Render the dialog
pub fn view<'a>(modal: &'a ShareModal, qr_image: Option<&'a image::Handle>) -> Element<'a, Message> {
    let header = row![
        text(modal.config().title.as_str()).size(18),
        Space::new().width(Length::Fill),
        button(text("✕").size(12))
            .on_press(Message::CloseShare)
            .padding(Padding::from([2, 8]))
            .style(button::text),
    ]
    .align_y(Alignment::Center);

    let mut content: Column<'a, Message> = column![
        header,
        Space::new().height(12),
        view_tabs(modal),
        Space::new().height(12),
        view_editor(modal, modal.active()),
    ];

    if let Some(panel) = modal.qr_panel() {
        content = content.push(Space::new().height(16));
        content = content.push(rule::horizontal(1));
        content = content.push(Space::new().height(12));
        content = content.push(text("QR Code").size(14));
        content = content.push(Space::new().height(8));
        content = content.push(qr_panel::view(panel, qr_image));
    }

    let modal_box = container(content.width(Length::Fixed(520.0)))
        .padding(20)
        .style(container::bordered_box);

    // Center the dialog; clicks inside it must not reach the backdrop
    container(opaque(modal_box))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .into()
}

/// One button per variant, the active one highlighted
fn view_tabs(modal: &ShareModal) -> Element<'_, Message> {
    let mut tabs = row![].spacing(4);
    for kind in LinkKind::ALL {
        let style = if kind == modal.active() {
            button::primary
        } else {
            button::secondary
        };
        tabs = tabs.push(
            button(
                container(text(modal.label(kind).label.as_str()).size(11))
                    .width(Length::Fill)
                    .align_x(iced::alignment::Horizontal::Center),
            )
            .on_press(Message::SelectVariant(kind))
            .padding(Padding::from([6, 8]))
            .style(style)
            .width(Length::Fill),
        );
    }
    tabs.into()
}

/// Label, input, copy button and (for QR-eligible kinds) the QR toggle
fn view_editor(modal: &ShareModal, kind: LinkKind) -> Element<'_, Message> {
    let label = modal.label(kind);

    let mut controls = row![
        text_input(label.placeholder.as_str(), modal.value(kind))
            .on_input(move |value| Message::EditValue(kind, value))
            .width(Length::Fill)
            .padding(6)
            .size(12),
        button(text("Copy").size(11))
            .on_press(Message::CopyLink(kind))
            .padding(Padding::from([6, 12]))
            .style(button::secondary),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    // Ineligible kinds get no QR control at all
    if modal.can_toggle_qr(kind) {
        let showing = modal.qr_visible_for() == Some(kind);
        controls = controls.push(
            button(text(if showing { "Hide QR" } else { "QR" }).size(11))
                .on_press(Message::ToggleQr(kind))
                .padding(Padding::from([6, 12]))
                .style(if showing { button::primary } else { button::secondary }),
        );
    }

    column![
        text(label.label.as_str()).size(12),
        controls,
        text(label.hint.as_str()).size(11).color([0.5, 0.5, 0.5]),
    ]
    .spacing(6)
    .into()
}
