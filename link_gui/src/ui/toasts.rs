//! Toast stack (top right)

use iced::widget::{button, column, container, row, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use link_core::Severity;

use crate::host::Toast;
use crate::Message;

/// Render all toasts, newest at the bottom
pub fn view(toasts: Vec<Toast>) -> Element<'static, Message> {
    let mut list: Column<'static, Message> = column![].spacing(8).width(Length::Fixed(300.0));

    for toast in toasts {
        let title_color = match toast.notice.severity {
            Severity::Info => [0.3, 0.3, 0.3],
            Severity::Success => [0.1, 0.5, 0.2],
            Severity::Error => [0.75, 0.1, 0.1],
        };

        let body = column![
            row![
                text(toast.notice.title).size(12).color(title_color),
                Space::new().width(Length::Fill),
                button(text("✕").size(10))
                    .on_press(Message::DismissToast(toast.id))
                    .padding(Padding::from([0, 4]))
                    .style(button::text),
            ]
            .align_y(Alignment::Center),
            text(toast.notice.description).size(11),
        ]
        .spacing(4);

        list = list.push(container(body).padding(10).style(container::bordered_box));
    }

    container(list)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(16)
        .align_x(iced::alignment::Horizontal::Right)
        .align_y(iced::alignment::Vertical::Top)
        .into()
}
