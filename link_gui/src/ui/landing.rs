//! Landing page
//!
//! Headline, a short explanation and the button that opens the share dialog.

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use link_core::{LinkKind, ShareConfig};

use crate::Message;

/// Render the landing page
pub fn view(config: &ShareConfig) -> Element<'static, Message> {
    let labels: Vec<&str> = LinkKind::ALL
        .iter()
        .map(|kind| config.label(*kind).label.as_str())
        .collect();
    let eligible: Vec<&str> = LinkKind::ALL
        .iter()
        .filter(|kind| config.is_qr_eligible(**kind))
        .map(|kind| config.label(*kind).label.as_str())
        .collect();

    let share_button = button(
        row![text("Share a Link").size(16)]
            .align_y(Alignment::Center),
    )
    .on_press(Message::OpenShare)
    .padding(Padding::from([12, 32]))
    .style(button::primary);

    let content = column![
        text("Link Sharing Hub").size(32),
        text("Share your content with different types of links.").size(14),
        Space::new().height(24),
        share_button,
        Space::new().height(16),
        text(format!("Choose from {} link types", join_labels(&labels)))
            .size(11)
            .color([0.5, 0.5, 0.5]),
        text(format!("QR codes available for {} links", join_labels(&eligible)))
            .size(11)
            .color([0.5, 0.5, 0.5]),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .into()
}

/// "A", "A and B", "A, B, or C"
fn join_labels(labels: &[&str]) -> String {
    match labels {
        [] => String::new(),
        [one] => one.to_string(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_labels() {
        assert_eq!(join_labels(&["Iframe", "Anonymous"]), "Iframe and Anonymous");
        assert_eq!(join_labels(&["URL", "Iframe", "Anonymous"]), "URL, Iframe, or Anonymous");
    }
}
