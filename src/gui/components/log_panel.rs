//! Activity log component

use crate::gui::app::Message;
use iced::widget::{column, container, scrollable, text};
use iced::{Element, Font, Length};

/// Scrollable id of the log, used to keep it pinned to the newest line
pub fn log_scroll_id() -> scrollable::Id {
    scrollable::Id::new("activity-log")
}

/// Monospace, scrollable list of log lines
pub fn log_panel<'a>(lines: impl Iterator<Item = &'a String>) -> Element<'static, Message> {
    use crate::gui::theme;

    let content = lines.fold(column![].spacing(2), |col, line| {
        col.push(text(line).size(12).font(Font::MONOSPACE))
    });

    container(
        scrollable(content.width(Length::Fill).padding([0, 8]))
            .id(log_scroll_id())
            .height(Length::Fill)
            .style(iced::theme::Scrollable::Custom(Box::new(theme::ScrollableStyle))),
    )
    .padding(8)
    .width(Length::Fill)
    .height(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(theme::LogContainer)))
    .into()
}
