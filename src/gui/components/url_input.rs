//! URL input component

use crate::gui::app::Message;
use crate::gui::theme::Palette;
use iced::widget::{button, column, row, text, text_input, tooltip};
use iced::{Alignment, Element, Length};

/// Create a URL input field with paste/clear buttons and optional error message
pub fn url_input(
    value: &str,
    on_change: impl Fn(String) -> Message + 'static,
    on_submit: Message,
    on_paste: Message,
    on_clear: Message,
    error_message: Option<&str>,
    palette: &Palette,
) -> Element<'static, Message> {
    use crate::gui::theme;

    let input_row = row![
        text_input(
            "Paste one or more video URLs (TikTok, YouTube, Instagram, X)...",
            value
        )
        .on_input(on_change)
        .on_submit(on_submit)
        .padding(12)
        .width(Length::Fill)
        .style(if error_message.is_some() {
            iced::theme::TextInput::Custom(Box::new(theme::InputErrorStyle))
        } else {
            iced::theme::TextInput::Custom(Box::new(theme::InputStyle))
        }),
        tooltip(
            button(text("Paste").size(14))
                .on_press(on_paste)
                .padding([8, 12])
                .style(iced::theme::Button::Custom(Box::new(theme::IconButton))),
            "Paste from clipboard",
            tooltip::Position::Bottom,
        ),
        button(text("Clear").size(14))
            .on_press(on_clear)
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(theme::IconButton))),
    ]
    .spacing(12)
    .align_items(Alignment::Center);

    if let Some(error) = error_message {
        column![
            input_row,
            text(error)
                .size(13)
                .style(iced::theme::Text::Color(palette.danger_text)),
        ]
        .spacing(6)
        .into()
    } else {
        input_row.into()
    }
}
