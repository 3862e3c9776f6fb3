//! Settings view implementation

use crate::extractor::QualityPreset;
use crate::gui::app::Message;
use crate::gui::theme::Palette;
use iced::widget::{
    button, column, container, pick_list, row, text, text_input, toggler, Space, Text,
};
use iced::{Alignment, Element, Length};

fn section_title(label: &str, palette: &Palette) -> Text<'static> {
    text(label)
        .size(16)
        .style(iced::theme::Text::Color(palette.ink))
}

/// Create the settings view
pub fn settings_view(
    output_dir: &str,
    cookie_file: &str,
    default_preset: QualityPreset,
    interrupt_on_cancel: bool,
    dark_mode: bool,
    notice: Option<&str>,
    palette: &Palette,
) -> Element<'static, Message> {
    use crate::gui::theme;

    let header = row![
        button(text("← Back").size(14))
            .on_press(Message::SwitchToQueue)
            .padding([8, 16])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
        Space::with_width(Length::Fill),
        text("Settings")
            .size(24)
            .style(iced::theme::Text::Color(palette.ink)),
        Space::with_width(Length::Fill),
        Space::with_width(Length::Fixed(80.0)), // Balance the back button
    ]
    .spacing(10)
    .align_items(Alignment::Center);

    // Output folder
    let output_section = column![
        section_title("Output Folder", palette),
        row![
            text_input("Folder downloads are saved to", output_dir)
                .on_input(Message::OutputDirChanged)
                .padding(10)
                .width(Length::Fill)
                .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle))),
            button(text("Browse...").size(14))
                .on_press(Message::BrowseOutputDir)
                .padding([10, 16])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
        ]
        .spacing(10)
        .align_items(Alignment::Center),
    ]
    .spacing(10);

    // Cookie file
    let cookie_section = column![
        section_title("Cookies File (optional)", palette),
        text("Netscape cookies.txt for sites that need a login. Passed to yt-dlp as is.")
            .size(12)
            .style(iced::theme::Text::Color(palette.text_muted)),
        row![
            text_input("No cookies file", cookie_file)
                .on_input(Message::CookieFileChanged)
                .padding(10)
                .width(Length::Fill)
                .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle))),
            button(text("Browse...").size(14))
                .on_press(Message::BrowseCookieFile)
                .padding([10, 16])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
        ]
        .spacing(10)
        .align_items(Alignment::Center),
    ]
    .spacing(10);

    // Queue behaviour
    let queue_section = column![
        section_title("Queue", palette),
        row![
            text("Default quality")
                .size(14)
                .style(iced::theme::Text::Color(palette.text)),
            Space::with_width(Length::Fill),
            pick_list(
                QualityPreset::ALL.to_vec(),
                Some(default_preset),
                Message::DefaultPresetSelected,
            )
            .padding(8)
            .width(Length::Fixed(200.0)),
        ]
        .align_items(Alignment::Center),
        toggler(
            "Interrupt the active download on cancel".to_string(),
            interrupt_on_cancel,
            Message::InterruptOnCancelToggled,
        )
        .text_size(14),
        text("When off, Cancel lets the current item finish and skips the rest.")
            .size(12)
            .style(iced::theme::Text::Color(palette.text_muted)),
    ]
    .spacing(12);

    // Appearance, applied and saved as soon as it is toggled
    let appearance_section = column![
        section_title("Appearance", palette),
        toggler("Dark theme".to_string(), dark_mode, Message::DarkModeToggled).text_size(14),
    ]
    .spacing(12);

    let mut footer = column![].spacing(8);
    if let Some(notice) = notice {
        footer = footer.push(
            text(notice)
                .size(13)
                .style(iced::theme::Text::Color(palette.text_muted)),
        );
    }
    footer = footer.push(
        button(text("Save Settings").size(16))
            .on_press(Message::SaveSettings)
            .padding([12, 24])
            .width(Length::Fill)
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
    );

    column![
        header,
        container(
            column![
                output_section,
                cookie_section,
                queue_section,
                appearance_section
            ]
            .spacing(24)
        )
        .padding(24)
        .style(iced::theme::Container::Custom(Box::new(theme::CardContainer))),
        Space::with_height(Length::Fill),
        footer,
    ]
    .spacing(24)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
