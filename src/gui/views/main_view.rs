//! Queue view implementation

use crate::extractor::QualityPreset;
use crate::gui::activity::StatusLine;
use crate::gui::app::Message;
use crate::gui::components::{
    log_panel, overall_caption, progress_bar, queue_header, queue_row, url_input,
};
use crate::gui::theme::Palette;
use crate::queue::{ItemStatus, QueueItem};
use iced::widget::{button, column, container, pick_list, row, scrollable, text, Space};
use iced::{Alignment, Element, Length};

/// Create the queue view
#[allow(clippy::too_many_arguments)]
pub fn main_view<'a>(
    url_value: &str,
    url_error: Option<&str>,
    preset: QualityPreset,
    items: &[QueueItem],
    running: bool,
    status: &StatusLine,
    overall: f32,
    log: impl Iterator<Item = &'a String>,
    palette: &Palette,
) -> Element<'static, Message> {
    use crate::gui::theme;

    let has_queued = items.iter().any(|item| item.status == ItemStatus::Queued);
    let finished = items.iter().filter(|item| item.status.is_terminal()).count();

    // Form: URL(s), preset, queue controls
    let form = container(
        column![
            text("Download Queue")
                .size(26)
                .style(iced::theme::Text::Color(palette.ink)),
            url_input(
                url_value,
                Message::UrlInputChanged,
                Message::AddToQueue,
                Message::PasteFromClipboard,
                Message::ClearUrlInput,
                url_error,
                palette,
            ),
            row![
                text("Quality")
                    .size(13)
                    .style(iced::theme::Text::Color(palette.text_muted)),
                pick_list(QualityPreset::ALL.to_vec(), Some(preset), Message::PresetSelected)
                    .text_size(13)
                    .padding([8, 10])
                    .width(Length::Fixed(200.0)),
                Space::with_width(Length::Fill),
                button(text("Add To Queue").size(14))
                    .on_press_maybe((!url_value.trim().is_empty()).then_some(Message::AddToQueue))
                    .padding([10, 16])
                    .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
                button(text("Start Queue").size(14))
                    .on_press_maybe((has_queued && !running).then_some(Message::StartQueue))
                    .padding([10, 16])
                    .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
                button(text("Cancel").size(14))
                    .on_press_maybe(running.then_some(Message::CancelQueue))
                    .padding([10, 16])
                    .style(iced::theme::Button::Custom(Box::new(theme::DangerButton))),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
        ]
        .spacing(16),
    )
    .padding(20)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(theme::CardContainer)));

    // Queue table
    let rows: Element<'static, Message> = if items.is_empty() {
        container(
            column![
                text("The queue is empty")
                    .size(15)
                    .style(iced::theme::Text::Color(palette.text_muted)),
                text("Add one or more URLs above, then press Start Queue")
                    .size(13)
                    .style(iced::theme::Text::Color(palette.disabled_text)),
            ]
            .spacing(6)
            .align_items(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
    } else {
        let list = items
            .iter()
            .enumerate()
            .fold(column![].spacing(6), |col, (idx, item)| {
                col.push(queue_row(idx + 1, item, running, palette))
            });

        scrollable(list)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Scrollable::Custom(Box::new(theme::ScrollableStyle)))
            .into()
    };

    let table = container(
        column![
            row![
                text(format!("Queue ({})", items.len()))
                    .size(18)
                    .style(iced::theme::Text::Color(palette.ink)),
                Space::with_width(Length::Fill),
                button(text("Clear Finished").size(13))
                    .on_press_maybe((!running && finished > 0).then_some(Message::ClearFinished))
                    .padding([8, 14])
                    .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
            ]
            .align_items(Alignment::Center),
            queue_header(palette),
            rows,
        ]
        .spacing(10),
    )
    .padding(16)
    .width(Length::Fill)
    .height(Length::FillPortion(3))
    .style(iced::theme::Container::Custom(Box::new(theme::CardContainer)));

    // Status pill and overall progress
    let status_row = row![
        container(text(&status.text).size(12))
            .padding([6, 12])
            .width(Length::Fixed(320.0))
            .style(iced::theme::Container::Custom(Box::new(theme::StatusPill(status.state)))),
        container(progress_bar(
            overall,
            overall_caption(finished, items.len(), overall),
            palette,
        ))
        .width(Length::Fill),
    ]
    .spacing(16)
    .align_items(Alignment::Center);

    // Activity log
    let log_section = container(
        column![
            row![
                text("Activity Log")
                    .size(16)
                    .style(iced::theme::Text::Color(palette.ink)),
                Space::with_width(Length::Fill),
                button(text("Clear Log").size(12))
                    .on_press(Message::ClearLog)
                    .padding([6, 12])
                    .style(iced::theme::Button::Custom(Box::new(theme::IconButton))),
            ]
            .align_items(Alignment::Center),
            log_panel(log),
        ]
        .spacing(8),
    )
    .padding(16)
    .width(Length::Fill)
    .height(Length::FillPortion(2))
    .style(iced::theme::Container::Custom(Box::new(theme::CardContainer)));

    column![form, table, status_row, log_section]
        .spacing(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
