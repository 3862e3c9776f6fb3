//! Queue table row component

use crate::extractor::QualityPreset;
use crate::gui::app::Message;
use crate::gui::theme::Palette;
use crate::queue::{ItemStatus, QueueItem};
use iced::widget::{
    button, container, pick_list, progress_bar, row, text, tooltip, Space, Text,
};
use iced::{Alignment, Color, Element, Length};

fn heading(label: &str, palette: &Palette) -> Text<'static> {
    text(label)
        .size(12)
        .style(iced::theme::Text::Color(palette.text_muted))
}

/// Color of the status cell
pub fn status_color(status: ItemStatus, palette: &Palette) -> Color {
    match status {
        ItemStatus::Queued => palette.text_muted,
        ItemStatus::Downloading => palette.accent,
        ItemStatus::Done => palette.success,
        ItemStatus::Failed => palette.danger,
        ItemStatus::Canceled => palette.warning,
    }
}

/// Header row matching the column widths of [`queue_row`]
pub fn queue_header(palette: &Palette) -> Element<'static, Message> {
    row![
        heading("#", palette).width(Length::Fixed(28.0)),
        heading("URL", palette).width(Length::Fill),
        heading("Quality", palette).width(Length::Fixed(170.0)),
        heading("Status", palette).width(Length::Fixed(90.0)),
        heading("Progress", palette).width(Length::Fixed(120.0)),
        Space::with_width(Length::Fixed(190.0)),
    ]
    .spacing(10)
    .padding([0, 12])
    .into()
}

/// One queue item.
///
/// While the queue is idle a Queued row gets a preset picker and every row
/// can be removed. Done rows with a known file get an Open Folder button.
pub fn queue_row(
    position: usize,
    item: &QueueItem,
    queue_running: bool,
    palette: &Palette,
) -> Element<'static, Message> {
    use crate::gui::theme;

    let status_color = status_color(item.status, palette);

    let url: Element<'static, Message> = tooltip(
        text(&item.url).size(13).width(Length::Fill),
        text(&item.url).size(12),
        tooltip::Position::Bottom,
    )
    .style(iced::theme::Container::Box)
    .into();

    let preset: Element<'static, Message> = if !queue_running && item.status == ItemStatus::Queued {
        let id = item.id.clone();
        pick_list(
            QualityPreset::ALL.to_vec(),
            Some(item.preset),
            move |preset| Message::RowPresetChanged(id.clone(), preset),
        )
        .text_size(12)
        .padding([4, 8])
        .width(Length::Fixed(170.0))
        .into()
    } else {
        text(item.preset.label())
            .size(12)
            .width(Length::Fixed(170.0))
            .into()
    };

    let status: Element<'static, Message> = match &item.error_message {
        Some(error) if item.status == ItemStatus::Failed => tooltip(
            text(item.status).size(12).style(iced::theme::Text::Color(status_color)),
            text(error).size(12),
            tooltip::Position::Bottom,
        )
        .style(iced::theme::Container::Box)
        .into(),
        _ => text(item.status)
            .size(12)
            .style(iced::theme::Text::Color(status_color))
            .into(),
    };

    let progress = row![
        progress_bar(0.0..=100.0, item.progress_percent)
            .height(8)
            .width(Length::Fixed(60.0))
            .style(iced::theme::ProgressBar::Custom(Box::new(theme::ProgressBarStyle))),
        text(format!("{:.1}%", item.progress_percent)).size(12),
    ]
    .spacing(6)
    .align_items(Alignment::Center)
    .width(Length::Fixed(120.0));

    let mut actions = row![].spacing(6).width(Length::Fixed(190.0));
    if item.status == ItemStatus::Done {
        let folder = item
            .output_path
            .as_ref()
            .and_then(|path| path.parent().map(|dir| dir.to_path_buf()));
        actions = actions.push(
            button(text("Open Folder").size(12))
                .on_press(Message::OpenFolder(folder))
                .padding([4, 10])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
        );
    }
    if !queue_running {
        actions = actions.push(
            button(text("Remove").size(12))
                .on_press(Message::RemoveItem(item.id.clone()))
                .padding([4, 10])
                .style(iced::theme::Button::Custom(Box::new(theme::DangerButton))),
        );
    }

    container(
        row![
            text(position).size(12).width(Length::Fixed(28.0)),
            url,
            preset,
            container(status).width(Length::Fixed(90.0)),
            progress,
            actions,
        ]
        .spacing(10)
        .align_items(Alignment::Center),
    )
    .padding([8, 12])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(theme::TableRow {
        striped: position % 2 == 0,
    })))
    .into()
}
