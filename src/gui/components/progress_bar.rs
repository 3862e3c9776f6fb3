//! Progress bar component

use crate::gui::theme::Palette;
use iced::widget::{column, progress_bar as iced_progress_bar, text};
use iced::Element;

/// Create a progress bar with a caption underneath
///
/// `progress` runs from 0.0 to 1.0.
pub fn progress_bar(
    progress: f32,
    caption: String,
    palette: &Palette,
) -> Element<'static, crate::gui::app::Message> {
    let style = if progress >= 1.0 {
        iced::theme::ProgressBar::Custom(Box::new(crate::gui::theme::ProgressBarCompleted))
    } else {
        iced::theme::ProgressBar::Custom(Box::new(crate::gui::theme::ProgressBarStyle))
    };

    let bar = iced_progress_bar(0.0..=1.0, progress.clamp(0.0, 1.0))
        .height(14)
        .style(style);

    column![
        bar,
        text(caption)
            .size(12)
            .style(iced::theme::Text::Color(palette.text_muted)),
    ]
    .spacing(6)
    .into()
}

/// Caption for the overall bar: `"3 of 5 finished (60%)"`
pub fn overall_caption(finished: usize, total: usize, progress: f32) -> String {
    if total == 0 {
        "Queue is empty".to_string()
    } else {
        format!(
            "{} of {} finished ({:.0}%)",
            finished,
            total,
            (progress * 100.0).clamp(0.0, 100.0)
        )
    }
}
