//! Custom theme definitions for the application - Light and Dark
//!
//! Every stylesheet picks its colors from the [`Palette`] matching the iced
//! [`Theme`] it is drawn with, so switching `Application::theme` is all it
//! takes to restyle the window.

use iced::widget::{button, container, progress_bar, scrollable, text_input};
use iced::{Background, Border, Color, Gradient, Shadow, Theme, Vector};

/// Text, background and border of one status pill state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pill {
    pub text: Color,
    pub background: Color,
    pub border: Color,
}

/// All colors used by the custom styles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    // Window background gradient
    pub bg_top: Color,
    pub bg_bottom: Color,

    // Text
    pub ink: Color, // Headings
    pub text: Color,
    pub text_muted: Color,
    pub log_text: Color,

    // Surfaces and borders
    pub surface: Color,
    pub card: Color,
    pub sidebar: Color,
    pub shadow: Color,
    pub border: Color,
    pub border_strong: Color,
    pub grid: Color,
    pub row: Color,
    pub row_alt: Color,
    pub log_bg: Color,
    pub selection: Color,
    pub focus: Color,

    // Buttons
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_border: Color,
    pub primary_shadow: Color,
    pub on_primary: Color,
    pub secondary_bg: Color,
    pub secondary_text: Color,
    pub secondary_border: Color,
    pub secondary_hover: Color,
    pub danger_bg: Color,
    pub danger_text: Color,
    pub danger_border: Color,
    pub danger_hover: Color,
    pub disabled_bg: Color,
    pub disabled_text: Color,
    pub disabled_border: Color,

    // Progress
    pub progress_track: Color,
    pub progress_start: Color,
    pub progress_end: Color,
    pub progress_done: Color,
    pub scroller: Color,
    pub scroller_hover: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub accent: Color,
    pub pill_idle: Pill,
    pub pill_active: Pill,
    pub pill_success: Pill,
    pub pill_warning: Pill,
    pub pill_error: Pill,
}

/// Pale sky to warm sand
pub const LIGHT: Palette = Palette {
    bg_top: Color::from_rgb(0.957, 0.976, 1.0), // #f4f9ff
    bg_bottom: Color::from_rgb(1.0, 0.969, 0.929), // #fff7ed

    ink: Color::from_rgb(0.094, 0.157, 0.231),
    text: Color::from_rgb(0.122, 0.184, 0.271),
    text_muted: Color::from_rgb(0.298, 0.396, 0.557),
    log_text: Color::from_rgb(0.137, 0.188, 0.259),

    surface: Color::WHITE,
    card: Color::from_rgba(1.0, 1.0, 1.0, 0.85),
    sidebar: Color::from_rgba(1.0, 1.0, 1.0, 0.7),
    shadow: Color::from_rgba(0.094, 0.157, 0.231, 0.08),
    border: Color::from_rgb(0.824, 0.871, 0.933),
    border_strong: Color::from_rgb(0.769, 0.831, 0.914),
    grid: Color::from_rgb(0.886, 0.918, 0.961),
    row: Color::WHITE,
    row_alt: Color::from_rgb(0.973, 0.984, 1.0),
    log_bg: Color::from_rgb(0.976, 0.984, 1.0),
    selection: Color::from_rgb(0.851, 0.925, 1.0),
    focus: Color::from_rgb(0.094, 0.467, 0.949),

    primary: Color::from_rgb(0.094, 0.467, 0.949), // #1877f2
    primary_hover: Color::from_rgb(0.067, 0.408, 0.851),
    primary_border: Color::from_rgb(0.082, 0.420, 0.855),
    primary_shadow: Color::from_rgba(0.094, 0.467, 0.949, 0.25),
    on_primary: Color::WHITE,
    secondary_bg: Color::WHITE,
    secondary_text: Color::from_rgb(0.153, 0.314, 0.498),
    secondary_border: Color::from_rgb(0.725, 0.800, 0.898),
    secondary_hover: Color::from_rgb(0.929, 0.957, 1.0),
    danger_bg: Color::from_rgb(1.0, 0.957, 0.949),
    danger_text: Color::from_rgb(0.710, 0.227, 0.184),
    danger_border: Color::from_rgb(0.945, 0.765, 0.745),
    danger_hover: Color::from_rgb(1.0, 0.906, 0.886),
    disabled_bg: Color::from_rgb(0.933, 0.949, 0.969),
    disabled_text: Color::from_rgb(0.557, 0.631, 0.725),
    disabled_border: Color::from_rgb(0.867, 0.894, 0.929),

    progress_track: Color::from_rgb(0.929, 0.953, 0.980),
    progress_start: Color::from_rgb(0.208, 0.651, 1.0),
    progress_end: Color::from_rgb(0.082, 0.439, 0.937),
    progress_done: Color::from_rgb(0.204, 0.827, 0.600),
    scroller: Color::from_rgba(0.153, 0.314, 0.498, 0.3),
    scroller_hover: Color::from_rgba(0.153, 0.314, 0.498, 0.5),

    success: Color::from_rgb(0.122, 0.416, 0.231),
    warning: Color::from_rgb(0.541, 0.353, 0.071),
    danger: Color::from_rgb(0.561, 0.153, 0.125),
    accent: Color::from_rgb(0.094, 0.467, 0.949),
    pill_idle: Pill {
        text: Color::from_rgb(0.122, 0.247, 0.4),
        background: Color::from_rgb(0.902, 0.945, 1.0),
        border: Color::from_rgb(0.722, 0.816, 0.925),
    },
    pill_active: Pill {
        text: Color::from_rgb(0.122, 0.247, 0.4),
        background: Color::from_rgb(0.875, 0.941, 1.0),
        border: Color::from_rgb(0.624, 0.780, 0.933),
    },
    pill_success: Pill {
        text: Color::from_rgb(0.122, 0.416, 0.231),
        background: Color::from_rgb(0.910, 0.976, 0.933),
        border: Color::from_rgb(0.651, 0.867, 0.714),
    },
    pill_warning: Pill {
        text: Color::from_rgb(0.541, 0.353, 0.071),
        background: Color::from_rgb(1.0, 0.961, 0.898),
        border: Color::from_rgb(0.961, 0.831, 0.608),
    },
    pill_error: Pill {
        text: Color::from_rgb(0.561, 0.153, 0.125),
        background: Color::from_rgb(1.0, 0.910, 0.898),
        border: Color::from_rgb(0.937, 0.753, 0.733),
    },
};

/// Night navy
pub const DARK: Palette = Palette {
    bg_top: Color::from_rgb(0.075, 0.102, 0.145), // #131a25
    bg_bottom: Color::from_rgb(0.110, 0.141, 0.204), // #1c2434

    ink: Color::from_rgb(0.925, 0.953, 1.0),
    text: Color::from_rgb(0.831, 0.890, 0.973),
    text_muted: Color::from_rgb(0.620, 0.702, 0.827),
    log_text: Color::from_rgb(0.843, 0.898, 0.984),

    surface: Color::from_rgb(0.102, 0.145, 0.216),
    card: Color::from_rgba(0.098, 0.133, 0.192, 0.91),
    sidebar: Color::from_rgba(0.098, 0.133, 0.192, 0.85),
    shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
    border: Color::from_rgb(0.200, 0.267, 0.373),
    border_strong: Color::from_rgb(0.227, 0.302, 0.439),
    grid: Color::from_rgb(0.180, 0.247, 0.349),
    row: Color::from_rgb(0.086, 0.129, 0.192),
    row_alt: Color::from_rgb(0.102, 0.153, 0.224),
    log_bg: Color::from_rgb(0.090, 0.129, 0.196),
    selection: Color::from_rgb(0.169, 0.282, 0.447),
    focus: Color::from_rgb(0.294, 0.545, 0.882),

    primary: Color::from_rgb(0.184, 0.435, 0.847), // #2f6fd8
    primary_hover: Color::from_rgb(0.157, 0.400, 0.796),
    primary_border: Color::from_rgb(0.141, 0.369, 0.741),
    primary_shadow: Color::from_rgba(0.184, 0.435, 0.847, 0.3),
    on_primary: Color::from_rgb(0.929, 0.957, 1.0),
    secondary_bg: Color::from_rgb(0.122, 0.165, 0.239),
    secondary_text: Color::from_rgb(0.776, 0.855, 0.973),
    secondary_border: Color::from_rgb(0.239, 0.329, 0.475),
    secondary_hover: Color::from_rgb(0.141, 0.200, 0.290),
    danger_bg: Color::from_rgb(0.227, 0.133, 0.153),
    danger_text: Color::from_rgb(1.0, 0.722, 0.698),
    danger_border: Color::from_rgb(0.467, 0.251, 0.278),
    danger_hover: Color::from_rgb(0.275, 0.157, 0.180),
    disabled_bg: Color::from_rgb(0.102, 0.141, 0.204),
    disabled_text: Color::from_rgb(0.439, 0.514, 0.624),
    disabled_border: Color::from_rgb(0.184, 0.247, 0.341),

    progress_track: Color::from_rgb(0.094, 0.133, 0.204),
    progress_start: Color::from_rgb(0.243, 0.659, 1.0),
    progress_end: Color::from_rgb(0.184, 0.451, 0.859),
    progress_done: Color::from_rgb(0.243, 0.478, 0.369),
    scroller: Color::from_rgba(0.298, 0.396, 0.557, 0.6),
    scroller_hover: Color::from_rgba(0.298, 0.396, 0.557, 0.9),

    success: Color::from_rgb(0.784, 0.957, 0.847),
    warning: Color::from_rgb(1.0, 0.878, 0.706),
    danger: Color::from_rgb(1.0, 0.784, 0.761),
    accent: Color::from_rgb(0.294, 0.545, 0.882),
    pill_idle: Pill {
        text: Color::from_rgb(0.804, 0.882, 1.0),
        background: Color::from_rgb(0.122, 0.208, 0.325),
        border: Color::from_rgb(0.259, 0.388, 0.553),
    },
    pill_active: Pill {
        text: Color::from_rgb(0.804, 0.882, 1.0),
        background: Color::from_rgb(0.133, 0.251, 0.373),
        border: Color::from_rgb(0.302, 0.471, 0.663),
    },
    pill_success: Pill {
        text: Color::from_rgb(0.784, 0.957, 0.847),
        background: Color::from_rgb(0.118, 0.278, 0.200),
        border: Color::from_rgb(0.243, 0.478, 0.369),
    },
    pill_warning: Pill {
        text: Color::from_rgb(1.0, 0.878, 0.706),
        background: Color::from_rgb(0.302, 0.227, 0.122),
        border: Color::from_rgb(0.506, 0.400, 0.216),
    },
    pill_error: Pill {
        text: Color::from_rgb(1.0, 0.784, 0.761),
        background: Color::from_rgb(0.329, 0.153, 0.169),
        border: Color::from_rgb(0.529, 0.271, 0.298),
    },
};

impl Palette {
    pub fn new(dark_mode: bool) -> &'static Palette {
        if dark_mode {
            &DARK
        } else {
            &LIGHT
        }
    }

    /// Palette for the theme a widget is drawn with
    pub fn of(theme: &Theme) -> &'static Palette {
        Self::new(matches!(theme, Theme::Dark))
    }

    pub fn pill(&self, state: StatusState) -> Pill {
        match state {
            StatusState::Idle => self.pill_idle,
            StatusState::Active => self.pill_active,
            StatusState::Success => self.pill_success,
            StatusState::Warning => self.pill_warning,
            StatusState::Error => self.pill_error,
        }
    }
}

/// iced base theme for the palette
pub fn app_theme(dark_mode: bool) -> Theme {
    if dark_mode {
        Theme::Dark
    } else {
        Theme::Light
    }
}

fn hairline(color: Color, radius: f32) -> Border {
    Border {
        color,
        width: 1.0,
        radius: radius.into(),
    }
}

// --- Container Styles ---

pub struct MainGradientContainer;

impl container::StyleSheet for MainGradientContainer {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let p = Palette::of(style);
        container::Appearance {
            text_color: Some(p.text),
            background: Some(Background::Gradient(Gradient::Linear(
                iced::gradient::Linear::new(iced::Radians(3.142)) // top to bottom
                    .add_stop(0.0, p.bg_top)
                    .add_stop(1.0, p.bg_bottom),
            ))),
            ..Default::default()
        }
    }
}

/// Rounded panel used for the form, the table and settings
pub struct CardContainer;

impl container::StyleSheet for CardContainer {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let p = Palette::of(style);
        container::Appearance {
            text_color: Some(p.text),
            background: Some(Background::Color(p.card)),
            border: hairline(p.border, 14.0),
            shadow: Shadow {
                color: p.shadow,
                offset: Vector::new(0.0, 4.0),
                blur_radius: 16.0,
            },
        }
    }
}

pub struct SidebarContainer;

impl container::StyleSheet for SidebarContainer {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let p = Palette::of(style);
        container::Appearance {
            text_color: Some(p.text),
            background: Some(Background::Color(p.sidebar)),
            border: hairline(p.border, 0.0),
            shadow: Shadow {
                color: p.shadow,
                offset: Vector::new(2.0, 0.0),
                blur_radius: 8.0,
            },
        }
    }
}

/// One row of the queue table; odd rows get a tinted background
pub struct TableRow {
    pub striped: bool,
}

impl container::StyleSheet for TableRow {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let p = Palette::of(style);
        container::Appearance {
            text_color: Some(p.text),
            background: Some(Background::Color(if self.striped { p.row_alt } else { p.row })),
            border: hairline(p.grid, 8.0),
            ..Default::default()
        }
    }
}

pub struct LogContainer;

impl container::StyleSheet for LogContainer {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let p = Palette::of(style);
        container::Appearance {
            text_color: Some(p.log_text),
            background: Some(Background::Color(p.log_bg)),
            border: hairline(p.border, 10.0),
            ..Default::default()
        }
    }
}

/// Visual state of the status pill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusState {
    #[default]
    Idle,
    Active,
    Success,
    Warning,
    Error,
}

pub struct StatusPill(pub StatusState);

impl container::StyleSheet for StatusPill {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let pill = Palette::of(style).pill(self.0);
        container::Appearance {
            text_color: Some(pill.text),
            background: Some(Background::Color(pill.background)),
            border: hairline(pill.border, 13.0),
            ..Default::default()
        }
    }
}

// --- Button Styles ---

fn disabled_button(p: &Palette) -> button::Appearance {
    button::Appearance {
        background: Some(Background::Color(p.disabled_bg)),
        text_color: p.disabled_text,
        border: hairline(p.disabled_border, 10.0),
        ..Default::default()
    }
}

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> button::Appearance {
        let p = Palette::of(style);
        button::Appearance {
            background: Some(Background::Color(p.primary)),
            text_color: p.on_primary,
            border: hairline(p.primary_border, 10.0),
            shadow: Shadow {
                color: p.primary_shadow,
                offset: Vector::new(0.0, 3.0),
                blur_radius: 10.0,
            },
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Palette::of(style).primary_hover)),
            ..self.active(style)
        }
    }

    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            background: Some(Background::Color(Palette::of(style).primary_hover)),
            shadow: Shadow {
                offset: Vector::new(0.0, 1.0),
                blur_radius: 4.0,
                ..active.shadow
            },
            ..active
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        disabled_button(Palette::of(style))
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> button::Appearance {
        let p = Palette::of(style);
        button::Appearance {
            background: Some(Background::Color(p.secondary_bg)),
            text_color: p.secondary_text,
            border: hairline(p.secondary_border, 10.0),
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Palette::of(style).secondary_hover)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        disabled_button(Palette::of(style))
    }
}

pub struct DangerButton;

impl button::StyleSheet for DangerButton {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> button::Appearance {
        let p = Palette::of(style);
        button::Appearance {
            background: Some(Background::Color(p.danger_bg)),
            text_color: p.danger_text,
            border: hairline(p.danger_border, 10.0),
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Palette::of(style).danger_hover)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        disabled_button(Palette::of(style))
    }
}

pub enum SidebarButtonStyle {
    Active,
    Inactive,
}

impl button::StyleSheet for SidebarButtonStyle {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> button::Appearance {
        let p = Palette::of(style);
        let (background, text_color) = match self {
            Self::Active => (Some(Background::Color(p.selection)), p.ink),
            Self::Inactive => (None, p.text_muted),
        };
        button::Appearance {
            background,
            text_color,
            border: Border {
                radius: 10.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let p = Palette::of(style);
        match self {
            Self::Active => self.active(style),
            Self::Inactive => button::Appearance {
                text_color: p.ink,
                background: Some(Background::Color(p.secondary_hover)),
                ..self.active(style)
            },
        }
    }
}

pub struct IconButton;

impl button::StyleSheet for IconButton {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: Palette::of(style).secondary_text,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let p = Palette::of(style);
        button::Appearance {
            text_color: p.ink,
            background: Some(Background::Color(p.secondary_hover)),
            ..self.active(style)
        }
    }
}

// --- Input Styles ---

pub struct InputStyle;

impl text_input::StyleSheet for InputStyle {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> text_input::Appearance {
        let p = Palette::of(style);
        text_input::Appearance {
            background: Background::Color(p.surface),
            border: hairline(p.border_strong, 10.0),
            icon_color: p.text_muted,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        text_input::Appearance {
            border: Border {
                color: Palette::of(style).focus,
                ..active.border
            },
            ..active
        }
    }

    fn placeholder_color(&self, style: &Self::Style) -> Color {
        Palette::of(style).disabled_text
    }

    fn value_color(&self, style: &Self::Style) -> Color {
        Palette::of(style).text
    }

    fn selection_color(&self, style: &Self::Style) -> Color {
        Palette::of(style).selection
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(Palette::of(style).disabled_bg),
            ..self.active(style)
        }
    }

    fn disabled_color(&self, style: &Self::Style) -> Color {
        Palette::of(style).disabled_text
    }
}

pub struct InputErrorStyle;

impl text_input::StyleSheet for InputErrorStyle {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> text_input::Appearance {
        let p = Palette::of(style);
        text_input::Appearance {
            background: Background::Color(p.surface),
            border: Border {
                color: p.danger_text,
                width: 2.0,
                radius: 10.0.into(),
            },
            icon_color: p.danger_text,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        self.active(style)
    }

    fn placeholder_color(&self, style: &Self::Style) -> Color {
        Palette::of(style).disabled_text
    }

    fn value_color(&self, style: &Self::Style) -> Color {
        Palette::of(style).text
    }

    fn selection_color(&self, style: &Self::Style) -> Color {
        Palette::of(style).danger_hover
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(Palette::of(style).disabled_bg),
            ..self.active(style)
        }
    }

    fn disabled_color(&self, style: &Self::Style) -> Color {
        Palette::of(style).disabled_text
    }
}

// --- Scrollable Styles ---

pub struct ScrollableStyle;

impl scrollable::StyleSheet for ScrollableStyle {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> scrollable::Appearance {
        scrollable::Appearance {
            container: container::Appearance::default(),
            scrollbar: scrollable::Scrollbar {
                background: Some(Background::Color(Color::TRANSPARENT)),
                border: Border::default(),
                scroller: scrollable::Scroller {
                    color: Palette::of(style).scroller,
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                },
            },
            gap: None,
        }
    }

    fn hovered(
        &self,
        style: &Self::Style,
        is_mouse_over_scrollbar: bool,
    ) -> scrollable::Appearance {
        let active = self.active(style);
        if is_mouse_over_scrollbar {
            scrollable::Appearance {
                scrollbar: scrollable::Scrollbar {
                    scroller: scrollable::Scroller {
                        color: Palette::of(style).scroller_hover,
                        ..active.scrollbar.scroller
                    },
                    ..active.scrollbar
                },
                ..active
            }
        } else {
            active
        }
    }
}

// --- Progress Bar Styles ---

pub struct ProgressBarStyle;

impl progress_bar::StyleSheet for ProgressBarStyle {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> progress_bar::Appearance {
        let p = Palette::of(style);
        progress_bar::Appearance {
            background: Background::Color(p.progress_track),
            bar: Background::Gradient(Gradient::Linear(
                iced::gradient::Linear::new(iced::Radians(1.571)) // left to right
                    .add_stop(0.0, p.progress_start)
                    .add_stop(1.0, p.progress_end),
            )),
            border_radius: 9.0.into(),
        }
    }
}

pub struct ProgressBarCompleted;

impl progress_bar::StyleSheet for ProgressBarCompleted {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> progress_bar::Appearance {
        let p = Palette::of(style);
        progress_bar::Appearance {
            background: Background::Color(p.progress_track),
            bar: Background::Color(p.progress_done),
            border_radius: 9.0.into(),
        }
    }
}
