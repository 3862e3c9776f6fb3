//! Main GUI application

use crate::database::DatabaseManager;
use crate::extractor::{Extractor, QualityPreset};
use crate::gui::activity::{status_for, ActivityLog, StatusLine};
use crate::gui::clipboard;
use crate::gui::components::log_scroll_id;
use crate::gui::theme::{self, Palette, StatusState};
use crate::queue::{QueueEvent, QueueItem, QueueManager};
use crate::utils::config::{AppSettings, CancelMode};
use iced::widget::scrollable;
use iced::{Application, Command, Element, Subscription, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Everything the application needs from `main`
pub struct Flags {
    /// Runtime the queue and database work runs on; kept alive for the app lifetime
    pub runtime: Arc<Runtime>,
    /// `None` when the settings database could not be opened
    pub db: Option<Arc<DatabaseManager>>,
    pub settings: AppSettings,
    pub extractor: Arc<dyn Extractor>,
    /// Lines shown in the activity log on startup
    pub startup_notes: Vec<String>,
}

/// Main application state
pub struct VidQueueApp {
    // Core components
    runtime: Arc<Runtime>,
    db: Option<Arc<DatabaseManager>>,
    queue: QueueManager,
    events: mpsc::UnboundedReceiver<QueueEvent>,

    // UI State
    current_view: View,
    url_input: String,
    url_error: Option<String>,
    preset: QualityPreset,
    status: StatusLine,
    log: ActivityLog,

    // Snapshot of the queue, refreshed after every action and tick
    items: Vec<QueueItem>,
    running: bool,
    overall_progress: f32,

    // Settings form
    output_dir_input: String,
    cookie_input: String,
    default_preset: QualityPreset,
    interrupt_on_cancel: bool,
    settings_notice: Option<String>,
    dark_mode: bool,
}

/// Application view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Queue,
    Settings,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Input events
    UrlInputChanged(String),
    PasteFromClipboard,
    ClearUrlInput,
    PresetSelected(QualityPreset),

    // Queue control
    AddToQueue,
    StartQueue,
    CancelQueue,
    RowPresetChanged(String, QualityPreset),
    RemoveItem(String),
    ClearFinished,
    OpenFolder(Option<PathBuf>),
    ClearLog,

    // View navigation
    SwitchToQueue,
    SwitchToSettings,

    // Settings
    OutputDirChanged(String),
    BrowseOutputDir,
    CookieFileChanged(String),
    BrowseCookieFile,
    DefaultPresetSelected(QualityPreset),
    InterruptOnCancelToggled(bool),
    DarkModeToggled(bool),
    SaveSettings,
    SettingsSaved(Result<(), String>),
    ThemeSaved(Result<(), String>),

    // System
    Tick, // Drains queue events
}

impl Application for VidQueueApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Flags;

    fn new(flags: Self::Flags) -> (Self, Command<Message>) {
        let (events_tx, events) = mpsc::unbounded_channel();
        let queue = QueueManager::new(flags.extractor, flags.settings.clone(), events_tx);

        let mut log = ActivityLog::new();
        for note in &flags.startup_notes {
            log.push(note);
        }

        let mut app = Self {
            runtime: flags.runtime,
            db: flags.db,
            queue,
            events,
            current_view: View::Queue,
            url_input: String::new(),
            url_error: None,
            preset: flags.settings.default_preset,
            status: StatusLine::default(),
            log,
            items: Vec::new(),
            running: false,
            overall_progress: 0.0,
            output_dir_input: String::new(),
            cookie_input: String::new(),
            default_preset: flags.settings.default_preset,
            interrupt_on_cancel: flags.settings.cancel_mode.interrupts(),
            settings_notice: None,
            dark_mode: flags.settings.dark_mode,
        };
        app.load_settings_form();

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("VidQueue - Video Download Queue")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            // Input events
            Message::UrlInputChanged(url) => {
                self.url_input = url;
                self.url_error = None; // Clear error when user types
                Command::none()
            }

            Message::PasteFromClipboard => {
                match clipboard::get_clipboard_content() {
                    Ok(content) => {
                        self.url_input = clipboard::flatten_urls(&content);
                        self.url_error = None;
                        self.status = StatusLine::idle("URL pasted from clipboard");
                    }
                    Err(e) => {
                        warn!("{}", e);
                        self.url_error = Some(e);
                    }
                }
                Command::none()
            }

            Message::ClearUrlInput => {
                self.url_input.clear();
                self.url_error = None;
                Command::none()
            }

            Message::PresetSelected(preset) => {
                self.preset = preset;
                Command::none()
            }

            // Queue control
            Message::AddToQueue => {
                match self
                    .queue
                    .enqueue_many(self.url_input.split_whitespace(), self.preset)
                {
                    Ok(ids) => {
                        self.url_input.clear();
                        self.url_error = None;
                        self.status =
                            StatusLine::idle(format!("Added {} item(s) to queue.", ids.len()));
                    }
                    Err(e) => self.url_error = Some(e.to_string()),
                }
                self.refresh()
            }

            Message::StartQueue => {
                if self.queue.settings().output_dir.as_os_str().is_empty() {
                    self.status = StatusLine::new(
                        "Please select an output folder in Settings.",
                        StatusState::Warning,
                    );
                    return Command::none();
                }

                let started = {
                    let _guard = self.runtime.enter();
                    self.queue.start()
                };
                if started.is_some() {
                    self.log.push("Starting queue...");
                    self.status = StatusLine::new("Starting queue...", StatusState::Active);
                } else {
                    self.status = StatusLine::idle("Add URLs to the queue first.");
                }
                self.refresh()
            }

            Message::CancelQueue => {
                let interrupting = self.queue.settings().cancel_mode.interrupts();
                let canceled = self.queue.cancel();
                info!("Cancel requested, {} queued item(s) canceled", canceled);
                self.log.push("Cancel requested...");
                self.status = if interrupting {
                    StatusLine::new("Cancelling current item...", StatusState::Warning)
                } else {
                    StatusLine::new(
                        "Stopping queue after the current item...",
                        StatusState::Warning,
                    )
                };
                self.refresh()
            }

            Message::RowPresetChanged(id, preset) => {
                if let Err(e) = self.queue.set_preset(&id, preset) {
                    self.status = StatusLine::new(e.to_string(), StatusState::Error);
                }
                self.refresh()
            }

            Message::RemoveItem(id) => {
                match self.queue.remove(&id) {
                    Ok(_) => self.status = StatusLine::idle("Removed 1 item(s)."),
                    Err(e) => self.status = StatusLine::new(e.to_string(), StatusState::Error),
                }
                self.refresh()
            }

            Message::ClearFinished => {
                match self.queue.clear_finished() {
                    Ok(0) => {}
                    Ok(cleared) => {
                        self.status =
                            StatusLine::idle(format!("Cleared {} finished item(s).", cleared))
                    }
                    Err(e) => self.status = StatusLine::new(e.to_string(), StatusState::Error),
                }
                self.refresh()
            }

            Message::OpenFolder(folder) => {
                let folder = folder.unwrap_or_else(|| self.queue.settings().output_dir);
                if let Err(e) = open::that(&folder) {
                    error!("Failed to open folder {:?}: {}", folder, e);
                    self.status = StatusLine::new(
                        format!("Failed to open folder: {}", e),
                        StatusState::Error,
                    );
                }
                Command::none()
            }

            Message::ClearLog => {
                self.log.clear();
                Command::none()
            }

            // View navigation
            Message::SwitchToQueue => {
                self.current_view = View::Queue;
                Command::none()
            }

            Message::SwitchToSettings => {
                self.load_settings_form();
                self.settings_notice = None;
                self.current_view = View::Settings;
                Command::none()
            }

            // Settings
            Message::OutputDirChanged(value) => {
                self.output_dir_input = value;
                Command::none()
            }

            Message::BrowseOutputDir => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Select output folder")
                    .pick_folder()
                {
                    self.output_dir_input = path.to_string_lossy().to_string();
                }
                Command::none()
            }

            Message::CookieFileChanged(value) => {
                self.cookie_input = value;
                Command::none()
            }

            Message::BrowseCookieFile => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Select cookies.txt")
                    .add_filter("Text files", &["txt"])
                    .add_filter("All files", &["*"])
                    .pick_file()
                {
                    self.cookie_input = path.to_string_lossy().to_string();
                }
                Command::none()
            }

            Message::DefaultPresetSelected(preset) => {
                self.default_preset = preset;
                Command::none()
            }

            Message::InterruptOnCancelToggled(value) => {
                self.interrupt_on_cancel = value;
                Command::none()
            }

            Message::DarkModeToggled(dark_mode) => {
                self.dark_mode = dark_mode;
                let mut settings = self.queue.settings();
                settings.dark_mode = dark_mode;
                self.queue.update_settings(settings.clone());
                info!("Theme set to {}", if dark_mode { "dark" } else { "light" });

                // Applied right away; only the save result comes back
                match self.persist(settings) {
                    Some(save) => Command::perform(save, |result| {
                        Message::ThemeSaved(result.unwrap_or_else(|e| Err(e.to_string())))
                    }),
                    None => Command::none(),
                }
            }

            Message::SaveSettings => {
                let output_dir = self.output_dir_input.trim();
                if output_dir.is_empty() {
                    self.settings_notice = Some("Please select an output folder.".to_string());
                    return Command::none();
                }

                let mut settings = AppSettings {
                    output_dir: PathBuf::from(output_dir),
                    default_preset: self.default_preset,
                    cancel_mode: if self.interrupt_on_cancel {
                        CancelMode::InterruptCurrent
                    } else {
                        CancelMode::FinishCurrent
                    },
                    dark_mode: self.dark_mode,
                    ..AppSettings::default()
                };
                settings.set_cookie_file(&self.cookie_input);

                self.queue.update_settings(settings.clone());
                self.preset = settings.default_preset;

                // Save settings to database
                match self.persist(settings) {
                    Some(save) => Command::perform(save, |result| {
                        Message::SettingsSaved(result.unwrap_or_else(|e| Err(e.to_string())))
                    }),
                    None => {
                        self.settings_notice = Some(
                            "Settings applied for this session (settings database unavailable)."
                                .to_string(),
                        );
                        Command::none()
                    }
                }
            }

            Message::SettingsSaved(result) => {
                match result {
                    Ok(()) => {
                        info!("Settings saved");
                        self.settings_notice = Some("Settings saved.".to_string());
                    }
                    Err(e) => {
                        error!("Failed to save settings: {}", e);
                        self.settings_notice = Some(format!("Failed to save settings: {}", e));
                    }
                }
                Command::none()
            }

            Message::ThemeSaved(result) => {
                if let Err(e) = result {
                    error!("Failed to save theme: {}", e);
                    self.log.push(format!("Failed to save theme: {}", e));
                }
                Command::none()
            }

            Message::Tick => {
                let mut logged = false;
                while let Ok(event) = self.events.try_recv() {
                    logged |= self.log.record(&event);
                    if let Some(status) = status_for(&event) {
                        self.status = status;
                    }
                }

                let refresh = self.refresh();
                if logged {
                    Command::batch([
                        refresh,
                        scrollable::snap_to(log_scroll_id(), scrollable::RelativeOffset::END),
                    ])
                } else {
                    refresh
                }
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        use iced::widget::{button, column, container, row, text, Space};
        use iced::Length;

        let palette = Palette::new(self.dark_mode);

        // Sidebar
        let sidebar = container(
            column![
                // App Title / Logo Area
                container(
                    text("VidQueue")
                        .size(24)
                        .style(iced::theme::Text::Color(palette.ink))
                )
                .padding(20),
                Space::with_height(20),
                // Navigation Items
                button(text("Queue").size(16))
                    .style(iced::theme::Button::Custom(Box::new(
                        if self.current_view == View::Queue {
                            theme::SidebarButtonStyle::Active
                        } else {
                            theme::SidebarButtonStyle::Inactive
                        }
                    )))
                    .width(Length::Fill)
                    .padding(12)
                    .on_press(Message::SwitchToQueue),
                button(text("Settings").size(16))
                    .style(iced::theme::Button::Custom(Box::new(
                        if self.current_view == View::Settings {
                            theme::SidebarButtonStyle::Active
                        } else {
                            theme::SidebarButtonStyle::Inactive
                        }
                    )))
                    .width(Length::Fill)
                    .padding(12)
                    .on_press(Message::SwitchToSettings),
                Space::with_height(Length::Fill),
                button(text(if self.dark_mode { "Light Theme" } else { "Dark Theme" }).size(13))
                    .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
                    .width(Length::Fill)
                    .padding([8, 12])
                    .on_press(Message::DarkModeToggled(!self.dark_mode)),
                text(if self.running { "Queue running" } else { "Idle" })
                    .size(12)
                    .style(iced::theme::Text::Color(palette.text_muted)),
            ]
            .spacing(10)
            .padding(10),
        )
        .width(Length::Fixed(200.0))
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            theme::SidebarContainer,
        )));

        // Main Content Area
        let content = match self.current_view {
            View::Queue => {
                use crate::gui::views::main_view;
                main_view(
                    &self.url_input,
                    self.url_error.as_deref(),
                    self.preset,
                    &self.items,
                    self.running,
                    &self.status,
                    self.overall_progress,
                    self.log.lines(),
                    palette,
                )
            }
            View::Settings => {
                use crate::gui::views::settings_view;
                settings_view(
                    &self.output_dir_input,
                    &self.cookie_input,
                    self.default_preset,
                    self.interrupt_on_cancel,
                    self.dark_mode,
                    self.settings_notice.as_deref(),
                    palette,
                )
            }
        };

        // Combine Sidebar and Content
        let main_layout = row![
            sidebar,
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(20)
        ];

        // Wrap in Gradient Container
        container(main_layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(
                theme::MainGradientContainer,
            )))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_millis(100)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Self::Theme {
        theme::app_theme(self.dark_mode)
    }
}

impl VidQueueApp {
    /// Pull a fresh snapshot of the queue
    fn refresh(&mut self) -> Command<Message> {
        self.items = self.queue.items();
        self.running = self.queue.is_running();
        self.overall_progress = self.queue.overall_progress();
        Command::none()
    }

    /// Save settings on the runtime; `None` without a settings database
    fn persist(
        &self,
        settings: AppSettings,
    ) -> Option<tokio::task::JoinHandle<Result<(), String>>> {
        let db = self.db.clone()?;
        Some(self.runtime.spawn(async move {
            db.save_app_settings(&settings)
                .await
                .map_err(|e| e.to_string())
        }))
    }

    /// Reset the settings form to the settings currently in effect
    fn load_settings_form(&mut self) {
        let settings = self.queue.settings();
        self.output_dir_input = settings.output_dir.to_string_lossy().to_string();
        self.cookie_input = settings
            .cookie_file
            .map(|path| path.to_string_lossy().to_string())
            .unwrap_or_default();
        self.default_preset = settings.default_preset;
        self.interrupt_on_cancel = settings.cancel_mode.interrupts();
    }
}
