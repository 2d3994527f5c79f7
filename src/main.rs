use clap::Parser;
use env_logger::{Builder, Target};
use iced::event::{self, Event};
use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, canvas, column, container, row, text, Column};
use iced::{window, Alignment, Element, Length, Subscription, Task, Theme};
use log::LevelFilter;
use std::time::{Duration, Instant};

mod config;
mod error;
mod loader;
mod maintenance;
mod stack;
mod state;
mod ui;

use config::{Cli, Command, GalleryConfig, StartView};
use loader::LoadedImage;
use stack::navigation;
use stack::{AspectRatioTable, Navigator, StackWindow, Step, TransformCache, Transition};
use state::data::ImageItem;
use state::manifest::Manifest;

/// Shown instead of the stack or grid when the manifest lists no photos
pub const EMPTY_ALBUM: &str = "No photos to display.";

/// Frame interval while a transition is running (~60 FPS)
const ANIMATION_TICK: Duration = Duration::from_millis(16);

/// Which page is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Cover,
    Stack,
    Grid,
}

impl From<StartView> for View {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Cover => View::Cover,
            StartView::Stack => View::Stack,
            StartView::Grid => View::Grid,
        }
    }
}

/// Main application state
struct Gallery {
    config: GalleryConfig,
    /// Read-only for the whole session
    items: Vec<ImageItem>,
    view: View,
    /// Sole owner of the current index
    navigator: Navigator,
    aspect: AspectRatioTable,
    transforms: TransformCache,
    /// Top-card swap in flight, if any
    transition: Option<Transition>,
    /// Last animation tick
    now: Instant,
    /// Photo enlarged in the grid's lightbox
    selected: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the album cover
    OpenAlbum,
    /// User picked STACK or GRID
    ShowView(View),
    /// Click, wheel or arrow key on the stack
    Navigate(Step),
    /// Background header probe finished for a manifest path
    ImageLoaded(String, Result<LoadedImage, String>),
    /// Animation frame
    Tick(Instant),
    /// Thumbnail clicked in the grid
    OpenPhoto(String),
    /// Lightbox dismissed
    ClosePhoto,
}

impl Gallery {
    /// Create a new instance of the application
    fn new(config: GalleryConfig) -> (Self, Task<Message>) {
        // An unreadable manifest is not fatal: the gallery shows its empty state
        let manifest = Manifest::load(&config.manifest).unwrap_or_else(|e| {
            log::warn!("⚠️  {}; starting with an empty album", e);
            Manifest::default()
        });

        if manifest.is_empty() {
            log::warn!("📭 No photos listed in {}", config.manifest.display());
        }

        let items = manifest.into_items();
        log::info!("🎨 Gallery initialized with {} photos", items.len());

        let mut gallery = Gallery {
            view: View::from(config.start_view),
            navigator: Navigator::new(items.len()),
            aspect: AspectRatioTable::seed_from(&items),
            transforms: TransformCache::for_items(&items),
            transition: None,
            now: Instant::now(),
            selected: None,
            items,
            config,
        };

        let task = gallery.probe_visible();
        (gallery, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenAlbum => self.update(Message::ShowView(View::Stack)),
            Message::ShowView(view) => {
                self.view = view;
                self.selected = None;
                // Leaving the stack drops any half-finished animation
                self.transition = None;
                self.probe_visible()
            }
            Message::Navigate(step) => {
                let outgoing = self.navigator.current_index();
                if !self.navigator.apply(step) {
                    return Task::none();
                }

                let incoming = self.navigator.current_index();
                let now = Instant::now();
                self.now = now;
                self.transition = Some(Transition::start(
                    outgoing,
                    incoming,
                    self.navigator.direction(),
                    self.transforms.get(&self.items[incoming].path),
                    now,
                ));

                self.probe_visible()
            }
            Message::ImageLoaded(src, result) => {
                match result {
                    Ok(loaded) => {
                        self.aspect
                            .record(&loaded.src, loaded.natural_width, loaded.natural_height);
                    }
                    Err(e) => {
                        // Broken photo keeps the fallback ratio; no retry
                        log::warn!("⚠️  Could not load {}: {}", src, e);
                        self.aspect.record_failure(&src);
                    }
                }
                Task::none()
            }
            Message::Tick(now) => {
                self.now = now;
                if let Some(transition) = &self.transition {
                    if transition.is_finished(transition.elapsed(now)) {
                        self.transition = None;
                    }
                }
                Task::none()
            }
            Message::OpenPhoto(path) => {
                self.selected = Some(path);
                Task::none()
            }
            Message::ClosePhoto => {
                self.selected = None;
                Task::none()
            }
        }
    }

    /// Start header probes for visible stack cards whose ratio is unknown
    fn probe_visible(&mut self) -> Task<Message> {
        if self.view != View::Stack {
            return Task::none();
        }

        let Some(window) = StackWindow::compute(&self.items, self.navigator.state()) else {
            return Task::none();
        };

        let mut tasks = Vec::new();
        for card in window.cards() {
            if !self.aspect.needs_probe(card.item) || !self.aspect.mark_pending(card.item) {
                continue;
            }

            let src = card.item.path.clone();
            tasks.push(Task::perform(
                loader::probe_dimensions(self.config.site_root.clone(), src.clone()),
                move |result| Message::ImageLoaded(src.clone(), result),
            ));
        }

        Task::batch(tasks)
    }

    /// Whether the window-level wheel/key listeners are attached
    fn stack_listeners_active(&self) -> bool {
        navigation::listeners_active(self.items.len(), self.view == View::Stack)
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = Vec::new();

        if self.stack_listeners_active() {
            subscriptions.push(event::listen_with(stack_input));
        }

        if self.transition.is_some() {
            subscriptions.push(iced::time::every(ANIMATION_TICK).map(Message::Tick));
        }

        if self.view == View::Grid && self.selected.is_some() {
            subscriptions.push(keyboard::on_key_press(lightbox_key));
        }

        Subscription::batch(subscriptions)
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let page = match self.view {
            View::Cover => {
                let cover = self
                    .config
                    .cover
                    .as_deref()
                    .or_else(|| self.items.first().map(|item| item.path.as_str()));
                ui::cover::view("Offsite in Marrakesh", cover, &self.config.site_root)
            }
            View::Stack => self.stack_view(),
            View::Grid => ui::grid::view(&self.items, self.selected.as_deref(), &self.config.site_root),
        };

        row![
            self.sidebar(),
            container(page)
                .center_x(Length::FillPortion(2))
                .center_y(Length::Fill),
        ]
        .height(Length::Fill)
        .into()
    }

    fn sidebar(&self) -> Element<'_, Message> {
        let nav_button = |label: &'static str, view: View| {
            let label = if self.view == view {
                text(label).size(15).font(iced::Font {
                    weight: iced::font::Weight::Bold,
                    ..iced::Font::DEFAULT
                })
            } else {
                text(label).size(15)
            };
            button(label)
                .style(button::text)
                .padding(0)
                .on_press(Message::ShowView(view))
        };

        let content: Column<Message> = column![
            text("2026 offsite").size(20),
            text("Marrakesh, Morocco").size(16),
            text(format!("{} photos", self.items.len())).size(16),
            row![nav_button("STACK", View::Stack), nav_button("GRID", View::Grid)].spacing(16),
        ]
        .spacing(8)
        .padding(32);

        container(content)
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Text shown in place of the pile, if any
    fn stack_placeholder(&self) -> Option<&'static str> {
        self.items.is_empty().then_some(EMPTY_ALBUM)
    }

    fn stack_view(&self) -> Element<'_, Message> {
        if let Some(placeholder) = self.stack_placeholder() {
            return text(placeholder).size(16).into();
        }

        let pile = canvas(ui::stack_canvas::StackCanvas {
            items: &self.items,
            state: self.navigator.state(),
            aspect: &self.aspect,
            transforms: &self.transforms,
            transition: self.transition.as_ref(),
            now: self.now,
            site_root: &self.config.site_root,
        })
        .width(Length::Fill)
        .height(Length::Fill);

        column![
            pile,
            text("Scroll, click, or use arrows to navigate").size(14),
            text(format!("{} of {}", self.navigator.current_index() + 1, self.items.len())).size(14),
        ]
        .spacing(8)
        .padding(16)
        .align_x(Alignment::Center)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Window-level wheel and arrow-key handler for the stack
fn stack_input(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    navigation::step_for_event(&event).map(Message::Navigate)
}

/// Escape closes the lightbox
fn lightbox_key(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        Key::Named(Named::Escape) => Some(Message::ClosePhoto),
        _ => None,
    }
}

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
    } else {
        Builder::new()
            .target(Target::Stdout)
            .filter_level(LevelFilter::Warn)
            .filter_module("offsite_gallery", LevelFilter::Debug)
            .init();
    }
}

fn main() -> iced::Result {
    init_logger();

    let cli = Cli::parse();
    let config = GalleryConfig::from(&cli);

    if let Some(Command::Manifest(command)) = cli.command {
        if let Err(e) = maintenance::run(command, &config) {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    iced::application("Offsite", Gallery::update, Gallery::view)
        .subscription(Gallery::subscription)
        .theme(Gallery::theme)
        .centered()
        .run_with(move || Gallery::new(config))
}
