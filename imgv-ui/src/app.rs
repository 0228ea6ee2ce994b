use std::path::PathBuf;

use iced::{
    Alignment, Element, Length, Subscription, Task, event,
    keyboard::{self, Key, key::Named},
    window,
    widget::{column, container, row, scrollable, stack, text},
};
use imgv_core::{AnalysisRequest, DragState, Readout, SelectionController};
use snafu::ResultExt;

use crate::{Error, Result, app::picture::Picture};

pub mod cmdline;
pub mod picture;
pub mod surface;

#[derive(Debug)]
pub enum Message {
    CmdLine(cmdline::Message),
    Surface(surface::Message),

    OpenFile(PathBuf),
    PictureReady(Picture),
    FileHovered,
    FileHoverLeft,

    ClearSelection,
    Analyze,

    SetTheme(iced::Theme),
    Quit,
    ShowErrors,
    ShowInfo,
    ShowCmdline,
    CleanScreen,

    ErrorOccurred(Error),
}

#[derive(Debug)]
struct App {
    picture: Option<Picture>,
    selection: SelectionController,
    cmdline: cmdline::Cmdline,
    popup: Popup,
    action_area: ActionArea,

    theme: Option<iced::Theme>,

    errors: Vec<Error>,
}

#[derive(Debug, Default)]
enum Popup {
    #[default]
    None,
    Info,
    Errors,
    Analysis(AnalysisRequest),
}

const DROP_HINT: &str = "Drop the file to open it";

#[derive(Debug, Default)]
enum ActionArea {
    #[default]
    None,
    Info(&'static str),
    Error(String),
    Cmdline,
}

pub fn run(filename: Option<PathBuf>, theme: Option<String>) -> Result<()> {
    let theme = theme
        .as_deref()
        .map(cmdline::theme)
        .unwrap_or(iced::Theme::Nord);

    iced::application(
        move || {
            let filename = filename.clone();
            let mut tasks = vec![Task::done(Message::SetTheme(theme.clone()))];

            if let Some(filename) = filename {
                tasks.push(Task::done(Message::OpenFile(filename)));
            }

            (App::new(), Task::batch(tasks))
        },
        App::update,
        App::view,
    )
    .subscription(App::subscription)
    .theme(App::theme)
    .title(App::title)
    .resizable(true)
    .centered()
    .run()
    .context(crate::error::Iced)?;

    Ok(())
}

impl App {
    fn new() -> Self {
        let mut selection = SelectionController::new();
        selection.subscribe(|published| tracing::trace!(?published, "Selection published"));

        Self {
            picture: None,
            selection,
            cmdline: cmdline::Cmdline::default(),
            popup: Popup::default(),
            action_area: ActionArea::default(),
            theme: None,
            errors: Vec::new(),
        }
    }

    fn title(&self) -> String {
        match self.picture.as_ref() {
            Some(picture) => picture.title(),
            None => "ImgV",
        }
        .to_string()
    }

    fn update(&mut self, msg: Message) -> Task<Message> {
        match msg {
            Message::CmdLine(msg) => self.cmdline.update(msg),
            Message::Surface(surface::Message::Pointer { input, geometry }) => {
                self.selection.handle(&input, &geometry);

                Task::none()
            }
            Message::OpenFile(filepath) => {
                self.clear_drop_hint();

                Task::perform(
                    async move {
                        tokio::task::spawn_blocking(move || Picture::read_from_path(filepath))
                            .await
                    },
                    |res| match res {
                        Ok(Ok(picture)) => Message::PictureReady(picture),
                        Ok(Err(source)) => Message::ErrorOccurred(Error::Picture { source }),
                        Err(source) => Message::ErrorOccurred(Error::Loader { source }),
                    },
                )
            }
            Message::FileHovered => {
                if !matches!(self.action_area, ActionArea::Cmdline) {
                    self.action_area = ActionArea::Info(DROP_HINT);
                }

                Task::none()
            }
            Message::FileHoverLeft => {
                self.clear_drop_hint();

                Task::none()
            }
            Message::PictureReady(picture) => {
                self.selection.image_replaced();
                self.picture = Some(picture);
                self.popup = Popup::None;

                Task::none()
            }
            Message::ClearSelection => {
                self.selection.image_replaced();

                Task::none()
            }
            Message::Analyze => {
                if self.picture.is_some() {
                    let selection = self.selection.selection();
                    let request = AnalysisRequest::new(selection.as_ref());
                    tracing::info!(region = ?request.region(), "Analysis requested");

                    self.popup = Popup::Analysis(request);
                } else {
                    self.action_area = ActionArea::Info("No picture opened");
                }

                iced::widget::operation::focus_previous()
            }
            Message::Quit => iced::exit(),
            Message::ShowErrors => {
                if !self.errors.is_empty() {
                    self.popup = Popup::Errors;
                } else {
                    self.action_area = ActionArea::Info("No errors");
                }

                iced::widget::operation::focus_previous()
            }
            Message::ShowInfo => {
                self.popup = Popup::Info;

                iced::widget::operation::focus_previous()
            }
            Message::ShowCmdline => {
                self.action_area = ActionArea::Cmdline;

                self.cmdline.focus().map(Message::CmdLine)
            }
            Message::ErrorOccurred(error) => {
                tracing::error!("{error}");
                self.action_area = ActionArea::Error(format!("{error}"));

                self.errors.push(error);

                Task::none()
            }
            Message::CleanScreen => {
                self.popup = Popup::None;
                self.action_area = ActionArea::None;

                iced::widget::operation::focus_previous()
            }
            Message::SetTheme(theme) => {
                self.theme = Some(theme);

                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let picture = self
            .picture
            .as_ref()
            .map(|picture| surface::view(picture, &self.selection).map(Message::Surface))
            .unwrap_or_else(|| {
                container(
                    text("Drop an image here or open one with :open <path>").style(text::primary),
                )
                .padding(20)
                .into()
            });

        let main_view = row![
            container(picture).height(Length::Fill).width(Length::Fill),
            container(self.readout_view())
                .style(container::rounded_box)
                .padding(10)
                .width(200)
                .height(Length::Fill),
        ]
        .spacing(4)
        .height(Length::Fill);

        let drag_state = container(text!(
            "  {}  ",
            match self.selection.state() {
                DragState::Idle => "IDLE",
                DragState::Dragging { .. } => "SELECTING",
            }
        ))
        .center_y(Length::Fill)
        .height(Length::Fill);

        let current_file = match self.picture.as_ref() {
            Some(picture) => container(text!("  {}  {}  ", picture.title(), picture.size()))
                .style(container::success)
                .center_y(Length::Fill)
                .height(Length::Fill),
            None => container(row![]),
        };

        let status_line = container(row![drag_state, current_file].spacing(4))
            .center_y(Length::Fill)
            .style(container::secondary)
            .width(Length::Fill)
            .height(30);

        let action_line = container(self.action_area.view(self))
            .width(Length::Fill)
            .height(30);

        let layout = column![main_view, status_line, action_line];

        let popup: Element<'_, Message> = match self.popup {
            Popup::None => column![].into(),
            _ => container(
                container(container(self.popup.view(self)).style(container::rounded_box))
                    .padding(40)
                    .center(Length::Fill),
            )
            .height(Length::Fill)
            .width(Length::Fill)
            .into(),
        };

        stack![layout, popup].into()
    }

    fn readout_view(&self) -> Element<'_, Message> {
        let readout = Readout::from_controller(&self.selection);
        let [x, y, x1, y1] = readout.selection_bounds();

        let selection_header = if readout.is_active() {
            row![
                text("Selection box").style(text::secondary),
                text("ACTIVE").style(text::danger)
            ]
            .spacing(10)
        } else {
            row![text("Selection box").style(text::secondary)]
        };

        column![
            text("Current pointer").style(text::secondary),
            row![
                text!("X {}", readout.pointer_x()).size(20),
                text!("Y {}", readout.pointer_y()).size(20)
            ]
            .spacing(20),
            selection_header,
            text!("X (start) {x}"),
            text!("Y (start) {y}"),
            text!("X (end) {x1}"),
            text!("Y (end) {y1}"),
        ]
        .spacing(10)
        .into()
    }

    fn clear_drop_hint(&mut self) {
        if matches!(self.action_area, ActionArea::Info(DROP_HINT)) {
            self.action_area = ActionArea::None;
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let subscriptions = vec![
            keyboard::listen().filter_map(|event| match event {
                keyboard::Event::KeyPressed { modified_key, .. } => {
                    if modified_key == Key::Character(":".into()) {
                        return Some(Message::ShowCmdline);
                    }
                    if modified_key == Key::Named(Named::Escape) {
                        return Some(Message::CleanScreen);
                    }
                    None
                }
                _ => None,
            }),
            event::listen_with(file_drop),
        ];

        Subscription::batch(subscriptions)
    }

    fn theme(&self) -> Option<iced::Theme> {
        self.theme.clone()
    }
}

impl Popup {
    fn view<'a>(&'a self, app: &'a App) -> Element<'a, Message> {
        match self {
            Popup::None => column![].into(),
            Popup::Info => match app.picture.as_ref() {
                Some(picture) => column![
                    text!("File: {}", picture.path().display()),
                    text!("Size: {} px", picture.size()),
                    text!(
                        "File size: {:.2} Mib",
                        picture.filesize() as f64 / ((1024 * 1024) as f64)
                    ),
                    text!("{}", Readout::from_controller(&app.selection)),
                ]
                .padding(10)
                .spacing(10)
                .into(),
                None => text("No picture opened").into(),
            },
            Popup::Errors => scrollable(
                column(app.errors.iter().map(|err| {
                    container(text!("{:#?}", snafu::Report::from_error(err))).into()
                }))
                .width(Length::Fill)
                .padding(10),
            )
            .into(),
            Popup::Analysis(request) => column![
                text("Analysis request").style(text::primary),
                text!("Region: {}", region_label(request)),
                text(request.prompt()),
            ]
            .padding(10)
            .spacing(10)
            .into(),
        }
    }
}

/// Files dropped onto the window are opened like `:open <path>`. When several
/// files are dropped at once, each is opened in turn and the last one stays.
fn file_drop(event: iced::Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        iced::Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        iced::Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FileHoverLeft),
        iced::Event::Window(window::Event::FileDropped(path)) => Some(Message::OpenFile(path)),
        _ => None,
    }
}

fn region_label(request: &AnalysisRequest) -> String {
    match request.region() {
        imgv_core::Region::WholeImage => String::from("whole image"),
        imgv_core::Region::Bounds(bounds) => bounds.to_string(),
    }
}

impl ActionArea {
    fn view<'a>(&'a self, app: &'a App) -> Element<'a, Message> {
        match self {
            ActionArea::None => row![].into(),
            ActionArea::Info(msg) => text!("{msg}")
                .align_y(Alignment::Center)
                .style(text::secondary)
                .into(),
            ActionArea::Error(err) => text!("{err}")
                .align_y(Alignment::Center)
                .style(text::danger)
                .into(),
            ActionArea::Cmdline => app.cmdline.view().map(Message::CmdLine),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_event(event: window::Event) -> Option<Message> {
        file_drop(
            iced::Event::Window(event),
            event::Status::Ignored,
            window::Id::unique(),
        )
    }

    #[test]
    fn test_file_drop() {
        let path = PathBuf::from("pictures/cat.png");

        assert!(matches!(
            window_event(window::Event::FileDropped(path.clone())),
            Some(Message::OpenFile(dropped)) if dropped == path
        ));
        assert!(matches!(
            window_event(window::Event::FileHovered(path)),
            Some(Message::FileHovered)
        ));
        assert!(matches!(
            window_event(window::Event::FilesHoveredLeft),
            Some(Message::FileHoverLeft)
        ));
        assert!(window_event(window::Event::Focused).is_none());
    }

    #[test]
    fn test_drop_hint() {
        let mut app = App::new();

        let _ = app.update(Message::FileHovered);
        assert!(matches!(app.action_area, ActionArea::Info(DROP_HINT)));

        let _ = app.update(Message::FileHoverLeft);
        assert!(matches!(app.action_area, ActionArea::None));

        app.action_area = ActionArea::Cmdline;
        let _ = app.update(Message::FileHovered);
        assert!(matches!(app.action_area, ActionArea::Cmdline));
        let _ = app.update(Message::FileHoverLeft);
        assert!(matches!(app.action_area, ActionArea::Cmdline));

        app.action_area = ActionArea::Info(DROP_HINT);
        let _ = app.update(Message::OpenFile(PathBuf::from("pictures/cat.png")));
        assert!(matches!(app.action_area, ActionArea::None));
    }
}
