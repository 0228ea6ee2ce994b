use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use iced::widget::{self, container, text_input};
use iced::{Element, Length, Task};
use pest::Parser;
use pest_derive::Parser;
use snafu::{OptionExt, Snafu, ensure};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

#[derive(Parser)]
#[grammar = "app/cmdline.pest"]
struct CmdlineParser {}

#[derive(Default, Debug)]
pub struct Cmdline {
    cmd: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Open(PathBuf),
    ClearSelection,
    Analyze,
    ShowErrors,
    ShowInfo,
    SetTheme(Arc<str>),
}

#[derive(Debug, Clone)]
pub enum Message {
    Action(Action),
    OnCommandSubmit,
    OnCommandInput(String),
    FocusInput,
}

static INPUT_ID: LazyLock<widget::Id> = LazyLock::new(widget::Id::unique);

impl Cmdline {
    pub fn update(&mut self, message: Message) -> Task<crate::app::Message> {
        match message {
            Message::Action(action) => match action {
                Action::Quit => Task::done(crate::app::Message::Quit),
                Action::Open(filepath) => Task::done(crate::app::Message::OpenFile(filepath)),
                Action::ClearSelection => Task::done(crate::app::Message::ClearSelection),
                Action::Analyze => Task::done(crate::app::Message::Analyze),
                Action::ShowErrors => Task::done(crate::app::Message::ShowErrors),
                Action::ShowInfo => Task::done(crate::app::Message::ShowInfo),
                Action::SetTheme(name) => Task::done(crate::app::Message::SetTheme(theme(&name))),
            },
            Message::OnCommandInput(cmd) => {
                if cmd.is_empty() {
                    return Task::done(crate::app::Message::CleanScreen);
                }
                self.cmd = cmd;

                Task::none()
            }
            Message::OnCommandSubmit => {
                let cmd = std::mem::take(&mut self.cmd);

                Task::batch([
                    Task::perform(async move { parse_cmd(&cmd) }, |res| match res {
                        Ok(action) => crate::app::Message::CmdLine(Message::Action(action)),
                        Err(source) => {
                            crate::app::Message::ErrorOccurred(crate::Error::Command { source })
                        }
                    }),
                    Task::done(crate::app::Message::CleanScreen),
                ])
            }
            Message::FocusInput => {
                self.cmd = String::from(":");

                widget::operation::focus(INPUT_ID.clone())
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        container(
            text_input("", &self.cmd)
                .id(INPUT_ID.clone())
                .on_input(Message::OnCommandInput)
                .on_submit(Message::OnCommandSubmit)
                .width(Length::Fill)
                .style(|theme, status| {
                    let mut style = text_input::default(theme, status);
                    if let iced::Background::Color(color) = style.background {
                        style.border = style.border.color(color).width(0.0).rounded(0.0);
                    }
                    style
                }),
        )
        .height(Length::Shrink)
        .width(Length::Fill)
        .into()
    }

    pub fn focus(&self) -> Task<Message> {
        Task::done(Message::FocusInput)
    }
}

fn parse_cmd(cmd: &str) -> Result<Action> {
    let mut cmd = CmdlineParser::parse(Rule::line, cmd)
        .map_err(|err| {
            tracing::error!("{}", err);
            error::Error::Parser {
                message: err.to_string(),
            }
        })?
        .next()
        .context(error::Parser {
            message: "No top token parsed",
        })?
        .into_inner();

    let verb = cmd
        .next()
        .filter(|pair| pair.as_rule() == Rule::verb)
        .context(error::Parser {
            message: "No verb token parsed",
        })?
        .into_inner()
        .next()
        .context(error::Parser {
            message: "No inner verb parsed",
        })?;

    let argument = cmd
        .find(|pair| pair.as_rule() == Rule::argument)
        .map(|pair| pair.as_str().trim());

    match verb.as_rule() {
        Rule::open => {
            let filename = argument.context(error::MissingArgument { verb: "open" })?;

            Ok(Action::Open(PathBuf::from(filename)))
        }
        Rule::theme => {
            let name = argument.context(error::MissingArgument { verb: "theme" })?;

            Ok(Action::SetTheme(name.into()))
        }
        rule => {
            ensure!(
                argument.is_none(),
                error::UnexpectedArgument {
                    verb: verb.as_str().to_string()
                }
            );

            match rule {
                Rule::quit => Ok(Action::Quit),
                Rule::clear => Ok(Action::ClearSelection),
                Rule::analyze => Ok(Action::Analyze),
                Rule::errors => Ok(Action::ShowErrors),
                Rule::info => Ok(Action::ShowInfo),
                _ => Err(error::Error::Parser {
                    message: String::from("Unexpected token"),
                }
                .into()),
            }
        }
    }
}

/// Looks a theme up by name, ignoring case and spaces. Unknown names fall
/// back to the light theme.
pub fn theme(name: &str) -> iced::Theme {
    let wanted: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    iced::Theme::ALL
        .iter()
        .find(|theme| {
            let candidate: String = theme
                .to_string()
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect();

            candidate == wanted
        })
        .cloned()
        .unwrap_or(iced::Theme::Light)
}

mod error {
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)), context(suffix(false)))]
    pub(super) enum Error {
        #[snafu(display("{message}"))]
        Parser { message: String },

        #[snafu(display("Command '{verb}' expects an argument"))]
        MissingArgument { verb: &'static str },

        #[snafu(display("Command '{verb}' takes no arguments"))]
        UnexpectedArgument { verb: String },
    }
}
