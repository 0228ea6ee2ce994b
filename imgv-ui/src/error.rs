use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(super)), context(suffix(false)))]
pub enum Error {
    #[snafu(display("Error within Iced"))]
    Iced { source: iced::Error },

    #[snafu(display("{}", source.to_string()))]
    Command { source: crate::app::cmdline::Error },

    #[snafu(display("{}", source.to_string()))]
    Picture { source: crate::app::picture::Error },

    #[snafu(display("Picture loader stopped unexpectedly"))]
    Loader { source: tokio::task::JoinError },
}
