mod cli;

#[snafu::report]
fn main() -> Result<(), Box<imgv_ui::Error>> {
    let cli = cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .init();

    tracing::debug!(?cli, "Starting");

    imgv_ui::run(cli.filename, cli.theme)
}
