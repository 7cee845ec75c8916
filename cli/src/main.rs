use clap::Parser;
use tincture::args::Cli;
use tincture::{app, config, logger, output};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.settings.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e);
            std::process::exit(1);
        }
    };

    let level = logger::effective_level(config.logging(), cli.verbose, cli.quiet);
    if let Err(e) = logger::setup_logger(config.logging(), level) {
        eprintln!("Warning: Failed to initialize logger: {e}");
    }

    if let Err(e) = app::run(cli, &config).await {
        log::debug!("Run failed: {e:?}");
        output::print_error(&e);
        std::process::exit(1);
    }
}
