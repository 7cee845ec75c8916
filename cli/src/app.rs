//! One complete run: palette → scheme → templates → desktop.

use std::path::Path;
use std::sync::Arc;

use engine::render::concurrent::{RenderOptions, generate_concurrent};
use engine::render::{Placeholders, RenderReport, Renderer};
use engine::{EventSink, Scheme, TemplateRegistry};

use crate::args::{Cli, Invocation};
use crate::config::AppConfig;
use crate::desktop;
use crate::error::AppResult;
use crate::palette;
use crate::sink::LogSink;

/// Run the whole pipeline for one invocation.
///
/// Returns the render report. Individual template failures are logged and
/// reported but do not make the run fail; only problems that prevent
/// rendering altogether (bad arguments, no palette, unusable registry) do.
pub async fn run(cli: Cli, config: &AppConfig) -> AppResult<RenderReport> {
    let invocation = cli.validate()?;
    let dry_run = invocation.cli.dry_run;

    let source = palette::select_source(invocation.palette.as_deref(), config.extractor())?;
    log::info!(
        "Generating {} scheme for {} from {}",
        invocation.mode,
        invocation.wallpaper.display(),
        source.describe()
    );
    let pair = source.palette_for(&invocation.wallpaper)?;
    let scheme = Scheme::select(&pair, invocation.mode);

    if invocation.cli.show_colors {
        show_colors(&scheme);
    }
    if invocation.cli.json {
        let json = serde_json::to_string_pretty(&scheme.to_hex()).map_err(std::io::Error::from)?;
        println!("{json}");
    }

    let registry = TemplateRegistry::load(&invocation.registry, &LogSink)?;
    let report = render(&scheme, &registry, &invocation, config).await;

    if report.is_clean() {
        log::info!("Rendered {} templates", report.written());
    } else {
        log::warn!(
            "Rendered {} of {} templates, {} failed",
            report.written(),
            registry.len(),
            report.failed()
        );
    }

    if dry_run {
        log::info!("Dry run: not reloading apps or setting the wallpaper");
        return Ok(report);
    }

    if !invocation.cli.no_reload {
        desktop::reload_apps(config.reload(), invocation.mode);
    }
    if !invocation.cli.no_wallpaper && config.wallpaper().enabled {
        apply_wallpaper(&invocation.wallpaper, config);
    }

    Ok(report)
}

async fn render(
    scheme: &Scheme,
    registry: &TemplateRegistry,
    invocation: &Invocation,
    config: &AppConfig,
) -> RenderReport {
    let dry_run = invocation.cli.dry_run;

    if config.render().parallel() {
        let options = RenderOptions {
            entry_timeout: config.render().entry_timeout(),
            dry_run,
        };
        let placeholders = Arc::new(Placeholders::from_scheme(scheme, &invocation.wallpaper));
        let sink: Arc<dyn EventSink> = Arc::new(LogSink);

        match generate_concurrent(placeholders, registry, options, sink).await {
            Ok(report) => return report,
            Err(e) => log::warn!("{e}; rendering sequentially instead"),
        }
    }

    Renderer::new(scheme, &invocation.wallpaper)
        .with_dry_run(dry_run)
        .generate(registry, &LogSink)
}

fn show_colors(scheme: &Scheme) {
    for (role, hex) in scheme.to_hex() {
        log::info!("{role:<32} {hex}  {}", hex.to_rgb().css());
    }
}

fn apply_wallpaper(wallpaper: &Path, config: &AppConfig) {
    let wallpaper = std::path::absolute(wallpaper).unwrap_or_else(|_| wallpaper.to_path_buf());
    let session = desktop::detect_session();
    if let Err(e) = desktop::set_wallpaper(&wallpaper, session, config.wallpaper()) {
        log::warn!("{e}");
    }
}
