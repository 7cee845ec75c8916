use std::path::Path;

use super::{DesktopCommand, SessionKind};
use crate::config::{WallpaperConfig, WallpaperTool};
use crate::error::{AppError, AppResult};

/// Commands that set `path` as wallpaper with the configured tool.
///
/// Empty when the tool is disabled or does not work in `session`.
pub fn wallpaper_commands(
    path: &Path,
    session: SessionKind,
    config: &WallpaperConfig,
) -> Vec<DesktopCommand> {
    if !config.enabled {
        return Vec::new();
    }

    let image = path.to_string_lossy().into_owned();
    let extra = config.args.iter().cloned();

    match (config.tool, session) {
        (WallpaperTool::Swaybg, SessionKind::Wayland) => vec![
            DesktopCommand::new("pkill", ["swaybg"]),
            DesktopCommand::new("swaybg", ["-i".to_string(), image].into_iter().chain(extra))
                .detached(),
        ],
        (WallpaperTool::Swww, SessionKind::Wayland) => vec![DesktopCommand::new(
            "swww",
            ["img".to_string(), image].into_iter().chain(extra),
        )],
        (WallpaperTool::Feh, SessionKind::Other) => vec![DesktopCommand::new(
            "feh",
            ["--bg-fill".to_string(), image].into_iter().chain(extra),
        )],
        _ => Vec::new(),
    }
}

pub fn set_wallpaper(path: &Path, session: SessionKind, config: &WallpaperConfig) -> AppResult<()> {
    let commands = wallpaper_commands(path, session, config);
    if commands.is_empty() {
        if config.enabled && config.tool != WallpaperTool::Off {
            log::info!(
                "Not setting wallpaper: {:?} does not support a {:?} session",
                config.tool,
                session
            );
        }
        return Ok(());
    }

    log::info!("Setting wallpaper with {:?}", config.tool);
    for command in &commands {
        // `pkill` exits non-zero when nothing was running.
        if command.program == "pkill" {
            let _ = command.status();
            continue;
        }

        if command.detached {
            command
                .spawn()
                .map_err(|e| AppError::Desktop(format!("failed to start '{command}': {e}")))?;
        } else {
            let status = command
                .status()
                .map_err(|e| AppError::Desktop(format!("failed to run '{command}': {e}")))?;
            if !status.success() {
                return Err(AppError::Desktop(format!("'{command}' exited with {status}")));
            }
        }
    }

    Ok(())
}
