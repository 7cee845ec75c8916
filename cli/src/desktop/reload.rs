use engine::Mode;

use super::DesktopCommand;
use crate::config::ReloadConfig;

pub fn gtk_theme_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Dark => "adw-gtk3-dark",
        Mode::Light => "adw-gtk3",
    }
}

/// Signals and settings that make running applications pick up new colors.
pub fn reload_commands(config: &ReloadConfig, mode: Mode) -> Vec<DesktopCommand> {
    if !config.enabled {
        return Vec::new();
    }

    let mut commands = Vec::new();
    if config.waybar {
        commands.push(DesktopCommand::new("pkill", ["-SIGUSR2", "waybar"]));
    }
    if config.kitty {
        commands.push(DesktopCommand::new("pkill", ["-SIGUSR1", "kitty"]));
    }
    if config.dunst {
        commands.push(DesktopCommand::new("pkill", ["-SIGUSR2", "dunst"]));
    }
    if config.gtk_theme {
        commands.push(DesktopCommand::new(
            "gsettings",
            [
                "set",
                "org.gnome.desktop.interface",
                "gtk-theme",
                gtk_theme_name(mode),
            ],
        ));
    }
    commands
}

/// Run every reload command. Failures are logged and never stop the others.
///
/// Returns how many commands could not be run or exited unsuccessfully.
pub fn reload_apps(config: &ReloadConfig, mode: Mode) -> usize {
    let mut failed = 0;
    for command in reload_commands(config, mode) {
        match command.status() {
            Ok(status) if status.success() => log::debug!("Ran '{command}'"),
            Ok(status) => {
                // pkill exits 1 when no process matched; not worth a warning.
                log::debug!("'{command}' exited with {status}");
                failed += 1;
            }
            Err(e) => {
                log::warn!("Failed to run '{command}': {e}");
                failed += 1;
            }
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reload_list() {
        let commands = reload_commands(&ReloadConfig::default(), Mode::Dark);
        let rendered: Vec<String> = commands.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "pkill -SIGUSR2 waybar",
                "pkill -SIGUSR1 kitty",
                "gsettings set org.gnome.desktop.interface gtk-theme adw-gtk3-dark",
            ]
        );
    }

    #[test]
    fn test_light_mode_theme_and_dunst() {
        let config = ReloadConfig {
            waybar: false,
            kitty: false,
            dunst: true,
            ..ReloadConfig::default()
        };
        let rendered: Vec<String> = reload_commands(&config, Mode::Light)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "pkill -SIGUSR2 dunst",
                "gsettings set org.gnome.desktop.interface gtk-theme adw-gtk3",
            ]
        );
    }

    #[test]
    fn test_disabled_reload_runs_nothing() {
        let config = ReloadConfig {
            enabled: false,
            ..ReloadConfig::default()
        };
        assert!(reload_commands(&config, Mode::Dark).is_empty());
        assert_eq!(reload_apps(&config, Mode::Dark), 0);
    }
}
