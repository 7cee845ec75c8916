use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Wayland,
    Other,
}

impl SessionKind {
    /// Interpret the `Type` property reported by `loginctl`.
    pub fn from_session_type(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("wayland") {
            SessionKind::Wayland
        } else {
            SessionKind::Other
        }
    }
}

/// Detect the type of the current user's graphical session.
///
/// Asks logind first. Without `loginctl` (or without a display session) the
/// presence of `WAYLAND_DISPLAY` decides.
pub fn detect_session() -> SessionKind {
    match loginctl_session_type() {
        Some(value) => {
            log::debug!("loginctl reports session type '{value}'");
            SessionKind::from_session_type(&value)
        }
        None => from_environment(std::env::var_os("WAYLAND_DISPLAY").is_some()),
    }
}

fn from_environment(has_wayland_display: bool) -> SessionKind {
    if has_wayland_display {
        SessionKind::Wayland
    } else {
        SessionKind::Other
    }
}

fn loginctl_value(args: &[&str]) -> Option<String> {
    let output = Command::new("loginctl").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!value.is_empty()).then_some(value)
}

fn loginctl_session_type() -> Option<String> {
    let user = std::env::var("USER").ok()?;
    let display = loginctl_value(&["show-user", user.as_str(), "-p", "Display", "--value"])?;
    loginctl_value(&["show-session", display.as_str(), "-p", "Type", "--value"])
}
