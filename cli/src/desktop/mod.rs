//! Desktop integration: session detection, wallpaper setters and app reloads.
//!
//! Everything here shells out to standard desktop tools. Commands are built
//! as plain [`DesktopCommand`] values first so the decision of *what* to run
//! can be tested without running anything.

use std::fmt;
use std::io;
use std::process::{Command, ExitStatus, Stdio};

pub mod reload;
pub mod session;
pub mod wallpaper;

pub use reload::{reload_apps, reload_commands};
pub use session::{SessionKind, detect_session};
pub use wallpaper::{set_wallpaper, wallpaper_commands};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Started in the background instead of waited on.
    pub detached: bool,
}

impl DesktopCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            detached: false,
        }
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }

    /// Run to completion with all output discarded.
    pub fn status(&self) -> io::Result<ExitStatus> {
        self.command().status()
    }

    /// Start without waiting.
    pub fn spawn(&self) -> io::Result<()> {
        self.command().spawn().map(|_| ())
    }
}

impl fmt::Display for DesktopCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
