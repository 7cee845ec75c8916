//! Error output for the binary.

use crate::error::AppError;

pub const DEBUG_ENV: &str = "TINCTURE_DEBUG";

pub fn debug_enabled() -> bool {
    std::env::var_os(DEBUG_ENV).is_some_and(|v| !v.is_empty())
}

pub fn print_error(err: &AppError) {
    eprintln!("Error: {err}");
    if debug_enabled() {
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        eprintln!("{err:#?}");
    }
}
