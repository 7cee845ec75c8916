/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid logging.level: {configured}")]
    LogLevel { configured: String },
    #[error("Invalid render.entry_timeout_ms: {configured} (min: {min_limit}, max: {max_limit})")]
    EntryTimeout {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid extractor.command: must not be empty")]
    EmptyExtractorCommand,
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown log level '{configured}'.\n\
                    Valid levels: trace, debug, info, warn, error, off.\n\
                    Please update logging.level in settings.toml."
                )
            }
            ConfigValidationError::EntryTimeout {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Template timeout out of range!\n\
                    Your configured value: {configured} ms\n\
                    Valid range: {min_limit} - {max_limit} ms\n\
                    Please update render.entry_timeout_ms in settings.toml."
                )
            }
            ConfigValidationError::EmptyExtractorCommand => {
                "The palette extractor command is empty.\n\
                Either remove extractor.command from settings.toml or point it at a program."
                    .to_string()
            }
        }
    }
}
