/// Lower bound for `render.entry_timeout_ms`.
pub const MIN_ENTRY_TIMEOUT_MS: u64 = 1;

/// Upper bound for `render.entry_timeout_ms` (10 minutes).
pub const MAX_ENTRY_TIMEOUT_MS: u64 = 600_000;
