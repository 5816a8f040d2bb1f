#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or unparseable keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let max_file_size_mb: usize = lookup("MAX_FILE_SIZE_MB")
            .and_then(|s| s.parse().ok())
            .unwrap_or(25);

        Self {
            port,
            max_file_size: max_file_size_mb.saturating_mul(1024 * 1024),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
