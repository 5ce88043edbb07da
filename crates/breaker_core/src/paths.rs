use std::path::PathBuf;

/// Local BreakerBot directory (~/.breakerbot)
pub fn breakerbot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".breakerbot")
}

pub fn config_json_path() -> PathBuf {
    breakerbot_dir().join("config.json")
}

/// Persisted session keys live here, one file per key.
pub fn session_dir() -> PathBuf {
    breakerbot_dir().join("session")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_breakerbot_dir() {
        let root = breakerbot_dir();
        assert!(root.ends_with(".breakerbot"));
        assert_eq!(config_json_path().parent(), Some(root.as_path()));
        assert_eq!(session_dir(), root.join("session"));
    }
}
