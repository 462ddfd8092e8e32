use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "CILIUM_E2E_CONFIG";

/// File name looked up in the home directory when nothing else is given
pub const CONFIG_FILE_NAME: &str = ".cilium-e2e.toml";

/// Configuration path from CILIUM_E2E_CONFIG, if set and non-empty
pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// ${HOME}/.cilium-e2e.toml, falling back to USERPROFILE on Windows
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|value| !value.is_empty())
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}

/// Pick the configuration file to load
///
/// An explicit path always wins, then CILIUM_E2E_CONFIG. The home directory
/// file is only returned when it exists, so a missing default means "use
/// built-in defaults" rather than an error.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = config_path_from_env() {
        return Some(path);
    }
    default_config_path().filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    struct EnvGuard {
        saved: Vec<(&'static str, Option<std::ffi::OsString>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, Option<&Path>)]) -> Self {
            let saved = vars
                .iter()
                .map(|(key, _)| (*key, std::env::var_os(key)))
                .collect();
            for (key, value) in vars {
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.saved {
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let env_path = dir.path().join("from-env.toml");
        let _guard = EnvGuard::set(&[(CONFIG_ENV_VAR, Some(env_path.as_path()))]);

        let explicit = dir.path().join("explicit.toml");
        assert_eq!(resolve_config_path(Some(&explicit)), Some(explicit));
    }

    #[test]
    #[serial]
    fn test_env_var_used_without_explicit_path() {
        let dir = TempDir::new().unwrap();
        let env_path = dir.path().join("from-env.toml");
        let _guard = EnvGuard::set(&[(CONFIG_ENV_VAR, Some(env_path.as_path()))]);

        assert_eq!(resolve_config_path(None), Some(env_path));
    }

    #[test]
    #[serial]
    fn test_home_file_only_when_present() {
        let home = TempDir::new().unwrap();
        let _guard = EnvGuard::set(&[
            (CONFIG_ENV_VAR, None),
            ("HOME", Some(home.path())),
        ]);

        assert_eq!(resolve_config_path(None), None);

        let file = home.path().join(CONFIG_FILE_NAME);
        std::fs::write(&file, "").unwrap();
        assert_eq!(resolve_config_path(None), Some(file));
    }
}
