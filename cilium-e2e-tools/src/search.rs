//! Executable search path used to resolve tool names

use std::path::PathBuf;

/// Where tool names are resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchPath {
    /// The process PATH
    #[default]
    System,
    /// Only these directories, in order
    Dirs(Vec<PathBuf>),
}

impl SearchPath {
    pub fn dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        SearchPath::Dirs(dirs.into_iter().map(Into::into).collect())
    }

    /// Build from configured directories; an empty list means the process PATH
    pub fn from_config(dirs: &[PathBuf]) -> Self {
        if dirs.is_empty() {
            SearchPath::System
        } else {
            SearchPath::Dirs(dirs.to_vec())
        }
    }

    /// Resolve `name` to the path of an executable file
    pub fn resolve(&self, name: &str) -> which::Result<PathBuf> {
        match self {
            SearchPath::System => which::which(name),
            SearchPath::Dirs(dirs) => {
                let joined =
                    std::env::join_paths(dirs).map_err(|_| which::Error::CannotFindBinaryPath)?;
                let cwd = std::env::current_dir().map_err(|_| which::Error::CannotGetCurrentDir)?;
                which::which_in(name, Some(joined), cwd)
            }
        }
    }
}
