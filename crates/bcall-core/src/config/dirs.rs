use directories::ProjectDirs;
use std::path::PathBuf;

/// Application directories following XDG spec
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/bcall)
    pub config: PathBuf,

    /// Data directory (~/.local/share/bcall)
    pub data: PathBuf,

    /// Config file path
    pub config_file: PathBuf,
}

impl Directories {
    /// Create a new `Directories` instance with standard XDG paths.
    ///
    /// # Panics
    ///
    /// Panics if the system's project directories cannot be determined.
    #[must_use]
    pub fn new() -> Self {
        let project =
            ProjectDirs::from("", "", "bcall").expect("Failed to determine project directories");

        let config = project.config_dir().to_path_buf();
        let data = project.data_dir().to_path_buf();

        Self {
            config_file: config.join("config.json"),
            config,
            data,
        }
    }

    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.json"),
            config: base.clone(),
            data: base,
        }
    }

    /// Directories rooted at the parent of an explicit config file.
    #[must_use]
    pub fn with_config_file(config_file: PathBuf) -> Self {
        let base = config_file
            .parent()
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        Self {
            config: base.clone(),
            data: base,
            config_file,
        }
    }

    /// Ensure all directories exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config)?;
        std::fs::create_dir_all(&self.data)?;
        Ok(())
    }
}

impl Default for Directories {
    fn default() -> Self {
        Self::new()
    }
}
