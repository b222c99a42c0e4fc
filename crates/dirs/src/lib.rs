use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::OnceLock;

pub struct Dirs;

impl Dirs {
    /// Project directory specifically for mdview.
    ///
    /// All the files created by mdview are stored there.
    pub fn project() -> &'static ProjectDirs {
        static CELL: OnceLock<ProjectDirs> = OnceLock::new();

        CELL.get_or_init(|| {
            ProjectDirs::from("org", "mdview", "mdview")
                .expect("Couldn't create project directory for mdview")
        })
    }

    /// Cache directory for the mdview project.
    pub fn cache_dir() -> std::io::Result<PathBuf> {
        let cache_dir = Self::project().cache_dir();
        std::fs::create_dir_all(cache_dir)?;
        Ok(cache_dir.to_path_buf())
    }

    /// Well-known path of the port advertisement file written by the preview
    /// server and read by discovering clients.
    ///
    /// Linux: ~/.cache/mdview/preview-server.port
    pub fn default_port_file() -> PathBuf {
        Self::project().cache_dir().join("preview-server.port")
    }

    /// Default location of config.toml.
    ///
    /// Linux: ~/.config/mdview/config.toml
    pub fn default_config_file() -> PathBuf {
        Self::project().config_dir().join("config.toml")
    }
}
