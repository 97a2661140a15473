//! Loader and instance configuration

use std::env;
use std::path::PathBuf;

/// Environment variable naming the exact libVLC shared library to open
pub const LIBRARY_ENV: &str = "VLC_BRIDGE_LIBVLC";

/// Environment variable listing extra directories to search for libVLC
pub const SEARCH_PATH_ENV: &str = "VLC_BRIDGE_SEARCH_PATH";

/// Platform file names tried in each search directory
#[cfg(target_os = "windows")]
const LIBRARY_NAMES: &[&str] = &["libvlc.dll"];
#[cfg(target_os = "macos")]
const LIBRARY_NAMES: &[&str] = &["libvlc.dylib", "libvlc.5.dylib"];
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const LIBRARY_NAMES: &[&str] = &["libvlc.so", "libvlc.so.5"];

/// Where to find the libVLC shared library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Exact library file; when set, no search happens
    pub library_path: Option<PathBuf>,

    /// Directories searched in order before the system loader path
    pub search_dirs: Vec<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            search_dirs: option_env!("VLC_BRIDGE_LIBDIR")
                .map(PathBuf::from)
                .into_iter()
                .collect(),
        }
    }
}

impl LoaderConfig {
    /// Defaults overridden by `VLC_BRIDGE_LIBVLC` and `VLC_BRIDGE_SEARCH_PATH`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = env::var_os(LIBRARY_ENV) {
            config.library_path = Some(PathBuf::from(path));
        }

        if let Some(paths) = env::var_os(SEARCH_PATH_ENV) {
            let mut dirs: Vec<PathBuf> = env::split_paths(&paths).collect();
            dirs.append(&mut config.search_dirs);
            config.search_dirs = dirs;
        }

        config
    }

    /// Load exactly this library file
    pub fn with_library(path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: Some(path.into()),
            search_dirs: Vec::new(),
        }
    }

    /// Library file names tried on this platform
    pub fn library_names() -> &'static [&'static str] {
        LIBRARY_NAMES
    }

    /// Paths handed to the dynamic loader, in the order they are tried
    pub fn candidates(&self) -> Vec<PathBuf> {
        if let Some(path) = &self.library_path {
            return vec![path.clone()];
        }

        let mut candidates: Vec<PathBuf> = self
            .search_dirs
            .iter()
            .flat_map(|dir| LIBRARY_NAMES.iter().map(move |name| dir.join(name)))
            .collect();

        // Bare names defer to the system loader search path
        candidates.extend(LIBRARY_NAMES.iter().map(PathBuf::from));
        candidates
    }
}

/// Settings applied when creating an [`Instance`](crate::Instance)
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceConfig {
    /// Command-line style arguments passed to `libvlc_new`
    pub args: Vec<String>,

    /// Human-readable application name for HTTP and UI
    pub app_name: Option<String>,

    /// HTTP user agent
    pub user_agent: Option<String>,

    /// Verbosity of the message log (0 = info and errors only)
    pub log_verbosity: Option<u32>,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            app_name: None,
            user_agent: None,
            log_verbosity: None,
        }
    }
}

impl InstanceConfig {
    /// No interface, no video window title, no stats overhead
    pub fn headless() -> Self {
        Self {
            args: vec![
                "--intf=dummy".to_string(),
                "--no-video-title-show".to_string(),
                "--no-stats".to_string(),
                "--ignore-config".to_string(),
            ],
            ..Self::default()
        }
    }

    /// Debug-level native logging
    pub fn verbose() -> Self {
        Self {
            args: vec!["--verbose=2".to_string()],
            log_verbosity: Some(2),
            ..Self::default()
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the application name and user agent together
    pub fn user_agent(mut self, name: impl Into<String>, http: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self.user_agent = Some(http.into());
        self
    }
}
