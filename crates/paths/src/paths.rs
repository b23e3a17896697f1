//! Path context for runtime environment detection and project-aware paths.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Identifies the runtime environment where the application is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Running via `cargo run` or in development mode
    Development,
    /// Running as an installed binary in production
    Production,
}

/// Context for managing application paths based on studio/project/app structure.
#[derive(Debug, Clone)]
pub struct PathContext {
    /// The runtime environment (development or production)
    environment: RuntimeEnvironment,
    /// Base path for all application data
    base_path: Arc<Path>,
    /// Studio identifier (e.g., "my_studio")
    studio: String,
    /// Project identifier (e.g., "enrollment")
    project_id: String,
    /// Application identifier (e.g., "intake")
    app_id: &'static str,
}

impl PathContext {
    /// Creates a new PathContext with automatic environment detection.
    pub fn new(
        studio: impl Into<String>,
        project_id: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        let environment = Self::detect_environment();
        let base_path = Self::determine_base_path(environment);

        Self {
            environment,
            base_path: base_path.into(),
            studio: studio.into(),
            project_id: project_id.into(),
            app_id,
        }
    }

    /// Creates a PathContext with an explicit base path (useful for testing).
    pub fn with_base_path(
        base_path: PathBuf,
        studio: impl Into<String>,
        project_id: impl Into<String>,
        app_id: &'static str,
    ) -> Self {
        let environment = Self::detect_environment();

        Self {
            environment,
            base_path: base_path.into(),
            studio: studio.into(),
            project_id: project_id.into(),
            app_id,
        }
    }

    /// Detects the runtime environment based on executable location.
    fn detect_environment() -> RuntimeEnvironment {
        if let Ok(exe_path) = std::env::current_exe() {
            // Binaries under target/debug or target/release come from cargo.
            if exe_path.components().any(|c| c.as_os_str() == "target") {
                return RuntimeEnvironment::Development;
            }
        }

        if std::env::var("CARGO").is_ok() || std::env::var("CARGO_MANIFEST_DIR").is_ok() {
            return RuntimeEnvironment::Development;
        }

        RuntimeEnvironment::Production
    }

    /// Determines the base path based on the runtime environment.
    fn determine_base_path(environment: RuntimeEnvironment) -> PathBuf {
        match environment {
            RuntimeEnvironment::Development => {
                if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
                    PathBuf::from(manifest_dir)
                } else if let Ok(current_dir) = std::env::current_dir() {
                    current_dir
                } else {
                    PathBuf::from(".")
                }
            }
            RuntimeEnvironment::Production => dirs::data_local_dir()
                .map(|dir| dir.join("Enrollment"))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Returns the runtime environment.
    pub fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    /// Returns the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the studio identifier.
    pub fn studio(&self) -> &str {
        &self.studio
    }

    /// Returns the project identifier.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns the app identifier.
    pub fn app_id(&self) -> &str {
        self.app_id
    }

    /// Returns the project root path: `<base>/<studio>/<project_id>`
    pub fn project_root(&self) -> PathBuf {
        self.base_path.join(&self.studio).join(&self.project_id)
    }

    /// Returns the client-side record store: `<studio>/<project_id>/<app_id>.store.ron`
    pub fn store_file(&self) -> PathBuf {
        self.project_root()
            .join(format!("{}.store.ron", self.app_id))
    }

    /// Returns the config directory path: `<studio>/<project_id>/config/`
    pub fn config_dir(&self) -> PathBuf {
        self.project_root().join("config")
    }

    /// Returns the static resource directory: `<studio>/<project_id>/resources/`
    ///
    /// Files placed here shadow the resources bundled into the binary.
    pub fn resources_dir(&self) -> PathBuf {
        self.project_root().join("resources")
    }

    /// Returns the logs directory path: `<studio>/<project_id>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.project_root().join("logs")
    }

    /// Returns a log file path with timestamp: `<studio>/<project_id>/logs/<app_id>.<timestamp>.log`
    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir()
            .join(format!("{}.{}.log", self.app_id, timestamp))
    }

    /// Returns a log file path with current timestamp.
    pub fn log_file_now(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.log_file(&timestamp)
    }

    /// Ensures all necessary directories exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        let dirs = vec![
            self.project_root(),
            self.config_dir(),
            self.resources_dir(),
            self.logs_dir(),
        ];

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
        }

        Ok(())
    }
}

/// Read an embedded text asset. Missing or non-UTF-8 assets yield an empty string.
pub fn asset_str<A: RustEmbed>(path: &str) -> Cow<'static, str> {
    match A::get(path) {
        Some(file) => match file.data {
            Cow::Borrowed(bytes) => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .unwrap_or(Cow::Borrowed("")),
            Cow::Owned(bytes) => String::from_utf8(bytes)
                .map(Cow::Owned)
                .unwrap_or(Cow::Borrowed("")),
        },
        None => Cow::Borrowed(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_context_structure() {
        let ctx = PathContext::with_base_path(
            PathBuf::from("/test/base"),
            "my_studio",
            "my_project",
            "intake",
        );

        assert_eq!(ctx.studio(), "my_studio");
        assert_eq!(ctx.project_id(), "my_project");
        assert_eq!(ctx.app_id(), "intake");
        assert_eq!(
            ctx.project_root(),
            PathBuf::from("/test/base/my_studio/my_project")
        );
    }

    #[test]
    fn test_store_and_resource_paths() {
        let ctx = PathContext::with_base_path(PathBuf::from("/base"), "studio", "project", "app");

        assert_eq!(
            ctx.store_file(),
            PathBuf::from("/base/studio/project/app.store.ron")
        );
        assert_eq!(
            ctx.resources_dir(),
            PathBuf::from("/base/studio/project/resources")
        );
        assert_eq!(
            ctx.config_dir(),
            PathBuf::from("/base/studio/project/config")
        );
    }

    #[test]
    fn test_log_file_path() {
        let ctx = PathContext::with_base_path(PathBuf::from("/base"), "studio", "project", "app");

        let log_path = ctx.log_file("20240315-120000");
        assert_eq!(
            log_path,
            PathBuf::from("/base/studio/project/logs/app.20240315-120000.log")
        );
    }

    #[test]
    fn test_ensure_directories_creates_tree() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let ctx = PathContext::with_base_path(tmp.path().to_path_buf(), "s", "p", "a");

        ctx.ensure_directories().expect("create dirs");
        assert!(ctx.logs_dir().is_dir());
        assert!(ctx.resources_dir().is_dir());
    }
}
