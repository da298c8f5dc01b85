// File: ./src/context.rs
/*! Application context abstraction for filesystem paths.

`AppContext` encapsulates where configuration lives and which directories
are searched for fonts. Two implementations are provided:

- `StandardContext`: uses `directories::ProjectDirs`, the platform font
  directories and a `fonts/` directory shipped next to the executable, with an
  optional override root (CLI `--root`).
- `TestContext`: a temporary directory whose `fonts/` subdirectory is the
  only font location, removed when dropped.

There are no environment-variable or global lookups here; callers pass the
context explicitly.
*/

use crate::fonts::FontSearchPath;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    /// Fonts shipped with the application, searched last.
    fn bundled_fonts_dir(&self) -> Option<PathBuf>;

    /// Directories searched for font files; `extra` comes from the configuration.
    fn font_search_path(&self, extra: &[PathBuf]) -> FontSearchPath {
        FontSearchPath::standard(extra, self.bundled_fonts_dir().as_deref())
    }
}

// --- Production Implementation ---

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// When `override_root` is `Some(path)`, configuration is read from
    /// `path/config` and bundled fonts from `path/fonts`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "yeargrid", "yeargrid")
    }

    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
    }
}

impl AppContext for StandardContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return Self::ensure_exists(root.join("config"));
        }
        let proj = Self::get_proj_dirs().ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        Self::ensure_exists(proj.config_dir().to_path_buf())
    }

    fn bundled_fonts_dir(&self) -> Option<PathBuf> {
        if let Some(root) = &self.override_root {
            return Some(root.join("fonts"));
        }
        Self::exe_dir()
            .map(|dir| dir.join("fonts"))
            .filter(|dir| dir.is_dir())
            .or_else(|| Some(PathBuf::from("fonts")))
    }
}

// --- Test Implementation ---

#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    /// Creates a new TestContext backed by a unique temporary directory.
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let root = std::env::temp_dir().join(format!("yeargrid_test_{}", uuid));
        // Best-effort create; tests will panic if this fails.
        std::fs::create_dir_all(root.join("fonts")).expect("failed to create TestContext temp dir");
        Self { root }
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.root.join("fonts")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("config");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn bundled_fonts_dir(&self) -> Option<PathBuf> {
        Some(self.fonts_dir())
    }

    // System and user font directories stay out of tests.
    fn font_search_path(&self, extra: &[PathBuf]) -> FontSearchPath {
        let mut dirs = extra.to_vec();
        dirs.push(self.fonts_dir());
        FontSearchPath::new(dirs)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Best-effort cleanup; ignore errors.
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
