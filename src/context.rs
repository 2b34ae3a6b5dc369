/*! Application context abstraction for filesystem paths.

`AppContext` decides where the data, config and cache directories live.

- `StandardContext`: `directories::ProjectDirs`, or an override root
  (the `--root` flag).
- `TestContext`: a temporary directory that is removed on drop.

Code that touches the filesystem takes a `&dyn AppContext`; there is no
global path state.
*/

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const TASKS_FILENAME: &str = "tasks.json";
pub const CONFIG_FILENAME: &str = "config.toml";
pub const LOG_FILENAME: &str = "watodo.log";

/// Defines the file system context for the application.
///
/// The trait is object-safe so callers can hold `Arc<dyn AppContext>`.
pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;
    fn get_cache_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILENAME))
    }

    fn get_task_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(TASKS_FILENAME))
    }

    fn get_log_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_cache_dir()?.join(LOG_FILENAME))
    }
}

// --- Production Implementation ---

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// When `override_root` is `Some(path)`, all directories are created
    /// under that root as `data`, `config` and `cache`.
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

    fn resolve(&self, subdir: &str, pick: fn(&ProjectDirs) -> &std::path::Path) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return Self::ensure_exists(root.join(subdir));
        }
        let proj = ProjectDirs::from("com", "watodo", "watodo")
            .ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        Self::ensure_exists(pick(&proj).to_path_buf())
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.resolve("data", ProjectDirs::data_dir)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.resolve("config", ProjectDirs::config_dir)
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        self.resolve("cache", ProjectDirs::cache_dir)
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
        let root = std::env::temp_dir().join(format!("watodo_test_{}", uuid));
        std::fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("data");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("config");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("cache");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Best-effort cleanup; ignore errors.
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_root_layout() {
        let tmp = TestContext::new();
        let ctx = StandardContext::new(Some(tmp.root.clone()));
        assert_eq!(ctx.get_task_file_path().unwrap(), tmp.root.join("data").join(TASKS_FILENAME));
        assert_eq!(
            ctx.get_config_file_path().unwrap(),
            tmp.root.join("config").join(CONFIG_FILENAME)
        );
        assert!(ctx.get_cache_dir().unwrap().exists());
    }

    #[test]
    fn test_context_cleans_up() {
        let root = {
            let ctx = TestContext::new();
            ctx.get_data_dir().unwrap();
            ctx.root.clone()
        };
        assert!(!root.exists());
    }
}
