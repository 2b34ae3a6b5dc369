// Manages the on-disk task file.
//
// VERSION BUMP REQUIRED: changes to the serialized form of Task (or DateTime,
// Tag, Description) require incrementing STORAGE_VERSION below.
use crate::model::{ReadOnlyTaskList, Task, TaskList};
use anyhow::{Context, Result, bail};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: description, tags, optional start/end/deadline as RFC 3339 instants
const STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StorageData {
    #[serde(default)]
    version: u32,
    tasks: Vec<Task>,
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock next to `file_path`.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Loads the task list stored at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist yet, so callers can
    /// tell a fresh installation apart from an empty list.
    pub fn load(path: &Path) -> Result<Option<TaskList>> {
        if !path.exists() {
            log::info!("No task file at {}", path.display());
            return Ok(None);
        }
        let json = Self::with_lock(path, || Ok(fs::read_to_string(path)?))
            .with_context(|| format!("Failed to read task file '{}'", path.display()))?;
        let list = Self::from_json_str(&json)
            .with_context(|| format!("Failed to load task file '{}'", path.display()))?;
        log::info!("Loaded {} tasks from {}", list.len(), path.display());
        Ok(Some(list))
    }

    pub fn save(path: &Path, tasks: &dyn ReadOnlyTaskList) -> Result<()> {
        let json = Self::to_json_string(tasks)?;
        Self::with_lock(path, || Self::atomic_write(path, &json))
            .with_context(|| format!("Failed to save task file '{}'", path.display()))?;
        log::info!("Saved {} tasks to {}", tasks.len(), path.display());
        Ok(())
    }

    pub fn to_json_string(tasks: &dyn ReadOnlyTaskList) -> Result<String> {
        let data = StorageData {
            version: STORAGE_VERSION,
            tasks: tasks.tasks().to_vec(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Parses the versioned file format, re-checking every task invariant.
    pub fn from_json_str(json: &str) -> Result<TaskList> {
        let data: StorageData = serde_json::from_str(json)?;
        if data.version > STORAGE_VERSION {
            // Refuse rather than risk overwriting data we cannot represent.
            bail!(
                "Task file version {} is newer than supported version {}",
                data.version,
                STORAGE_VERSION
            );
        }
        for task in &data.tasks {
            task.validate()?;
        }
        Ok(TaskList::from_tasks(data.tasks)?)
    }
}
