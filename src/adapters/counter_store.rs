use crate::domain::model::CounterMap;
use crate::domain::ports::CounterStore;
use crate::utils::error::{QuoteError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 以 JSON 檔保存的計數儲存，讀改寫期間持有旁邊 `.lock` 檔的獨佔鎖
#[derive(Debug, Clone)]
pub struct JsonCounterStore {
    path: PathBuf,
}

impl JsonCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn store_error(&self, message: impl Into<String>) -> QuoteError {
        QuoteError::CounterStoreError {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }

    fn acquire(&self) -> Result<StoreLock> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;

        fs2::FileExt::lock_exclusive(&file)
            .map_err(|e| self.store_error(format!("failed to lock counter store: {}", e)))?;

        Ok(StoreLock { file })
    }

    fn read(&self) -> Result<CounterMap> {
        if !self.path.exists() {
            return Ok(CounterMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(CounterMap::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| self.store_error(format!("invalid counter JSON: {}", e)))
    }

    // 先寫到同目錄的暫存檔再改名，避免寫到一半的檔案
    fn write(&self, counters: &CounterMap) -> Result<()> {
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let json = serde_json::to_string(counters)?;
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl CounterStore for JsonCounterStore {
    fn update<T>(&self, apply: impl FnOnce(&mut CounterMap) -> T) -> Result<T> {
        let _lock = self.acquire()?;

        let mut counters = self.read()?;
        let result = apply(&mut counters);
        self.write(&counters)?;

        tracing::debug!("Counter store {} updated", self.path.display());
        Ok(result)
    }

    fn snapshot(&self) -> Result<CounterMap> {
        let _lock = self.acquire()?;
        self.read()
    }
}

struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = fs2::FileExt::unlock(&self.file) {
            tracing::warn!("Failed to release counter store lock: {}", e);
        }
    }
}

/// 記憶體內的計數儲存，用於試算 (dry run) 與測試
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    counters: Mutex<CounterMap>,
}

impl MemoryCounterStore {
    pub fn with_counters(counters: CounterMap) -> Self {
        Self {
            counters: Mutex::new(counters),
        }
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, CounterMap>> {
        self.counters.lock().map_err(|_| QuoteError::CounterStoreError {
            path: "<memory>".to_string(),
            message: "counter mutex poisoned".to_string(),
        })
    }
}

impl CounterStore for MemoryCounterStore {
    fn update<T>(&self, apply: impl FnOnce(&mut CounterMap) -> T) -> Result<T> {
        let mut counters = self.guard()?;
        Ok(apply(&mut counters))
    }

    fn snapshot(&self) -> Result<CounterMap> {
        Ok(self.guard()?.clone())
    }
}
