use crate::domain::ports::Storage;
use crate::utils::error::{QuoteError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path.display().to_string())
    }

    fn remove_file(&self, path: &str) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);
        if full_path.exists() {
            fs::remove_file(full_path)?;
        }
        Ok(())
    }
}

/// 只保留在記憶體中的輸出，試算模式使用
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().ok()?.get(path).cloned()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files
            .lock()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn files(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.files.lock().map_err(|_| QuoteError::ConfigError {
            message: "memory storage mutex poisoned".to_string(),
        })
    }
}

impl Storage for MemoryStorage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        self.files()?.insert(path.to_string(), data.to_vec());
        Ok(format!("memory://{}", path))
    }

    fn remove_file(&self, path: &str) -> Result<()> {
        self.files()?.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_storage_creates_directories() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("output"));

        let location = storage.write_file("Invoice_Asha.docx", b"data").unwrap();

        assert!(location.ends_with("Invoice_Asha.docx"));
        assert_eq!(fs::read(&location).unwrap(), b"data");

        storage.remove_file("Invoice_Asha.docx").unwrap();
        assert!(!Path::new(&location).exists());
        // 不存在的檔案移除不算錯誤
        storage.remove_file("Invoice_Asha.docx").unwrap();
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::default();
        assert_eq!(storage.write_file("a.docx", b"1").unwrap(), "memory://a.docx");
        assert_eq!(storage.get_file("a.docx"), Some(b"1".to_vec()));
        assert_eq!(storage.file_names(), vec!["a.docx".to_string()]);

        storage.remove_file("a.docx").unwrap();
        assert!(storage.get_file("a.docx").is_none());
    }
}
