use crate::domain::model::CounterMap;
use crate::utils::error::Result;

/// 持久化的計數儲存。`update` 必須在同一個鎖定範圍內完成讀取、修改與寫回
pub trait CounterStore {
    fn update<T>(&self, apply: impl FnOnce(&mut CounterMap) -> T) -> Result<T>;

    fn snapshot(&self) -> Result<CounterMap>;
}

/// 產出文件的存放位置
pub trait Storage {
    /// 寫入檔案並回傳實際位置
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;

    fn remove_file(&self, path: &str) -> Result<()>;
}

pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}
