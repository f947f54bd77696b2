use crate::domain::model::RegisterEntry;
use crate::utils::error::Result;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// 已發出文件的 CSV 紀錄
#[derive(Debug, Clone)]
pub struct Register {
    path: PathBuf,
}

impl Register {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &RegisterEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let is_new = fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(entry)?;
        writer.flush()?;
        Ok(())
    }

    pub fn entries(&self) -> Result<Vec<RegisterEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut entries = Vec::new();
        for row in reader.deserialize() {
            entries.push(row?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(reference_no: &str, name: &str) -> RegisterEntry {
        RegisterEntry {
            generated_at: "2025-05-07T10:00:00".to_string(),
            reference_no: reference_no.to_string(),
            agreement_no: "AG/SG/APDCL/2025/0001".to_string(),
            customer_name: name.to_string(),
            phone: "9876543210".to_string(),
            capacity: "5 kW".to_string(),
            total_amount: 350_000,
            invoice_file: format!("Invoice_{}.docx", name),
            agreement_file: format!("AG_SG_APDCL_2025_0001_{}.docx", name),
        }
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let register = Register::new(dir.path().join("data").join("register.csv"));

        register.append(&entry("BE/KNG/PMSG/QTN/05/25/0001", "Asha")).unwrap();
        register.append(&entry("BE/KNG/PMSG/QTN/05/25/0002", "Das, Ravi")).unwrap();

        let raw = fs::read_to_string(register.path()).unwrap();
        assert_eq!(raw.matches("reference_no").count(), 1);

        let entries = register.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].customer_name, "Das, Ravi");
        assert_eq!(entries[1].total_amount, 350_000);
    }

    #[test]
    fn test_missing_register_is_empty() {
        let dir = TempDir::new().unwrap();
        let register = Register::new(dir.path().join("register.csv"));
        assert!(register.entries().unwrap().is_empty());
    }
}
