use crate::core::Storage;
use crate::domain::model::{FileRole, StagedFile, StagedFiles};
use crate::utils::error::Result;
use std::path::Path;

impl StagedFile {
    /// Reads `path` through `storage`; the staged name is the last path component.
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let contents = storage.read_file(path).await?;
        let name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();
        Ok(StagedFile::new(name, contents))
    }
}

/// Holds at most one candidate file per role, plus per-role hover state.
#[derive(Debug, Clone, Default)]
pub struct FileStaging {
    files: StagedFiles,
    drag_raw_data: bool,
    drag_mcc_template: bool,
}

impl FileStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manual selection: replaces the role's file without checking its name.
    pub fn set_file(&mut self, role: FileRole, file: StagedFile) {
        tracing::debug!("Staged '{}' as {} ({} bytes)", file.name, role, file.size());
        *self.files.slot_mut(role) = Some(file);
    }

    /// Drag and drop: the file is kept only if its lowercase name ends with
    /// the role's extension. Anything else is dropped silently.
    pub fn set_file_from_drop(&mut self, role: FileRole, file: StagedFile) -> bool {
        self.set_drag_active(role, false);

        let expected = role.expected_extension();
        if !file.name.to_lowercase().ends_with(expected) {
            tracing::debug!(
                "Ignoring dropped '{}' for {}: expected a {} file",
                file.name,
                role,
                expected
            );
            return false;
        }

        self.set_file(role, file);
        true
    }

    pub fn drag_enter(&mut self, role: FileRole) {
        self.set_drag_active(role, true);
    }

    pub fn drag_leave(&mut self, role: FileRole) {
        self.set_drag_active(role, false);
    }

    pub fn is_drag_active(&self, role: FileRole) -> bool {
        match role {
            FileRole::RawData => self.drag_raw_data,
            FileRole::MccTemplate => self.drag_mcc_template,
        }
    }

    fn set_drag_active(&mut self, role: FileRole, active: bool) {
        match role {
            FileRole::RawData => self.drag_raw_data = active,
            FileRole::MccTemplate => self.drag_mcc_template = active,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.files.is_ready()
    }

    pub fn file(&self, role: FileRole) -> Option<&StagedFile> {
        self.files.get(role)
    }

    pub fn files(&self) -> &StagedFiles {
        &self.files
    }

    /// Roles that still need a file, in display order.
    pub fn missing_roles(&self) -> Vec<FileRole> {
        FileRole::ALL
            .into_iter()
            .filter(|role| self.files.get(*role).is_none())
            .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use tempfile::TempDir;

    fn file(name: &str) -> StagedFile {
        StagedFile::new(name, name.as_bytes().to_vec())
    }

    #[test]
    fn test_drop_with_wrong_extension_keeps_previous_file() {
        let mut staging = FileStaging::new();
        staging.set_file(FileRole::RawData, file("january.xlsx"));

        assert!(!staging.set_file_from_drop(FileRole::RawData, file("january.csv")));
        assert!(!staging.set_file_from_drop(FileRole::RawData, file("mcc.xlsb")));
        assert_eq!(staging.file(FileRole::RawData).unwrap().name, "january.xlsx");

        assert!(!staging.set_file_from_drop(FileRole::MccTemplate, file("template.xlsx")));
        assert!(staging.file(FileRole::MccTemplate).is_none());
    }

    #[test]
    fn test_drop_extension_check_ignores_case() {
        let mut staging = FileStaging::new();
        assert!(staging.set_file_from_drop(FileRole::RawData, file("DATA.XLSX")));
        assert!(staging.set_file_from_drop(FileRole::MccTemplate, file("Mcc.Xlsb")));
        assert!(staging.is_ready());
    }

    #[test]
    fn test_manual_selection_skips_extension_check() {
        let mut staging = FileStaging::new();
        staging.set_file(FileRole::RawData, file("notes.txt"));
        staging.set_file(FileRole::MccTemplate, file("notes.pdf"));
        assert!(staging.is_ready());
    }

    #[test]
    fn test_ready_for_every_assignment_order() {
        for order in [
            [FileRole::RawData, FileRole::MccTemplate],
            [FileRole::MccTemplate, FileRole::RawData],
        ] {
            let mut staging = FileStaging::new();
            staging.set_file(order[0], file("first.xlsx"));
            assert!(!staging.is_ready());
            assert_eq!(staging.missing_roles(), vec![order[1]]);
            staging.set_file(order[1], file("second.xlsb"));
            assert!(staging.is_ready());
            assert!(staging.missing_roles().is_empty());
        }
    }

    #[test]
    fn test_replacing_a_file_keeps_one_per_role() {
        let mut staging = FileStaging::new();
        staging.set_file(FileRole::RawData, file("old.xlsx"));
        staging.set_file(FileRole::RawData, file("new.xlsx"));
        assert_eq!(staging.file(FileRole::RawData).unwrap().name, "new.xlsx");
        assert!(staging.file(FileRole::MccTemplate).is_none());
    }

    #[test]
    fn test_drag_state_is_tracked_per_role() {
        let mut staging = FileStaging::new();
        staging.drag_enter(FileRole::RawData);
        assert!(staging.is_drag_active(FileRole::RawData));
        assert!(!staging.is_drag_active(FileRole::MccTemplate));

        staging.drag_leave(FileRole::RawData);
        assert!(!staging.is_drag_active(FileRole::RawData));

        staging.drag_enter(FileRole::MccTemplate);
        staging.set_file_from_drop(FileRole::MccTemplate, file("wrong.txt"));
        assert!(!staging.is_drag_active(FileRole::MccTemplate));
    }

    #[test]
    fn test_clear_empties_both_roles() {
        let mut staging = FileStaging::new();
        staging.set_file(FileRole::RawData, file("a.xlsx"));
        staging.set_file(FileRole::MccTemplate, file("b.xlsb"));
        staging.clear();
        assert!(!staging.is_ready());
        assert_eq!(staging.missing_roles().len(), 2);
    }

    #[tokio::test]
    async fn test_load_staged_file_from_storage() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().to_str().unwrap().to_string();
        std::fs::create_dir_all(temp_dir.path().join("inputs")).unwrap();
        std::fs::write(temp_dir.path().join("inputs/transactions.xlsx"), b"PK\x03\x04").unwrap();

        let storage = LocalStorage::new(base);
        let staged = StagedFile::load(&storage, "inputs/transactions.xlsx").await.unwrap();

        assert_eq!(staged.name, "transactions.xlsx");
        assert_eq!(staged.contents, b"PK\x03\x04".to_vec());
    }
}
