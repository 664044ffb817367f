//! Headless state behind the operation form.
//!
//! Every handler recomputes its result from the current field values; nothing
//! is cached between events apart from what the widgets themselves hold.

use tracing::{info, warn};

use crate::error::ValidationError;
use crate::models::{FieldValue, FieldVisibility, FileInfo, Operation, SelectedFile};
use crate::utils::format_file_size;

/// A submission that passed every client-side check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub operation: Operation,
    pub file: Option<SelectedFile>,
    pub password: Option<String>,
    pub hash_digest: Option<String>,
}

impl Submission {
    /// Text fields of the multipart body, in form order.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("operation", self.operation.as_str().to_string())];
        if let Some(password) = &self.password {
            fields.push(("password", password.clone()));
        }
        if let Some(hash) = &self.hash_digest {
            fields.push(("hash_digest", hash.clone()));
        }
        fields
    }
}

#[derive(Debug, Default)]
pub struct FormController {
    selected_file: Option<SelectedFile>,
    file_info: Option<FileInfo>,
    operation: Option<Operation>,
    visibility: FieldVisibility,
    password: FieldValue,
    hash_digest: FieldValue,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_file_selection(&mut self, selection: Option<SelectedFile>) {
        match selection {
            Some(file) => {
                let size = format_file_size(file.size);
                info!("Selected file: {} ({})", file.name, size);
                self.file_info = Some(FileInfo {
                    name: file.name.clone(),
                    size,
                });
                self.selected_file = Some(file);
            }
            None => {
                info!("File selection cleared");
                self.file_info = None;
                self.selected_file = None;
            }
        }
    }

    /// Applies a raw radio value, rejecting anything outside the known operations.
    pub fn handle_operation_change(&mut self, raw: &str) -> Result<(), ValidationError> {
        let operation = raw.parse::<Operation>()?;
        self.select_operation(operation);
        Ok(())
    }

    pub fn select_operation(&mut self, operation: Operation) {
        info!("Operation changed to {}", operation);
        self.operation = Some(operation);
        self.visibility = FieldVisibility::for_operation(self.operation);
    }

    pub fn set_password(&mut self, value: String) {
        self.password.set(value);
    }

    pub fn set_hash_digest(&mut self, value: String) {
        self.hash_digest.set(value);
    }

    pub fn handle_submit(&self) -> Result<Submission, ValidationError> {
        let result = self.validate();
        match &result {
            Ok(submission) => info!("Submission accepted for {}", submission.operation),
            Err(e) => warn!("Submission rejected: {}", e),
        }
        result
    }

    fn validate(&self) -> Result<Submission, ValidationError> {
        let operation = self.operation.ok_or(ValidationError::MissingOperation)?;

        if operation.requires_file() && self.selected_file.is_none() {
            return Err(ValidationError::MissingFile);
        }
        if operation.requires_password() && self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        if operation.requires_hash() && self.hash_digest.is_empty() {
            return Err(ValidationError::MissingHash);
        }

        Ok(Submission {
            operation,
            file: if operation.requires_file() {
                self.selected_file.clone()
            } else {
                None
            },
            password: if operation.requires_password() {
                self.password.as_str().map(str::to_string)
            } else {
                None
            },
            hash_digest: if operation.requires_hash() {
                self.hash_digest.as_str().map(str::to_string)
            } else {
                None
            },
        })
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn visibility(&self) -> FieldVisibility {
        self.visibility
    }

    pub fn file_info(&self) -> Option<&FileInfo> {
        self.file_info.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, size: u64) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            size,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn test_file_info_panel() {
        let mut form = FormController::new();
        assert!(form.file_info().is_none());

        form.handle_file_selection(Some(file("report.pdf", 1536)));
        assert_eq!(
            form.file_info(),
            Some(&FileInfo {
                name: "report.pdf".to_string(),
                size: "1.5 KB".to_string(),
            })
        );

        form.handle_file_selection(None);
        assert!(form.file_info().is_none());
        form.select_operation(Operation::Compress);
        assert_eq!(form.handle_submit(), Err(ValidationError::MissingFile));
    }

    #[test]
    fn test_new_selection_replaces_previous() {
        let mut form = FormController::new();
        form.handle_file_selection(Some(file("a.txt", 10)));
        form.handle_file_selection(Some(file("b.txt", 0)));
        let info = form.file_info().unwrap();
        assert_eq!(info.name, "b.txt");
        assert_eq!(info.size, "0 Bytes");
    }

    #[test]
    fn test_visibility_follows_latest_choice() {
        let mut form = FormController::new();
        assert_eq!(form.visibility(), FieldVisibility::hidden());

        form.handle_operation_change("encrypt").unwrap();
        assert_eq!(form.visibility(), FieldVisibility { password: true, hash: false });

        form.handle_operation_change("revert").unwrap();
        assert_eq!(form.visibility(), FieldVisibility { password: false, hash: true });

        form.handle_operation_change("compress").unwrap();
        assert_eq!(form.visibility(), FieldVisibility::hidden());
    }

    #[test]
    fn test_same_choice_twice_is_stable() {
        let mut form = FormController::new();
        form.select_operation(Operation::Decrypt);
        let first = form.visibility();
        form.select_operation(Operation::Decrypt);
        assert_eq!(form.visibility(), first);
        assert_eq!(form.operation(), Some(Operation::Decrypt));
    }

    #[test]
    fn test_unknown_operation_keeps_state() {
        let mut form = FormController::new();
        form.select_operation(Operation::Revert);
        let err = form.handle_operation_change("snapshot").unwrap_err();
        assert_eq!(err, ValidationError::UnknownOperation("snapshot".to_string()));
        assert_eq!(form.operation(), Some(Operation::Revert));
        assert!(form.visibility().hash);
    }

    #[test]
    fn test_submit_without_operation() {
        let mut form = FormController::new();
        form.set_password(String::new());
        assert_eq!(form.handle_submit(), Err(ValidationError::MissingOperation));
    }

    #[test]
    fn test_missing_operation_checked_first() {
        let form = FormController::new();
        // No file and no password either, yet only the first gate reports.
        assert_eq!(form.handle_submit(), Err(ValidationError::MissingOperation));
    }

    #[test]
    fn test_file_required_for_file_operations() {
        for op in [
            Operation::Encrypt,
            Operation::Decrypt,
            Operation::Compress,
            Operation::Decompress,
        ] {
            let mut form = FormController::new();
            form.select_operation(op);
            form.set_password("pw".to_string());
            assert_eq!(form.handle_submit(), Err(ValidationError::MissingFile), "{op}");
        }
    }

    #[test]
    fn test_missing_file_reported_before_missing_password() {
        let mut form = FormController::new();
        form.select_operation(Operation::Encrypt);
        assert_eq!(form.handle_submit(), Err(ValidationError::MissingFile));
    }

    #[test]
    fn test_encrypt_requires_password() {
        let mut form = FormController::new();
        form.select_operation(Operation::Encrypt);
        form.handle_file_selection(Some(file("notes.txt", 42)));
        form.set_password(String::new());
        assert_eq!(form.handle_submit(), Err(ValidationError::MissingPassword));
    }

    #[test]
    fn test_encrypt_submission_carries_password() {
        let mut form = FormController::new();
        form.select_operation(Operation::Encrypt);
        form.handle_file_selection(Some(file("notes.txt", 42)));
        form.set_password("hunter2".to_string());
        form.set_hash_digest("ignored".to_string());

        let submission = form.handle_submit().unwrap();
        assert_eq!(submission.operation, Operation::Encrypt);
        assert_eq!(submission.password.as_deref(), Some("hunter2"));
        assert_eq!(submission.hash_digest, None);
        assert_eq!(submission.file.unwrap().name, "notes.txt");
    }

    #[test]
    fn test_revert_requires_hash() {
        let mut form = FormController::new();
        form.select_operation(Operation::Revert);
        assert_eq!(form.handle_submit(), Err(ValidationError::MissingHash));
    }

    #[test]
    fn test_revert_with_hash_proceeds() {
        let mut form = FormController::new();
        form.select_operation(Operation::Revert);
        form.set_hash_digest("abc123".to_string());

        let submission = form.handle_submit().unwrap();
        assert_eq!(submission.hash_digest.as_deref(), Some("abc123"));
        assert_eq!(submission.password, None);
        assert_eq!(submission.file, None);
        assert_eq!(
            submission.text_fields(),
            vec![
                ("operation", "revert".to_string()),
                ("hash_digest", "abc123".to_string()),
            ]
        );
    }

    #[test]
    fn test_compress_ignores_password_and_hash() {
        let mut form = FormController::new();
        form.select_operation(Operation::Compress);
        form.handle_file_selection(Some(file("data.bin", 2048)));

        let submission = form.handle_submit().unwrap();
        assert_eq!(submission.text_fields(), vec![("operation", "compress".to_string())]);

        form.set_password("pw".to_string());
        form.set_hash_digest("abc".to_string());
        let submission = form.handle_submit().unwrap();
        assert_eq!(submission.password, None);
        assert_eq!(submission.hash_digest, None);
    }

    #[test]
    fn test_decompress_needs_only_file() {
        let mut form = FormController::new();
        form.select_operation(Operation::Decompress);
        form.handle_file_selection(Some(file("compressed_data.bin", 900)));
        assert!(form.handle_submit().is_ok());
    }
}
