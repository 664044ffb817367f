use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ValidationError;

/// The action the backend is asked to perform on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encrypt,
    Decrypt,
    Compress,
    Decompress,
    Revert,
}

impl Operation {
    pub fn all() -> [Operation; 5] {
        [
            Operation::Encrypt,
            Operation::Decrypt,
            Operation::Compress,
            Operation::Decompress,
            Operation::Revert,
        ]
    }

    /// Wire value, as sent in the `operation` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
            Operation::Compress => "compress",
            Operation::Decompress => "decompress",
            Operation::Revert => "revert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operation::Encrypt => "Encrypt",
            Operation::Decrypt => "Decrypt",
            Operation::Compress => "Compress",
            Operation::Decompress => "Decompress",
            Operation::Revert => "Revert to snapshot",
        }
    }

    pub fn requires_file(&self) -> bool {
        !matches!(self, Operation::Revert)
    }

    pub fn requires_password(&self) -> bool {
        matches!(self, Operation::Encrypt | Operation::Decrypt)
    }

    pub fn requires_hash(&self) -> bool {
        matches!(self, Operation::Revert)
    }
}

impl FromStr for Operation {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "encrypt" => Ok(Operation::Encrypt),
            "decrypt" => Ok(Operation::Decrypt),
            "compress" => Ok(Operation::Compress),
            "decompress" => Ok(Operation::Decompress),
            "revert" => Ok(Operation::Revert),
            other => Err(ValidationError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which auxiliary containers are shown. Always derived from the current choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldVisibility {
    pub password: bool,
    pub hash: bool,
}

impl FieldVisibility {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn for_operation(operation: Option<Operation>) -> Self {
        let mut visibility = Self::hidden();
        match operation {
            Some(Operation::Encrypt | Operation::Decrypt) => visibility.password = true,
            Some(Operation::Revert) => visibility.hash = true,
            _ => {}
        }
        visibility
    }
}

/// Text input whose empty value counts as "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValue(pub Option<String>);

impl FieldValue {
    pub fn set(&mut self, value: String) {
        self.0 = if value.is_empty() { None } else { Some(value) };
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size: metadata.len(),
            path: path.to_path_buf(),
        })
    }
}

/// Contents of the file-info panel while it is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: String,
}
