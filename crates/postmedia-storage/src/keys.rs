//! Shared naming for staged files and object keys.

use crate::traits::{StorageError, StorageResult};
use std::path::Path;

const MAX_FILE_NAME_LEN: usize = 128;
const FALLBACK_FILE_NAME: &str = "upload";

/// Reduce a client-supplied file name to a safe single path component.
///
/// Directory parts are dropped, characters outside `[A-Za-z0-9._-]` become `_`
/// and leading dots are stripped so the result can never be `.`/`..` or hidden.
pub fn sanitize_file_name(file_name: &str) -> String {
    let last = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        return FALLBACK_FILE_NAME.to_string();
    }

    trimmed.chars().take(MAX_FILE_NAME_LEN).collect()
}

/// Object key for a staged file: `media/{file name}`.
pub fn object_key_for(local_path: &Path) -> StorageResult<String> {
    let name = local_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            StorageError::InvalidKey(format!(
                "Staged path has no usable file name: {}",
                local_path.display()
            ))
        })?;

    // Staged names never start with a dot.
    if name.starts_with('.') {
        return Err(StorageError::InvalidKey(format!(
            "Staged file name is not a valid key: {}",
            name
        )));
    }

    Ok(format!("media/{}", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("photo.png"), "photo.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\cat pic.jpg"), "cat_pic.jpg");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name(".."), "upload");
    }

    #[test]
    fn test_sanitize_truncates_long_names() {
        let long = "a".repeat(500);
        assert_eq!(sanitize_file_name(&long).len(), MAX_FILE_NAME_LEN);
    }

    #[test]
    fn test_object_key_uses_file_name() {
        let path = PathBuf::from("/tmp/staging/0b1c-photo.png");
        assert_eq!(object_key_for(&path).unwrap(), "media/0b1c-photo.png");
        assert!(object_key_for(&PathBuf::from("/")).is_err());
    }

    #[test]
    fn test_inner_double_dots_are_kept() {
        assert_eq!(sanitize_file_name("holiday..photo.png"), "holiday..photo.png");

        let path = PathBuf::from("/tmp/staging/0b1c-v1..2.jpg");
        assert_eq!(object_key_for(&path).unwrap(), "media/0b1c-v1..2.jpg");
    }

    #[test]
    fn test_hidden_name_is_not_a_key() {
        let path = PathBuf::from("/tmp/staging/.env");
        assert!(matches!(
            object_key_for(&path),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
