//! Parsed-content handles shared between converters of one input file.

use crate::error::{Error, Result};
use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opaque, reusable parse result of one input file.
///
/// The first converter to see a file creates the handle; every later
/// converter for the same file receives it back so the source is parsed
/// at most once. Cloning shares the underlying value.
#[derive(Clone)]
pub struct ParsedContent {
    inner: Arc<dyn Any + Send + Sync>,
}

impl ParsedContent {
    /// Wrap a converter-specific parse result.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Borrow the parse result as `T`, if that is what it holds.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// True when both handles refer to the same parse result.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for ParsedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedContent")
            .field("ptr", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

/// Source text of an input file, read once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File the text was read from.
    pub path: PathBuf,
    /// Full file contents.
    pub text: String,
}

impl SourceDocument {
    /// Read `path` into memory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::SourceRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_clone_shares_value() {
        let a = ParsedContent::new(42_u32);
        let b = a.clone();
        assert!(ParsedContent::ptr_eq(&a, &b));
        assert_eq!(b.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn test_distinct_handles_are_not_equal() {
        let a = ParsedContent::new(1_u32);
        let b = ParsedContent::new(1_u32);
        assert!(!ParsedContent::ptr_eq(&a, &b));
    }

    #[test]
    fn test_downcast_wrong_type() {
        let content = ParsedContent::new(String::from("x"));
        assert!(content.downcast_ref::<u32>().is_none());
    }

    #[test]
    fn test_source_document_load() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "1C 16+ HCP").unwrap();

        let doc = SourceDocument::load(file.path()).unwrap();
        assert_eq!(doc.text, "1C 16+ HCP");
        assert_eq!(doc.path, file.path());
    }

    #[test]
    fn test_source_document_missing_file() {
        let result = SourceDocument::load(Path::new("/nonexistent/system.bml"));
        assert!(matches!(result, Err(Error::SourceRead { .. })));
    }
}
