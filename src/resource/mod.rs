//! Font file loading and discovery.
//!
//! The renderer never touches the filesystem directly: bytes come from a
//! size-bounded `ResourceLoader`, and `resolve_font` turns the font config
//! into a path.

mod discovery;

pub use discovery::{FONT_PREFERENCES, build_font_index, font_dirs, resolve_font};

use std::io::Read;
use std::path::Path;

use crate::error::{Result, TextError};

/// Largest font file the default loader accepts.
pub const MAX_RESOURCE_SIZE: u64 = 32 * 1024 * 1024;

/// Reads whole files up to a fixed size limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLoader {
    max_size: u64,
}

impl Default for ResourceLoader {
    fn default() -> Self {
        Self::new(MAX_RESOURCE_SIZE)
    }
}

impl ResourceLoader {
    pub fn new(max_size: u64) -> Self {
        Self { max_size }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Read `path` into memory.
    ///
    /// I/O failures are returned as `ResourceLoad` with the underlying error
    /// attached; files over the limit fail with `ResourceTooLarge`.
    pub fn load(&self, path: &Path) -> Result<Vec<u8>> {
        let io_err = |source| TextError::ResourceLoad {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::open(path).map_err(io_err)?;
        let size = file.metadata().map_err(io_err)?.len();
        if size > self.max_size {
            return Err(self.too_large(path, size));
        }

        // The file may grow between the metadata call and the read.
        let mut data = Vec::with_capacity(size as usize);
        file.take(self.max_size + 1)
            .read_to_end(&mut data)
            .map_err(io_err)?;
        if data.len() as u64 > self.max_size {
            return Err(self.too_large(path, data.len() as u64));
        }

        log::debug!("resource: read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }

    fn too_large(&self, path: &Path, size: u64) -> TextError {
        TextError::ResourceTooLarge {
            path: path.to_path_buf(),
            size,
            limit: self.max_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_small_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("font.bin");
        std::fs::write(&path, [1u8, 2, 3, 4]).expect("write");

        let data = ResourceLoader::default().load(&path).expect("load");
        assert_eq!(data, vec![1, 2, 3, 4]);
    }

    #[test]
    fn file_at_limit_is_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("font.bin");
        std::fs::write(&path, vec![7u8; 16]).expect("write");
        assert_eq!(ResourceLoader::new(16).load(&path).expect("load").len(), 16);
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("font.bin");
        std::fs::write(&path, vec![0u8; 17]).expect("write");

        let err = ResourceLoader::new(16).load(&path).unwrap_err();
        match err {
            TextError::ResourceTooLarge { size, limit, .. } => {
                assert_eq!(size, 17);
                assert_eq!(limit, 16);
            }
            other => panic!("expected ResourceTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_keeps_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.ttf");
        let err = ResourceLoader::default().load(&path).unwrap_err();
        match err {
            TextError::ResourceLoad { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected ResourceLoad, got {other:?}"),
        }
    }

    #[test]
    fn default_limit() {
        assert_eq!(ResourceLoader::default().max_size(), MAX_RESOURCE_SIZE);
    }
}
