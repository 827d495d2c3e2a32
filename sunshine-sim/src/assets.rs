//! File-backed asset source
//!
//! Asset digests are file names under the scenario's asset directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use sunshine_core::traits::AssetSource;
use sunshine_protocol::AssetRef;

/// Asset read errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetReadError {
    Io(io::ErrorKind),
    /// Digest would escape the asset directory
    InvalidName,
    /// File does not fit the scratch buffer
    TooLarge(usize),
}

/// Resolves asset references to files
pub struct FileAssets {
    dir: PathBuf,
}

impl FileAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl AssetSource for FileAssets {
    type Error = AssetReadError;

    async fn fetch(&mut self, asset: &AssetRef, buf: &mut [u8]) -> Result<usize, AssetReadError> {
        let name = asset.digest();
        if name.contains(&['/', '\\'][..]) || name.starts_with('.') {
            return Err(AssetReadError::InvalidName);
        }

        let bytes = fs::read(self.dir.join(name)).map_err(|e| AssetReadError::Io(e.kind()))?;
        let out = buf
            .get_mut(..bytes.len())
            .ok_or(AssetReadError::TooLarge(bytes.len()))?;
        out.copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_rejects_path_traversal() {
        let mut assets = FileAssets::new("assets");
        let mut buf = [0u8; 16];
        let asset = AssetRef::new("../secret").unwrap();
        assert_eq!(
            block_on(assets.fetch(&asset, &mut buf)),
            Err(AssetReadError::InvalidName)
        );
    }

    #[test]
    fn test_reads_file() {
        let dir = std::env::temp_dir().join("sunshine-sim-assets");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tiny.bin"), [1, 2, 3]).unwrap();

        let mut assets = FileAssets::new(&dir);
        let mut buf = [0u8; 16];
        let len = block_on(assets.fetch(&AssetRef::new("tiny.bin").unwrap(), &mut buf)).unwrap();
        assert_eq!(&buf[..len], &[1, 2, 3]);

        let mut small = [0u8; 2];
        assert_eq!(
            block_on(assets.fetch(&AssetRef::new("tiny.bin").unwrap(), &mut small)),
            Err(AssetReadError::TooLarge(3))
        );
    }

    #[test]
    fn test_missing_file() {
        let mut assets = FileAssets::new("/nonexistent");
        let mut buf = [0u8; 16];
        assert_eq!(
            block_on(assets.fetch(&AssetRef::new("none.bmp").unwrap(), &mut buf)),
            Err(AssetReadError::Io(io::ErrorKind::NotFound))
        );
    }
}
