//! Loads a precompiled device image (xclbin) from disk.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("can not open file")]
    Open(#[source] io::Error),

    #[error("can not read file")]
    Read(#[source] io::Error),
}

/// Image bytes followed by a terminating zero byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceImage {
    data: Vec<u8>,
}

impl DeviceImage {
    /// file length, without the terminator
    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// image bytes handed to clCreateProgramWithBinary
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }
}

pub fn load_device_image(path: &Path) -> Result<DeviceImage, LoadError> {
    let mut file = File::open(path).map_err(LoadError::Open)?;
    let size = file.metadata().map_err(LoadError::Read)?.len() as usize;

    let mut data = vec![0u8; size + 1];
    file.read_exact(&mut data[..size]).map_err(LoadError::Read)?;

    Ok(DeviceImage { data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_device_image() {
        let content = b"xclbin2\0\x01\x02\x03";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();

        let image = load_device_image(file.path()).unwrap();
        assert_eq!(image.len(), content.len());
        assert_eq!(image.as_bytes(), content);
        assert_eq!(image.data.last(), Some(&0));
        assert_eq!(image.data.len(), content.len() + 1);
    }

    #[test]
    fn test_load_empty_image() {
        let file = NamedTempFile::new().unwrap();

        let image = load_device_image(file.path()).unwrap();
        assert!(image.is_empty());
        assert_eq!(image.as_bytes(), b"");
    }

    #[test]
    fn test_load_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bandwidth.xclbin");

        let result = load_device_image(&path);
        assert!(matches!(result, Err(LoadError::Open(e)) if e.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn test_load_directory() {
        // a directory opens on unix but can not be read
        let dir = tempfile::tempdir().unwrap();

        let result = load_device_image(dir.path());
        assert!(result.is_err());
    }
}
