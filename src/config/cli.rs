use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

/// Local filesystem storage. Writes go to a temporary file next to the
/// destination and are renamed into place only once fully written.
///
/// The renamed file keeps the destination's existing permissions; a new file
/// gets the same mode a plain create would (0o666 less the umask on Unix).
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut temp = builder.tempfile_in(parent)?;

        if let Ok(existing) = fs::metadata(path) {
            temp.as_file().set_permissions(existing.permissions())?;
        }

        temp.write_all(data)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/deeper/out.ini");

        LocalStorage::new().write_file(&target, b"[db]\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "[db]\n");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.txt");
        fs::write(&target, "old contents that are longer").unwrap();

        LocalStorage::new().write_file(&target, b"a=1\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "a=1\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.ini");
        fs::write(&target, "old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        LocalStorage::new().write_file(&target, b"[db]\n").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_gets_default_create_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let reference = dir.path().join("plain.txt");
        fs::write(&reference, "x").unwrap();
        let expected = fs::metadata(&reference).unwrap().permissions().mode() & 0o777;

        let target = dir.path().join("fresh.ini");
        LocalStorage::new().write_file(&target, b"[db]\n").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
    }

    #[test]
    fn test_exists_and_read() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.yaml");
        let storage = LocalStorage::new();

        assert!(!storage.exists(&source));
        fs::write(&source, "config: {}\n").unwrap();
        assert!(storage.exists(&source));
        assert_eq!(storage.read_to_string(&source).unwrap(), "config: {}\n");
    }
}
