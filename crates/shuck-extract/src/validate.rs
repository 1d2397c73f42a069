use std::fs::{self, File};
use std::path::Path;

use crate::Result;
use crate::error::Error;

/// Resolve the strip-component count.
///
/// An explicit override must be entirely ASCII digits; `"-1"` and `"+5"`
/// are both rejected even though integer parsing would accept the latter.
/// Absence falls back to `default`.
pub fn resolve_strip_components(raw: Option<&str>, default: usize) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidStripComponents {
            raw: raw.to_string(),
        });
    }
    raw.parse().map_err(|_| Error::InvalidStripComponents {
        raw: raw.to_string(),
    })
}

/// Confirm the archive exists and can be opened for reading.
pub fn ensure_readable_archive(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::ArchiveNotFound {
            path: path.to_path_buf(),
        });
    }
    File::open(path)
        .map(drop)
        .map_err(|source| Error::ArchiveUnreadable {
            path: path.to_path_buf(),
            source,
        })
}

/// Make sure `dest` is a writable directory, creating it when allowed.
pub fn ensure_destination(dest: &Path, auto_create: bool) -> Result<()> {
    if dest.exists() {
        if !dest.is_dir() {
            return Err(Error::DestinationInvalid {
                path: dest.to_path_buf(),
            });
        }
        return probe_writable(dest);
    }

    if !auto_create {
        return Err(Error::DestinationMissing {
            path: dest.to_path_buf(),
        });
    }

    tracing::debug!(path = %dest.display(), "creating destination directory");
    fs::create_dir_all(dest).map_err(|source| Error::DestinationCreateFailed {
        path: dest.to_path_buf(),
        source,
    })
}

// Mode bits can claim writability the kernel won't honor (read-only mounts,
// ACLs), so probe with an actual file.
fn probe_writable(dir: &Path) -> Result<()> {
    match tempfile::tempfile_in(dir) {
        Ok(_) => Ok(()),
        Err(_) => Err(Error::DestinationNotWritable {
            path: dir.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_absent_uses_default() {
        assert_eq!(resolve_strip_components(None, 5).unwrap(), 5);
    }

    #[test]
    fn strip_plain_digits() {
        assert_eq!(resolve_strip_components(Some("0"), 5).unwrap(), 0);
        assert_eq!(resolve_strip_components(Some("3"), 5).unwrap(), 3);
        assert_eq!(resolve_strip_components(Some("007"), 5).unwrap(), 7);
    }

    #[test]
    fn strip_rejects_non_digits() {
        for raw in ["-1", "+5", "", "5x", "five", "3.0", " 3"] {
            let err = resolve_strip_components(Some(raw), 5).unwrap_err();
            assert!(
                matches!(err, Error::InvalidStripComponents { .. }),
                "'{raw}' should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn strip_rejects_overflow() {
        let raw = "9".repeat(40);
        let err = resolve_strip_components(Some(&raw), 5).unwrap_err();
        assert!(matches!(err, Error::InvalidStripComponents { .. }));
    }

    #[test]
    fn archive_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ensure_readable_archive(&tmp.path().join("gone.tar")).unwrap_err();
        assert!(matches!(err, Error::ArchiveNotFound { .. }));
    }

    #[test]
    fn archive_readable() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.tar");
        fs::write(&path, b"not really a tar").unwrap();
        ensure_readable_archive(&path).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn archive_unreadable() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.tar");
        fs::write(&path, b"x").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users bypass mode bits; only assert when they hold.
        if File::open(&path).is_ok() {
            return;
        }
        let err = ensure_readable_archive(&path).unwrap_err();
        assert!(matches!(err, Error::ArchiveUnreadable { .. }));
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn destination_existing_dir_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        ensure_destination(tmp.path(), false).unwrap();
    }

    #[test]
    fn destination_file_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("occupied");
        fs::write(&path, b"x").unwrap();

        let err = ensure_destination(&path, true).unwrap_err();
        assert!(matches!(err, Error::DestinationInvalid { .. }));
    }

    #[test]
    fn destination_created_when_allowed() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out").join("deep");
        ensure_destination(&dest, true).unwrap();
        assert!(dest.is_dir());
    }

    #[test]
    fn destination_missing_without_auto_create() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ensure_destination(&tmp.path().join("out"), false).unwrap_err();
        assert!(matches!(err, Error::DestinationMissing { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn destination_readonly_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("ro");
        fs::create_dir(&dir).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users bypass mode bits; only assert when they hold.
        if fs::write(dir.join("probe"), b"x").is_ok() {
            return;
        }
        let err = ensure_destination(&dir, true).unwrap_err();
        assert!(matches!(err, Error::DestinationNotWritable { .. }));
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
