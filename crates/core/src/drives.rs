use std::path::PathBuf;

/// One scan-root candidate offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveInfo {
    pub path: PathBuf,
    pub name: String,
    /// Capacity figures are only filled in where the platform exposes them.
    pub total_bytes: Option<u64>,
    pub free_bytes: Option<u64>,
}

/// Enumerate the scan roots available on this machine.
#[cfg(windows)]
pub fn list_drives() -> Vec<DriveInfo> {
    windows_impl::list_drives()
}

/// Enumerate the scan roots available on this machine: the filesystem root
/// and the user's home directory.
#[cfg(not(windows))]
pub fn list_drives() -> Vec<DriveInfo> {
    let mut drives = vec![DriveInfo {
        path: PathBuf::from("/"),
        name: "File System".to_string(),
        total_bytes: None,
        free_bytes: None,
    }];
    if let Some(home) = dirs::home_dir() {
        drives.push(DriveInfo {
            path: home,
            name: "Home Directory".to_string(),
            total_bytes: None,
            free_bytes: None,
        });
    }
    drives
}

#[cfg(windows)]
mod windows_impl {
    use super::DriveInfo;
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use std::path::PathBuf;
    use tracing::warn;
    use windows::core::PCWSTR;
    use windows::Win32::Storage::FileSystem::{
        GetDiskFreeSpaceExW, GetDriveTypeW, GetLogicalDriveStringsW,
    };

    // GetDriveTypeW return value for remote (network) drives.
    const DRIVE_REMOTE: u32 = 4;

    /// Logical drives with their capacity, network drives skipped.
    pub fn list_drives() -> Vec<DriveInfo> {
        let mut drives = Vec::new();

        // Null-separated list of drive root strings, e.g. "C:\\\0D:\\\0".
        let mut buffer = [0u16; 256];
        let len = unsafe { GetLogicalDriveStringsW(Some(&mut buffer)) };
        if len == 0 {
            warn!("GetLogicalDriveStringsW returned 0");
            return drives;
        }

        let roots = OsString::from_wide(&buffer[..len as usize]);
        let roots = roots.to_string_lossy();
        for root in roots.split('\0').filter(|s| !s.is_empty()) {
            let wide: Vec<u16> = root.encode_utf16().chain(std::iter::once(0)).collect();
            let pcwstr = PCWSTR(wide.as_ptr());

            // Network drives are not offered as scan roots.
            if unsafe { GetDriveTypeW(pcwstr) } == DRIVE_REMOTE {
                continue;
            }

            let mut total = 0u64;
            let mut free = 0u64;
            let space = unsafe {
                GetDiskFreeSpaceExW(pcwstr, None, Some(&mut total), Some(&mut free))
            };

            drives.push(DriveInfo {
                path: PathBuf::from(root),
                name: root.trim_end_matches('\\').to_string(),
                total_bytes: space.is_ok().then_some(total),
                free_bytes: space.is_ok().then_some(free),
            });
        }
        drives
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn root_is_always_offered() {
        let drives = list_drives();
        assert!(drives.iter().any(|d| d.path == PathBuf::from("/")));
    }
}
