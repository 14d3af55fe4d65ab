//! Login-time startup entries.

use crate::constants::APPLICATION_NAME;
use crate::error::AppError;
use log::info;
use std::fs;
use std::path::Path;

/// XDG desktop entry launching `executable`.
pub fn desktop_entry(executable: &Path) -> String {
    format!(
        "[Desktop Entry]\nType=Application\nName={APPLICATION_NAME}\nExec='{}'\nStartupNotify=false\nTerminal=false\n",
        executable.display()
    )
}

/// launchd agent running `executable` at login.
pub fn launch_agent(label: &str, executable: &Path) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{}</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
</dict>
</plist>
"#,
        executable.display()
    )
}

/// Per-user key whose values Windows runs at sign-in.
pub const WINDOWS_RUN_KEY: &str = r"HKCU\Software\Microsoft\Windows\CurrentVersion\Run";

/// Arguments for `reg.exe` adding or deleting the run value for `executable`.
pub fn registry_arguments(executable: &Path, enable: bool) -> Vec<String> {
    let mut args = vec![
        if enable { "add" } else { "delete" }.to_string(),
        WINDOWS_RUN_KEY.to_string(),
        "/v".to_string(),
        APPLICATION_NAME.to_string(),
    ];
    if enable {
        args.extend([
            "/t".to_string(),
            "REG_SZ".to_string(),
            "/d".to_string(),
            format!("\"{}\"", executable.display()),
        ]);
    }
    args.push("/f".to_string());
    args
}

/// Create, replace or remove the entry at `path`.
pub fn write_entry(path: &Path, content: &str, enable: bool) -> Result<(), AppError> {
    if !enable {
        if path.exists() {
            fs::remove_file(path)?;
            info!("Autostart entry removed from {}", path.display());
        }
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let existed = path.exists();
    fs::write(path, content)?;

    if existed {
        info!("Autostart entry overwritten at {}", path.display());
    } else {
        info!("Autostart entry saved at {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_desktop_entry_quotes_executable() {
        let entry = desktop_entry(&PathBuf::from("/opt/companion/bin"));
        assert!(entry.starts_with("[Desktop Entry]\n"));
        assert!(entry.contains("Exec='/opt/companion/bin'\n"));
        assert!(entry.contains("Name=GameMaker Companion\n"));
    }

    #[test]
    fn test_launch_agent_contains_label() {
        let plist = launch_agent("io.example.companion", &PathBuf::from("/Applications/c"));
        assert!(plist.contains("<string>io.example.companion</string>"));
        assert!(plist.contains("<string>/Applications/c</string>"));
    }

    #[test]
    fn test_registry_arguments() {
        let exe = PathBuf::from(r"C:\Tools\companion.exe");

        assert_eq!(
            registry_arguments(&exe, true),
            vec![
                "add",
                WINDOWS_RUN_KEY,
                "/v",
                "GameMaker Companion",
                "/t",
                "REG_SZ",
                "/d",
                r#""C:\Tools\companion.exe""#,
                "/f"
            ]
        );
        assert_eq!(
            registry_arguments(&exe, false),
            vec!["delete", WINDOWS_RUN_KEY, "/v", "GameMaker Companion", "/f"]
        );
    }

    #[test]
    fn test_write_then_remove_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("autostart").join("companion.desktop");

        write_entry(&path, "first", true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        write_entry(&path, "second", true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");

        write_entry(&path, "", false).unwrap();
        assert!(!path.exists());

        // Removing a missing entry is not an error.
        write_entry(&path, "", false).unwrap();
    }
}
