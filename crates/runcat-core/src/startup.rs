//! Naming of the launch-at-logon registry entry.

use std::path::Path;

/// Returns the Run-key value name for an executable file name.
///
/// Everything from the first `'0'` on is dropped, so versioned builds
/// such as `runcat0.2.exe` share the `runcat` entry. Returns `None` when
/// nothing is left.
pub fn value_name(exe_file_name: &str) -> Option<String> {
    let name = exe_file_name.split('0').next().unwrap_or_default();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Returns the Run-key value name for a full executable path.
pub fn value_name_for(exe: &Path) -> Option<String> {
    exe.file_name()
        .and_then(|n| n.to_str())
        .and_then(value_name)
}

/// Registry value data: the quoted executable path with backslashes.
pub fn command_line(exe: &Path) -> String {
    format!("\"{}\"", exe.display().to_string().replace('/', "\\"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn plain_name_is_kept() {
        assert_eq!(value_name("runcat.exe").as_deref(), Some("runcat.exe"));
    }

    #[test]
    fn suffix_from_first_zero_is_stripped() {
        assert_eq!(value_name("runcat0.2.exe").as_deref(), Some("runcat"));
        assert_eq!(value_name("run1cat02.exe").as_deref(), Some("run1cat"));
    }

    #[test]
    fn empty_results_are_rejected() {
        assert_eq!(value_name(""), None);
        assert_eq!(value_name("0runcat.exe"), None);
    }

    #[test]
    fn value_name_uses_only_the_file_name() {
        // Arrange
        let exe = PathBuf::from("tools").join("v10").join("runcat.exe");

        // Act / Assert
        assert_eq!(value_name_for(&exe).as_deref(), Some("runcat.exe"));
    }

    #[test]
    fn command_line_quotes_and_uses_backslashes() {
        let exe = Path::new("C:/Program Files/runcat/runcat.exe");
        assert_eq!(
            command_line(exe),
            "\"C:\\Program Files\\runcat\\runcat.exe\""
        );
    }
}
