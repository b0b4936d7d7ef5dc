use std::process::Command;

/// Single synchronous read of the OS "prefers dark" setting.
///
/// `None` means the platform gave no usable answer this time.
pub trait ColorSchemeProbe: Send + 'static {
    fn prefers_dark(&self) -> Option<bool>;
}

/// Probe that shells out to each platform's settings tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformProbe;

impl ColorSchemeProbe for PlatformProbe {
    fn prefers_dark(&self) -> Option<bool> {
        #[cfg(target_os = "macos")]
        {
            macos_prefers_dark()
        }
        #[cfg(target_os = "windows")]
        {
            windows_prefers_dark()
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            gnome_prefers_dark()
        }
    }
}

/// `AppleInterfaceStyle` is only set while dark mode is on; the read fails
/// with a non-zero status in light mode.
#[cfg(target_os = "macos")]
fn macos_prefers_dark() -> Option<bool> {
    let output = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;
    Some(output.status.success() && parse_apple_interface_style(&output.stdout))
}

#[cfg(target_os = "windows")]
fn windows_prefers_dark() -> Option<bool> {
    // HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize
    // AppsUseLightTheme: DWORD 0 = dark, 1 = light
    let stdout = query(
        "reg",
        &[
            "query",
            r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ],
    )?;
    parse_apps_use_light_theme(&stdout)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn gnome_prefers_dark() -> Option<bool> {
    let stdout = query(
        "gsettings",
        &["get", "org.gnome.desktop.interface", "color-scheme"],
    )?;
    parse_gnome_color_scheme(&stdout)
}

/// Stdout of a settings tool, or `None` if it is missing or exits non-zero.
#[cfg_attr(target_os = "macos", allow(dead_code))]
fn query(program: &str, args: &[&str]) -> Option<Vec<u8>> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(output.stdout)
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn parse_apple_interface_style(stdout: &[u8]) -> bool {
    String::from_utf8_lossy(stdout)
        .trim()
        .eq_ignore_ascii_case("dark")
}

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn parse_apps_use_light_theme(stdout: &[u8]) -> Option<bool> {
    let stdout = String::from_utf8_lossy(stdout);
    if stdout.contains("0x0") {
        Some(true)
    } else if stdout.contains("0x1") {
        Some(false)
    } else {
        None
    }
}

/// `gsettings` prints a quoted enum nick: `'prefer-dark'`, `'prefer-light'`
/// or `'default'`.
#[cfg_attr(any(target_os = "macos", target_os = "windows"), allow(dead_code))]
fn parse_gnome_color_scheme(stdout: &[u8]) -> Option<bool> {
    let value = String::from_utf8_lossy(stdout);
    match value.trim().trim_matches('\'') {
        "prefer-dark" => Some(true),
        "prefer-light" | "default" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::dark(b"Dark\n".as_slice(), true)]
    #[case::lowercase(b"dark".as_slice(), true)]
    #[case::empty(b"".as_slice(), false)]
    fn test_parse_apple_interface_style(#[case] stdout: &[u8], #[case] expected: bool) {
        assert_eq!(parse_apple_interface_style(stdout), expected);
    }

    #[rstest]
    #[case::dark(b"    AppsUseLightTheme    REG_DWORD    0x0\r\n".as_slice(), Some(true))]
    #[case::light(b"    AppsUseLightTheme    REG_DWORD    0x1\r\n".as_slice(), Some(false))]
    #[case::garbage(b"ERROR".as_slice(), None)]
    fn test_parse_apps_use_light_theme(#[case] stdout: &[u8], #[case] expected: Option<bool>) {
        assert_eq!(parse_apps_use_light_theme(stdout), expected);
    }

    #[rstest]
    #[case::prefer_dark(b"'prefer-dark'\n".as_slice(), Some(true))]
    #[case::prefer_light(b"'prefer-light'\n".as_slice(), Some(false))]
    #[case::default(b"'default'\n".as_slice(), Some(false))]
    #[case::unknown(b"'sepia'\n".as_slice(), None)]
    fn test_parse_gnome_color_scheme(#[case] stdout: &[u8], #[case] expected: Option<bool>) {
        assert_eq!(parse_gnome_color_scheme(stdout), expected);
    }

    #[test]
    fn test_query_missing_tool_gives_no_answer() {
        assert_eq!(query("themesync-no-such-settings-tool", &["get"]), None);
    }
}
