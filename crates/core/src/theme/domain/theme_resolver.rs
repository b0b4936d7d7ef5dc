use super::theme_mode::{ResolvedTheme, SystemTheme, ThemeMode};

/// Reconcile the user's preference with the OS color scheme.
///
/// Fixed modes win; `System` defers to whatever the OS reports.
pub fn resolve(mode: ThemeMode, system_theme: SystemTheme) -> ResolvedTheme {
    match mode {
        ThemeMode::Light => ResolvedTheme::Light,
        ThemeMode::Dark => ResolvedTheme::Dark,
        ThemeMode::System => system_theme.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::light_over_light(ThemeMode::Light, SystemTheme::Light, ResolvedTheme::Light)]
    #[case::light_over_dark(ThemeMode::Light, SystemTheme::Dark, ResolvedTheme::Light)]
    #[case::dark_over_light(ThemeMode::Dark, SystemTheme::Light, ResolvedTheme::Dark)]
    #[case::dark_over_dark(ThemeMode::Dark, SystemTheme::Dark, ResolvedTheme::Dark)]
    fn test_fixed_modes_ignore_system(
        #[case] mode: ThemeMode,
        #[case] system: SystemTheme,
        #[case] expected: ResolvedTheme,
    ) {
        assert_eq!(resolve(mode, system), expected);
    }

    #[rstest]
    #[case::follows_light(SystemTheme::Light, ResolvedTheme::Light)]
    #[case::follows_dark(SystemTheme::Dark, ResolvedTheme::Dark)]
    fn test_system_mode_follows_os(#[case] system: SystemTheme, #[case] expected: ResolvedTheme) {
        assert_eq!(resolve(ThemeMode::System, system), expected);
    }
}
