use super::render_target::RenderTarget;
use super::theme_mode::ResolvedTheme;
use crate::shared::constants::THEME_ATTRIBUTE;

/// Sole writer of theme markers on the render target.
pub struct ThemePresenter {
    target: Box<dyn RenderTarget>,
}

impl ThemePresenter {
    pub fn new(target: Box<dyn RenderTarget>) -> Self {
        Self { target }
    }

    /// Activate `theme` on the root node: clear the other marker, set this
    /// one, and mirror it into `data-theme`. Safe to repeat.
    pub fn apply(&mut self, theme: ResolvedTheme) {
        self.target.remove_class(theme.opposite().as_str());
        self.target.add_class(theme.as_str());
        self.target.set_attribute(THEME_ATTRIBUTE, theme.as_str());
        log::debug!("Applied {theme} theme to render target");
    }
}
