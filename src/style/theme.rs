use crate::config::ThemeConfig;
use eframe::egui;
use std::path::Path;
use std::sync::Arc;

const DISPLAY_FONT: &str = "display";

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub text: egui::Color32,
    pub background: egui::Color32,
    /// Set only once the display font has been registered with egui
    pub display_font: Option<egui::FontFamily>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let [r, g, b] = config.text_color;
        let [br, bg, bb] = config.background_color;
        Self {
            text: egui::Color32::from_rgb(r, g, b),
            background: egui::Color32::from_rgb(br, bg, bb),
            display_font: None,
        }
    }

    pub fn family(&self) -> egui::FontFamily {
        self.display_font
            .clone()
            .unwrap_or(egui::FontFamily::Proportional)
    }

    pub fn rich(&self, text: &str, size: f32) -> egui::RichText {
        egui::RichText::new(text)
            .size(size)
            .strong()
            .color(self.text)
            .family(self.family())
    }

    /// Register the display font, falling back to the default proportional
    /// fonts for missing glyphs.
    pub fn install_display_font(&mut self, ctx: &egui::Context, path: &Path) -> std::io::Result<()> {
        let bytes = std::fs::read(path)?;
        let mut fonts = egui::FontDefinitions::default();
        fonts.font_data.insert(
            DISPLAY_FONT.to_owned(),
            Arc::new(egui::FontData::from_owned(bytes)),
        );
        let mut chain = vec![DISPLAY_FONT.to_owned()];
        chain.extend(
            fonts
                .families
                .get(&egui::FontFamily::Proportional)
                .cloned()
                .unwrap_or_default(),
        );
        let family = egui::FontFamily::Name(DISPLAY_FONT.into());
        fonts.families.insert(family.clone(), chain);
        ctx.set_fonts(fonts);
        self.display_font = Some(family);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_config() {
        let config = ThemeConfig {
            text_color: [10, 20, 30],
            background_color: [1, 2, 3],
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.text, egui::Color32::from_rgb(10, 20, 30));
        assert_eq!(theme.background, egui::Color32::from_rgb(1, 2, 3));
        assert_eq!(theme.family(), egui::FontFamily::Proportional);
    }

    #[test]
    fn test_missing_font_keeps_default_family() {
        let ctx = egui::Context::default();
        let mut theme = Theme::default();
        let result = theme.install_display_font(&ctx, Path::new("/nonexistent/font.ttf"));
        assert!(result.is_err());
        assert!(theme.display_font.is_none());
    }
}
