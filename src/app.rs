use crate::config::Config;
use crate::state::{Navigator, PageScroll, ScrollLock};
use crate::style::Theme;
use crate::view::Transition;
use eframe::egui;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

pub struct SaveTheDate {
    pub config: Config,
    pub assets_dir: PathBuf,
    pub theme: Theme,

    // Navigation
    /// Built on the first frame, once the viewport width is known
    pub navigator: Option<Navigator>,
    pub transition: Transition,

    // Page scroll is locked for as long as the app lives
    pub page: PageScroll,
    scroll_lock: Option<ScrollLock>,

    // Deferred actions and one-shot warnings from rendering
    pub(crate) next_link: RefCell<Option<String>>,
    pub(crate) failed_images: RefCell<HashSet<String>>,
}

impl SaveTheDate {
    pub fn new(config: Config, page: PageScroll) -> Self {
        let assets_dir = config.assets_dir();
        let theme = Theme::from_config(&config.theme);
        let transition = Transition::settled(0, &config.transition);
        let scroll_lock = Some(ScrollLock::acquire(&page));
        Self {
            config,
            assets_dir,
            theme,
            navigator: None,
            transition,
            page,
            scroll_lock,
            next_link: RefCell::new(None),
            failed_images: RefCell::new(HashSet::new()),
        }
    }

    /// Set up egui-side resources: image loaders and the display font.
    pub fn from_creation_context(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        let mut app = Self::new(config, PageScroll::new());
        if let Some(font) = app.config.theme.font.clone() {
            let path = app.config.resolve(&font);
            match app.theme.install_display_font(&cc.egui_ctx, &path) {
                Ok(()) => tracing::info!(path = %path.display(), "loaded display font"),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "display font unavailable"),
            }
        }
        app.preload_images(&cc.egui_ctx);
        app
    }

    /// Start decoding every slide image so later slides don't enter with a spinner.
    fn preload_images(&self, ctx: &egui::Context) {
        for slide in &self.config.slides {
            if let Some(image) = slide.image() {
                let uri = image.uri(&self.assets_dir);
                if let Err(e) = ctx.try_load_texture(&uri, egui::TextureOptions::LINEAR, egui::SizeHint::default()) {
                    tracing::warn!(slide = slide.name(), %uri, error = %e, "could not preload image");
                }
            }
        }
    }

    pub(crate) fn fallback_size(&self) -> egui::Vec2 {
        egui::vec2(self.config.window.width, self.config.window.height)
    }

    /// The swipe threshold depends on the viewport width, so the navigator
    /// waits for the first frame.
    pub(crate) fn ensure_navigator(&mut self, ctx: &egui::Context) {
        if self.navigator.is_some() {
            return;
        }
        let width = ctx.input(|i| i.viewport().inner_rect.map(|r| r.width()));
        let navigator = Navigator::new(
            self.config.max_index(),
            &self.config.navigation,
            self.config.navigation.swipe_threshold_for(width),
        );
        tracing::info!(
            ?width,
            swipe_threshold = navigator.swipe_threshold(),
            max_index = navigator.max_index(),
            "navigator ready"
        );
        self.navigator = Some(navigator);
    }

    /// Drop the scroll lock early, restoring the page's prior overflow.
    pub fn release_scroll(&mut self) {
        self.scroll_lock = None;
    }

    fn open_pending_link(&self) {
        if let Some(url) = self.next_link.borrow_mut().take() {
            tracing::info!(%url, "opening link");
            if let Err(e) = open::that(&url) {
                tracing::warn!(%url, error = %e, "could not open link");
            }
        }
    }
}

impl eframe::App for SaveTheDate {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_navigator(ctx);
        self.handle_input(ctx);

        let now = Instant::now();
        let frame = self.transition.frame(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.theme.background))
            .show(ctx, |ui| {
                self.render_background(ui);
                self.render_frame(ui, frame);
            });

        self.open_pending_link();

        if self.transition.is_animating(now) {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Overflow;

    #[test]
    fn test_app_locks_page_scroll_for_its_lifetime() {
        let page = PageScroll::new();
        let app = SaveTheDate::new(Config::default(), page.clone());
        assert_eq!(page.overflow(), Overflow::Hidden);
        drop(app);
        assert_eq!(page.overflow(), Overflow::Auto);
    }

    #[test]
    fn test_release_scroll_restores_early() {
        let page = PageScroll::new();
        let mut app = SaveTheDate::new(Config::default(), page.clone());
        app.release_scroll();
        assert!(!page.is_locked());
        drop(app);
        assert!(!page.is_locked());
    }

    #[test]
    fn test_starts_settled_on_first_slide() {
        let app = SaveTheDate::new(Config::default(), PageScroll::new());
        assert!(app.navigator.is_none());
        assert_eq!(app.transition.target(), 0);
        assert!(!app.transition.is_animating(Instant::now()));
    }
}
