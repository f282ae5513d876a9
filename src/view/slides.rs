// Slide rendering for save-the-date

use crate::app::SaveTheDate;
use crate::slide::{format_event_date, ImageRef, Slide};
use crate::style::{self, ImageRole, TextRole};
use crate::view::Frame;
use eframe::egui;

impl SaveTheDate {
    /// Returns false, and warns once per URI, when an image can't be loaded.
    fn image_available(&self, ctx: &egui::Context, uri: &str) -> bool {
        match ctx.try_load_texture(uri, egui::TextureOptions::LINEAR, egui::SizeHint::default()) {
            Ok(_) => true,
            Err(e) => {
                if self.failed_images.borrow_mut().insert(uri.to_owned()) {
                    tracing::warn!(%uri, error = %e, "image unavailable");
                }
                false
            }
        }
    }

    pub(crate) fn render_background(&self, ui: &mut egui::Ui) {
        let Some(background) = &self.config.theme.background else {
            return;
        };
        let uri = background.uri(&self.assets_dir);
        if self.image_available(ui.ctx(), &uri) {
            egui::Image::new(uri).paint_at(ui, ui.max_rect());
        }
    }

    pub(crate) fn render_frame(&self, ui: &mut egui::Ui, frame: Frame) {
        let Some(slide) = self.config.slides.get(frame.panel) else {
            return;
        };
        let viewport = ui.max_rect();
        let padding = style::page_padding(viewport.width());
        let rect = viewport
            .shrink(padding)
            .translate(egui::vec2(frame.offset_x, 0.0));

        ui.scope_builder(
            egui::UiBuilder::new()
                .max_rect(rect)
                .layout(egui::Layout::top_down(egui::Align::Center)),
            |ui| {
                ui.set_opacity(frame.opacity);
                self.render_slide(ui, slide, viewport.size(), frame.scale);
            },
        );
    }

    fn render_slide(&self, ui: &mut egui::Ui, slide: &Slide, viewport: egui::Vec2, scale: f32) {
        let sized = |role| style::text_size(role, viewport.x) * scale;
        let gap = style::HEADING_GAP * scale;

        match slide {
            Slide::Title { text } => {
                let size = sized(TextRole::Hero);
                ui.add_space(((ui.available_height() - size * 1.5) / 2.0).max(0.0));
                self.heading(ui, text, size);
            }
            Slide::Announcement { text, image } => {
                let size = sized(TextRole::Headline);
                let image_height = ui.available_height() - size * 1.5 - gap;
                ui.add_space(vertical_slack(ui, image_height, size * 1.5 + gap));
                self.heading(ui, text, size);
                ui.add_space(gap);
                self.render_image(ui, image, ImageRole::Portrait, viewport.x, image_height, scale);
            }
            Slide::Venue { date, place, image } => {
                let size = sized(TextRole::Subhead);
                let text_height = 2.0 * size * 1.5 + 2.0 * gap;
                let image_height = ui.available_height() - text_height;
                ui.add_space(vertical_slack(ui, image_height, text_height));
                self.heading(ui, &format_event_date(*date), size);
                ui.add_space(gap);
                self.render_image(ui, image, ImageRole::Wide, viewport.x, image_height, scale);
                ui.add_space(gap);
                self.heading(ui, place, size);
            }
            Slide::Invitation {
                caption,
                image,
                link,
            } => {
                let caption_size = sized(TextRole::Caption);
                let link_size = sized(TextRole::Link);
                let text_height = caption_size * 1.5 + link_size * 1.5 + gap;
                let image_height = (viewport.y * style::FULL_IMAGE_HEIGHT_RATIO)
                    .min(ui.available_height() - text_height);
                ui.add_space(vertical_slack(ui, image_height, text_height));
                self.render_image(ui, image, ImageRole::Full, viewport.x, image_height, scale);
                ui.add_space(gap);
                self.heading(ui, caption, caption_size);
                if let Some(link) = link {
                    let text = self.theme.rich(&link.label, link_size).underline();
                    let response = ui
                        .add(egui::Label::new(text).sense(egui::Sense::click()))
                        .on_hover_cursor(egui::CursorIcon::PointingHand)
                        .on_hover_text(link.url.as_str());
                    if response.clicked() {
                        *self.next_link.borrow_mut() = Some(link.url.clone());
                    }
                }
            }
        }
    }

    fn heading(&self, ui: &mut egui::Ui, text: &str, size: f32) {
        ui.add(egui::Label::new(self.theme.rich(text, size)).wrap());
    }

    fn render_image(
        &self,
        ui: &mut egui::Ui,
        image: &ImageRef,
        role: ImageRole,
        viewport_width: f32,
        max_height: f32,
        scale: f32,
    ) {
        let uri = image.uri(&self.assets_dir);
        if !self.image_available(ui.ctx(), &uri) {
            self.heading(ui, &image.alt, style::text_size(TextRole::Caption, viewport_width) * scale);
            return;
        }
        let max_width = style::image_max_width(role, viewport_width) * scale;
        ui.add(
            egui::Image::new(uri)
                .max_width(max_width)
                .max_height(max_height.max(0.0) * scale)
                .maintain_aspect_ratio(true)
                .corner_radius(style::IMAGE_ROUNDING),
        )
        .on_hover_text(image.alt.as_str());
    }
}

/// Space above the content so that a slide whose image is shorter than its
/// budget still sits in the middle. Images keep their aspect ratio, so only
/// a share of the budget is assumed to be used.
fn vertical_slack(ui: &egui::Ui, image_budget: f32, text_height: f32) -> f32 {
    let used = image_budget.max(0.0) * 0.8 + text_height;
    ((ui.available_height() - used) / 2.0).max(0.0)
}
