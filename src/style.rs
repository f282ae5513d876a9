pub mod theme;

pub use theme::Theme;

use eframe::egui;

// --- Breakpoints (logical points) ---
pub const BREAKPOINT_SM: f32 = 640.0;
pub const BREAKPOINT_MD: f32 = 768.0;
pub const BREAKPOINT_LG: f32 = 1024.0;

// --- Spacing ---
pub const PAGE_PADDING: f32 = 16.0;
pub const PAGE_PADDING_SM: f32 = 24.0;
pub const HEADING_GAP: f32 = 24.0;
pub const IMAGE_ROUNDING: u8 = 12;

/// Share of the viewport height a full-bleed slide image may take
pub const FULL_IMAGE_HEIGHT_RATIO: f32 = 0.85;

/// Text roles on a slide. Each grows in steps as the viewport widens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    Hero,
    Headline,
    Subhead,
    Caption,
    Link,
}

/// Image roles on a slide, by how much room they get.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageRole {
    Portrait,
    Wide,
    Full,
}

fn step(width: f32) -> usize {
    if width >= BREAKPOINT_LG {
        3
    } else if width >= BREAKPOINT_MD {
        2
    } else if width >= BREAKPOINT_SM {
        1
    } else {
        0
    }
}

pub fn text_size(role: TextRole, viewport_width: f32) -> f32 {
    let sizes: [f32; 4] = match role {
        TextRole::Hero => [48.0, 60.0, 72.0, 128.0],
        TextRole::Headline => [30.0, 36.0, 48.0, 60.0],
        TextRole::Subhead => [24.0, 30.0, 36.0, 48.0],
        TextRole::Caption => [24.0, 30.0, 36.0, 36.0],
        TextRole::Link => [20.0, 24.0, 24.0, 24.0],
    };
    sizes[step(viewport_width)]
}

/// Largest width an image may take for its role
pub fn image_max_width(role: ImageRole, viewport_width: f32) -> f32 {
    let limit: f32 = match role {
        ImageRole::Portrait => [384.0, 448.0, 512.0, 512.0][step(viewport_width)],
        ImageRole::Wide => 576.0,
        ImageRole::Full => 896.0,
    };
    limit.min(viewport_width - 2.0 * page_padding(viewport_width))
}

pub fn page_padding(viewport_width: f32) -> f32 {
    if viewport_width >= BREAKPOINT_SM {
        PAGE_PADDING_SM
    } else {
        PAGE_PADDING
    }
}

/// Viewport size in points, falling back to the window's requested size
pub fn viewport_size(ctx: &egui::Context, fallback: egui::Vec2) -> egui::Vec2 {
    ctx.input(|i| i.viewport().inner_rect.map(|r| r.size()))
        .unwrap_or(fallback)
}
