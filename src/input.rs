// Input handling for save-the-date
// Wheel, keyboard and touch events routed to the navigator

use crate::app::SaveTheDate;
use eframe::egui;
use std::time::Instant;

/// Vertical wheel movement in points, positive when scrolling down the deck.
///
/// egui reports content movement (positive y pulls content down), which is the
/// opposite sign of a page scroll.
pub fn wheel_delta_y(
    unit: egui::MouseWheelUnit,
    delta: egui::Vec2,
    line_height: f32,
    page_height: f32,
) -> f32 {
    let points = match unit {
        egui::MouseWheelUnit::Point => delta.y,
        egui::MouseWheelUnit::Line => delta.y * line_height,
        egui::MouseWheelUnit::Page => delta.y * page_height,
    };
    -points
}

impl SaveTheDate {
    pub fn handle_input(&mut self, ctx: &egui::Context) {
        self.handle_window_keys(ctx);

        let now = Instant::now();
        let line_height = self.config.navigation.wheel_line_height;
        let page_height = crate::style::viewport_size(ctx, self.fallback_size()).y;
        let Some(navigator) = self.navigator.as_mut() else {
            return;
        };
        let events = ctx.input(|i| i.events.clone());

        let mut consumed = Vec::new();
        for event in events {
            match &event {
                egui::Event::MouseWheel { unit, delta, .. } => {
                    navigator.handle_wheel(wheel_delta_y(*unit, *delta, line_height, page_height), now);
                    consumed.push(event);
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => {
                    if navigator.handle_key(*key, now).is_some() {
                        consumed.push(event);
                    }
                }
                egui::Event::Touch { phase, pos, .. } => match phase {
                    egui::TouchPhase::Start => {
                        navigator.handle_touch_start(pos.y);
                        consumed.push(event);
                    }
                    egui::TouchPhase::Move => {
                        let tracking = navigator.state().touch_origin.is_some();
                        navigator.handle_touch_move(pos.y, now);
                        if tracking {
                            consumed.push(event);
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        let (position, direction) = (navigator.position(), navigator.direction());
        if position != self.transition.target() {
            if let Some(slide) = self.config.slides.get(position) {
                tracing::debug!(position, slide = slide.name(), ?direction, "showing slide");
            }
            self.transition.retarget(position, direction, now);
        }

        if self.page.is_locked() {
            ctx.input_mut(|i| {
                i.raw_scroll_delta = egui::Vec2::ZERO;
                i.smooth_scroll_delta = egui::Vec2::ZERO;
                i.events.retain(|e| !consumed.contains(e));
            });
        }
    }

    /// Keys that drive the window rather than the deck.
    fn handle_window_keys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::F11)) {
            let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
            tracing::debug!(fullscreen = !fullscreen, "toggling fullscreen");
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            tracing::info!("closing");
            self.release_scroll();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::state::PageScroll;

    fn key(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    fn wheel(unit: egui::MouseWheelUnit, delta: egui::Vec2) -> egui::Event {
        egui::Event::MouseWheel {
            unit,
            delta,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// Run one egui frame through the app's input handling and report what
    /// the rest of the frame would still see.
    fn run_frame(app: &mut SaveTheDate, events: Vec<egui::Event>) -> (Vec<egui::Event>, egui::Vec2, egui::Vec2) {
        let ctx = egui::Context::default();
        let raw = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut seen = (Vec::new(), egui::Vec2::ZERO, egui::Vec2::ZERO);
        let _ = ctx.run(raw, |ctx| {
            app.ensure_navigator(ctx);
            app.handle_input(ctx);
            seen = ctx.input(|i| (i.events.clone(), i.raw_scroll_delta, i.smooth_scroll_delta));
        });
        seen
    }

    fn position(app: &SaveTheDate) -> Option<usize> {
        app.navigator.as_ref().map(|n| n.position())
    }

    #[test]
    fn test_wheel_down_is_positive() {
        let delta = egui::vec2(0.0, -100.0);
        assert_eq!(wheel_delta_y(egui::MouseWheelUnit::Point, delta, 100.0, 800.0), 100.0);
    }

    #[test]
    fn test_wheel_units_scale() {
        let one_line_up = egui::vec2(0.0, 1.0);
        assert_eq!(wheel_delta_y(egui::MouseWheelUnit::Line, one_line_up, 100.0, 800.0), -100.0);
        let one_page_down = egui::vec2(0.0, -1.0);
        assert_eq!(wheel_delta_y(egui::MouseWheelUnit::Page, one_page_down, 100.0, 800.0), 800.0);
    }

    #[test]
    fn test_horizontal_wheel_ignored() {
        let sideways = egui::vec2(120.0, 0.0);
        assert_eq!(wheel_delta_y(egui::MouseWheelUnit::Point, sideways, 100.0, 800.0), 0.0);
    }

    #[test]
    fn test_one_line_notch_moves_one_slide() {
        let mut app = SaveTheDate::new(Config::default(), PageScroll::new());
        run_frame(&mut app, vec![wheel(egui::MouseWheelUnit::Line, egui::vec2(0.0, -1.0))]);
        assert_eq!(position(&app), Some(1));
        assert_eq!(app.transition.target(), 1);
    }

    #[test]
    fn test_locked_page_swallows_navigation_events() {
        let mut app = SaveTheDate::new(Config::default(), PageScroll::new());
        let events = vec![
            key(egui::Key::A),
            key(egui::Key::ArrowDown),
            wheel(egui::MouseWheelUnit::Point, egui::vec2(0.0, -100.0)),
        ];
        let (remaining, raw_scroll, smooth_scroll) = run_frame(&mut app, events);

        // ArrowDown was accepted; the wheel hit the cooldown but is still swallowed
        assert_eq!(position(&app), Some(1));
        assert_eq!(remaining, vec![key(egui::Key::A)]);
        assert_eq!(raw_scroll, egui::Vec2::ZERO);
        assert_eq!(smooth_scroll, egui::Vec2::ZERO);
    }

    #[test]
    fn test_cooling_down_key_is_left_for_others() {
        let mut app = SaveTheDate::new(Config::default(), PageScroll::new());
        let events = vec![key(egui::Key::ArrowDown), key(egui::Key::PageDown)];
        let (remaining, _, _) = run_frame(&mut app, events);
        assert_eq!(position(&app), Some(1));
        assert_eq!(remaining, vec![key(egui::Key::PageDown)]);
    }

    #[test]
    fn test_released_page_keeps_events() {
        let mut app = SaveTheDate::new(Config::default(), PageScroll::new());
        app.release_scroll();
        let events = vec![
            key(egui::Key::A),
            key(egui::Key::ArrowDown),
            wheel(egui::MouseWheelUnit::Point, egui::vec2(0.0, -100.0)),
        ];
        let (remaining, raw_scroll, _) = run_frame(&mut app, events.clone());

        assert_eq!(position(&app), Some(1));
        assert_eq!(remaining, events);
        assert_ne!(raw_scroll, egui::Vec2::ZERO);
    }
}
