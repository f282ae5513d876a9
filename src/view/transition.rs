// Slide transition - the outgoing slide exits, then the incoming slide enters
use crate::config::TransitionConfig;
use crate::state::Direction;
use std::time::{Duration, Instant};

/// How one slide should be painted this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub panel: usize,
    pub opacity: f32,
    pub offset_x: f32,
    pub scale: f32,
}

impl Frame {
    pub fn centered(panel: usize) -> Self {
        Self {
            panel,
            opacity: 1.0,
            offset_x: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Exit,
    Enter,
}

#[derive(Clone, Debug)]
pub struct Transition {
    outgoing: Option<usize>,
    incoming: usize,
    direction: Direction,
    started: Option<Instant>,
    phase: Duration,
    offset: f32,
    scale: f32,
}

// CSS `ease-out`: cubic-bezier(0, 0, 0.58, 1)
const EASE_X1: f32 = 0.0;
const EASE_X2: f32 = 0.58;
const EASE_Y1: f32 = 0.0;
const EASE_Y2: f32 = 1.0;

fn bezier(p1: f32, p2: f32, u: f32) -> f32 {
    let v = 1.0 - u;
    3.0 * v * v * u * p1 + 3.0 * v * u * u * p2 + u * u * u
}

/// Parameter `u` where the monotonic curve `f` reaches `target`, by bisection.
fn solve(target: f32, f: impl Fn(f32) -> f32) -> f32 {
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..32 {
        let mid = (lo + hi) / 2.0;
        if f(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

fn ease_out(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let u = solve(t, |u| bezier(EASE_X1, EASE_X2, u));
    bezier(EASE_Y1, EASE_Y2, u)
}

/// Time fraction at which `ease_out` reaches `y`.
fn ease_out_inverse(y: f32) -> f32 {
    if y <= 0.0 {
        return 0.0;
    }
    if y >= 1.0 {
        return 1.0;
    }
    let u = solve(y, |u| bezier(EASE_Y1, EASE_Y2, u));
    bezier(EASE_X1, EASE_X2, u)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl Transition {
    /// A transition resting on `panel`. The first slide never animates in.
    pub fn settled(panel: usize, config: &TransitionConfig) -> Self {
        Self {
            outgoing: None,
            incoming: panel,
            direction: Direction::Forward,
            started: None,
            phase: Duration::from_millis(config.duration_ms),
            offset: config.offset,
            scale: config.scale,
        }
    }

    pub fn target(&self) -> usize {
        self.incoming
    }

    fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.started.map(|s| now.saturating_duration_since(s))
    }

    fn phase_at(&self, now: Instant) -> Option<(Phase, f32)> {
        let elapsed = self.elapsed(now)?;
        if self.phase.is_zero() {
            return None;
        }
        let t = elapsed.as_secs_f32() / self.phase.as_secs_f32();
        if self.outgoing.is_some() && t < 1.0 {
            Some((Phase::Exit, t))
        } else {
            let t = if self.outgoing.is_some() { t - 1.0 } else { t };
            (t < 1.0).then_some((Phase::Enter, t))
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.phase_at(now).is_some()
    }

    /// Point the transition at a new slide.
    ///
    /// While the old slide is still leaving it keeps leaving; only the incoming
    /// slide and direction change. Once the enter phase has begun, the slide
    /// that was entering becomes the one that leaves. Going back to the slide
    /// that is still leaving turns it around from where it is.
    pub fn retarget(&mut self, panel: usize, direction: Direction, now: Instant) {
        if panel == self.incoming {
            return;
        }
        match self.phase_at(now) {
            Some((Phase::Exit, t)) if self.outgoing == Some(panel) => {
                // Entering at progress `s` matches the exit at `t` when
                // ease(s) == 1 - ease(t); offset and scale line up as well
                // because the direction flips.
                let s = ease_out_inverse(1.0 - ease_out(t));
                self.outgoing = None;
                self.incoming = panel;
                self.direction = direction;
                self.started = Some(now.checked_sub(self.phase.mul_f32(s)).unwrap_or(now));
            }
            Some((Phase::Exit, _)) => {
                self.incoming = panel;
                self.direction = direction;
            }
            _ => {
                self.outgoing = Some(self.incoming);
                self.incoming = panel;
                self.direction = direction;
                self.started = Some(now);
            }
        }
    }

    /// Forward moves enter from the right and leave to the left.
    fn side(&self) -> f32 {
        match self.direction {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn frame(&self, now: Instant) -> Frame {
        match self.phase_at(now) {
            None => Frame::centered(self.incoming),
            Some((Phase::Exit, t)) => {
                let t = ease_out(t);
                Frame {
                    panel: self.outgoing.unwrap_or(self.incoming),
                    opacity: 1.0 - t,
                    offset_x: lerp(0.0, -self.side() * self.offset, t),
                    scale: lerp(1.0, self.scale, t),
                }
            }
            Some((Phase::Enter, t)) => {
                let t = ease_out(t);
                Frame {
                    panel: self.incoming,
                    opacity: t,
                    offset_x: lerp(self.side() * self.offset, 0.0, t),
                    scale: lerp(self.scale, 1.0, t),
                }
            }
        }
    }
}
