/// Top-card transition choreography
///
/// When the current photo changes, the old top card flies off (scale up,
/// tilt further in the direction of travel, fade, blur) while the new top
/// card settles into its resting pose. The exit is shorter than the entry so
/// the ghost is gone before the new card comes to rest.
///
/// Styles are pure functions of elapsed time; the canvas samples them on
/// every animation tick.

use std::time::{Duration, Instant};

use super::navigation::Direction;
use super::transform::CardTransform;

pub const EXIT_DURATION: Duration = Duration::from_millis(180);
pub const ENTER_DURATION: Duration = Duration::from_millis(300);

/// Outgoing card scale at the end of the exit
pub const EXIT_SCALE: f32 = 1.06;
/// Extra tilt added in the direction of travel, in degrees
pub const EXIT_EXTRA_ROTATION: f32 = 8.0;
/// Blur radius reached at the end of the exit, in pixels
pub const EXIT_BLUR: f32 = 6.0;
/// Scale a card coming from outside the pile starts at
const ENTER_FROM_SCALE: f32 = 0.96;

/// Sampled visual state of a card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub scale: f32,
    pub rotation_degrees: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub opacity: f32,
    pub blur: f32,
}

impl CardStyle {
    /// Card at rest: given transform, full size, opaque, sharp
    pub fn resting(transform: CardTransform) -> Self {
        Self {
            scale: 1.0,
            rotation_degrees: transform.rotation_degrees as f32,
            offset_x: transform.offset_x,
            offset_y: transform.offset_y,
            opacity: 1.0,
            blur: 0.0,
        }
    }

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        if t >= 1.0 {
            return to;
        }
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            scale: mix(from.scale, to.scale),
            rotation_degrees: mix(from.rotation_degrees, to.rotation_degrees),
            offset_x: mix(from.offset_x, to.offset_x),
            offset_y: mix(from.offset_y, to.offset_y),
            opacity: mix(from.opacity, to.opacity),
            blur: mix(from.blur, to.blur),
        }
    }
}

/// Fraction of `duration` covered by `elapsed`, clamped to [0, 1]
fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

fn ease_in_quad(t: f32) -> f32 {
    t * t
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// An in-flight swap of the top card
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Manifest index of the card leaving the top
    pub outgoing: usize,
    /// Manifest index of the new top card
    pub incoming: usize,
    pub direction: Direction,
    /// Pose the outgoing card had when the swap started
    outgoing_from: CardStyle,
    /// Pose the incoming card starts from
    incoming_from: CardStyle,
    started: Instant,
}

impl Transition {
    /// Start a swap
    ///
    /// `incoming_transform` is the new top card's per-path transform. Moving
    /// forward, that card was already visible right behind the top, so it
    /// starts from there; moving backward it comes from outside the pile and
    /// fades in.
    pub fn start(
        outgoing: usize,
        incoming: usize,
        direction: Direction,
        incoming_transform: CardTransform,
        started: Instant,
    ) -> Self {
        let behind = CardStyle::resting(incoming_transform);
        let incoming_from = match direction {
            Direction::Forward => behind,
            Direction::Backward => CardStyle {
                scale: ENTER_FROM_SCALE,
                opacity: 0.0,
                ..behind
            },
        };

        Self {
            outgoing,
            incoming,
            direction,
            outgoing_from: CardStyle::resting(CardTransform::IDENTITY),
            incoming_from,
            started,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    /// Pose of the leaving card, or `None` once it has fully exited
    pub fn exit_style(&self, elapsed: Duration) -> Option<CardStyle> {
        if elapsed >= EXIT_DURATION {
            return None;
        }

        let t = ease_in_quad(progress(elapsed, EXIT_DURATION));
        let from = self.outgoing_from;
        let to = CardStyle {
            scale: EXIT_SCALE,
            rotation_degrees: from.rotation_degrees + self.direction.sign() * EXIT_EXTRA_ROTATION,
            opacity: 0.0,
            blur: EXIT_BLUR,
            ..from
        };

        Some(CardStyle::lerp(from, to, t))
    }

    /// Pose of the new top card; its resting pose once the entry is over
    pub fn enter_style(&self, elapsed: Duration) -> CardStyle {
        let t = ease_out_cubic(progress(elapsed, ENTER_DURATION));
        CardStyle::lerp(self.incoming_from, CardStyle::resting(CardTransform::IDENTITY), t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= ENTER_DURATION
    }
}
