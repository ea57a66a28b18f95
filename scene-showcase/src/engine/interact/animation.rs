use bevy::prelude::*;
use thiserror::Error;

use constants::animation::{ANIMATION_FPS, WOBBLE_CYCLE_FRAMES};

#[derive(Debug, Error, PartialEq)]
pub enum KeyframeError {
    #[error("keyframe frames must be non-decreasing (frame {0} after {1})")]
    NonMonotonic(f32, f32),
    #[error("a track needs at least two keyframes")]
    TooFewKeys,
}

/// How a track behaves once playback passes the final keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Restart from the first keyframe.
    Cycle,
    /// Restart, carrying the accumulated value delta of each completed loop.
    Relative,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub frame: f32,
    pub value: f32,
}

/// Ordered (frame, value) keyframes driving one numeric channel,
/// sampled with linear interpolation.
#[derive(Debug, Clone)]
pub struct AnimationTrack {
    fps: f32,
    loop_mode: LoopMode,
    keys: Vec<Keyframe>,
}

impl AnimationTrack {
    pub fn new(fps: f32, loop_mode: LoopMode) -> Self {
        Self {
            fps,
            loop_mode,
            keys: Vec::new(),
        }
    }

    pub fn set_keys(&mut self, keys: Vec<Keyframe>) -> Result<(), KeyframeError> {
        if keys.len() < 2 {
            return Err(KeyframeError::TooFewKeys);
        }
        for pair in keys.windows(2) {
            if pair[1].frame < pair[0].frame {
                return Err(KeyframeError::NonMonotonic(pair[1].frame, pair[0].frame));
            }
        }
        self.keys = keys;
        Ok(())
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn first_frame(&self) -> f32 {
        self.keys.first().map(|k| k.frame).unwrap_or(0.0)
    }

    pub fn last_frame(&self) -> f32 {
        self.keys.last().map(|k| k.frame).unwrap_or(0.0)
    }

    /// Sample the track at an absolute frame, clamped to the key range.
    pub fn sample(&self, frame: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        let last = self.keys.last().expect("non-empty keys have a last entry");
        if frame <= first.frame {
            return first.value;
        }
        if frame >= last.frame {
            return last.value;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if frame >= a.frame && frame <= b.frame {
                let span = b.frame - a.frame;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let t = (frame - a.frame) / span;
                return a.value + (b.value - a.value) * t;
            }
        }
        last.value
    }

    /// Sample with looping applied to an unbounded elapsed-frame count.
    pub fn sample_looped(&self, elapsed_frames: f32) -> f32 {
        let first = self.first_frame();
        let span = self.last_frame() - first;
        if span <= f32::EPSILON {
            return self.sample(first);
        }
        let loops = (elapsed_frames / span).floor();
        let local = first + (elapsed_frames - loops * span);
        match self.loop_mode {
            LoopMode::Cycle => self.sample(local),
            LoopMode::Relative => {
                let delta = self.sample(self.last_frame()) - self.sample(first);
                self.sample(local) + loops * delta
            }
        }
    }
}

/// The clone's two channels (rotation about Y, positional Y wobble)
/// read one shared timeline so they stay phase locked.
#[derive(Component)]
pub struct WobbleAnimation {
    pub timeline: AnimationTrack,
    pub elapsed_frames: f32,
}

impl WobbleAnimation {
    pub fn new() -> Self {
        let mut timeline = AnimationTrack::new(ANIMATION_FPS, LoopMode::Cycle);
        timeline
            .set_keys(vec![
                Keyframe {
                    frame: 0.0,
                    value: 0.0,
                },
                Keyframe {
                    frame: ANIMATION_FPS,
                    value: std::f32::consts::PI,
                },
                Keyframe {
                    frame: WOBBLE_CYCLE_FRAMES,
                    value: 0.0,
                },
            ])
            .expect("built-in wobble keyframes are monotonic");
        Self {
            timeline,
            elapsed_frames: 0.0,
        }
    }
}

impl Default for WobbleAnimation {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance every wobble animation and write both channels from the
/// shared timeline value.
pub fn animate_wobble(time: Res<Time>, mut query: Query<(&mut WobbleAnimation, &mut Transform)>) {
    for (mut anim, mut transform) in &mut query {
        let fps = anim.timeline.fps();
        anim.elapsed_frames += time.delta_secs() * fps;
        let value = anim.timeline.sample_looped(anim.elapsed_frames);
        transform.rotation = Quat::from_rotation_y(value);
        transform.translation.y = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wobble_track() -> AnimationTrack {
        let mut track = AnimationTrack::new(ANIMATION_FPS, LoopMode::Cycle);
        track
            .set_keys(vec![
                Keyframe {
                    frame: 0.0,
                    value: 0.0,
                },
                Keyframe {
                    frame: ANIMATION_FPS,
                    value: std::f32::consts::PI,
                },
                Keyframe {
                    frame: WOBBLE_CYCLE_FRAMES,
                    value: 0.0,
                },
            ])
            .unwrap();
        track
    }

    #[test]
    fn midpoint_of_first_half_cycle_is_strictly_inside_range() {
        let track = wobble_track();
        let value = track.sample(ANIMATION_FPS / 2.0);
        assert!(value > 0.0 && value < std::f32::consts::PI);
    }

    #[test]
    fn returns_exactly_to_start_at_cycle_end() {
        let track = wobble_track();
        assert_eq!(track.sample(WOBBLE_CYCLE_FRAMES), 0.0);
    }

    #[test]
    fn cycle_mode_wraps_seamlessly() {
        let track = wobble_track();
        let in_first = track.sample_looped(ANIMATION_FPS / 2.0);
        let in_second = track.sample_looped(WOBBLE_CYCLE_FRAMES + ANIMATION_FPS / 2.0);
        assert!((in_first - in_second).abs() < 1e-4);
    }

    #[test]
    fn relative_mode_accumulates_loop_delta() {
        let mut track = AnimationTrack::new(ANIMATION_FPS, LoopMode::Relative);
        track
            .set_keys(vec![
                Keyframe {
                    frame: 0.0,
                    value: 0.0,
                },
                Keyframe {
                    frame: ANIMATION_FPS,
                    value: 2.0,
                },
            ])
            .unwrap();
        // one full loop completed, half way through the second
        let value = track.sample_looped(ANIMATION_FPS * 1.5);
        assert!((value - 3.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_decreasing_frames() {
        let mut track = AnimationTrack::new(ANIMATION_FPS, LoopMode::Cycle);
        let result = track.set_keys(vec![
            Keyframe {
                frame: 10.0,
                value: 0.0,
            },
            Keyframe {
                frame: 5.0,
                value: 1.0,
            },
        ]);
        assert!(matches!(result, Err(KeyframeError::NonMonotonic(..))));
    }

    #[test]
    fn rejects_single_keyframe() {
        let mut track = AnimationTrack::new(ANIMATION_FPS, LoopMode::Cycle);
        let result = track.set_keys(vec![Keyframe {
            frame: 0.0,
            value: 0.0,
        }]);
        assert_eq!(result, Err(KeyframeError::TooFewKeys));
    }
}
