//! Hand-off of updated body state to whoever draws it
//!
//! The engine never renders. After a frame's physics updates it calls a
//! [`FrameSink`] once per body; a renderer, a camera-follow controller or a
//! headless recorder implements the trait.

use std::collections::VecDeque;

use super::states::{Body, BodyHandle, NVec3};

pub trait FrameSink {
    fn body_updated(&mut self, handle: BodyHandle, body: &Body);

    /// Called once after every body of the frame has been reported
    fn frame_finished(&mut self) {}
}

impl<F> FrameSink for F
where
    F: FnMut(BodyHandle, &Body),
{
    fn body_updated(&mut self, handle: BodyHandle, body: &Body) {
        self(handle, body)
    }
}

/// Bounded position history per body, oldest point first
#[derive(Debug, Clone)]
pub struct TrailRecorder {
    trail_length: usize,
    trails: Vec<VecDeque<NVec3>>,
}

impl TrailRecorder {
    pub const DEFAULT_TRAIL_LENGTH: usize = 100;

    pub fn new(trail_length: usize) -> Self {
        Self {
            trail_length,
            trails: Vec::new(),
        }
    }

    pub fn trail(&self, handle: BodyHandle) -> Option<&VecDeque<NVec3>> {
        self.trails.get(handle.index())
    }

    pub fn clear(&mut self) {
        self.trails.clear();
    }
}

impl Default for TrailRecorder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TRAIL_LENGTH)
    }
}

impl FrameSink for TrailRecorder {
    fn body_updated(&mut self, handle: BodyHandle, body: &Body) {
        let idx = handle.index();
        if self.trails.len() <= idx {
            self.trails.resize_with(idx + 1, VecDeque::new);
        }
        let trail = &mut self.trails[idx];
        trail.push_back(body.x);
        while trail.len() > self.trail_length {
            trail.pop_front();
        }
    }
}
