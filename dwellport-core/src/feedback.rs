//! Visual feedback globals sampled by the renderer.
//!
//! The controller publishes teleport progress as named globals. The renderer
//! (or a [`FootstepVisualizer`](crate::footsteps::FootstepVisualizer)) samples
//! them once per frame. Last write wins.

use crate::math::Vec4;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// World-space position the footstep preview starts from.
pub const TELEPORT_START: &str = "_TeleportStart";
/// World-space teleport destination.
pub const TELEPORT_END: &str = "_TeleportEnd";
/// Number of footstep markers currently shown.
pub const STEP_COUNT: &str = "_StepCount";

/// Write side of the feedback globals.
pub trait FeedbackSink {
    fn set_float(&mut self, key: &str, value: f32);

    fn set_vector(&mut self, key: &str, value: Vec4);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackValue {
    Float(f32),
    Vector(Vec4),
}

/// In-memory feedback store.
///
/// Clones share the same storage, so one handle can be given to the controller
/// while another is read by the render side.
#[derive(Debug, Clone, Default)]
pub struct FeedbackBus {
    values: Rc<RefCell<HashMap<String, FeedbackValue>>>,
}

impl FeedbackBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<FeedbackValue> {
        self.values.borrow().get(key).copied()
    }

    /// Float global, `None` if unset or holding a vector.
    pub fn float(&self, key: &str) -> Option<f32> {
        match self.get(key)? {
            FeedbackValue::Float(value) => Some(value),
            FeedbackValue::Vector(_) => None,
        }
    }

    /// Vector global, `None` if unset or holding a float.
    pub fn vector(&self, key: &str) -> Option<Vec4> {
        match self.get(key)? {
            FeedbackValue::Vector(value) => Some(value),
            FeedbackValue::Float(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    fn insert(&self, key: &str, value: FeedbackValue) {
        self.values.borrow_mut().insert(key.to_owned(), value);
    }
}

impl FeedbackSink for FeedbackBus {
    fn set_float(&mut self, key: &str, value: f32) {
        self.insert(key, FeedbackValue::Float(value));
    }

    fn set_vector(&mut self, key: &str, value: Vec4) {
        self.insert(key, FeedbackValue::Vector(value));
    }
}
