//! Visual elements animated by the playground
//!
//! Handles are cheap clones sharing the same state, so animation callbacks can
//! hold one while the view-model holds another. Everything here lives on the
//! UI thread.

use motion_animation::{AnimatedProperty, OwnerId};
use motion_core::Color;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Transient visual properties of the actor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub opacity: f32,
    pub scale: f32,
    /// Degrees
    pub rotation: f32,
    pub translation_x: f32,
    pub translation_y: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        opacity: 1.0,
        scale: 1.0,
        rotation: 0.0,
        translation_x: 0.0,
        translation_y: 0.0,
    };

    pub fn get(&self, property: AnimatedProperty) -> f32 {
        match property {
            AnimatedProperty::Opacity => self.opacity,
            AnimatedProperty::Scale => self.scale,
            AnimatedProperty::Rotation => self.rotation,
            AnimatedProperty::TranslationX => self.translation_x,
            AnimatedProperty::TranslationY => self.translation_y,
        }
    }

    pub fn set(&mut self, property: AnimatedProperty, value: f32) {
        match property {
            AnimatedProperty::Opacity => self.opacity = value,
            AnimatedProperty::Scale => self.scale = value,
            AnimatedProperty::Rotation => self.rotation = value,
            AnimatedProperty::TranslationX => self.translation_x = value,
            AnimatedProperty::TranslationY => self.translation_y = value,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The animated shape container
#[derive(Clone, Debug)]
pub struct VisualNode {
    owner: OwnerId,
    transform: Rc<RefCell<Transform>>,
}

impl VisualNode {
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            transform: Rc::new(RefCell::new(Transform::IDENTITY)),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn transform(&self) -> Transform {
        *self.transform.borrow()
    }

    pub fn set_property(&self, property: AnimatedProperty, value: f32) {
        self.transform.borrow_mut().set(property, value);
    }

    pub fn reset(&self) {
        *self.transform.borrow_mut() = Transform::IDENTITY;
    }
}

/// The background container whose color follows the selected preset
#[derive(Clone, Debug)]
pub struct Stage {
    owner: OwnerId,
    background: Rc<Cell<Color>>,
    attached: Rc<Cell<bool>>,
}

impl Stage {
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            background: Rc::new(Cell::new(Color::TRANSPARENT)),
            attached: Rc::new(Cell::new(true)),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn background(&self) -> Color {
        self.background.get()
    }

    pub fn set_background(&self, color: Color) {
        self.background.set(color);
    }

    /// Whether the platform view behind the stage still exists
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub fn detach(&self) {
        self.attached.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_animation::AnimationScheduler;

    #[test]
    fn test_handles_share_state() {
        let mut scheduler = AnimationScheduler::new();
        let node = VisualNode::new(scheduler.register_owner("actor"));
        let other = node.clone();

        other.set_property(AnimatedProperty::Scale, 1.15);
        other.set_property(AnimatedProperty::TranslationY, -50.0);
        assert_eq!(node.transform().scale, 1.15);
        assert!(!node.transform().is_identity());

        node.reset();
        assert!(other.transform().is_identity());
    }

    #[test]
    fn test_stage_starts_transparent_and_attached() {
        let mut scheduler = AnimationScheduler::new();
        let stage = Stage::new(scheduler.register_owner("stage"));
        assert_eq!(stage.background(), Color::TRANSPARENT);
        assert!(stage.is_attached());
        stage.clone().detach();
        assert!(!stage.is_attached());
    }
}
