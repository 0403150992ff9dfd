use crate::command::Direction;
use crate::config::CarouselSettings;
use crate::markup::CarouselParts;
use crate::timers::TimerId;
use html::Id;

/// Stable handle for one attached carousel, assigned by its controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

/// Whether an instance currently has an auto-rotate timer armed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Idle,
    Rotating,
}

#[derive(Clone, Debug)]
pub struct CarouselState {
    pub(crate) id: InstanceId,
    pub(crate) position: usize,
    pub(crate) settings: CarouselSettings,
    pub(crate) timer: Option<TimerId>,
    pub(crate) parts: CarouselParts,
}

impl CarouselState {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn container(&self) -> Id {
        self.parts.container
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn item_count(&self) -> usize {
        self.parts.items.len()
    }

    pub fn auto_rotate_speed(&self) -> u64 {
        self.settings.auto_rotate_speed
    }

    pub fn height(&self) -> f32 {
        self.settings.height
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn parts(&self) -> &CarouselParts {
        &self.parts
    }

    pub fn rotation(&self) -> Rotation {
        if self.timer.is_some() {
            Rotation::Rotating
        } else {
            Rotation::Idle
        }
    }

    /// Position one step away, wrapping at both ends.
    /// With no items the position stays at 0.
    pub fn step(&self, direction: Direction) -> usize {
        let count = self.item_count();
        if count == 0 {
            return 0;
        }
        match direction {
            Direction::Forward => (self.position + 1) % count,
            Direction::Backward => (self.position + count - 1) % count,
        }
    }
}
