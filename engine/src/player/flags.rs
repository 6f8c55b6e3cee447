//! Movement Flags
//!
//! The published movement state of one actor. Collaborators (camera bob,
//! weapon sway, HUD) read these through accessors; only the movement
//! controller writes them.
//!
//! Sliding, mantling and grappling are not independent booleans. They are
//! the variants of [`Traversal`], so at most one of them can be active.

/// The exclusive traversal mode of the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Ordinary walking, sprinting, crouching or falling
    #[default]
    Free,
    /// Crouch-slide after a sprint
    Sliding,
    /// Scripted ledge climb
    Mantling,
    /// Pulled toward a grapple anchor
    Grappling,
}

/// Movement state published once per physics step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementFlags {
    pub(crate) grounded: bool,
    pub(crate) sprinting: bool,
    pub(crate) crouching: bool,
    pub(crate) slope_sliding: bool,
    pub(crate) slide_jumping: bool,
    pub(crate) applying_gravity: bool,
    pub(crate) traversal: Traversal,
}

impl MovementFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ground probe found at least two contacts.
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn sprinting(&self) -> bool {
        self.sprinting
    }

    /// Fully crouched. Stays set while standing back up until the collider
    /// reaches full height.
    pub fn crouching(&self) -> bool {
        self.crouching
    }

    pub fn sliding(&self) -> bool {
        self.traversal == Traversal::Sliding
    }

    pub fn mantling(&self) -> bool {
        self.traversal == Traversal::Mantling
    }

    pub fn grappling(&self) -> bool {
        self.traversal == Traversal::Grappling
    }

    /// Sliding down a slope inside the configured angle range.
    pub fn slope_sliding(&self) -> bool {
        self.slope_sliding
    }

    /// Airborne out of a slide jump; cleared on the next ground contact.
    pub fn slide_jumping(&self) -> bool {
        self.slide_jumping
    }

    /// Custom gravity was applied this step.
    pub fn applying_gravity(&self) -> bool {
        self.applying_gravity
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Mantle and grapple replace the integrated velocity outright.
    pub fn velocity_overridden(&self) -> bool {
        matches!(self.traversal, Traversal::Mantling | Traversal::Grappling)
    }
}
