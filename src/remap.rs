//! Button remapping for the Vader 3.
//!
//! Paddle layout (Elite 2 naming):
//!   rightmost     -> R4 -> paddle 0
//!   middle right  -> R5 -> paddle 1 (also face Z)
//!   leftmost      -> L4 -> paddle 2
//!   middle left   -> L5 -> paddle 3 (also face C)
//!
//! Every report repeats the state of every button. C and Z share a paddle with
//! a back button, so their value is held in a [`MirrorCache`] slot until the
//! paired back button is seen and the two are OR-ed together.
//!
//! Ordering contract: inside one report the mirror source of a pairing must be
//! routed before its canonical source. [`crate::decoder::ReportLayout`] emits
//! buttons in table order (not sorted by code) and refuses layouts where a
//! mirror source would come after its canonical source.

use crate::event::{FieldEvent, NormalizedEvent};
use crate::protocol::{
    PASS_THROUGH_BUTTONS, SRC_BACK_LEFTMOST, SRC_BACK_MIDDLE_LEFT, SRC_BACK_MIDDLE_RIGHT,
    SRC_BACK_RIGHTMOST, SRC_CIRCLE, SRC_FACE_C, SRC_FACE_Z, SRC_HOME, paddle,
};
use evdev::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorSlot {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    PassThrough,
    /// Emit on `target`, value untouched.
    Rename { target: u16 },
    Suppress,
    /// Remember the value, emit nothing.
    MirrorSource { slot: MirrorSlot },
    /// Emit `slot | value` on `target`, then clear the slot.
    MirrorCanonical { slot: MirrorSlot, target: u16 },
}

/// A mirrored paddle: two physical buttons feeding one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorPairing {
    pub slot: MirrorSlot,
    pub mirror: u16,
    pub canonical: u16,
    pub target: u16,
}

pub const MIRROR_PAIRINGS: [MirrorPairing; 2] = [
    MirrorPairing {
        slot: MirrorSlot::Left,
        mirror: SRC_FACE_C,
        canonical: SRC_BACK_MIDDLE_LEFT,
        target: paddle(3),
    },
    MirrorPairing {
        slot: MirrorSlot::Right,
        mirror: SRC_FACE_Z,
        canonical: SRC_BACK_MIDDLE_RIGHT,
        target: paddle(1),
    },
];

/// Non pass-through entries of the classification table.
pub const BUTTON_TABLE: [(u16, ButtonAction); 8] = [
    // circle becomes the guide button; holding home powers the pad down
    (
        SRC_CIRCLE,
        ButtonAction::Rename {
            target: Key::BTN_MODE.0,
        },
    ),
    (SRC_HOME, ButtonAction::Suppress),
    (SRC_BACK_RIGHTMOST, ButtonAction::Rename { target: paddle(0) }),
    (SRC_BACK_LEFTMOST, ButtonAction::Rename { target: paddle(2) }),
    (
        SRC_FACE_C,
        ButtonAction::MirrorSource {
            slot: MirrorSlot::Left,
        },
    ),
    (
        SRC_BACK_MIDDLE_LEFT,
        ButtonAction::MirrorCanonical {
            slot: MirrorSlot::Left,
            target: paddle(3),
        },
    ),
    (
        SRC_FACE_Z,
        ButtonAction::MirrorSource {
            slot: MirrorSlot::Right,
        },
    ),
    (
        SRC_BACK_MIDDLE_RIGHT,
        ButtonAction::MirrorCanonical {
            slot: MirrorSlot::Right,
            target: paddle(1),
        },
    ),
];

/// Classifies a source button code. `None` means the code is dropped.
pub fn classify(code: u16) -> Option<ButtonAction> {
    if PASS_THROUGH_BUTTONS.contains(&code) {
        return Some(ButtonAction::PassThrough);
    }
    BUTTON_TABLE
        .iter()
        .find(|(src, _)| *src == code)
        .map(|(_, action)| *action)
}

/// Pending mirror-source values, one slot per pairing. 0 means empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorCache {
    left: i32,
    right: i32,
}

impl MirrorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: MirrorSlot) -> i32 {
        match slot {
            MirrorSlot::Left => self.left,
            MirrorSlot::Right => self.right,
        }
    }

    pub fn is_empty(&self, slot: MirrorSlot) -> bool {
        self.get(slot) == 0
    }

    fn store(&mut self, slot: MirrorSlot, value: i32) {
        match slot {
            MirrorSlot::Left => self.left = value,
            MirrorSlot::Right => self.right = value,
        }
    }

    /// Read-and-clear.
    fn take(&mut self, slot: MirrorSlot) -> i32 {
        let value = self.get(slot);
        self.store(slot, 0);
        value
    }
}

/// Translates one decoded button event. Returns at most one event.
pub fn remap_button(cache: &mut MirrorCache, field: FieldEvent) -> Option<NormalizedEvent> {
    match classify(field.code)? {
        ButtonAction::PassThrough => Some(NormalizedEvent::button(field.code, field.value)),
        ButtonAction::Rename { target } => Some(NormalizedEvent::button(target, field.value)),
        ButtonAction::Suppress => None,
        ButtonAction::MirrorSource { slot } => {
            cache.store(slot, field.value);
            None
        }
        ButtonAction::MirrorCanonical { slot, target } => {
            let pending = cache.take(slot);
            let pressed = pending != 0 || field.value != 0;
            Some(NormalizedEvent::button(target, i32::from(pressed)))
        }
    }
}
