//! Table-driven field decoder for the (patched) input report.
//!
//! This plays the part of the kernel's generic HID decoder: every field of the
//! report becomes a [`FieldEvent`] carrying the code hid-generic would assign
//! to it. Axes come first, then buttons in table (report) order, not sorted by
//! code. The mirror merge in [`crate::remap`] needs each mirror source ahead of
//! its canonical source; [`ReportLayout::new`] checks it.

use crate::error::LayoutError;
use crate::event::{EventKind, FieldEvent};
use crate::protocol::{
    HAT_COMBINED, SRC_BACK_LEFTMOST, SRC_BACK_MIDDLE_LEFT, SRC_BACK_MIDDLE_RIGHT,
    SRC_BACK_RIGHTMOST, SRC_CIRCLE, SRC_FACE_C, SRC_FACE_Z, SRC_HOME,
};
use crate::remap::MIRROR_PAIRINGS;
use evdev::{AbsoluteAxisType, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub byte: usize,
    /// Bit offset inside `byte`, LSB first.
    pub bit: u8,
    pub width: u8,
    pub signed: bool,
    pub kind: EventKind,
    pub code: u16,
}

impl FieldSpec {
    pub const fn button(byte: usize, bit: u8, code: u16) -> Self {
        Self {
            byte,
            bit,
            width: 1,
            signed: false,
            kind: EventKind::Button,
            code,
        }
    }

    pub const fn axis(byte: usize, code: u16) -> Self {
        Self {
            byte,
            bit: 0,
            width: 8,
            signed: true,
            kind: EventKind::Absolute,
            code,
        }
    }

    pub const fn hat(byte: usize, code: u16) -> Self {
        Self {
            byte,
            bit: 0,
            width: 4,
            signed: false,
            kind: EventKind::Absolute,
            code,
        }
    }

    fn end_bit(&self) -> usize {
        self.byte * 8 + self.bit as usize + self.width as usize
    }

    /// Reads the field, or `None` if it runs past the end of `data`.
    pub fn read(&self, data: &[u8]) -> Option<i32> {
        if self.end_bit().div_ceil(8) > data.len() {
            return None;
        }

        let start = self.byte * 8 + self.bit as usize;
        let mut raw: u32 = 0;
        for i in 0..self.width as usize {
            let pos = start + i;
            if data[pos / 8] & (1 << (pos % 8)) != 0 {
                raw |= 1 << i;
            }
        }

        if self.signed && self.width < 32 && raw & (1 << (self.width - 1)) != 0 {
            raw |= u32::MAX << self.width;
        }
        Some(raw as i32)
    }
}

/// Bluetooth input report of the Vader 3. Byte 0 is the report id.
pub const VADER3_FIELDS: &[FieldSpec] = &[
    FieldSpec::axis(1, AbsoluteAxisType::ABS_X.0),
    FieldSpec::axis(2, AbsoluteAxisType::ABS_Y.0),
    FieldSpec::axis(3, AbsoluteAxisType::ABS_Z.0),
    FieldSpec::axis(4, AbsoluteAxisType::ABS_RZ.0),
    FieldSpec::hat(5, HAT_COMBINED),
    FieldSpec::button(8, 0, Key::BTN_SOUTH.0),
    FieldSpec::button(8, 1, Key::BTN_EAST.0),
    FieldSpec::button(8, 2, Key::BTN_NORTH.0),
    FieldSpec::button(8, 3, Key::BTN_WEST.0),
    FieldSpec::button(8, 4, Key::BTN_TL.0),
    FieldSpec::button(8, 5, Key::BTN_TR.0),
    FieldSpec::button(8, 6, Key::BTN_TL2.0),
    FieldSpec::button(8, 7, Key::BTN_TR2.0),
    FieldSpec::button(9, 0, Key::BTN_SELECT.0),
    FieldSpec::button(9, 1, Key::BTN_START.0),
    FieldSpec::button(9, 2, Key::BTN_THUMBL.0),
    FieldSpec::button(9, 3, Key::BTN_THUMBR.0),
    FieldSpec::button(9, 4, SRC_CIRCLE),
    FieldSpec::button(9, 5, SRC_HOME),
    FieldSpec::button(11, 0, SRC_FACE_C),
    FieldSpec::button(11, 1, SRC_FACE_Z),
    // 11.2 is the quirked rightmost paddle, moved to 11.6 before decoding
    FieldSpec::button(11, 3, SRC_BACK_LEFTMOST),
    FieldSpec::button(11, 4, SRC_BACK_MIDDLE_LEFT),
    FieldSpec::button(11, 5, SRC_BACK_MIDDLE_RIGHT),
    FieldSpec::button(11, 6, SRC_BACK_RIGHTMOST),
];

#[derive(Debug, Clone)]
pub struct ReportLayout {
    axes: Vec<FieldSpec>,
    buttons: Vec<FieldSpec>,
}

impl ReportLayout {
    pub fn new(fields: &[FieldSpec]) -> Result<Self, LayoutError> {
        if let Some(bad) = fields.iter().find(|f| f.width == 0 || f.width > 32) {
            return Err(LayoutError::InvalidWidth {
                code: bad.code,
                width: bad.width,
            });
        }

        let axes: Vec<FieldSpec> = fields
            .iter()
            .filter(|f| f.kind == EventKind::Absolute)
            .copied()
            .collect();
        let buttons: Vec<FieldSpec> = fields
            .iter()
            .filter(|f| f.kind == EventKind::Button)
            .copied()
            .collect();

        let layout = Self { axes, buttons };
        layout.check_mirror_order()?;
        Ok(layout)
    }

    pub fn vader3() -> Result<Self, LayoutError> {
        Self::new(VADER3_FIELDS)
    }

    fn position(&self, code: u16) -> Option<usize> {
        self.buttons.iter().position(|f| f.code == code)
    }

    fn check_mirror_order(&self) -> Result<(), LayoutError> {
        for pairing in MIRROR_PAIRINGS {
            let mirror = self.position(pairing.mirror);
            let canonical = self.position(pairing.canonical);
            if matches!((mirror, canonical), (Some(m), Some(c)) if m > c) {
                return Err(LayoutError::MirrorAfterCanonical {
                    mirror: pairing.mirror,
                    canonical: pairing.canonical,
                });
            }
        }
        Ok(())
    }

    /// Decodes every field that fits in `data`: axes first, then buttons in
    /// table order.
    pub fn decode(&self, data: &[u8]) -> Vec<FieldEvent> {
        self.axes
            .iter()
            .chain(self.buttons.iter())
            .filter_map(|spec| {
                spec.read(data).map(|value| FieldEvent {
                    kind: spec.kind,
                    code: spec.code,
                    value,
                })
            })
            .collect()
    }
}
