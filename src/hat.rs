//! Directional pad decoding.
//!
//! The Vader 3 delivers the whole d-pad through a single field (hid-generic
//! decodes it as `ABS_HAT0X`) holding an 8-direction code, clockwise from up.
//! The host expects two independent axes in {-1, 0, 1}.

use crate::event::NormalizedEvent;
use evdev::AbsoluteAxisType;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HatDirection {
    #[default]
    Centered,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl HatDirection {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(HatDirection::Centered),
            1 => Some(HatDirection::Up),
            2 => Some(HatDirection::UpRight),
            3 => Some(HatDirection::Right),
            4 => Some(HatDirection::DownRight),
            5 => Some(HatDirection::Down),
            6 => Some(HatDirection::DownLeft),
            7 => Some(HatDirection::Left),
            8 => Some(HatDirection::UpLeft),
            _ => None,
        }
    }

    /// (horizontal, vertical); up and left are negative.
    pub fn axes(self) -> (i32, i32) {
        match self {
            HatDirection::Centered => (0, 0),
            HatDirection::Up => (0, -1),
            HatDirection::UpRight => (1, -1),
            HatDirection::Right => (1, 0),
            HatDirection::DownRight => (1, 1),
            HatDirection::Down => (0, 1),
            HatDirection::DownLeft => (-1, 1),
            HatDirection::Left => (-1, 0),
            HatDirection::UpLeft => (-1, -1),
        }
    }
}

/// A combined hat value outside 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown d-pad direction: {value}")]
pub struct HatFault {
    pub value: i32,
}

/// Expands one combined hat code into `ABS_HAT0X` and `ABS_HAT0Y`.
///
/// Both axes are always written for a valid code, so moving from a diagonal to
/// a cardinal direction re-centers the other axis. The pair belongs to the
/// same report and must be flushed together by the caller.
pub fn decode_hat(value: i32) -> Result<[NormalizedEvent; 2], HatFault> {
    let direction = HatDirection::from_code(value).ok_or(HatFault { value })?;
    let (x, y) = direction.axes();
    Ok([
        NormalizedEvent::absolute(AbsoluteAxisType::ABS_HAT0X.0, x),
        NormalizedEvent::absolute(AbsoluteAxisType::ABS_HAT0Y.0, y),
    ])
}
