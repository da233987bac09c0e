use evdev::{EventType, InputEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Absolute,
    Button,
}

impl EventKind {
    pub fn event_type(self) -> EventType {
        match self {
            EventKind::Absolute => EventType::ABSOLUTE,
            EventKind::Button => EventType::KEY,
        }
    }
}

/// One decoded field of a report, in the device's own code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEvent {
    pub kind: EventKind,
    pub code: u16,
    pub value: i32,
}

impl FieldEvent {
    pub fn button(code: u16, value: i32) -> Self {
        Self {
            kind: EventKind::Button,
            code,
            value,
        }
    }

    pub fn absolute(code: u16, value: i32) -> Self {
        Self {
            kind: EventKind::Absolute,
            code,
            value,
        }
    }
}

/// An event in the standard gamepad code space, ready for the virtual device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub kind: EventKind,
    pub code: u16,
    pub value: i32,
}

impl NormalizedEvent {
    pub fn button(code: u16, value: i32) -> Self {
        Self {
            kind: EventKind::Button,
            code,
            value,
        }
    }

    pub fn absolute(code: u16, value: i32) -> Self {
        Self {
            kind: EventKind::Absolute,
            code,
            value,
        }
    }
}

impl From<NormalizedEvent> for InputEvent {
    fn from(ev: NormalizedEvent) -> Self {
        InputEvent::new(ev.kind.event_type(), ev.code, ev.value)
    }
}
