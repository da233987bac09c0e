//! Userspace normalizer for the Flydigi Vader 3 over Bluetooth.
//!
//! Raw reports read from hidraw are patched, decoded into fields and
//! translated into a standard Elite 2 style gamepad on a uinput device.

pub mod decoder;
pub mod discovery;
pub mod error;
pub mod event;
pub mod gamepad_device;
pub mod hat;
pub mod hidraw;
pub mod logger;
pub mod patch;
pub mod protocol;
pub mod remap;
pub mod session;

pub use error::{LayoutError, Vader3Error, Vader3Result};
pub use event::{EventKind, FieldEvent, NormalizedEvent};
pub use session::{EventSink, ReportOutcome, Session};
