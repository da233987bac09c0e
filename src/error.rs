use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Vader3Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no Vader 3 ({vendor:04X}:{product:04X}) found under {root}")]
    DeviceNotFound {
        vendor: u16,
        product: u16,
        root: PathBuf,
    },

    #[error("invalid report layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("failed to set up virtual gamepad: {0}")]
    Uinput(#[source] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("field {code:#06X} is {width} bits wide, must be 1..=32")]
    InvalidWidth { code: u16, width: u8 },

    #[error("mirror source {mirror:#06X} would be decoded after canonical {canonical:#06X}")]
    MirrorAfterCanonical { mirror: u16, canonical: u16 },
}

pub type Vader3Result<T> = Result<T, Vader3Error>;
