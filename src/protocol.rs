// Constantes del Vader 3 (Bluetooth) y del gamepad que presentamos al host.
use evdev::{AbsoluteAxisType, Key};

pub const VENDOR_FLYDIGI: u16 = 0xD7D7;
pub const DEV_VADER3: u16 = 0x0041;
/// `BUS_BLUETOOTH` as printed in the `HID_ID` line of a hidraw uevent.
pub const HID_BUS_BLUETOOTH: u16 = 0x0005;

// Identidad Xbox Elite 2 que reporta el dispositivo virtual
pub const SPOOF_VENDOR: u16 = 0x045E;
pub const SPOOF_PRODUCT: u16 = 0x0B05;
pub const SPOOF_VERSION: u16 = 0x0903;
pub const VIRTUAL_DEVICE_NAME: &str = "Xbox Wireless Controller (Vader 3)";

// ----- RAW REPORT -----
/// Reports must be strictly longer than this to carry the quirked byte.
pub const PATCH_MIN_LEN: usize = 11;
pub const QUIRK_BYTE: usize = 11;
/// Rightmost back button as sent by the hardware.
pub const QUIRK_BIT: u8 = 1 << 2;
/// Bit the decoder already recognises for the same button.
pub const QUIRK_FIXED_BIT: u8 = 1 << 6;

pub const MAX_REPORT_LEN: usize = 64;

// ----- CODIGOS DE ENTRADA (como los decodifica hid-generic) -----
pub const HAT_COMBINED: u16 = AbsoluteAxisType::ABS_HAT0X.0;

pub const SRC_CIRCLE: u16 = Key::KEY_CAMERA.0;
pub const SRC_HOME: u16 = 0x18E;
pub const SRC_FACE_C: u16 = Key::BTN_0.0;
pub const SRC_FACE_Z: u16 = Key::KEY_ENTER.0;
pub const SRC_BACK_LEFTMOST: u16 = 0x192;
pub const SRC_BACK_MIDDLE_LEFT: u16 = 0x179;
pub const SRC_BACK_MIDDLE_RIGHT: u16 = 0x193;
pub const SRC_BACK_RIGHTMOST: u16 = 0x16A;

// ----- CODIGOS DE SALIDA -----
/// Elite 2 paddles start at `BTN_TRIGGER_HAPPY5`.
pub const fn paddle(index: u16) -> u16 {
    Key::BTN_TRIGGER_HAPPY5.0 + index
}

pub const PADDLE_COUNT: u16 = 4;
/// Steam only allows remapping the paddles when the whole block is declared.
pub const TRIGGER_HAPPY_BLOCK: u16 = 16;

/// Buttons forwarded with their code untouched.
pub const PASS_THROUGH_BUTTONS: [u16; 12] = [
    Key::BTN_SOUTH.0,  // A
    Key::BTN_EAST.0,   // B
    Key::BTN_NORTH.0,  // X
    Key::BTN_WEST.0,   // Y
    Key::BTN_TL.0,     // LB
    Key::BTN_TR.0,     // RB
    Key::BTN_TL2.0,    // LT (digital)
    Key::BTN_TR2.0,    // RT (digital)
    Key::BTN_SELECT.0, // Back
    Key::BTN_START.0,  // Start
    Key::BTN_THUMBL.0, // L3
    Key::BTN_THUMBR.0, // R3
];

// ----- EJES -----
pub const STICK_AXES: [AbsoluteAxisType; 4] = [
    AbsoluteAxisType::ABS_X,
    AbsoluteAxisType::ABS_Y,
    AbsoluteAxisType::ABS_Z,
    AbsoluteAxisType::ABS_RZ,
];

pub const STICK_MIN: i32 = -128;
pub const STICK_MAX: i32 = 127;
pub const STICK_FUZZ: i32 = 32;
pub const STICK_FLAT: i32 = 25;

pub const HAT_MIN: i32 = -1;
pub const HAT_MAX: i32 = 1;
