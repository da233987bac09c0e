use crate::error::{Vader3Error, Vader3Result};
use crate::protocol::{
    HAT_MAX, HAT_MIN, PADDLE_COUNT, PASS_THROUGH_BUTTONS, SPOOF_PRODUCT, SPOOF_VENDOR,
    SPOOF_VERSION, STICK_AXES, STICK_FLAT, STICK_FUZZ, STICK_MAX, STICK_MIN, TRIGGER_HAPPY_BLOCK,
    VIRTUAL_DEVICE_NAME, paddle,
};
use evdev::{
    AbsInfo, AbsoluteAxisType, AttributeSet, BusType, InputId, Key, UinputAbsSetup,
    uinput::{VirtualDevice, VirtualDeviceBuilder},
};

/// Every key code the virtual pad declares.
pub fn gamepad_keys() -> AttributeSet<Key> {
    let mut keys = AttributeSet::<Key>::new();
    for code in PASS_THROUGH_BUTTONS {
        keys.insert(Key::new(code));
    }
    keys.insert(Key::BTN_MODE);

    for i in 0..PADDLE_COUNT {
        keys.insert(Key::new(paddle(i)));
    }

    // Whole BTN_TRIGGER_HAPPY block, otherwise Steam won't remap the paddles
    for i in 0..TRIGGER_HAPPY_BLOCK {
        keys.insert(Key::new(Key::BTN_TRIGGER_HAPPY1.0 + i));
    }
    keys
}

/// (axis, info) pairs for the sticks and the split d-pad.
pub fn gamepad_axes() -> Vec<(AbsoluteAxisType, AbsInfo)> {
    let mut axes: Vec<(AbsoluteAxisType, AbsInfo)> = STICK_AXES
        .iter()
        .map(|&axis| (axis, AbsInfo::new(0, STICK_MIN, STICK_MAX, STICK_FUZZ, STICK_FLAT, 0)))
        .collect();
    axes.push((AbsoluteAxisType::ABS_HAT0X, AbsInfo::new(0, HAT_MIN, HAT_MAX, 0, 0, 0)));
    axes.push((AbsoluteAxisType::ABS_HAT0Y, AbsInfo::new(0, HAT_MIN, HAT_MAX, 0, 0, 0)));
    axes
}

/// Identity the host sees: an Xbox Elite 2 over Bluetooth, so existing
/// profiles (Steam, SDL) pick up the paddles.
pub fn spoofed_identity() -> InputId {
    InputId::new(BusType::BUS_BLUETOOTH, SPOOF_VENDOR, SPOOF_PRODUCT, SPOOF_VERSION)
}

pub fn create_virtual_gamepad() -> Vader3Result<VirtualDevice> {
    build_virtual_gamepad().map_err(Vader3Error::Uinput)
}

fn build_virtual_gamepad() -> std::io::Result<VirtualDevice> {
    let keys = gamepad_keys();

    let mut builder = VirtualDeviceBuilder::new()?
        .name(VIRTUAL_DEVICE_NAME)
        .input_id(spoofed_identity())
        .with_keys(&keys)?;

    for (axis, info) in gamepad_axes() {
        let setup = UinputAbsSetup::new(axis, info);
        builder = builder.with_absolute_axis(&setup)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_cover_outputs() {
        let keys = gamepad_keys();
        for code in PASS_THROUGH_BUTTONS {
            assert!(keys.contains(Key::new(code)));
        }
        assert!(keys.contains(Key::BTN_MODE));
        assert!(keys.contains(Key::BTN_TRIGGER_HAPPY5));
        assert!(keys.contains(Key::BTN_TRIGGER_HAPPY8));
        assert!(keys.contains(Key::BTN_TRIGGER_HAPPY16));
        assert!(!keys.contains(Key::BTN_TRIGGER_HAPPY17));
        // 12 pass-through + mode + 16 trigger-happy (paddles included)
        assert_eq!(keys.iter().count(), 29);
    }

    #[test]
    fn test_axes() {
        let axes = gamepad_axes();
        assert_eq!(axes.len(), 6);
        let (axis, info) = axes[0];
        assert_eq!(axis, AbsoluteAxisType::ABS_X);
        assert_eq!(info.minimum(), -128);
        assert_eq!(info.maximum(), 127);
        assert_eq!(info.fuzz(), 32);
        assert_eq!(info.flat(), 25);
        assert!(axes.iter().any(|(a, _)| *a == AbsoluteAxisType::ABS_HAT0Y));
    }

    #[test]
    fn test_identity() {
        let id = spoofed_identity();
        assert_eq!(id.vendor(), 0x045E);
        assert_eq!(id.product(), 0x0B05);
        assert_eq!(id.version(), 0x0903);
        assert_eq!(id.bus_type(), BusType::BUS_BLUETOOTH);
    }
}
