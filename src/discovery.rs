//! Locating the pad through sysfs and hiding its stock evdev nodes.

use crate::error::{Vader3Error, Vader3Result};
use crate::logger::{Verbosity, log_detail};
use crate::protocol::{DEV_VADER3, HID_BUS_BLUETOOTH, VENDOR_FLYDIGI};
use evdev::Device;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vader3Node {
    pub hidraw: PathBuf,
    /// evdev nodes hid-generic created for the same device.
    pub event_nodes: Vec<PathBuf>,
}

/// Parses `HID_ID=0005:0000D7D7:00000041` into (bus, vendor, product).
pub fn parse_hid_id(uevent: &str) -> Option<(u16, u16, u16)> {
    let id = uevent.lines().find_map(|line| line.strip_prefix("HID_ID="))?;
    let mut parts = id.trim().split(':');
    let mut field = || -> Option<u16> {
        let raw = u32::from_str_radix(parts.next()?, 16).ok()?;
        u16::try_from(raw).ok()
    };
    let bus = field()?;
    let vendor = field()?;
    let product = field()?;
    Some((bus, vendor, product))
}

fn is_vader3(uevent: &str) -> bool {
    parse_hid_id(uevent) == Some((HID_BUS_BLUETOOTH, VENDOR_FLYDIGI, DEV_VADER3))
}

fn event_nodes(hid_device: &Path, dev_root: &Path) -> Vec<PathBuf> {
    let Ok(inputs) = fs::read_dir(hid_device.join("input")) else {
        return Vec::new();
    };

    let mut nodes = Vec::new();
    for input in inputs.flatten() {
        let Ok(children) = fs::read_dir(input.path()) else {
            continue;
        };
        for child in children.flatten() {
            let name = child.file_name();
            if name.to_string_lossy().starts_with("event") {
                nodes.push(dev_root.join("input").join(name));
            }
        }
    }
    nodes.sort();
    nodes
}

/// Finds the first Bluetooth Vader 3 under `sysfs_root/class/hidraw`.
pub fn find_device(sysfs_root: &Path, dev_root: &Path) -> Vader3Result<Vader3Node> {
    let class = sysfs_root.join("class").join("hidraw");
    let mut entries: Vec<_> = fs::read_dir(&class)?.flatten().map(|e| e.path()).collect();
    entries.sort();

    for entry in entries {
        let device = entry.join("device");
        let Ok(uevent) = fs::read_to_string(device.join("uevent")) else {
            continue;
        };
        if !is_vader3(&uevent) {
            continue;
        }

        let Some(name) = entry.file_name() else {
            continue;
        };
        let node = Vader3Node {
            hidraw: dev_root.join(name),
            event_nodes: event_nodes(&device, dev_root),
        };
        log_detail(Verbosity::Low, "Vader 3 encontrado", &format!("{}", node.hidraw.display()));
        return Ok(node);
    }

    Err(Vader3Error::DeviceNotFound {
        vendor: VENDOR_FLYDIGI,
        product: DEV_VADER3,
        root: class,
    })
}

/// Holds an exclusive grab on the pad's stock evdev nodes for the lifetime of
/// the session, so only the virtual gamepad is seen. Dropping it releases them.
pub struct GrabGuard {
    devices: Vec<Device>,
}

impl GrabGuard {
    pub fn grab(nodes: &[PathBuf]) -> Self {
        let mut devices = Vec::new();
        for path in nodes {
            let grabbed = Device::open(path).and_then(|mut dev| {
                dev.grab()?;
                Ok(dev)
            });
            match grabbed {
                Ok(dev) => {
                    let detail = format!("{}", path.display());
                    log_detail(Verbosity::Medium, "Nodo evdev capturado", &detail);
                    devices.push(dev);
                }
                Err(e) => {
                    let detail = format!("{}: {}", path.display(), e);
                    log_detail(Verbosity::Low, "No se pudo capturar", &detail);
                }
            }
        }
        Self { devices }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl Drop for GrabGuard {
    fn drop(&mut self) {
        for dev in &mut self.devices {
            let _ = dev.ungrab();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VADER3_UEVENT: &str = "HID_ID=0005:0000D7D7:00000041\nHID_NAME=Flydigi VADER3\n";

    fn fake_sysfs(tag: &str, uevent: &str) -> PathBuf {
        let dir = format!("vader3-sysfs-{}-{}", tag, std::process::id());
        let root = std::env::temp_dir().join(dir);
        let _ = fs::remove_dir_all(&root);
        let device = root.join("class/hidraw/hidraw3/device");
        fs::create_dir_all(device.join("input/input17/event21")).unwrap();
        fs::write(device.join("uevent"), uevent).unwrap();
        root
    }

    #[test]
    fn test_parse_hid_id() {
        assert_eq!(parse_hid_id(VADER3_UEVENT), Some((0x0005, 0xD7D7, 0x0041)));
        assert_eq!(parse_hid_id("HID_NAME=foo\n"), None);
        assert_eq!(parse_hid_id("HID_ID=zz:1:2\n"), None);
    }

    #[test]
    fn test_wide_ids_not_truncated() {
        assert_eq!(parse_hid_id("HID_ID=0005:0001D7D7:00000041\n"), None);
        assert!(!is_vader3("HID_ID=0005:0001D7D7:00000041\n"));
        assert!(!is_vader3("HID_ID=0005:0000D7D7:00010041\n"));
    }

    #[test]
    fn test_usb_vader3_ignored() {
        assert!(!is_vader3("HID_ID=0003:0000D7D7:00000041\n"));
        assert!(is_vader3(VADER3_UEVENT));
    }

    #[test]
    fn test_find_device() {
        let root = fake_sysfs("found", VADER3_UEVENT);
        let node = find_device(&root, Path::new("/dev")).unwrap();
        assert_eq!(node.hidraw, PathBuf::from("/dev/hidraw3"));
        assert_eq!(node.event_nodes, vec![PathBuf::from("/dev/input/event21")]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_find_device_missing() {
        let root = fake_sysfs("missing", "HID_ID=0005:0000045E:00000B13\n");
        assert!(matches!(
            find_device(&root, Path::new("/dev")),
            Err(Vader3Error::DeviceNotFound { .. })
        ));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_grab_missing_node_is_skipped() {
        let guard = GrabGuard::grab(&[PathBuf::from("/nonexistent/event99")]);
        assert!(guard.is_empty());
    }
}
