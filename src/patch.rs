//! Raw report fix-up, applied before any field decoding.

use crate::protocol::{PATCH_MIN_LEN, QUIRK_BIT, QUIRK_BYTE, QUIRK_FIXED_BIT};

/// Moves the rightmost back button from bit 2 to bit 6 of byte 11.
///
/// The other back buttons report as 8/16/32; with the hardware's 4 the button
/// is never picked up by consumer tools, 64 is. Reports of 11 bytes or fewer
/// are left alone.
pub fn patch_report(data: &mut [u8]) {
    if data.len() > PATCH_MIN_LEN && data[QUIRK_BYTE] & QUIRK_BIT != 0 {
        data[QUIRK_BYTE] |= QUIRK_FIXED_BIT;
        data[QUIRK_BYTE] &= !QUIRK_BIT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quirk_bit_moved() {
        let mut data = [0u8; 16];
        data[11] = 0b0000_0100;
        patch_report(&mut data);
        assert_eq!(data[11], 0b0100_0000);
        assert!(data.iter().enumerate().all(|(i, &b)| i == 11 || b == 0));
    }

    #[test]
    fn test_other_bits_kept() {
        let mut data = [0u8; 12];
        data[11] = 0b0001_1111;
        patch_report(&mut data);
        assert_eq!(data[11], 0b0101_1011);
    }

    #[test]
    fn test_no_quirk_is_noop() {
        let mut data = [0xAAu8; 12];
        data[11] = 0b1011_1011;
        let before = data;
        patch_report(&mut data);
        assert_eq!(data, before);
    }

    #[test]
    fn test_short_report_skipped() {
        let mut data = [0xFFu8; 11];
        patch_report(&mut data);
        assert_eq!(data, [0xFFu8; 11]);

        let mut empty: [u8; 0] = [];
        patch_report(&mut empty);
    }

    #[test]
    fn test_idempotent() {
        let mut data = [0u8; 20];
        data[11] = 0x04;
        patch_report(&mut data);
        let once = data;
        patch_report(&mut data);
        assert_eq!(data, once);
    }
}
