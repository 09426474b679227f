//! Volume normalization and the integer gain stage.
//!
//! The host reports volume without declaring its scale: common stacks send
//! percent (0–100), AVRCP-style absolute (0–127), or byte (0–255) values.
//! `normalize_reported` applies the range heuristic carried over from the
//! firmware this bridge replaces. Values in (100, 127] are inherently
//! ambiguous (an absolute 0–127 level or an out-of-range percent); they are
//! forwarded as-is on the 0–127 scale and treated as full volume locally.

/// A reported volume resolved into the two scales the bridge needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VolumeUpdate {
    /// Canonical 0–100 level used by the local gain stage.
    pub percent: u8,
    /// 0–127 level forwarded to the wireless sink's volume indicator.
    pub absolute: u8,
}

/// Resolve a raw reported volume into canonical percent + 0–127 absolute.
///
/// - `raw <= 100`: percent, used for both scales.
/// - `100 < raw <= 127`: already 0–127; forwarded unchanged, full volume
///   locally.
/// - `raw > 127`: 0–255 scale, clamped to 255 and mapped down by
///   `raw * 127 / 255` (floor).
pub fn normalize_reported(raw: u32) -> VolumeUpdate {
    let percent = raw.min(100) as u8;
    let absolute = if raw <= 127 {
        raw as u8
    } else {
        (raw.min(255) * 127 / 255) as u8
    };
    VolumeUpdate { percent, absolute }
}

/// Scale 16-bit little-endian interleaved samples in place by `percent`.
///
/// Rounded integer scaling with saturation to the i16 range; 100 is a strict
/// pass-through (bit-identical, and no per-sample work on the hot path).
/// An odd trailing byte is left untouched; deliveries are frame-aligned in
/// practice and a half sample cannot be scaled meaningfully.
pub fn apply_gain(pcm: &mut [u8], percent: u8) {
    if percent >= 100 {
        return;
    }
    if percent == 0 {
        pcm.fill(0);
        return;
    }
    let vol = percent as i32;
    for pair in pcm.chunks_exact_mut(2) {
        let sample = i16::from_le_bytes([pair[0], pair[1]]) as i32;
        let scaled = round_div_100(sample * vol).clamp(i16::MIN as i32, i16::MAX as i32);
        pair.copy_from_slice(&(scaled as i16).to_le_bytes());
    }
}

/// Divide by 100 rounding half away from zero.
fn round_div_100(value: i32) -> i32 {
    if value >= 0 {
        (value + 50) / 100
    } else {
        (value - 50) / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale_one(sample: i16, percent: u8) -> i16 {
        let mut bytes = sample.to_le_bytes().to_vec();
        apply_gain(&mut bytes, percent);
        i16::from_le_bytes([bytes[0], bytes[1]])
    }

    #[test]
    fn percent_values_pass_through() {
        assert_eq!(normalize_reported(0), VolumeUpdate { percent: 0, absolute: 0 });
        assert_eq!(normalize_reported(50), VolumeUpdate { percent: 50, absolute: 50 });
        assert_eq!(normalize_reported(64), VolumeUpdate { percent: 64, absolute: 64 });
        assert_eq!(normalize_reported(100), VolumeUpdate { percent: 100, absolute: 100 });
    }

    #[test]
    fn absolute_range_forwards_unchanged() {
        // (100, 127] is ambiguous; the heuristic keeps the raw value for the
        // sink and saturates the local percent.
        assert_eq!(normalize_reported(110), VolumeUpdate { percent: 100, absolute: 110 });
        assert_eq!(normalize_reported(127), VolumeUpdate { percent: 100, absolute: 127 });
    }

    #[test]
    fn byte_range_maps_down_to_absolute() {
        assert_eq!(normalize_reported(200).absolute, (200u32 * 127 / 255) as u8);
        assert_eq!(normalize_reported(200).absolute, 99);
        assert_eq!(normalize_reported(255).absolute, 127);
        assert_eq!(normalize_reported(1000).absolute, 127);
        assert_eq!(normalize_reported(255).percent, 100);
    }

    #[test]
    fn gain_at_100_is_bit_identical() {
        let original: Vec<u8> = vec![0x12, 0x80, 0xFF, 0x7F, 0x00, 0x80, 0x01, 0x00];
        let mut scaled = original.clone();
        apply_gain(&mut scaled, 100);
        assert_eq!(scaled, original);
    }

    #[test]
    fn gain_at_0_silences() {
        let mut pcm = vec![0x34, 0x12, 0xCD, 0xAB];
        apply_gain(&mut pcm, 0);
        assert_eq!(pcm, vec![0, 0, 0, 0]);
    }

    #[test]
    fn gain_rounds_and_scales() {
        // 1000 * 50 / 100 = 500 exactly; 999 * 50 = 49950 -> 499.5 rounds to 500.
        assert_eq!(scale_one(1000, 50), 500);
        assert_eq!(scale_one(999, 50), 500);
        assert_eq!(scale_one(-1000, 50), -500);
        assert_eq!(scale_one(-999, 50), -500);
        assert_eq!(scale_one(100, 1), 1);
    }

    #[test]
    fn gain_saturates_extremes() {
        assert_eq!(scale_one(i16::MIN, 99), -32440);
        assert_eq!(scale_one(i16::MAX, 99), 32439);
        // Saturation guard: even a hand-crafted overflow candidate stays in range.
        let v = scale_one(i16::MIN, 99);
        assert!(v >= i16::MIN);
    }

    #[test]
    fn gain_magnitude_is_monotonic_in_volume() {
        for &sample in &[i16::MAX, 12345, 1, -1, -20000, i16::MIN] {
            let mut prev = 0i32;
            for vol in 1..=100u8 {
                let mag = (scale_one(sample, vol) as i32).abs();
                assert!(
                    mag >= prev,
                    "magnitude decreased at vol {vol} for sample {sample}"
                );
                prev = mag;
            }
        }
    }

    #[test]
    fn odd_trailing_byte_is_left_alone() {
        let mut pcm = vec![0xE8, 0x03, 0x55];
        apply_gain(&mut pcm, 50);
        assert_eq!(pcm[2], 0x55);
    }
}
