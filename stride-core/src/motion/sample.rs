//! Raw and converted acceleration samples

/// Number of output register bytes holding one X/Y/Z sample
pub const SAMPLE_BYTES: usize = 6;

/// Sample in sensor counts
///
/// Each axis arrives as a big-endian 16-bit word holding a 14-bit value
/// left-justified; the two low bits are padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawSample {
    /// Unpack the six output registers (X MSB, X LSB, Y MSB, ...)
    pub fn from_bytes(bytes: [u8; SAMPLE_BYTES]) -> Self {
        Self {
            x: axis(bytes[0], bytes[1]),
            y: axis(bytes[2], bytes[3]),
            z: axis(bytes[4], bytes[5]),
        }
    }
}

/// Arithmetic shift keeps the sign of the 14-bit value
fn axis(msb: u8, lsb: u8) -> i16 {
    i16::from_be_bytes([msb, lsb]) >> 2
}

/// Sample converted to g
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl MotionSample {
    /// Scale raw counts by the sensitivity of the active range
    pub fn from_raw(raw: RawSample, counts_per_g: f32) -> Self {
        Self {
            x: raw.x as f32 / counts_per_g,
            y: raw.y as f32 / counts_per_g,
            z: raw.z as f32 / counts_per_g,
        }
    }

    /// Euclidean norm of the three axes
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS_2G: f32 = 4096.0;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_unpack_left_justified() {
        // 0x0FFC carries 1023 in the upper 14 bits
        let raw = RawSample::from_bytes([0x0F, 0xFC, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(raw, RawSample { x: 1023, y: 0, z: 0 });

        let g = MotionSample::from_raw(raw, COUNTS_2G);
        assert!(close(g.x, 1023.0 / 4096.0));
        assert_eq!(g.y, 0.0);
        assert_eq!(g.z, 0.0);
    }

    #[test]
    fn test_one_g() {
        // 4096 counts << 2 = 0x4000
        let raw = RawSample::from_bytes([0x00, 0x00, 0x00, 0x00, 0x40, 0x00]);
        assert_eq!(raw.z, 4096);
        let g = MotionSample::from_raw(raw, COUNTS_2G);
        assert!(close(g.z, 1.0));
        assert!(close(g.magnitude(), 1.0));
    }

    #[test]
    fn test_negative_axis_keeps_sign() {
        // -1 g on Y: -4096 << 2 = 0xC000
        let raw = RawSample::from_bytes([0x00, 0x00, 0xC0, 0x00, 0x00, 0x00]);
        assert_eq!(raw.y, -4096);

        // Smallest negative step: all ones
        let raw = RawSample::from_bytes([0xFF, 0xFC, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(raw.x, -1);

        // Full negative scale
        let raw = RawSample::from_bytes([0x80, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(raw.x, -8192);
    }

    #[test]
    fn test_padding_bits_ignored() {
        let a = RawSample::from_bytes([0x12, 0x34, 0, 0, 0, 0]);
        let b = RawSample::from_bytes([0x12, 0x37, 0, 0, 0, 0]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_magnitude() {
        let sample = MotionSample {
            x: 0.6,
            y: 0.0,
            z: 0.8,
        };
        assert!(close(sample.magnitude(), 1.0));
        assert_eq!(MotionSample::default().magnitude(), 0.0);
    }

    #[test]
    fn test_range_sensitivity() {
        let raw = RawSample { x: 2048, y: 0, z: 0 };
        assert!(close(MotionSample::from_raw(raw, 4096.0).x, 0.5));
        assert!(close(MotionSample::from_raw(raw, 2048.0).x, 1.0));
        assert!(close(MotionSample::from_raw(raw, 1024.0).x, 2.0));
    }
}
