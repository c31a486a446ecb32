//! Outbound sample lines
//!
//! Each acquisition cycle prints the three axis readings in g:
//!
//! ```text
//! " 0.0123   0.9981  -0.0044"
//! ```

use core::fmt::Write;
use heapless::String;

/// Buffer size for one formatted sample line
pub const SAMPLE_LINE_CAPACITY: usize = 36;

/// Column header printed once before the first sample
pub const SAMPLE_HEADER: &str = "   X       Y       Z";

/// A formatted sample line, without terminator
pub type SampleLine = String<SAMPLE_LINE_CAPACITY>;

/// Format one sample as fixed-point text with four decimals
///
/// Values are right-aligned in seven columns and separated by two spaces.
/// Fails only if the text does not fit, which cannot happen for values
/// within the sensor's range.
pub fn format_sample(x: f32, y: f32, z: f32) -> Result<SampleLine, core::fmt::Error> {
    let mut line = SampleLine::new();
    write!(line, "{:7.4}  {:7.4}  {:7.4}", x, y, z)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_layout() {
        let line = format_sample(0.0123, 0.9981, -0.0044).unwrap();
        assert_eq!(line.as_str(), " 0.0123   0.9981  -0.0044");
    }

    #[test]
    fn test_format_full_scale() {
        let line = format_sample(-7.9990, 7.9990, 0.0).unwrap();
        assert_eq!(line.as_str(), "-7.9990   7.9990   0.0000");
    }

    #[test]
    fn test_overlong_values_rejected() {
        assert!(format_sample(1.0e30, 1.0e30, 1.0e30).is_err());
    }
}
