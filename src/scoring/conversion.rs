use serde::{Deserialize, Serialize};

/// Scale score at the `low` threshold.
pub const SCALE_LOW: f64 = 140.0;
/// Scale score at the `pass` threshold.
pub const SCALE_PASS: f64 = 160.0;
/// Scale score at the `high` threshold.
pub const SCALE_HIGH: f64 = 180.0;
/// Scale score at the paper's maximum raw score.
pub const SCALE_MAX: u32 = 190;

/// Span covered below `low`: a raw score of 0 lands at 140 - 18 = 122.
const BELOW_LOW_SPAN: f64 = 18.0;

/// Raw-score thresholds for one paper.
///
/// `low` maps to 140, `pass` to 160 and `high` to 180 on the Cambridge English
/// Scale. Callers must hold `0 < low < pass < high`; see
/// [`validate_scoring`](super::validate_scoring).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionPoints {
    pub low: u32,
    pub pass: u32,
    pub high: u32,
}

impl ConversionPoints {
    pub const fn new(low: u32, pass: u32, high: u32) -> Self {
        Self { low, pass, high }
    }
}

/// Convert a raw paper score to a Cambridge English Scale score.
///
/// Four linear segments, each rounded half away from zero:
///
/// | raw                   | scale                         |
/// |-----------------------|-------------------------------|
/// | `raw <= low`          | 122 ..= 140                   |
/// | `low < raw < pass`    | 140 .. 160                    |
/// | `pass <= raw <= high` | 160 ..= 180                   |
/// | `raw > high`          | 180 ..= 190 (190 if no headroom) |
pub fn convert_raw_to_scale(raw: u32, points: &ConversionPoints, total_raw_max: u32) -> u32 {
    let raw = f64::from(raw);
    let low = f64::from(points.low);
    let pass = f64::from(points.pass);
    let high = f64::from(points.high);

    if raw <= low {
        return round_scale(SCALE_LOW - ((low - raw) / low) * BELOW_LOW_SPAN);
    }
    if raw < pass {
        return round_scale(SCALE_LOW + ((raw - low) / (pass - low)) * (SCALE_PASS - SCALE_LOW));
    }
    if raw <= high {
        return round_scale(SCALE_PASS + ((raw - pass) / (high - pass)) * (SCALE_HIGH - SCALE_PASS));
    }
    if total_raw_max <= points.high {
        return SCALE_MAX;
    }

    let total = f64::from(total_raw_max);
    round_scale(SCALE_HIGH + ((raw - high) / (total - high)) * (f64::from(SCALE_MAX) - SCALE_HIGH))
}

/// Round half away from zero. Scale values are always positive here, so this
/// also matches round-half-up.
fn round_scale(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUE: ConversionPoints = ConversionPoints::new(25, 42, 63);
    const LISTENING: ConversionPoints = ConversionPoints::new(10, 18, 27);

    #[test]
    fn test_zero_raw_is_122() {
        assert_eq!(convert_raw_to_scale(0, &RUE, 70), 122);
        assert_eq!(convert_raw_to_scale(0, &LISTENING, 30), 122);
    }

    #[test]
    fn test_thresholds_hit_exact_scale_points() {
        assert_eq!(convert_raw_to_scale(25, &RUE, 70), 140);
        assert_eq!(convert_raw_to_scale(42, &RUE, 70), 160);
        assert_eq!(convert_raw_to_scale(63, &RUE, 70), 180);
        assert_eq!(convert_raw_to_scale(70, &RUE, 70), 190);
    }

    #[test]
    fn test_segment_one_interpolates() {
        // 140 - (15/25) * 18 = 129.2
        assert_eq!(convert_raw_to_scale(10, &RUE, 70), 129);
    }

    #[test]
    fn test_segment_two_interpolates() {
        // 140 + (8/17) * 20 = 149.41
        assert_eq!(convert_raw_to_scale(33, &RUE, 70), 149);
        // 140 + (1/8) * 20 = 142.5 rounds up
        assert_eq!(convert_raw_to_scale(11, &LISTENING, 30), 143);
    }

    #[test]
    fn test_segment_three_interpolates() {
        // 160 + (10/21) * 20 = 169.52
        assert_eq!(convert_raw_to_scale(52, &RUE, 70), 170);
    }

    #[test]
    fn test_segment_four_interpolates() {
        // 180 + (1/3) * 10 = 183.33
        assert_eq!(convert_raw_to_scale(28, &LISTENING, 30), 183);
    }

    #[test]
    fn test_no_headroom_above_high_is_190() {
        let points = ConversionPoints::new(10, 20, 30);
        assert_eq!(convert_raw_to_scale(31, &points, 30), 190);
        assert_eq!(convert_raw_to_scale(35, &points, 25), 190);
    }

    #[test]
    fn test_one_below_pass_stays_in_segment_two() {
        // 140 + (16/17) * 20 = 158.82
        assert_eq!(convert_raw_to_scale(41, &RUE, 70), 159);
    }

    #[test]
    fn test_one_above_low_leaves_segment_one() {
        // 140 + (1/17) * 20 = 141.18
        assert_eq!(convert_raw_to_scale(26, &RUE, 70), 141);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        for (points, total) in [
            (RUE, 70),
            (ConversionPoints::new(14, 24, 36), 40),
            (LISTENING, 30),
            (ConversionPoints::new(21, 36, 54), 60),
        ] {
            let mut previous = 0;
            for raw in 0..=total {
                let scaled = convert_raw_to_scale(raw, &points, total);
                assert!(
                    scaled >= previous,
                    "scale dropped at raw {} ({} < {})",
                    raw,
                    scaled,
                    previous
                );
                previous = scaled;
            }
        }
    }
}
