use super::config::ScoringConfig;
use super::paper::Paper;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// The conversion is only defined for `0 < low < pass < high <= total`, and
/// `total` must be the paper's raw maximum. Anything else is rejected here
/// rather than at calculation time.
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for paper in Paper::ALL {
        let p = config.paper(paper);
        let key = paper.config_key();

        if p.low == 0 {
            errors.push(format!("scoring.{}.low: must be greater than 0", key));
        }
        if p.low >= p.pass {
            errors.push(format!(
                "scoring.{}.pass: must be greater than low ({} >= {})",
                key, p.low, p.pass
            ));
        }
        if p.pass >= p.high {
            errors.push(format!(
                "scoring.{}.high: must be greater than pass ({} >= {})",
                key, p.pass, p.high
            ));
        }
        if p.high > p.total {
            errors.push(format!(
                "scoring.{}.total: must be at least high ({} > {})",
                key, p.high, p.total
            ));
        }
        // Inputs are clamped to the paper's part maximums, so any other total
        // would push full marks above or below 190.
        if p.total != paper.total_raw_max() {
            errors.push(format!(
                "scoring.{}.total: must equal the paper's raw maximum ({} != {})",
                key,
                p.total,
                paper.total_raw_max()
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
