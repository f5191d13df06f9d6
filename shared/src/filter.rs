use crate::site::{Site, Surface};

/// Active filter constraints. The default admits every site.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SiteFilter {
    pub min_area: f64,
    pub surface: Option<Surface>,
}

impl SiteFilter {
    pub fn matches(&self, site: &Site) -> bool {
        site.area >= self.min_area && self.surface.is_none_or(|s| s == site.surface)
    }
}

/// Negative and NaN thresholds become 0.
pub fn clamp_min_area(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Parse the numeric filter field. Anything unusable reads as 0.
pub fn parse_min_area(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(clamp_min_area)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_negative_and_nan() {
        assert_eq!(clamp_min_area(-5.0), 0.0);
        assert_eq!(clamp_min_area(f64::NAN), 0.0);
        assert_eq!(clamp_min_area(1200.0), 1200.0);
    }

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_min_area("20000"), 20000.0);
        assert_eq!(parse_min_area(" 150.5 "), 150.5);
    }

    #[test]
    fn invalid_input_reads_as_zero() {
        assert_eq!(parse_min_area(""), 0.0);
        assert_eq!(parse_min_area("abc"), 0.0);
        assert_eq!(parse_min_area("-300"), 0.0);
        assert_eq!(parse_min_area("inf"), 0.0);
        assert_eq!(parse_min_area("NaN"), 0.0);
    }
}
