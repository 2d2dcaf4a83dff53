// src/axis_names.rs

/// Number of spatial axes carried by every trajectory sample.
pub const AXIS_COUNT: usize = 3;

/// Labels of the x, y and z axes, used when printing per-axis values.
pub const AXIS_NAMES: [&str; AXIS_COUNT] = ["X", "Y", "Z"];

/// Formats a per-axis vector as `X=.. Y=.. Z=..`.
pub fn format_per_axis(values: &[f64; AXIS_COUNT]) -> String {
    AXIS_NAMES
        .iter()
        .zip(values)
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_per_axis() {
        assert_eq!(format_per_axis(&[1.0, -2.5, 0.0]), "X=1 Y=-2.5 Z=0");
    }
}

// src/axis_names.rs
