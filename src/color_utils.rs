//yeargrid/src/color_utils.rs

// Color helpers for the print palette.
// Colors are (r, g, b) tuples in the [0.0, 1.0] range so they map directly onto PDF fill colors.

pub type Rgb = (f32, f32, f32);

/// Parse a hex color string like "#RRGGBB" or "RRGGBB" into floats (0.0..1.0).
pub fn parse_hex_to_floats(hex: &str) -> Option<Rgb> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
}

/// Linear blend from `a` (t = 0) to `b` (t = 1).
pub fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    (
        a.0 + (b.0 - a.0) * t,
        a.1 + (b.1 - a.1) * t,
        a.2 + (b.2 - a.2) * t,
    )
}

/// Washed-out variant of `color` for preview cells, towards paper white.
pub fn muted(color: Rgb) -> Rgb {
    mix(color, (1.0, 1.0, 1.0), 0.55)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex_to_floats("#ffffff"), Some((1.0, 1.0, 1.0)));
        assert_eq!(parse_hex_to_floats("000000"), Some((0.0, 0.0, 0.0)));
        assert_eq!(parse_hex_to_floats("#fff"), None);
        assert_eq!(parse_hex_to_floats("#gg0000"), None);
    }

    #[test]
    fn test_muted_is_lighter() {
        let (r, g, b) = muted((0.2, 0.2, 0.2));
        assert!(r > 0.2 && g > 0.2 && b > 0.2);
        assert!(r < 1.0);
    }
}
