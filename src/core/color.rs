use nalgebra::Vector3;

/// Parses `#rrggbb` (leading `#` optional) into linear-ish [0, 1] RGB.
pub fn parse_hex(hex: &str) -> Option<Vector3<f32>> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some(Vector3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Packs an RGB color into the 0RGB layout minifb and the PNG writer expect.
pub fn to_u32(color: Vector3<f32>) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0) as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0) as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0) as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}

/// Linear blend, `t = 0` gives `a`.
pub fn lerp(a: Vector3<f32>, b: Vector3<f32>, t: f32) -> Vector3<f32> {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_colors() {
        let c = parse_hex("#ff6b6b").unwrap();
        assert_eq!(c.x, 1.0);
        assert!((c.y - 107.0 / 255.0).abs() < 1e-6);
        assert_eq!(to_u32(c) & 0x00ff_ffff, 0xff6b6b);
    }

    #[test]
    fn rejects_malformed() {
        assert!(parse_hex("#fff").is_none());
        assert!(parse_hex("#gg0000").is_none());
    }
}
