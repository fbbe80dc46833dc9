//! Color utility functions shared across the crate.

/// Decode a `#RRGGBB` color code into an RGB triple.
///
/// The first character is a marker and is not inspected. The six characters
/// after it must be hexadecimal digits; anything beyond them is ignored.
///
/// Returns `None` if the text is too short or a channel is not valid hex.
pub fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let digits = text.get(1..)?;
    let digits = digits.get(..6)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Format an RGB triple as `#rrggbb`.
pub fn to_hex_color(color: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fa3253"), Some([0xfa, 0x32, 0x53]));
        assert_eq!(parse_hex_color("#000000"), Some([0, 0, 0]));
        assert_eq!(parse_hex_color("#FFFFFF"), Some([255, 255, 255]));
    }

    #[test]
    fn test_parse_hex_color_every_channel_value() {
        for v in 0..=255u8 {
            let text = format!("#{:02X}{:02x}{:02X}", v, 255 - v, v / 2);
            assert_eq!(parse_hex_color(&text), Some([v, 255 - v, v / 2]));
        }
    }

    #[test]
    fn test_parse_hex_color_rejects_malformed() {
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#12345g"), None);
        assert_eq!(parse_hex_color("#+1+2+3"), None);
    }

    #[test]
    fn test_marker_is_not_inspected_and_tail_is_ignored() {
        assert_eq!(parse_hex_color("x102030"), Some([16, 32, 48]));
        assert_eq!(parse_hex_color("#102030ff"), Some([16, 32, 48]));
    }

    #[test]
    fn test_to_hex_color() {
        assert_eq!(to_hex_color([250, 50, 83]), "#fa3253");
    }
}
