//! Brightness to character mapping.

/// Density ramp from darkest to brightest.
pub const STANDARD_CHARSET: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Gamma correction table, (i/255)^(1/2.2) * 255 rounded.
#[rustfmt::skip]
const GAMMA_LUT: [u8; 256] = [
    0, 21, 28, 34, 39, 43, 46, 50, 53, 56, 59, 61, 64, 66, 68, 70,
    72, 74, 76, 78, 80, 82, 84, 85, 87, 89, 90, 92, 93, 95, 96, 98,
    99, 101, 102, 103, 105, 106, 107, 109, 110, 111, 112, 114, 115, 116, 117, 118,
    119, 120, 122, 123, 124, 125, 126, 127, 128, 129, 130, 131, 132, 133, 134, 135,
    136, 137, 138, 139, 140, 141, 142, 143, 144, 144, 145, 146, 147, 148, 149, 150,
    150, 151, 152, 153, 154, 155, 155, 156, 157, 158, 159, 159, 160, 161, 162, 162,
    163, 164, 165, 165, 166, 167, 168, 168, 169, 170, 171, 171, 172, 173, 173, 174,
    175, 175, 176, 177, 177, 178, 179, 179, 180, 181, 181, 182, 183, 183, 184, 185,
    185, 186, 186, 187, 188, 188, 189, 190, 190, 191, 191, 192, 193, 193, 194, 194,
    195, 196, 196, 197, 197, 198, 199, 199, 200, 200, 201, 201, 202, 203, 203, 204,
    204, 205, 205, 206, 207, 207, 208, 208, 209, 209, 210, 210, 211, 212, 212, 213,
    213, 214, 214, 215, 215, 216, 216, 217, 217, 218, 218, 219, 220, 220, 221, 221,
    222, 222, 223, 223, 224, 224, 225, 225, 226, 226, 227, 227, 228, 228, 229, 229,
    230, 230, 231, 231, 232, 232, 233, 233, 234, 234, 234, 235, 235, 236, 236, 237,
    237, 238, 238, 239, 239, 240, 240, 241, 241, 241, 242, 242, 243, 243, 244, 244,
    245, 245, 246, 246, 246, 247, 247, 248, 248, 249, 249, 250, 250, 250, 251, 255,
];

/// Apply gamma correction to a brightness value.
#[inline]
pub fn gamma_correct(linear: u8) -> u8 {
    GAMMA_LUT[linear as usize]
}

/// Map gamma-corrected brightness values onto `charset`, reusing `buffer`.
///
/// Returns the number of characters written.
pub fn map_to_chars_into(brightness: &[u8], charset: &[char], buffer: &mut Vec<char>) -> usize {
    buffer.clear();

    if charset.is_empty() {
        buffer.resize(brightness.len(), ' ');
        return brightness.len();
    }

    buffer.reserve(brightness.len());
    let levels = charset.len();
    for &b in brightness {
        let idx = (gamma_correct(b) as usize * (levels - 1)) / 255;
        buffer.push(charset[idx]);
    }

    brightness.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_endpoints() {
        assert_eq!(gamma_correct(0), 0);
        assert_eq!(gamma_correct(255), 255);
        assert!(gamma_correct(128) > 128);
    }

    #[test]
    fn test_extremes_map_to_ends_of_ramp() {
        let mut out = Vec::new();
        map_to_chars_into(&[0, 255], STANDARD_CHARSET, &mut out);
        assert_eq!(out, vec![' ', '@']);
    }

    #[test]
    fn test_empty_charset_yields_spaces() {
        let mut out = Vec::new();
        assert_eq!(map_to_chars_into(&[10, 20, 30], &[], &mut out), 3);
        assert_eq!(out, vec![' '; 3]);
    }

    #[test]
    fn test_mapping_is_monotonic() {
        let brightness: Vec<u8> = (0..=255).collect();
        let mut out = Vec::new();
        map_to_chars_into(&brightness, STANDARD_CHARSET, &mut out);
        let ranks: Vec<usize> = out
            .iter()
            .map(|c| STANDARD_CHARSET.iter().position(|s| s == c).unwrap())
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }
}
