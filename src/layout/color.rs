use super::types::TextColor;
use sha2::{Digest, Sha256};

/// Categorical palette cycled over distinct course names (tab20 order).
pub(super) const PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Deterministic per-name color: the first three bytes of the SHA-256 digest
/// of the name, printed as `#rrggbb`. Stable across runs and processes.
pub(super) fn hash_color(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    format!("#{}", hex::encode(&digest[..3]))
}

/// Palette entry for the `index`-th distinct course name.
pub(super) fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn parse_channel(hex_pair: &str) -> f64 {
    u8::from_str_radix(hex_pair, 16).unwrap_or(0) as f64 / 255.0
}

fn linearize(channel: f64) -> f64 {
    if channel <= 0.03928 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance of a `#rrggbb` color.
pub(super) fn relative_luminance(color: &str) -> f64 {
    let hex = color.trim_start_matches('#');
    if hex.len() < 6 {
        return 0.0;
    }
    let r = linearize(parse_channel(&hex[0..2]));
    let g = linearize(parse_channel(&hex[2..4]));
    let b = linearize(parse_channel(&hex[4..6]));
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

fn contrast_ratio(lighter: f64, darker: f64) -> f64 {
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick black or white text for a background color by contrast ratio.
/// White wins only when its ratio is strictly higher; ties go to black.
pub(super) fn best_text_color(background: &str) -> TextColor {
    let bg = relative_luminance(background);
    let against_white = contrast_ratio(1.0, bg);
    let against_black = contrast_ratio(bg, 0.0);
    if against_white > against_black {
        TextColor::White
    } else {
        TextColor::Black
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_color_is_stable() {
        assert_eq!(hash_color("PI-ARB"), "#2d69ef");
        assert_eq!(hash_color("NI-PDP"), "#225b57");
        assert_eq!(hash_color("Linear Algebra"), "#5d1d5f");
        assert_eq!(hash_color("BI-AG1"), "#d7a087");
        assert_eq!(hash_color("x"), "#2d7116");
    }

    #[test]
    fn palette_wraps_around() {
        assert_eq!(palette_color(0), "#1f77b4");
        assert_eq!(palette_color(19), "#9edae5");
        assert_eq!(palette_color(20), "#1f77b4");
        assert_eq!(palette_color(41), "#aec7e8");
    }

    #[test]
    fn luminance_extremes() {
        assert!(relative_luminance("#000000") < 1e-9);
        assert!((relative_luminance("#ffffff") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn text_color_per_palette_entry() {
        // Only the three darkest tab20 entries flip to white text.
        let expect_white = [0, 6, 10];
        for (index, color) in PALETTE.iter().enumerate() {
            let expected = if expect_white.contains(&index) {
                TextColor::White
            } else {
                TextColor::Black
            };
            assert_eq!(best_text_color(color), expected, "palette[{index}] {color}");
        }
    }

    #[test]
    fn text_color_threshold_crossover() {
        // The gray ramp flips from white to black text between 0x75 and 0x76.
        assert_eq!(best_text_color("#757575"), TextColor::White);
        assert_eq!(best_text_color("#767676"), TextColor::Black);
        assert_eq!(best_text_color("#ffffff"), TextColor::Black);
        assert_eq!(best_text_color("#000000"), TextColor::White);
    }
}
