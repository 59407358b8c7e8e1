//! Resistance value parsing.

/// Metric prefixes accepted after the number, with their scale.
const SI_PREFIXES: [(char, f64); 9] = [
    ('p', 1e-12),
    ('n', 1e-9),
    ('u', 1e-6),
    ('µ', 1e-6),
    ('m', 1e-3),
    ('k', 1e3),
    ('K', 1e3),
    ('M', 1e6),
    ('G', 1e9),
];

/// Parse a resistance string with optional SI suffix and unit.
///
/// Accepts plain numbers (`"220"`, `"1e3"`), SI suffixes (`"4.7k"`, `"1M"`)
/// and a trailing ohm sign or word (`"10kΩ"`, `"330 ohm"`).
pub fn parse_value(text: &str) -> Option<f64> {
    let mut text = text.trim();
    for unit in ["Ω", "ohms", "ohm", "Ohm"] {
        if let Some(stripped) = text.strip_suffix(unit) {
            text = stripped.trim_end();
            break;
        }
    }
    if text.is_empty() {
        return None;
    }

    let (digits, scale) = text
        .char_indices()
        .next_back()
        .and_then(|(at, last)| {
            SI_PREFIXES
                .iter()
                .find(|(prefix, _)| *prefix == last)
                .map(|&(_, scale)| (&text[..at], scale))
        })
        .unwrap_or((text, 1.0));

    digits
        .trim_end()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * scale)
}
