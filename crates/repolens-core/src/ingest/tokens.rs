//! Token estimates as they appear in ingestion summaries

const SUMMARY_MARKER: &str = "Estimated tokens: ";

/// Rough token count for `bytes` of source text.
pub fn estimate_tokens(bytes: u64) -> u64 {
    bytes / 4
}

/// Render a token count the way summaries print it: `812`, `1.2K`, `2.3M`.
pub fn format_token_estimate(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}K", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}

/// Read the token estimate from a summary.
///
/// Looks at the text after the last `Estimated tokens: ` marker and accepts
/// a plain number or one with a `K`/`M` suffix. Returns `None` when there is
/// no marker or the value does not parse.
pub fn parse_token_estimate(summary: &str) -> Option<u64> {
    let (_, tail) = summary.rsplit_once(SUMMARY_MARKER)?;
    let value = tail.split_whitespace().next()?;

    let (number, scale) = match value.chars().last()? {
        'M' | 'm' => (&value[..value.len() - 1], 1_000_000.0),
        'K' | 'k' => (&value[..value.len() - 1], 1_000.0),
        _ => (value, 1.0),
    };
    let number: f64 = number.replace(',', "").parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    Some((number * scale).round() as u64)
}
