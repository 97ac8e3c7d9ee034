//! Scoring curves, aggregation and letter ranks

/// Sub-score sentinel for "could not be computed"; skipped by [`average_score`].
pub const NOT_COMPUTED: i32 = -1;

/// Map a measurement onto 0–100.
///
/// - `min > max` (descending): `value <= max` scores 100, `value >= min`
///   scores 0, linear in between.
/// - otherwise (ascending): anchored at zero, `value <= 0` scores 0 and
///   `value >= max` scores 100. `min` is not consulted on this branch; the
///   clinical tables depend on that, see DESIGN.md.
///
/// An absent value scores 0.
pub fn linear_score(value: Option<f64>, min: f64, max: f64) -> u8 {
    let Some(value) = value else {
        return 0;
    };
    let score = if min > max {
        if value <= max {
            100.0
        } else if value >= min {
            0.0
        } else {
            ((value - min) / (max - min) * 100.0).round()
        }
    } else if value <= 0.0 {
        0.0
    } else if value >= max {
        100.0
    } else {
        (value * 100.0 / max).round()
    };
    score.clamp(0.0, 100.0) as u8
}

/// Lift an optional score into the sentinel representation used by [`average_score`].
pub fn sub_score(score: Option<u8>) -> i32 {
    score.map_or(NOT_COMPUTED, i32::from)
}

/// Rounded mean of the non-negative scores; 0 when none remain.
pub fn average_score(scores: &[i32]) -> u8 {
    let valid: Vec<i32> = scores.iter().copied().filter(|s| *s >= 0).collect();
    if valid.is_empty() {
        return 0;
    }
    let sum: i32 = valid.iter().sum();
    (f64::from(sum) / valid.len() as f64).round().clamp(0.0, 100.0) as u8
}

/// Like [`average_score`], but `None` when every input was the sentinel.
pub fn average_present(scores: &[i32]) -> Option<u8> {
    scores.iter().any(|s| *s >= 0).then(|| average_score(scores))
}

/// Ten-point letter bands: 90+ is `A`, below 10 is `J`.
pub fn rank(score: u8) -> char {
    const BANDS: [char; 10] = ['J', 'I', 'H', 'G', 'F', 'E', 'D', 'C', 'B', 'A'];
    BANDS[usize::from(score.min(99) / 10)]
}
