//! Rule-based fraud score for claim messages

/// Score every message starts from
pub const BASE_SCORE: u32 = 10;

/// Upper bound of the score
pub const MAX_SCORE: u32 = 100;

/// Case-insensitive marker and the points it adds
const RULES: [(&str, u32); 2] = [("urgente", 20), ("batida", 15)];

/// Score a claim message between [`BASE_SCORE`] and [`MAX_SCORE`]
pub fn fraud_score(message: &str) -> u32 {
    let lowered = message.to_lowercase();
    let score = RULES
        .iter()
        .filter(|(marker, _)| lowered.contains(marker))
        .fold(BASE_SCORE, |score, (_, points)| score + points);
    score.min(MAX_SCORE)
}
