use super::domain::Classification;

const EXCELLENT_MESSAGE: &str = "You're in great financial shape. Keep it up!";
const BALANCED_MESSAGE: &str = "Your finances are balanced, but things are a little tight.";
const OVERSPENDING_MESSAGE: &str =
    "You're spending more than you can sustain. Time to make some changes.";

/// Maps a score to its band. Lower bounds are inclusive: 85, 70, 55, 40.
pub fn classification_from_score(score: f64) -> Classification {
    if score >= 85.0 {
        Classification::Excellent
    } else if score >= 70.0 {
        Classification::Strong
    } else if score >= 55.0 {
        Classification::Fair
    } else if score >= 40.0 {
        Classification::Fragile
    } else {
        Classification::Critical
    }
}

/// User-facing message for a band. Messaging is coarser than classification:
/// Strong and Fair share one message, Fragile and Critical share another.
pub fn message_from_classification(classification: Classification) -> &'static str {
    match classification {
        Classification::Excellent => EXCELLENT_MESSAGE,
        Classification::Strong | Classification::Fair => BALANCED_MESSAGE,
        Classification::Fragile | Classification::Critical => OVERSPENDING_MESSAGE,
    }
}
