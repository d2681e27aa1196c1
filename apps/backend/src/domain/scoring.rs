use crate::domain::rules::EXACT_PREDICTION_BONUS;

/// Points for one player's round: `10 + predicted` on an exact hit, else 0.
pub fn score_round(predicted: u8, sets_won: u8) -> u32 {
    if predicted == sets_won {
        EXACT_PREDICTION_BONUS + u32::from(predicted)
    } else {
        0
    }
}
