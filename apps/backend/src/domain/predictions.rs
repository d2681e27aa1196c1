use crate::domain::rules::valid_prediction_range;
use crate::errors::domain::{DomainError, ValidationKind};

/// Validate a prediction against the round's hand size.
///
/// `current_sum` is the total of predictions already made this round. The last
/// predictor may not bring the total to exactly `hand_size`.
pub fn validate_prediction(
    value: i32,
    hand_size: u8,
    is_last_predictor: bool,
    current_sum: u32,
) -> Result<u8, DomainError> {
    let accepted = u8::try_from(value)
        .ok()
        .filter(|v| valid_prediction_range(hand_size).contains(v))
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidPrediction,
                format!("Prediction must be between 0 and {hand_size}"),
            )
        })?;

    if is_last_predictor && current_sum + u32::from(accepted) == u32::from(hand_size) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPrediction,
            format!("Last player cannot make the total prediction equal {hand_size}"),
        ));
    }

    Ok(accepted)
}

/// Every prediction value `validate_prediction` would accept.
pub fn legal_predictions(hand_size: u8, is_last_predictor: bool, current_sum: u32) -> Vec<u8> {
    valid_prediction_range(hand_size)
        .filter(|&v| {
            validate_prediction(i32::from(v), hand_size, is_last_predictor, current_sum).is_ok()
        })
        .collect()
}
