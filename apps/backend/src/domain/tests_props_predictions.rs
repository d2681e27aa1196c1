//! Property tests for prediction validation.

use proptest::prelude::*;

use crate::domain::predictions::{legal_predictions, validate_prediction};
use crate::domain::test_prelude;
use crate::errors::domain::{DomainError, ValidationKind};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Out-of-range values are rejected regardless of position.
    #[test]
    fn prop_out_of_range_rejected(
        hand_size in 8u8..=13,
        excess in 1i32..100,
        is_last in any::<bool>(),
    ) {
        let too_high = validate_prediction(i32::from(hand_size) + excess, hand_size, is_last, 0);
        let negative = validate_prediction(-excess, hand_size, is_last, 0);
        for res in [too_high, negative] {
            match res {
                Err(DomainError::Validation(ValidationKind::InvalidPrediction, _)) => {}
                other => prop_assert!(false, "expected InvalidPrediction, got {other:?}"),
            }
        }
    }

    /// Non-last predictors may choose anything in range.
    #[test]
    fn prop_non_last_accepts_full_range(
        hand_size in 8u8..=13,
        current_sum in 0u32..=40,
    ) {
        let legal = legal_predictions(hand_size, false, current_sum);
        prop_assert_eq!(legal.len(), usize::from(hand_size) + 1);
    }

    /// The last predictor loses exactly the value that would balance the round,
    /// and only when that value is in range.
    #[test]
    fn prop_last_predictor_cannot_balance(
        hand_size in 8u8..=13,
        current_sum in 0u32..=40,
    ) {
        let legal = legal_predictions(hand_size, true, current_sum);
        let hs = u32::from(hand_size);
        if current_sum <= hs {
            let forbidden = u8::try_from(hs - current_sum).unwrap();
            prop_assert!(!legal.contains(&forbidden));
            prop_assert_eq!(legal.len(), usize::from(hand_size));
        } else {
            prop_assert_eq!(legal.len(), usize::from(hand_size) + 1);
        }
        for v in legal {
            prop_assert!(u32::from(v) + current_sum != hs);
        }
    }
}
