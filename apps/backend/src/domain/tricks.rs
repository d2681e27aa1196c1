use crate::domain::state::Seat;
use crate::domain::{Card, Suit};

/// True when `challenger` takes the trick from the card currently winning it.
///
/// A trump beats any non-trump; otherwise only a higher card of the winner's
/// own suit can take over. Off-suit, non-trump cards never win.
pub fn card_beats(challenger: Card, winning: Card, trump: Option<Suit>) -> bool {
    let challenger_trump = Some(challenger.suit) == trump;
    let winning_trump = Some(winning.suit) == trump;
    (challenger_trump && !winning_trump)
        || (challenger.suit == winning.suit && challenger.rank > winning.rank)
}

/// Winner of a trick given the plays in order.
///
/// Returns `None` for an empty trick.
pub fn resolve_trick(plays: &[(Seat, Card)], trump: Option<Suit>) -> Option<Seat> {
    let (&first, rest) = plays.split_first()?;
    let (winner, _) = rest.iter().fold(first, |best, &play| {
        if card_beats(play.1, best.1, trump) {
            play
        } else {
            best
        }
    });
    Some(winner)
}

/// Indices of `hand` that may be played into a trick led with `lead`.
///
/// Without the follow-suit rule, or when leading, or when void in the lead
/// suit, every index is legal.
pub fn legal_card_indices(hand: &[Card], lead: Option<Suit>, must_follow_suit: bool) -> Vec<usize> {
    let all = || (0..hand.len()).collect::<Vec<_>>();
    let Some(lead) = lead.filter(|_| must_follow_suit) else {
        return all();
    };
    let following: Vec<usize> = hand
        .iter()
        .enumerate()
        .filter(|(_, c)| c.suit == lead)
        .map(|(i, _)| i)
        .collect();
    if following.is_empty() {
        all()
    } else {
        following
    }
}
