use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Card, Rank, Suit};
use crate::shared::{DECK_SIZE, HAND_SIZE};

/// The 52-card deck in fixed order: suit-major, ascending value.
pub fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);

    for &suit in &Suit::ALL {
        for &rank in &Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// First 13 cards to player1, next 13 to player2, in deck order.
///
/// Hands are deliberately not shuffled: starting hands follow the deck order.
pub fn deal_hands(deck: &[Card]) -> (Vec<Card>, Vec<Card>) {
    let player1 = deck.iter().take(HAND_SIZE).copied().collect();
    let player2 = deck.iter().skip(HAND_SIZE).take(HAND_SIZE).copied().collect();
    (player1, player2)
}

/// Everything after the two hands, shuffled. The game only ever consumes the
/// first `MAX_ROUNDS` entries.
pub fn build_auction_sequence<R: Rng + ?Sized>(deck: &[Card], rng: &mut R) -> Vec<Card> {
    let mut tail: Vec<Card> = deck.iter().skip(2 * HAND_SIZE).copied().collect();
    tail.shuffle(rng);
    tail
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::shared::MAX_ROUNDS;

    #[test]
    fn deck_covers_every_suit_and_rank_once() {
        let deck = build_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let unique: HashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                assert!(unique.contains(&Card::new(suit, rank)));
            }
        }
    }

    #[test]
    fn deck_is_suit_major_ascending() {
        let deck = build_deck();
        assert_eq!(deck[0], Card::new(Suit::Spades, Rank::Two));
        assert_eq!(deck[12], Card::new(Suit::Spades, Rank::Ace));
        assert_eq!(deck[13], Card::new(Suit::Hearts, Rank::Two));
        assert_eq!(deck[51], Card::new(Suit::Clubs, Rank::Ace));
    }

    #[test]
    fn hands_take_the_first_26_cards_unshuffled() {
        let deck = build_deck();
        let (p1, p2) = deal_hands(&deck);
        assert_eq!(p1.len(), HAND_SIZE);
        assert_eq!(p2.len(), HAND_SIZE);
        assert_eq!(p1[..], deck[..13]);
        assert_eq!(p2[..], deck[13..26]);
    }

    #[test]
    fn auction_sequence_is_a_permutation_of_the_tail() {
        let deck = build_deck();
        let mut rng = StdRng::seed_from_u64(7);
        let auction = build_auction_sequence(&deck, &mut rng);
        assert_eq!(auction.len(), 26);

        let tail: HashSet<Card> = deck[26..].iter().copied().collect();
        let got: HashSet<Card> = auction.iter().copied().collect();
        assert_eq!(tail, got);

        let used: HashSet<Card> = auction.iter().take(MAX_ROUNDS).copied().collect();
        assert_eq!(used.len(), MAX_ROUNDS);
    }

    #[test]
    fn auction_shuffle_depends_on_rng() {
        let deck = build_deck();
        let a = build_auction_sequence(&deck, &mut StdRng::seed_from_u64(1));
        let b = build_auction_sequence(&deck, &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);
        assert_ne!(a[..], deck[26..]);
    }
}
