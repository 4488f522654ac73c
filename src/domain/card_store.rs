use crate::domain::{Card, PerRole};
use crate::shared::MAX_ROUNDS;

/// Every card a game touches, split by owner.
///
/// Hands only shrink (a bid removes a card); collections, history and used
/// cards only grow.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    pub hands: PerRole<Vec<Card>>,
    /// Shuffled tail of the deck. Only the first `MAX_ROUNDS` entries are auctioned.
    pub auction: Vec<Card>,
    pub collections: PerRole<Vec<Card>>,
    pub cards_history: PerRole<Vec<Card>>,
    pub used_cards: PerRole<Vec<Card>>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auction_card(&self, round: usize) -> Option<Card> {
        if round >= MAX_ROUNDS {
            return None;
        }
        self.auction.get(round).copied()
    }

    pub fn score(&self) -> PerRole<u32> {
        self.collections.map(|cards| cards.iter().map(Card::value).sum())
    }
}
