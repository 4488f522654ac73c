//! Authoritative per-room state machine.
//!
//! `Game` is synchronous and knows nothing about sockets or timers: every
//! operation returns the room messages it produced, and the caller decides
//! how to deliver them and when to call [`Game::advance_round`].

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::card_game::deck::{build_auction_sequence, build_deck, deal_hands};
use crate::domain::{Bid, Card, CardStore, GamePhase, GameWinner, PerRole, Role, Seat};
use crate::error::{GameError, Result};
use crate::models::{RoomMessage, ServerEvent};
use crate::shared::MAX_ROUNDS;

/// Why a bid was dropped without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotBidding(GamePhase),
    AlreadyBid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidOutcome {
    Ignored(IgnoreReason),
    /// First bid of the round; the opponent is told a bid exists.
    Placed(Vec<RoomMessage>),
    /// Both bids were in and the round was settled. `next_round` is the round
    /// the caller should advance to after the pause, or `None` once the game is over.
    Resolved { messages: Vec<RoomMessage>, next_round: Option<usize> },
}

#[derive(Debug)]
pub struct Game {
    room_id: String,
    players: PerRole<Option<Seat>>,
    cards: CardStore,
    current_auction_card: Option<Card>,
    round: usize,
    bids: PerRole<Option<Bid>>,
    turn_order: [Role; 2],
    phase: GamePhase,
    rng: StdRng,
}

impl Game {
    /// A fresh room with `creator` in the player1 seat. The tie-break order is fixed here.
    pub fn new(room_id: impl Into<String>, creator: Seat, mut rng: StdRng) -> Self {
        let mut turn_order = Role::BOTH;
        turn_order.shuffle(&mut rng);

        Self {
            room_id: room_id.into(),
            players: PerRole::new(Some(creator), None),
            cards: CardStore::new(),
            current_auction_card: None,
            round: 0,
            bids: PerRole::default(),
            turn_order,
            phase: GamePhase::Waiting,
            rng,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Number of settled rounds.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn turn_order(&self) -> [Role; 2] {
        self.turn_order
    }

    pub fn player(&self, role: Role) -> Option<&Seat> {
        self.players[role].as_ref()
    }

    pub fn current_auction_card(&self) -> Option<Card> {
        self.current_auction_card
    }

    pub fn hand(&self, role: Role) -> &[Card] {
        &self.cards.hands[role]
    }

    pub fn bid(&self, role: Role) -> Option<Bid> {
        self.bids[role]
    }

    pub fn cards(&self) -> &CardStore {
        &self.cards
    }

    pub fn scores(&self) -> PerRole<u32> {
        self.cards.score()
    }

    /// Seats the second player and deals. Fails with `RoomFull` once player2 is taken.
    pub fn join(&mut self, seat: Seat) -> Result<Vec<RoomMessage>> {
        if self.players.player2.is_some() {
            return Err(GameError::RoomFull);
        }
        self.players.player2 = Some(seat);
        Ok(self.start())
    }

    fn start(&mut self) -> Vec<RoomMessage> {
        let deck = build_deck();
        let (player1, player2) = deal_hands(&deck);
        self.cards.hands = PerRole::new(player1, player2);
        self.cards.auction = build_auction_sequence(&deck, &mut self.rng);
        self.round = 0;

        let Some(card) = self.cards.auction_card(0) else {
            return Vec::new();
        };
        self.current_auction_card = Some(card);
        self.phase = GamePhase::Bidding;

        let players = self.players.map(|seat| seat.as_ref().map(|s| s.name.clone()).unwrap_or_default());
        vec![RoomMessage::room(ServerEvent::GameStarted {
            players,
            hands: self.cards.hands.clone(),
            current_auction_card: card,
            turn_order: self.turn_order,
        })]
    }

    /// Commits `hand[role][card_index]` as this round's bid.
    ///
    /// Out-of-phase and repeated bids are ignored without touching any state;
    /// an index past the end of the hand is rejected.
    pub fn place_bid(&mut self, role: Role, card_index: usize) -> Result<BidOutcome> {
        if self.phase != GamePhase::Bidding {
            return Ok(BidOutcome::Ignored(IgnoreReason::NotBidding(self.phase)));
        }
        let Some(auction_card) = self.current_auction_card else {
            return Ok(BidOutcome::Ignored(IgnoreReason::NotBidding(self.phase)));
        };
        if self.bids[role].is_some() {
            return Ok(BidOutcome::Ignored(IgnoreReason::AlreadyBid));
        }

        let hand = &mut self.cards.hands[role];
        if card_index >= hand.len() {
            return Err(GameError::InvalidCardIndex { index: card_index, hand_size: hand.len() });
        }
        let card = hand.remove(card_index);
        self.cards.used_cards[role].push(card);
        self.bids[role] = Some(Bid { card, index: card_index });

        match (self.bids.player1, self.bids.player2) {
            (Some(player1), Some(player2)) => {
                Ok(self.resolve(PerRole::new(player1, player2), auction_card))
            }
            _ => Ok(BidOutcome::Placed(vec![RoomMessage::all_except(role, ServerEvent::OpponentBid)])),
        }
    }

    fn resolve(&mut self, bids: PerRole<Bid>, card: Card) -> BidOutcome {
        self.phase = GamePhase::Revealing;

        let winner = self.round_winner(&bids);
        self.cards.collections[winner].push(card);
        self.cards.cards_history[winner].push(card);

        let mut messages = vec![RoomMessage::room(ServerEvent::BidResults {
            bids,
            winner,
            card,
            cards_history: self.cards.cards_history.clone(),
            used_cards: self.cards.used_cards.clone(),
        })];

        self.bids = PerRole::default();
        self.round += 1;

        if self.round >= MAX_ROUNDS {
            self.phase = GamePhase::GameOver;
            let scores = self.cards.score();
            messages.push(RoomMessage::room(ServerEvent::GameOver {
                collections: self.cards.collections.clone(),
                scores: scores.clone(),
                winner: GameWinner::from_scores(&scores),
            }));
            return BidOutcome::Resolved { messages, next_round: None };
        }

        BidOutcome::Resolved { messages, next_round: Some(self.round) }
    }

    /// Higher value wins; equal values go to the first seat of the turn order.
    pub fn round_winner(&self, bids: &PerRole<Bid>) -> Role {
        match bids.player1.card.rank.cmp(&bids.player2.card.rank) {
            Ordering::Greater => Role::Player1,
            Ordering::Less => Role::Player2,
            Ordering::Equal => self.turn_order[0],
        }
    }

    /// Reopens bidding on the next auction card. Only fires for the round the
    /// game is actually waiting on; anything else is a no-op.
    pub fn advance_round(&mut self, round: usize) -> Option<RoomMessage> {
        if self.phase != GamePhase::Revealing || self.round != round {
            return None;
        }
        let card = self.cards.auction_card(round)?;

        self.current_auction_card = Some(card);
        self.phase = GamePhase::Bidding;

        Some(RoomMessage::room(ServerEvent::NewRound { round: round + 1, current_auction_card: card }))
    }
}
