use std::ops::{Index, IndexMut};

use serde::{Serialize, Deserialize};

use crate::domain::{Card, Role};

/// One value per seat. Serializes as `{"player1": .., "player2": ..}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerRole<T> {
    pub player1: T,
    pub player2: T,
}

impl<T> PerRole<T> {
    pub fn new(player1: T, player2: T) -> Self {
        Self { player1, player2 }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerRole<U> {
        PerRole { player1: f(&self.player1), player2: f(&self.player2) }
    }
}

impl<T> Index<Role> for PerRole<T> {
    type Output = T;

    fn index(&self, role: Role) -> &T {
        match role {
            Role::Player1 => &self.player1,
            Role::Player2 => &self.player2,
        }
    }
}

impl<T> IndexMut<Role> for PerRole<T> {
    fn index_mut(&mut self, role: Role) -> &mut T {
        match role {
            Role::Player1 => &mut self.player1,
            Role::Player2 => &mut self.player2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Waiting,
    Bidding,
    Revealing,
    GameOver,
}

/// A card committed for the current round, with the hand position it was taken from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bid {
    pub card: Card,
    pub index: usize,
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameWinner {
    Player1,
    Player2,
    Tie,
}

impl GameWinner {
    pub fn from_scores(scores: &PerRole<u32>) -> Self {
        use std::cmp::Ordering;

        match scores.player1.cmp(&scores.player2) {
            Ordering::Greater => GameWinner::Player1,
            Ordering::Less => GameWinner::Player2,
            Ordering::Equal => GameWinner::Tie,
        }
    }
}

impl From<Role> for GameWinner {
    fn from(role: Role) -> Self {
        match role {
            Role::Player1 => GameWinner::Player1,
            Role::Player2 => GameWinner::Player2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_role_indexes_by_seat() {
        let mut names = PerRole::new("ann".to_string(), "bo".to_string());
        assert_eq!(names[Role::Player2], "bo");
        names[Role::Player1].push('e');
        assert_eq!(names.player1, "anne");
    }

    #[test]
    fn winner_from_scores() {
        assert_eq!(GameWinner::from_scores(&PerRole::new(40, 12)), GameWinner::Player1);
        assert_eq!(GameWinner::from_scores(&PerRole::new(3, 12)), GameWinner::Player2);
        assert_eq!(GameWinner::from_scores(&PerRole::new(7, 7)), GameWinner::Tie);
        assert_eq!(serde_json::to_string(&GameWinner::Tie).unwrap(), "\"tie\"");
    }
}
