use std::time::Duration;

use auction_war::card_game::deck::build_deck;
use auction_war::domain::{Card, GameWinner, Rank, Role, Seat};
use auction_war::game::{RoomRegistry, RoomSession};
use auction_war::models::{Delivery, RoomMessage, ServerEvent};
use auction_war::shared::{RoomConfig, MAX_ROUNDS};
use auction_war::GameError;

async fn next_event(session: &mut RoomSession) -> RoomMessage {
    tokio::time::timeout(Duration::from_secs(60), session.events.recv())
        .await
        .expect("timed out waiting for room event")
        .expect("room channel closed")
}

/// Next event addressed to this session's seat.
async fn next_for_seat(session: &mut RoomSession) -> ServerEvent {
    loop {
        let message = next_event(session).await;
        if message.delivery.includes(session.role) {
            return message.event;
        }
    }
}

/// Skips the earlier round events the guest has not read yet.
async fn wait_for_opponent_bid(session: &mut RoomSession) {
    while next_for_seat(session).await != ServerEvent::OpponentBid {}
}

fn score(cards: &[Card]) -> u32 {
    cards.iter().map(Card::value).sum()
}

#[tokio::test(start_paused = true)]
async fn full_game_between_two_players() {
    let registry = RoomRegistry::new(RoomConfig::default());
    let mut host = registry.create_room(Seat::new("conn-a", "alice"));
    let room_id = host.handle.room_id().to_string();
    let mut guest = registry.join_room(&room_id, Seat::new("conn-b", "bob")).await.unwrap();

    let deck = build_deck();
    let ServerEvent::GameStarted { players, hands, current_auction_card, .. } = next_for_seat(&mut host).await else {
        panic!("expected gameStarted");
    };
    assert_eq!(players.player1, "alice");
    assert_eq!(players.player2, "bob");
    assert_eq!(hands.player1[0], deck[0]);
    assert_eq!(hands.player2[0], deck[13]);
    assert!(matches!(next_for_seat(&mut guest).await, ServerEvent::GameStarted { .. }));

    let mut auctioned = vec![current_auction_card];
    let mut won_by_player2 = Vec::new();

    for round in 0..MAX_ROUNDS {
        // Opening round: 5♠ against 9♥. Afterwards both lead their lowest card.
        let (p1_index, p2_index) = if round == 0 { (3, 7) } else { (0, 0) };

        host.handle.place_bid(Role::Player1, p1_index).await;
        wait_for_opponent_bid(&mut guest).await;
        guest.handle.place_bid(Role::Player2, p2_index).await;

        let ServerEvent::BidResults { bids, winner, card, cards_history, .. } = next_for_seat(&mut host).await else {
            panic!("expected bidResults in round {round}");
        };
        assert_eq!(card, *auctioned.last().unwrap());
        if round == 0 {
            assert_eq!(bids.player1.card.rank, Rank::Five);
            assert_eq!(bids.player2.card.rank, Rank::Nine);
            assert_eq!(winner, Role::Player2);
        }
        if winner == Role::Player2 {
            won_by_player2.push(card);
        }
        assert_eq!(cards_history.player1.len() + cards_history.player2.len(), round + 1);
        assert_eq!(cards_history.player2, won_by_player2);

        match next_for_seat(&mut host).await {
            ServerEvent::NewRound { round: number, current_auction_card } => {
                assert_eq!(number, round + 2);
                assert!(!auctioned.contains(&current_auction_card));
                auctioned.push(current_auction_card);
            }
            ServerEvent::GameOver { collections, scores, winner } => {
                assert_eq!(round + 1, MAX_ROUNDS);
                assert_eq!(collections.player1.len() + collections.player2.len(), MAX_ROUNDS);
                assert_eq!(collections.player2, won_by_player2);
                assert_eq!(scores.player1, score(&collections.player1));
                assert_eq!(scores.player2, score(&collections.player2));
                assert_eq!(winner, GameWinner::from_scores(&scores));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    assert_eq!(auctioned.len(), MAX_ROUNDS);
    // Finished rooms stay registered until someone leaves.
    assert!(registry.lookup(&room_id).is_some());
}

#[tokio::test]
async fn disconnect_tears_the_room_down() {
    let registry = RoomRegistry::default();
    let host = registry.create_room(Seat::new("conn-a", "alice"));
    let room_id = host.handle.room_id().to_string();
    let mut guest = registry.join_room(&room_id, Seat::new("conn-b", "bob")).await.unwrap();
    assert!(matches!(next_for_seat(&mut guest).await, ServerEvent::GameStarted { .. }));

    registry.remove_room(&room_id);
    host.handle.disconnect(Role::Player1).await;

    let message = next_event(&mut guest).await;
    assert_eq!(message.delivery, Delivery::AllExcept(Role::Player1));
    assert_eq!(message.event, ServerEvent::PlayerDisconnected { player: Role::Player1 });

    let err = registry.join_room(&room_id, Seat::new("conn-c", "carol")).await.unwrap_err();
    assert_eq!(err, GameError::RoomNotFound);
}

#[tokio::test]
async fn waiting_room_disconnect_is_not_joinable() {
    let registry = RoomRegistry::default();
    let host = registry.create_room(Seat::new("conn-a", "alice"));
    let room_id = host.handle.room_id().to_string();

    registry.remove_room(&room_id);
    host.handle.disconnect(Role::Player1).await;

    let err = registry.join_room(&room_id, Seat::new("conn-b", "bob")).await.unwrap_err();
    assert_eq!(err, GameError::RoomNotFound);
}
