//! With an already-expired deadline the decision still returns a legal card,
//! backed by at least one simulated sample per candidate.

use mchearts_bot::{BotConfig, MonteCarloBot, TableState};
use mchearts_core::model::card::Card;
use mchearts_core::model::hand::Hand;
use mchearts_core::model::player::Seat;
use mchearts_core::model::rank::Rank;
use mchearts_core::model::suit::Suit;
use mchearts_core::model::trick::Trick;
use std::time::Duration;

#[test]
fn expired_deadline_still_yields_a_legal_card() {
    let own = Hand::from_cards(&[
        Card::new(Rank::Three, Suit::Clubs),
        Card::new(Rank::Eight, Suit::Clubs),
        Card::new(Rank::Queen, Suit::Clubs),
        Card::new(Rank::Two, Suit::Diamonds),
        Card::new(Rank::Six, Suit::Diamonds),
        Card::new(Rank::Ten, Suit::Diamonds),
        Card::new(Rank::Three, Suit::Spades),
        Card::new(Rank::Nine, Suit::Spades),
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Two, Suit::Hearts),
        Card::new(Rank::Seven, Suit::Hearts),
        Card::new(Rank::Jack, Suit::Hearts),
        Card::new(Rank::Ace, Suit::Hearts),
    ]);

    let config = BotConfig::default()
        .with_seed(5)
        .with_n_samples(1_000_000)
        .with_deadline(Duration::ZERO);
    let mut bot = MonteCarloBot::new(config);
    bot.init_beliefs(own, &[]);

    let plays = [
        (Seat::East, Card::two_of_clubs()),
        (Seat::South, Card::new(Rank::Nine, Suit::Clubs)),
        (Seat::West, Card::new(Rank::King, Suit::Clubs)),
        (Seat::North, Card::new(Rank::Three, Suit::Clubs)),
    ];
    let mut trick = Trick::new(Seat::East);
    for (seat, card) in plays {
        bot.observe_play(seat, card);
        trick.play(seat, card).unwrap();
    }
    bot.observe_trick_complete(&trick);
    bot.observe_play(Seat::West, Card::new(Rank::Four, Suit::Diamonds));

    let mut own_now = own;
    own_now.remove(Card::new(Rank::Three, Suit::Clubs));
    let table = TableState::new(
        own_now,
        vec![(Seat::West, Card::new(Rank::Four, Suit::Diamonds))],
        false,
        false,
    );

    let card = bot.play_card(&table).expect("decision succeeds");
    assert_eq!(card.suit, Suit::Diamonds, "must follow the diamond lead");
}
