//! A constructed round where East sweeps every point: the simulator must hand
//! back penalties that transform to shooter 0, everyone else 26.

use mchearts_bot::bot::sim::play_out;
use mchearts_core::model::card::Card;
use mchearts_core::model::hand::Hand;
use mchearts_core::model::player::Seat;
use mchearts_core::model::rank::Rank;
use mchearts_core::model::round::RoundState;
use mchearts_core::model::suit::Suit;
use mchearts_core::model::trick::Trick;
use mchearts_core::score;

fn trick_of(leader: Seat, cards: [Card; 4]) -> Trick {
    let mut trick = Trick::new(leader);
    let mut seat = leader;
    for card in cards {
        trick.play(seat, card).unwrap();
        seat = seat.next();
    }
    trick
}

/// Twelve completed tricks: the opening club trick, then East winning every
/// point card with diamond leads while the others shed hearts, the Queen and
/// leftovers.
fn sweep_history() -> Vec<Trick> {
    let mut history = vec![trick_of(
        Seat::North,
        [
            Card::two_of_clubs(),
            Card::new(Rank::Ace, Suit::Clubs),
            Card::new(Rank::Three, Suit::Clubs),
            Card::new(Rank::Four, Suit::Clubs),
        ],
    )];

    let east_leads: Vec<Card> = [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
    ]
    .into_iter()
    .map(|rank| Card::new(rank, Suit::Diamonds))
    .collect();

    // Cards shed by the other three seats: every heart above four, the Queen
    // of Spades, then harmless filler.
    let mut pool: Vec<Card> = Vec::new();
    for rank in [
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ] {
        pool.push(Card::new(rank, Suit::Hearts));
    }
    pool.push(Card::queen_of_spades());
    for rank in [
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ] {
        pool.push(Card::new(rank, Suit::Clubs));
    }
    for rank in Rank::ORDERED {
        if rank != Rank::Queen {
            pool.push(Card::new(rank, Suit::Spades));
        }
    }
    pool.push(Card::new(Rank::Two, Suit::Diamonds));
    pool.push(Card::new(Rank::Three, Suit::Diamonds));
    assert_eq!(pool.len(), 33);

    let mut shed = pool.into_iter();
    for lead in east_leads {
        history.push(trick_of(
            Seat::East,
            [
                lead,
                shed.next().unwrap(),
                shed.next().unwrap(),
                shed.next().unwrap(),
            ],
        ));
    }
    history
}

#[test]
fn sweeping_every_point_triggers_the_moon_transform() {
    let mut hands = [Hand::EMPTY; 4];
    hands[Seat::North.index()].add(Card::new(Rank::Two, Suit::Hearts));
    hands[Seat::East.index()].add(Card::new(Rank::Ace, Suit::Hearts));
    hands[Seat::South.index()].add(Card::new(Rank::Three, Suit::Hearts));
    hands[Seat::West.index()].add(Card::new(Rank::Four, Suit::Hearts));

    let mut round =
        RoundState::from_partial(hands, Trick::new(Seat::East), sweep_history(), true);
    let penalties = play_out(&mut round).expect("round plays out");

    assert_eq!(penalties[Seat::East.index()], 26);
    let total: u16 = penalties.iter().map(|&p| u16::from(p)).sum();
    assert_eq!(total, 26);

    let scores = score::round_points(penalties);
    assert_eq!(scores[Seat::East.index()], 0);
    for seat in [Seat::North, Seat::South, Seat::West] {
        assert_eq!(scores[seat.index()], 26);
    }
}
