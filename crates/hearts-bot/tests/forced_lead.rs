use mchearts_bot::{MonteCarloBot, TableState};
use mchearts_core::model::card::Card;
use mchearts_core::model::hand::Hand;
use mchearts_core::model::rank::Rank;
use mchearts_core::model::suit::Suit;

#[test]
fn holder_of_the_two_of_clubs_always_opens_with_it() {
    let own = Hand::from_cards(&[
        Card::two_of_clubs(),
        Card::new(Rank::Seven, Suit::Diamonds),
        Card::queen_of_spades(),
        Card::new(Rank::Ace, Suit::Hearts),
        Card::new(Rank::Five, Suit::Clubs),
        Card::new(Rank::Ten, Suit::Clubs),
        Card::new(Rank::Jack, Suit::Diamonds),
        Card::new(Rank::Queen, Suit::Diamonds),
        Card::new(Rank::Three, Suit::Spades),
        Card::new(Rank::Nine, Suit::Spades),
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Four, Suit::Hearts),
        Card::new(Rank::Ten, Suit::Hearts),
    ]);

    for n_samples in [1usize, 50, 2000] {
        let mut bot = MonteCarloBot::create(Some(7), n_samples);
        bot.init_beliefs(own, &[]);
        let table = TableState::new(own, Vec::new(), false, true);
        let card = bot.play_card(&table).expect("decision succeeds");
        assert_eq!(card, Card::two_of_clubs(), "n_samples={n_samples}");
    }
}
