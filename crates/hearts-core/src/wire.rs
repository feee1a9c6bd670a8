//! Serde encodings for the driver boundary.
//!
//! Cards travel as `(rank, suit)` pairs with `rank` in 2..=14 and
//! `suit` 0=Clubs, 1=Diamonds, 2=Spades, 3=Hearts; seats as integers 0..=3;
//! hands as card lists.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.rank.value(), self.suit as u8).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (rank, suit) = <(u8, u8)>::deserialize(deserializer)?;
        let rank = Rank::from_value(rank)
            .ok_or_else(|| de::Error::custom(format!("rank {rank} out of range 2..=14")))?;
        let suit = Suit::from_index(suit as usize)
            .ok_or_else(|| de::Error::custom(format!("suit {suit} out of range 0..=3")))?;
        Ok(Card::new(rank, suit))
    }
}

impl Serialize for Hand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for card in self.iter() {
            seq.serialize_element(&card)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Hand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cards = Vec::<Card>::deserialize(deserializer)?;
        Ok(cards.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::player::Seat;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn card_round_trips_as_rank_suit_pair() {
        let card = Card::new(Rank::Queen, Suit::Spades);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "[12,2]");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn invalid_wire_card_is_rejected() {
        assert!(serde_json::from_str::<Card>("[1,0]").is_err());
        assert!(serde_json::from_str::<Card>("[10,4]").is_err());
    }

    #[test]
    fn seat_encodes_as_integer() {
        assert_eq!(serde_json::to_string(&Seat::West).unwrap(), "3");
        let seat: Seat = serde_json::from_str("1").unwrap();
        assert_eq!(seat, Seat::East);
        assert!(serde_json::from_str::<Seat>("4").is_err());
    }

    #[test]
    fn hand_round_trips_as_card_list() {
        let hand = Hand::from_cards(&[
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Hearts),
        ]);
        let json = serde_json::to_string(&hand).unwrap();
        let back: Hand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hand);
    }
}
