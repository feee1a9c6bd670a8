//! Probabilistic ownership tracking for the cards the bot cannot see.

use crate::belief::reconcile;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::{Suit, SuitMask};
use crate::model::trick::Trick;
use tracing::{debug, warn};

/// Per-card probability mass over the three opponent seats, together with the
/// hard constraints the mass must respect: proven voids, per-seat hand counts
/// and cards whose owner is certain (known passes).
#[derive(Debug, Clone)]
pub struct Belief {
    perspective: Seat,
    own: Hand,
    unseen: Hand,
    pinned: [Hand; 4],
    probs: [[f64; 52]; 4],
    voids: [SuitMask; 4],
    remaining: [u8; 4],
}

impl Belief {
    /// Builds the round-start belief from the bot's own hand and any cards it
    /// knows it passed to specific seats.
    pub fn new(perspective: Seat, own_hand: Hand, passes: &[(Seat, Hand)]) -> Self {
        let unseen = Hand::FULL_DECK.minus(own_hand);
        let mut remaining = [0u8; 4];
        remaining[perspective.index()] = own_hand.len() as u8;

        let opponents = opponents_of(perspective);
        let share = unseen.len() / 3;
        let extra = unseen.len() % 3;
        for (i, seat) in opponents.iter().enumerate() {
            remaining[seat.index()] = (share + usize::from(i < extra)) as u8;
        }

        let mut pinned = [Hand::EMPTY; 4];
        for &(seat, cards) in passes {
            if seat != perspective {
                pinned[seat.index()] = pinned[seat.index()].union(cards.intersect(unseen));
            }
        }

        let mut belief = Self {
            perspective,
            own: own_hand,
            unseen,
            pinned,
            probs: [[0.0; 52]; 4],
            voids: [SuitMask::EMPTY; 4],
            remaining,
        };
        belief.reseed_free_cells();
        belief.reconcile();
        belief
    }

    /// Rehydrates a belief mid-round from explicit counts, e.g. when the bot
    /// is attached to a game already underway.
    pub fn from_partial(perspective: Seat, own_hand: Hand, seen: Hand, remaining: [u8; 4]) -> Self {
        let unseen = Hand::FULL_DECK.minus(own_hand).minus(seen);
        let mut belief = Self {
            perspective,
            own: own_hand,
            unseen,
            pinned: [Hand::EMPTY; 4],
            probs: [[0.0; 52]; 4],
            voids: [SuitMask::EMPTY; 4],
            remaining,
        };
        belief.reseed_free_cells();
        belief.reconcile();
        belief
    }

    pub fn perspective(&self) -> Seat {
        self.perspective
    }

    pub fn own(&self) -> Hand {
        self.own
    }

    pub fn unseen(&self) -> Hand {
        self.unseen
    }

    pub fn pinned(&self, seat: Seat) -> Hand {
        self.pinned[seat.index()]
    }

    pub fn remaining(&self, seat: Seat) -> u8 {
        self.remaining[seat.index()]
    }

    pub fn is_void(&self, seat: Seat, suit: Suit) -> bool {
        self.voids[seat.index()].contains(suit)
    }

    /// Probability that `card` sits in `seat`'s hand.
    pub fn prob(&self, card: Card, seat: Seat) -> f64 {
        if seat == self.perspective {
            return if self.own.contains(card) { 1.0 } else { 0.0 };
        }
        self.probs[seat.index()][card.to_id() as usize]
    }

    /// Opponent seats in turn order after the perspective.
    pub fn opponents(&self) -> [Seat; 3] {
        opponents_of(self.perspective)
    }

    /// Applies one observed play. `lead_suit` is the suit led on the trick the
    /// play belongs to (None when `seat` is leading).
    pub fn on_play(&mut self, seat: Seat, card: Card, lead_suit: Option<Suit>) {
        if seat == self.perspective {
            if self.own.remove(card) {
                self.remaining[seat.index()] = self.remaining[seat.index()].saturating_sub(1);
            } else {
                warn!(%card, "own play of a card not tracked in hand");
            }
            return;
        }

        // A play out of a proven void contradicts the void, not the play.
        if self.voids[seat.index()].contains(card.suit) {
            warn!(%seat, %card, "observed play from a voided suit; dropping the void");
            self.unset_void(seat, card.suit);
        }

        if self.own.contains(card) {
            // The observation wins: the card was never ours to begin with.
            warn!(%seat, %card, "observed opponent playing a card tracked as ours");
            self.own.remove(card);
            self.remaining[self.perspective.index()] =
                self.remaining[self.perspective.index()].saturating_sub(1);
        } else if self.unseen.contains(card) {
            self.unseen.remove(card);
            for hand in &mut self.pinned {
                hand.remove(card);
            }
            self.zero_card(card);
            self.remaining[seat.index()] = self.remaining[seat.index()].saturating_sub(1);
        } else {
            warn!(%seat, %card, "duplicate observation of an already seen card");
        }

        if let Some(lead) = lead_suit
            && card.suit != lead
        {
            self.mark_void(seat, lead);
        }

        self.reconcile();
    }

    /// Stable hook for drivers; all inference happens per play.
    pub fn on_trick_complete(&mut self, _trick: &Trick) {}

    /// Records a proven void: zeroes the seat's mass on every unseen card of
    /// the suit. Monotone except under illegal-observation recovery.
    pub fn mark_void(&mut self, seat: Seat, suit: Suit) {
        if seat == self.perspective || self.voids[seat.index()].contains(suit) {
            return;
        }
        self.voids[seat.index()] = self.voids[seat.index()].with(suit);
        let pinned_here = self.pinned[seat.index()].of_suit(suit);
        if !pinned_here.is_empty() {
            warn!(%seat, %suit, "void contradicts cards known to be passed to the seat");
        }
        for card in self.unseen.of_suit(suit).minus(pinned_here).iter() {
            self.probs[seat.index()][card.to_id() as usize] = 0.0;
        }
        self.reconcile();
    }

    /// Drops every inferred constraint, keeping only seen cards and known
    /// passes. Last-resort recovery when sampling cannot find any world.
    pub fn reset_soft(&mut self) {
        warn!("resetting belief to hard constraints only");
        self.voids = [SuitMask::EMPTY; 4];
        self.reseed_free_cells();
        self.reconcile();
    }

    fn unset_void(&mut self, seat: Seat, suit: Suit) {
        self.voids[seat.index()] = self.voids[seat.index()].without(suit);
        let seed = 1.0 / 3.0;
        for card in self.free_cards().of_suit(suit).iter() {
            self.probs[seat.index()][card.to_id() as usize] = seed;
        }
    }

    fn zero_card(&mut self, card: Card) {
        let id = card.to_id() as usize;
        for row in &mut self.probs {
            row[id] = 0.0;
        }
    }

    fn free_cards(&self) -> Hand {
        let pinned_union = self
            .pinned
            .iter()
            .fold(Hand::EMPTY, |acc, hand| acc.union(*hand));
        self.unseen.minus(pinned_union)
    }

    fn reseed_free_cells(&mut self) {
        let opponents = self.opponents();
        for seat in opponents {
            for card in self.pinned[seat.index()].iter() {
                let id = card.to_id() as usize;
                for other in opponents {
                    self.probs[other.index()][id] = 0.0;
                }
                self.probs[seat.index()][id] = 1.0;
            }
        }

        let free = self.free_cards();
        for card in free.iter() {
            let id = card.to_id() as usize;
            let mut weights = [0.0f64; 4];
            let mut total = 0.0;
            for seat in opponents {
                if self.voids[seat.index()].contains(card.suit) {
                    continue;
                }
                let quota = f64::from(self.remaining[seat.index()])
                    - self.pinned[seat.index()].len() as f64;
                if quota > 0.0 {
                    weights[seat.index()] = quota;
                    total += quota;
                }
            }
            for seat in opponents {
                self.probs[seat.index()][id] = if total > 0.0 {
                    weights[seat.index()] / total
                } else {
                    0.0
                };
            }
        }
    }

    fn reconcile(&mut self) {
        let opponents = self.opponents();
        let free = self.free_cards();
        let mut targets = [0.0f64; 4];
        for seat in opponents {
            targets[seat.index()] =
                f64::from(self.remaining[seat.index()]) - self.pinned[seat.index()].len() as f64;
        }
        let converged = reconcile::fit_marginals(&mut self.probs, free, opponents, targets);
        if !converged {
            debug!("marginal reconciliation did not converge within the iteration cap");
        }
    }
}

fn opponents_of(perspective: Seat) -> [Seat; 3] {
    let a = perspective.next();
    let b = a.next();
    let c = b.next();
    [a, b, c]
}
