use log::{debug, trace};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Serialize;

use crate::error::GameError;

pub const DECK_SIZE: usize = 52;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King,
    ];

    /// Face number, 1 for the Ace through 13 for the King.
    pub fn number(&self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }

    /// Hard points: Ace counts 1, tens and faces count 10.
    pub fn points(&self) -> u8 {
        self.number().min(10)
    }

    pub fn is_ace(&self) -> bool {
        matches!(self, Rank::Ace)
    }

    pub fn is_ten_value(&self) -> bool {
        self.number() >= 10
    }

    /// Rank as spelled in card asset names.
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Ace => "ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    face_up: bool,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            face_up: true,
        }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub(crate) fn conceal(&mut self) {
        self.face_up = false;
    }

    pub(crate) fn reveal(&mut self) {
        self.face_up = true;
    }
}

enum DrawOrder {
    Random(SmallRng),
    #[cfg(test)]
    Stacked(Vec<Card>),
}

/// A single 52-card deck drawn without replacement.
pub struct Deck {
    cards: Vec<Card>,
    order: DrawOrder,
}

impl Deck {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let mut deck = Deck {
            cards: Vec::with_capacity(DECK_SIZE),
            order: DrawOrder::Random(rng),
        };
        deck.populate();
        deck
    }

    /// Deck that deals `cards` front to back, refilled with the same
    /// sequence on every `populate`.
    #[cfg(test)]
    pub(crate) fn stacked(cards: Vec<Card>) -> Self {
        let mut deck = Deck {
            cards: Vec::new(),
            order: DrawOrder::Stacked(cards),
        };
        deck.populate();
        deck
    }

    pub fn populate(&mut self) {
        self.cards.clear();
        match &self.order {
            DrawOrder::Random(_) => {
                for suit in Suit::ALL {
                    for rank in Rank::ALL {
                        self.cards.push(Card::new(rank, suit));
                    }
                }
            }
            #[cfg(test)]
            DrawOrder::Stacked(sequence) => self.cards.extend(sequence.iter().copied()),
        }
        debug!("deck populated with {} cards", self.cards.len());
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.cards.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        let card = match &mut self.order {
            DrawOrder::Random(rng) => {
                let index = rng.gen_range(0..self.cards.len());
                self.cards.swap_remove(index)
            }
            #[cfg(test)]
            DrawOrder::Stacked(_) => self.cards.remove(0),
        };
        trace!("drew {:?} of {:?}, {} left", card.rank, card.suit, self.cards.len());
        Ok(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
