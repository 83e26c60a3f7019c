use crate::{deck::Card, error::GameError};

pub const BLACKJACK: u8 = 21;

/// Extra points an Ace earns when counted as 11.
const SOFT_BONUS: u8 = 10;

/// Cards held by one participant. Totals are recomputed from the face-up
/// cards on every query; concealed cards count for nothing until revealed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn append(&mut self, mut card: Card, face_down: bool) {
        if face_down {
            card.conceal();
        }
        self.cards.push(card);
    }

    pub fn reveal(&mut self, index: usize) -> Result<Card, GameError> {
        let len = self.cards.len();
        let card = self
            .cards
            .get_mut(index)
            .ok_or(GameError::InvalidCardIndex { index, len })?;
        card.reveal();
        Ok(*card)
    }

    pub fn reset(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn has_hidden(&self) -> bool {
        self.cards.iter().any(|c| !c.is_face_up())
    }

    fn face_up(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_face_up())
    }

    pub fn hard_value(&self) -> u8 {
        self.face_up().map(|c| c.rank().points()).sum()
    }

    /// Hard value with a single face-up Ace lifted to 11, when that stays
    /// within 21. Otherwise equal to the hard value.
    pub fn soft_value(&self) -> u8 {
        let hard = self.hard_value();
        let has_ace = self.face_up().any(|c| c.rank().is_ace());
        if has_ace && hard + SOFT_BONUS <= BLACKJACK {
            hard + SOFT_BONUS
        } else {
            hard
        }
    }

    /// Effective total used for bust and comparison decisions.
    pub fn value(&self) -> u8 {
        let hard = self.hard_value();
        let soft = self.soft_value();
        if soft > hard && soft <= BLACKJACK {
            soft
        } else {
            hard
        }
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Ace plus a ten-value card as the only two cards, whether or not
    /// either is concealed.
    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2
            && self.cards.iter().any(|c| c.rank().is_ace())
            && self.cards.iter().any(|c| c.rank().is_ten_value())
    }

    pub fn is_blackjack(&self) -> bool {
        self.is_natural() && !self.has_hidden()
    }

    /// `"hard / soft"` while an Ace can still count as 11, otherwise the
    /// hard total.
    pub fn display_value(&self) -> String {
        let hard = self.hard_value();
        let soft = self.soft_value();
        if soft > hard && soft <= BLACKJACK {
            format!("{} / {}", hard, soft)
        } else {
            hard.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Rank, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.append(Card::new(rank, Suit::Hearts), false);
        }
        hand
    }

    #[test]
    fn test_ace_king_is_blackjack() {
        let hand = hand_of(&[Rank::Ace, Rank::King]);
        assert_eq!(hand.hard_value(), 11);
        assert_eq!(hand.soft_value(), 21);
        assert_eq!(hand.value(), 21);
        assert!(hand.is_blackjack());
    }

    #[test]
    fn test_two_aces_and_nine() {
        let hand = hand_of(&[Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(hand.hard_value(), 11);
        assert_eq!(hand.soft_value(), 21);
        assert_eq!(hand.value(), 21);
        assert!(!hand.is_blackjack());
    }

    #[test]
    fn test_bust_without_ace() {
        let hand = hand_of(&[Rank::Ten, Rank::Seven, Rank::Five]);
        assert_eq!(hand.hard_value(), 22);
        assert_eq!(hand.soft_value(), 22);
        assert_eq!(hand.value(), 22);
        assert!(hand.is_bust());
    }

    #[test]
    fn test_ace_goes_hard_when_soft_would_bust() {
        let hand = hand_of(&[Rank::Ace, Rank::Six, Rank::Nine]);
        assert_eq!(hand.hard_value(), 16);
        assert_eq!(hand.value(), 16);
        assert_eq!(hand.display_value(), "16");
    }

    #[test]
    fn test_face_down_ace_ignored_until_revealed() {
        let mut hand = Hand::new();
        hand.append(Card::new(Rank::Ace, Suit::Clubs), true);
        hand.append(Card::new(Rank::Five, Suit::Clubs), false);
        assert_eq!(hand.hard_value(), 5);
        assert_eq!(hand.value(), 5);
        assert!(hand.has_hidden());

        let revealed = hand.reveal(0).unwrap();
        assert_eq!(revealed.rank(), Rank::Ace);
        assert!(revealed.is_face_up());
        assert_eq!(hand.value(), 16);
    }

    #[test]
    fn test_reveal_out_of_range() {
        let mut hand = hand_of(&[Rank::Two]);
        assert_eq!(
            hand.reveal(3),
            Err(GameError::InvalidCardIndex { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_concealed_natural_is_not_blackjack() {
        let mut hand = Hand::new();
        hand.append(Card::new(Rank::Queen, Suit::Spades), false);
        hand.append(Card::new(Rank::Ace, Suit::Spades), true);
        assert!(hand.is_natural());
        assert!(!hand.is_blackjack());
        hand.reveal(1).unwrap();
        assert!(hand.is_blackjack());
    }

    #[test]
    fn test_three_card_21_is_not_blackjack() {
        let hand = hand_of(&[Rank::Seven, Rank::Seven, Rank::Seven]);
        assert_eq!(hand.value(), 21);
        assert!(!hand.is_blackjack());
    }

    #[test]
    fn test_reset_twice() {
        let mut hand = hand_of(&[Rank::Ace, Rank::King]);
        hand.reset();
        assert!(hand.is_empty());
        assert_eq!(hand.value(), 0);
        hand.reset();
        assert!(hand.is_empty());
        assert_eq!(hand.value(), 0);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(hand_of(&[Rank::Ace, Rank::Six]).display_value(), "7 / 17");
        assert_eq!(hand_of(&[Rank::Ten, Rank::Six]).display_value(), "16");
        assert_eq!(hand_of(&[Rank::Ace, Rank::King]).display_value(), "11 / 21");
        assert_eq!(Hand::new().display_value(), "0");
    }
}
