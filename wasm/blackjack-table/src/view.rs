use serde::Serialize;

use crate::{
    config::TableConfig,
    deck::{Card, Rank, Suit},
    game::{BlackjackGame, GameEvent, Outcome, Participant, RoundState, SettleReason, Tally},
    hand::Hand,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub rank: Option<Rank>,
    pub suit: Option<Suit>,
    pub face_up: bool,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandView {
    pub cards: Vec<CardView>,
    pub display_value: String,
    pub value: u8,
    pub blackjack: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventView {
    #[serde(rename_all = "camelCase")]
    CardDealt { owner: Participant, card: CardView },
    #[serde(rename_all = "camelCase")]
    HoleCardRevealed { card: CardView },
    #[serde(rename_all = "camelCase")]
    RoundSettled {
        outcome: Outcome,
        reason: SettleReason,
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub state: RoundState,
    pub player: HandView,
    pub dealer: HandView,
    pub tally: Tally,
    pub message: String,
    pub outcome: Option<Outcome>,
    pub events: Vec<EventView>,
}

/// Maps core values onto what the page renders. Concealed cards never leak
/// their rank or suit.
pub struct Renderer<'a> {
    config: &'a TableConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a TableConfig) -> Self {
        Renderer { config }
    }

    pub fn image_name(&self, card: &Card) -> String {
        if card.is_face_up() {
            format!(
                "{}{}_of_{}.svg",
                self.config.asset_path,
                card.rank().name(),
                card.suit().name()
            )
        } else {
            format!("{}{}", self.config.asset_path, self.config.card_back)
        }
    }

    pub fn card(&self, card: &Card) -> CardView {
        let face_up = card.is_face_up();
        CardView {
            rank: face_up.then(|| card.rank()),
            suit: face_up.then(|| card.suit()),
            face_up,
            image: self.image_name(card),
        }
    }

    pub fn hand(&self, hand: &Hand) -> HandView {
        let blackjack = hand.is_blackjack();
        let display_value = if blackjack {
            "Blackjack!".to_string()
        } else {
            hand.display_value()
        };
        HandView {
            cards: hand.cards().iter().map(|c| self.card(c)).collect(),
            display_value,
            value: hand.value(),
            blackjack,
        }
    }

    pub fn event(&self, event: &GameEvent) -> EventView {
        match event {
            GameEvent::CardDealt { owner, card } => EventView::CardDealt {
                owner: *owner,
                card: self.card(card),
            },
            GameEvent::HoleCardRevealed { card } => EventView::HoleCardRevealed {
                card: self.card(card),
            },
            GameEvent::RoundSettled { outcome, reason } => EventView::RoundSettled {
                outcome: *outcome,
                reason: *reason,
                message: reason.message().to_string(),
            },
        }
    }

    pub fn table(&self, game: &BlackjackGame, events: &[GameEvent]) -> TableView {
        TableView {
            state: game.state(),
            player: self.hand(game.player()),
            dealer: self.hand(game.dealer()),
            tally: game.tally(),
            message: game.message().to_string(),
            outcome: game.outcome(),
            events: events.iter().map(|e| self.event(e)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;

    #[test]
    fn test_image_names() {
        let config = TableConfig::default();
        let renderer = Renderer::new(&config);
        let queen = Card::new(Rank::Queen, Suit::Hearts);
        let seven = Card::new(Rank::Seven, Suit::Clubs);
        assert_eq!(renderer.image_name(&queen), "./SVG-cards-1.3/queen_of_hearts.svg");
        assert_eq!(renderer.image_name(&seven), "./SVG-cards-1.3/7_of_clubs.svg");
    }

    #[test]
    fn test_face_down_card_is_masked() {
        let config = TableConfig {
            asset_path: "/img/".to_string(),
            ..TableConfig::default()
        };
        let renderer = Renderer::new(&config);
        let mut hand = Hand::new();
        hand.append(Card::new(Rank::Nine, Suit::Spades), false);
        hand.append(Card::new(Rank::Ace, Suit::Diamonds), true);

        let view = renderer.hand(&hand);
        assert_eq!(view.cards[1].rank, None);
        assert_eq!(view.cards[1].suit, None);
        assert_eq!(view.cards[1].image, "/img/card-back.svg");
        assert_eq!(view.display_value, "9");
        assert_eq!(view.value, 9);
        assert!(!view.blackjack);
    }

    #[test]
    fn test_dealt_hole_card_identity_not_serialized() {
        let config = TableConfig::default();
        let renderer = Renderer::new(&config);
        let mut game = BlackjackGame::new(Deck::stacked(vec![
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Nine, Suit::Diamonds),
            Card::new(Rank::Six, Suit::Hearts),
            Card::new(Rank::Seven, Suit::Spades),
        ]));
        game.deal().unwrap();
        assert_eq!(game.state(), RoundState::PlayerTurn);

        let json = serde_json::to_value(renderer.table(&game, &[])).unwrap();
        let json = &json["dealer"];
        let hole = &json["cards"][1];
        assert_eq!(hole["faceUp"], false);
        assert!(hole["rank"].is_null());
        assert!(hole["suit"].is_null());
        assert_eq!(hole["image"], "./SVG-cards-1.3/card-back.svg");
        assert!(!json.to_string().contains("seven"));
        assert!(!json.to_string().contains("spades"));
        assert_eq!(json["cards"][0]["rank"], "nine");
        assert_eq!(json["displayValue"], "9");
    }

    #[test]
    fn test_blackjack_display() {
        let config = TableConfig::default();
        let renderer = Renderer::new(&config);
        let mut hand = Hand::new();
        hand.append(Card::new(Rank::Ace, Suit::Spades), false);
        hand.append(Card::new(Rank::Jack, Suit::Spades), false);
        assert_eq!(renderer.hand(&hand).display_value, "Blackjack!");
    }

    #[test]
    fn test_event_json_shape() {
        let config = TableConfig::default();
        let renderer = Renderer::new(&config);
        let event = GameEvent::RoundSettled {
            outcome: Outcome::Loss,
            reason: SettleReason::PlayerBust,
        };
        let json = serde_json::to_value(renderer.event(&event)).unwrap();
        assert_eq!(json["type"], "roundSettled");
        assert_eq!(json["outcome"], "loss");
        assert_eq!(json["reason"], "playerBust");
        assert_eq!(json["message"], "Player bust! Click Deal to play again.");
    }

    #[test]
    fn test_idle_table_view() {
        let config = TableConfig::default();
        let game = BlackjackGame::new(Deck::new(Some(8)));
        let view = Renderer::new(&config).table(&game, &[]);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], "idle");
        assert_eq!(json["tally"]["wins"], 0);
        assert_eq!(json["message"], "Click Deal to start playing!");
        assert!(json["outcome"].is_null());
        assert_eq!(json["player"]["displayValue"], "0");
    }
}
