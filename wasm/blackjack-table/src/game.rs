use std::fmt;

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    deck::{Card, Deck},
    error::GameError,
    hand::{Hand, BLACKJACK},
};

/// The dealer keeps drawing while below this total.
pub const DEALER_STANDS_ON: u8 = 17;

/// Position of the dealer's face-down card in the opening deal.
const HOLE_CARD: usize = 1;

const GREETING: &str = "Click Deal to start playing!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundState {
    Idle,
    PlayerTurn,
    DealerTurn,
    Settled,
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoundState::Idle => "idle",
            RoundState::PlayerTurn => "on the player's turn",
            RoundState::DealerTurn => "on the dealer's turn",
            RoundState::Settled => "settled",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Deal,
    Hit,
    Stand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Deal => "deal",
            Action::Hit => "hit",
            Action::Stand => "stand",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Participant {
    Player,
    Dealer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// Why a round ended, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SettleReason {
    BothBlackjack,
    DealerBlackjack,
    PlayerBlackjack,
    PlayerBust,
    DealerBust,
    PlayerHigher,
    DealerHigher,
    Push,
}

impl SettleReason {
    pub fn outcome(&self) -> Outcome {
        match self {
            SettleReason::PlayerBlackjack | SettleReason::DealerBust | SettleReason::PlayerHigher => {
                Outcome::Win
            }
            SettleReason::DealerBlackjack | SettleReason::PlayerBust | SettleReason::DealerHigher => {
                Outcome::Loss
            }
            SettleReason::BothBlackjack | SettleReason::Push => Outcome::Draw,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SettleReason::BothBlackjack | SettleReason::Push => "Push! Click Deal to play again.",
            SettleReason::DealerBlackjack => "Dealer has blackjack. Click Deal to play again.",
            SettleReason::PlayerBlackjack => "You got Blackjack! Click Deal to play again.",
            SettleReason::PlayerBust => "Player bust! Click Deal to play again.",
            SettleReason::DealerBust => "Dealer bust. You won! Click Deal to play again.",
            SettleReason::PlayerHigher => "You won! Click Deal to play again.",
            SettleReason::DealerHigher => "You lost! Click Deal to play again.",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Tally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    #[cfg(test)]
    pub(crate) fn rounds(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CardDealt { owner: Participant, card: Card },
    HoleCardRevealed { card: Card },
    RoundSettled { outcome: Outcome, reason: SettleReason },
}

/// What a command did: the state it left the round in and the events it
/// produced, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: RoundState,
    pub events: Vec<GameEvent>,
    pub outcome: Option<Outcome>,
}

pub struct BlackjackGame {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    state: RoundState,
    settlement: Option<SettleReason>,
    tally: Tally,
}

impl BlackjackGame {
    pub fn new(deck: Deck) -> Self {
        BlackjackGame {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            state: RoundState::Idle,
            settlement: None,
            tally: Tally::default(),
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn settlement(&self) -> Option<SettleReason> {
        self.settlement
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.settlement.map(|reason| reason.outcome())
    }

    pub fn message(&self) -> &'static str {
        match (self.state, self.settlement) {
            (_, Some(reason)) => reason.message(),
            (RoundState::Idle, None) => GREETING,
            _ => "",
        }
    }

    pub fn deal(&mut self) -> Result<Transition, GameError> {
        if !matches!(self.state, RoundState::Idle | RoundState::Settled) {
            return Err(self.reject(Action::Deal));
        }

        self.deck.populate();
        self.player.reset();
        self.dealer.reset();
        self.settlement = None;

        let mut events = Vec::with_capacity(4);
        self.deal_to(Participant::Player, false, &mut events)?;
        self.deal_to(Participant::Dealer, false, &mut events)?;
        self.deal_to(Participant::Player, false, &mut events)?;
        self.deal_to(Participant::Dealer, true, &mut events)?;
        self.state = RoundState::PlayerTurn;
        info!("new round dealt, player showing {}", self.player.display_value());

        // The dealer peeks under the hole card for a natural.
        let natural = match (self.player.is_blackjack(), self.dealer.is_natural()) {
            (true, true) => Some(SettleReason::BothBlackjack),
            (false, true) => Some(SettleReason::DealerBlackjack),
            (true, false) => Some(SettleReason::PlayerBlackjack),
            (false, false) => None,
        };
        if let Some(reason) = natural {
            self.settle(reason, &mut events)?;
        }

        Ok(self.transition(events))
    }

    pub fn hit(&mut self) -> Result<Transition, GameError> {
        if self.state != RoundState::PlayerTurn {
            return Err(self.reject(Action::Hit));
        }

        let mut events = Vec::new();
        self.deal_to(Participant::Player, false, &mut events)?;
        let value = self.player.value();
        if value > BLACKJACK {
            self.settle(SettleReason::PlayerBust, &mut events)?;
        } else if value == BLACKJACK {
            debug!("player reached {}, standing", BLACKJACK);
            self.play_dealer(&mut events)?;
        }

        Ok(self.transition(events))
    }

    pub fn stand(&mut self) -> Result<Transition, GameError> {
        if self.state != RoundState::PlayerTurn {
            return Err(self.reject(Action::Stand));
        }

        let mut events = Vec::new();
        self.play_dealer(&mut events)?;
        Ok(self.transition(events))
    }

    fn reject(&self, action: Action) -> GameError {
        warn!("rejected {} while {}", action, self.state);
        GameError::InvalidAction {
            action,
            state: self.state,
        }
    }

    fn transition(&self, events: Vec<GameEvent>) -> Transition {
        Transition {
            state: self.state,
            events,
            outcome: self.outcome(),
        }
    }

    fn deal_to(
        &mut self,
        owner: Participant,
        face_down: bool,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let card = self.deck.draw()?;
        let hand = match owner {
            Participant::Player => &mut self.player,
            Participant::Dealer => &mut self.dealer,
        };
        hand.append(card, face_down);
        let card = hand.cards()[hand.len() - 1];
        debug!("{:?} dealt {:?}, face up: {}", owner, card, card.is_face_up());
        events.push(GameEvent::CardDealt { owner, card });
        Ok(())
    }

    fn reveal_hole_card(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let hidden = self
            .dealer
            .cards()
            .get(HOLE_CARD)
            .map_or(false, |card| !card.is_face_up());
        if hidden {
            let card = self.dealer.reveal(HOLE_CARD)?;
            debug!("hole card revealed: {:?}", card);
            events.push(GameEvent::HoleCardRevealed { card });
        }
        Ok(())
    }

    fn play_dealer(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let resumed = self.state;
        self.state = RoundState::DealerTurn;
        if let Err(err) = self.draw_dealer(events) {
            warn!("dealer turn aborted: {}", err);
            self.state = resumed;
            return Err(err);
        }

        let dealer = self.dealer.value();
        let player = self.player.value();
        let reason = if dealer > BLACKJACK {
            SettleReason::DealerBust
        } else if player > dealer {
            SettleReason::PlayerHigher
        } else if player == dealer {
            SettleReason::Push
        } else {
            SettleReason::DealerHigher
        };
        self.settle(reason, events)
    }

    fn draw_dealer(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.reveal_hole_card(events)?;
        while self.dealer.value() < DEALER_STANDS_ON {
            self.deal_to(Participant::Dealer, false, events)?;
        }
        Ok(())
    }

    fn settle(&mut self, reason: SettleReason, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.reveal_hole_card(events)?;
        let outcome = reason.outcome();
        self.tally.record(outcome);
        self.settlement = Some(reason);
        self.state = RoundState::Settled;
        info!(
            "round settled: {:?} ({:?}), player {} dealer {}, tally {}/{}/{}",
            outcome,
            reason,
            self.player.value(),
            self.dealer.value(),
            self.tally.wins,
            self.tally.losses,
            self.tally.draws
        );
        events.push(GameEvent::RoundSettled { outcome, reason });
        Ok(())
    }
}
