use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

mod config;
mod deck;
mod error;
mod game;
mod hand;
mod logger;
mod view;

pub use config::TableConfig;
pub use deck::{Card, Deck, Rank, Suit, DECK_SIZE};
pub use error::GameError;
pub use game::{
    Action, BlackjackGame, GameEvent, Outcome, Participant, RoundState, SettleReason, Tally,
    Transition, DEALER_STANDS_ON,
};
pub use hand::{Hand, BLACKJACK};
pub use view::{CardView, EventView, HandView, Renderer, TableView};

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

/// A single-player table driven by the page's Deal, Hit and Stand controls.
#[wasm_bindgen]
pub struct BlackjackTable {
    game: BlackjackGame,
    config: TableConfig,
    listener: Option<Function>,
}

#[wasm_bindgen]
impl BlackjackTable {
    #[wasm_bindgen(constructor)]
    pub fn new(params: &JsValue) -> Result<BlackjackTable, JsValue> {
        console_error_panic_hook::set_once();
        let config: TableConfig = if params.is_undefined() || params.is_null() {
            TableConfig::default()
        } else {
            serde_wasm_bindgen::from_value(params.clone())
                .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?
        };
        logger::init(config.level_filter());
        log::info!("table opened, seed {:?}", config.seed);

        Ok(BlackjackTable {
            game: BlackjackGame::new(Deck::new(config.seed)),
            config,
            listener: None,
        })
    }

    /// Called once per event with a plain object tagged by `type`.
    pub fn set_event_listener(&mut self, listener: Function) {
        self.listener = Some(listener);
    }

    pub fn clear_event_listener(&mut self) {
        self.listener = None;
    }

    pub fn deal(&mut self) -> Result<JsValue, JsValue> {
        let result = self.game.deal();
        self.apply(result)
    }

    pub fn hit(&mut self) -> Result<JsValue, JsValue> {
        let result = self.game.hit();
        self.apply(result)
    }

    pub fn stand(&mut self) -> Result<JsValue, JsValue> {
        let result = self.game.stand();
        self.apply(result)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.state())
    }

    pub fn player_hand(&self) -> Result<JsValue, JsValue> {
        to_js(&self.renderer().hand(self.game.player()))
    }

    pub fn dealer_hand(&self) -> Result<JsValue, JsValue> {
        to_js(&self.renderer().hand(self.game.dealer()))
    }

    pub fn tally(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.tally())
    }

    pub fn message(&self) -> String {
        self.game.message().to_string()
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.renderer().table(&self.game, &[]))
    }
}

impl BlackjackTable {
    fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.config)
    }

    fn apply(&self, result: Result<Transition, GameError>) -> Result<JsValue, JsValue> {
        let transition = result.map_err(|err| JsValue::from_str(&err.to_string()))?;
        let view = self.renderer().table(&self.game, &transition.events);

        if let Some(listener) = &self.listener {
            for event in &view.events {
                let payload = to_js(event)?;
                let _ = listener.call1(&JsValue::NULL, &payload);
            }
        }

        to_js(&view)
    }
}
