use log::LevelFilter;
use serde::Deserialize;

fn default_asset_path() -> String {
    "./SVG-cards-1.3/".to_string()
}

fn default_card_back() -> String {
    "card-back.svg".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Options passed in from the page when a table is created.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// Fixed seed for reproducible shuffles; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_asset_path")]
    pub asset_path: String,
    #[serde(default = "default_card_back")]
    pub card_back: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            seed: None,
            asset_path: default_asset_path(),
            card_back: default_card_back(),
            log_level: default_log_level(),
        }
    }
}

impl TableConfig {
    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
