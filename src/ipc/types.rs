use crate::config::GradebookConfig;
use crate::gradebook::Gradebook;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub config: GradebookConfig,
    pub book: Gradebook,
}

impl AppState {
    pub fn new(config: GradebookConfig) -> Self {
        let book = config.build();
        Self { config, book }
    }
}
