use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: Option<bool>,
}

impl ServiceHealth {
    pub fn is_ready(&self) -> bool {
        self.status == "ok" && self.model_loaded.unwrap_or(false)
    }
}
