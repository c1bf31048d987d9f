use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_URL: &str = "http://localhost:5000/data";
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    pub data_url: String,
    pub items_per_page: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}
