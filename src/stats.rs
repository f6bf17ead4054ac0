use serde::Deserialize;

const STATS_JSON: &str = include_str!("../assets/stats.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub decimals: u32,
}

pub fn parse_stats(json: &str) -> Result<Vec<Stat>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn load_stats() -> Vec<Stat> {
    match parse_stats(STATS_JSON) {
        Ok(stats) => stats,
        Err(e) => {
            log::error!("Failed to parse showcase stats: {}", e);
            Vec::new()
        }
    }
}
