#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub step_ms: u64,
    pub total_ms: u64,
    pub start_price: f64,
}

impl GameConfig {
    pub fn max_steps(&self) -> u64 {
        self.total_ms / self.step_ms
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            step_ms: 500,
            total_ms: 20_000,
            start_price: 100.0,
        }
    }
}
