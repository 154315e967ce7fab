/// Search budget and schedule constants.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub attempts: u32,
    pub anneal_steps: u32,
    pub min_temperature: f64,
    /// Chance of drawing from evolution-tagged candidates when evolutions are preferred.
    pub evo_bias: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            attempts: 40,
            anneal_steps: 1200,
            min_temperature: 0.0001,
            evo_bias: 0.6,
        }
    }
}
