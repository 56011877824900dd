use super::{EvolutionStrategy, FeatureVector};
use blockagotchi_data::SubType;

/// Food count that decides a juvenile line.
pub const LINE_THRESHOLD: u32 = 5;
/// Food count that unlocks the rarer adult forms.
pub const REFINE_THRESHOLD: u32 = 10;

/// Hand-tuned counting rules over the food history.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    fn pick(features: &FeatureVector, candidates: &[SubType]) -> Option<SubType> {
        let first = *candidates.first()?;
        // Juvenile candidates are their own line; adult ones point back to it.
        if first.line() == first {
            return Some(if features.fish >= LINE_THRESHOLD {
                SubType::Bird
            } else if features.meat >= LINE_THRESHOLD {
                SubType::Dog
            } else {
                SubType::Cat
            });
        }
        Some(match first.line() {
            SubType::Cat if features.fish >= REFINE_THRESHOLD => SubType::Tiger,
            SubType::Cat => SubType::Lion,
            SubType::Dog => SubType::Wolf,
            _ if features.vegetal >= REFINE_THRESHOLD => SubType::Pigeon,
            _ if features.fruit >= REFINE_THRESHOLD => SubType::Duck,
            _ => SubType::Eagle,
        })
    }
}

impl EvolutionStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn choose(&self, features: &FeatureVector, candidates: &[SubType]) -> Option<usize> {
        let wanted = Self::pick(features, candidates)?;
        candidates.iter().position(|c| *c == wanted)
    }
}
