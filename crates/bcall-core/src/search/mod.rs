mod engine;

pub use engine::{FuzzyMatch, FuzzyScorer, NucleoScorer, highlight_ranges};
