pub mod learn_score;
pub mod lending;
