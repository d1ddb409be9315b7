//! Drill construction: multiple-choice options, sentence drills, and
//! random conjugation drills.
//!
//! Sampling functions take `&mut impl Rng` so callers choose the source of
//! randomness; request handlers use an entropy-seeded [`rand::rngs::StdRng`].

pub mod generator;
pub mod options;
pub mod random;

pub use generator::{DrillRequest, SentenceDrillGenerator};
pub use options::generate_mc_options;
pub use random::{RandomDrillGenerator, RandomDrillRequest};

/// Number of wrong answers offered alongside the correct one.
pub const DISTRACTOR_COUNT: usize = 3;
