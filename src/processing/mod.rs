pub mod ohencoder;
pub mod split;
pub mod prediction;

pub use ohencoder::OneHotEncoder;
pub use prediction::PredictionMode;
pub use split::{FractionSplit, PositionalSplit, ShuffledSplit, SplitIndices, SplitPolicy};
