mod helpers;
mod score;

pub use helpers::{parse_boolean_flag, parse_list};
pub use score::{Score, ScoreConversionError, PASSING_SCORE};
