//! Attack vocabulary, weights, and validation of advised weights

pub mod attack;
pub mod validator;
pub mod weights;

pub use attack::AttackKind;
pub use validator::validate;
pub use weights::{RawTactics, TacticWeights};
