//! The monarch of a colonial player: taxes, wars, the Royal Expeditionary
//! Force and the occasional gift of troops.
//!
//! The monarch builds a weighted list of what it might do each turn; the
//! caller draws one action with [`choose_weighted`] and asks the monarch to
//! [`Monarch::resolve`] it into an outcome.

pub mod action;
pub mod capabilities;
pub mod eligibility;
pub mod error;
pub mod force;
pub mod migrate;
pub mod monarch;
pub mod outcome;
pub mod player;
pub mod random;
pub mod save;
pub mod select;
pub mod turn;

pub use action::{MonarchAction, WeightedAction};
pub use capabilities::Capabilities;
pub use error::{MonarchError, Result, UnitCategory};
pub use force::{Force, ForceRecord};
pub use migrate::{detect_legacy_shapes, normalize, ForceSlot, LegacyShape};
pub use monarch::{Monarch, HESSIAN_MINIMUM_PRICE, MINIMUM_TAX_RATE, MONARCH_MINIMUM_PRICE};
pub use outcome::InterventionGrowth;
pub use player::{PlayerState, PlayerType, Rival, Stance};
pub use random::{pick_random, RandomSource, ScriptedRandom};
pub use save::{MonarchRecord, RECORD_VERSION};
pub use select::choose_weighted;
pub use turn::MonarchOutcome;
