//! Round engine
//!
//! All game rules live here. Nothing in this module renders or
//! touches the platform:
//! - Seeded RNG only, so a seed plus an input log replays a session
//! - Presentation is reached only through emitted events and completions
//! - Storage is reached only through the `Store` trait

pub mod autoplay;
pub mod economy;
pub mod events;
pub mod machine;
pub mod round;
pub mod selector;
pub mod table;

pub use autoplay::{AutoPlayDecision, AutoPlaySession, StopReason};
pub use economy::{BetRejection, Economy, EconomyError};
pub use events::{Completion, Controls, EngineEvent, Input, Intent, Notice, win_text};
pub use machine::{Engine, StartupError};
pub use round::{ResultRecord, Round, RoundPhase, positive_product};
pub use selector::{Dealer, RngState, SeededDealer, WeightedSelector};
pub use table::{MultiplierEntry, MultiplierTable, PayTableRow, Rarity, TableError};
