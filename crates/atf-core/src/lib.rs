pub mod cleanup;
pub mod device;
pub mod equivalence;
pub mod error;
pub mod labels;
pub mod matcher;
pub mod navigator;
pub mod retry;
pub mod roster;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

pub use cleanup::{LeagueCleanup, TeamCleanup, TextCleanup};
pub use device::{FrameSource, InputEmitter, ProcessMonitor, TextExtractor};
pub use equivalence::CharacterEquivalenceTable;
pub use error::{DeviceError, NavError};
pub use labels::{LabelError, OrderedLabelList};
pub use matcher::{FuzzyMatcher, MatchResult};
pub use navigator::{MenuNavigator, NavigationContext, NavigationSettings, Selection};
pub use retry::{RetryBudget, RetryPolicy};
pub use roster::{Roster, RosterError};
pub use session::{FreezeGuard, TeamHandler, run_plan};
pub use state::NavigationState;
