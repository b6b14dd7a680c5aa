pub mod arrange;
pub mod classify;
pub mod dispatch;
pub mod stats;
pub mod tracker;

#[cfg(test)]
pub(crate) mod testing;

pub use arrange::{ArrangeReport, arrange_windows};
pub use classify::{Classifier, ResistanceProfile, WorkaroundOutcome};
pub use dispatch::Dispatcher;
pub use stats::OutcomeStatistics;
pub use tracker::{PositionStatus, SlotAssignment, SlotTracker};
