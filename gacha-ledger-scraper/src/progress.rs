//! Harvest progress reporting.

/// Trait for receiving progress updates while a game is processed.
pub trait HarvestProgress {
    /// Called when a phase starts (e.g., "原神: character banners").
    fn on_phase(&self, message: &str);

    /// Called before each matching banner's details are requested.
    fn on_banner(&self, current: usize, total: usize, name: &str);

    /// Called when a phase is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl HarvestProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_banner(&self, _current: usize, _total: usize, _name: &str) {}
    fn on_complete(&self, _message: &str) {}
}
