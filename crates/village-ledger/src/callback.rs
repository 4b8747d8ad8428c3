//! Change notification for the resource ledger.

use village_types::ResourceSnapshot;

/// Called after every successful ledger mutation, once the snapshot has
/// been handed to the store.
pub trait ResourceCallback: Send {
    /// The ledger changed; `snapshot` is its new state.
    fn on_change(&mut self, snapshot: &ResourceSnapshot);
}

impl<F> ResourceCallback for F
where
    F: FnMut(&ResourceSnapshot) + Send,
{
    fn on_change(&mut self, snapshot: &ResourceSnapshot) {
        self(snapshot);
    }
}
