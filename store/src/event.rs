//! Event sink trait.

use balances_types::EventRecord;

/// Where deposited events go. Events of a failed call are discarded by the
/// host together with its storage changes.
pub trait EventSink {
    fn deposit_event(&self, record: EventRecord);
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn deposit_event(&self, record: EventRecord) {
        (**self).deposit_event(record)
    }
}
