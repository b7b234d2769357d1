//! Contact-begin events and sensor callback dispatch

use crate::body::{BodyHandle, BodyRef, FixtureHandle};
use std::collections::HashMap;

/// Two fixtures started touching during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    /// First fixture
    pub fixture1: FixtureHandle,
    /// Second fixture
    pub fixture2: FixtureHandle,
    /// Body owning the first fixture
    pub body1: BodyHandle,
    /// Body owning the second fixture
    pub body2: BodyHandle,
    /// Whether either fixture is a sensor
    pub is_sensor: bool,
}

impl ContactEvent {
    /// Whether `body` takes part in this contact
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body1 == body || self.body2 == body
    }

    /// The body on the other side from `body`
    pub fn other(&self, body: BodyHandle) -> Option<BodyHandle> {
        if self.body1 == body {
            Some(self.body2)
        } else if self.body2 == body {
            Some(self.body1)
        } else {
            None
        }
    }
}

/// Contact-begin callback: `(contact, this body, other body)`
pub type SensorCallback = Box<dyn FnMut(&ContactEvent, BodyRef<'_>, BodyRef<'_>) + Send>;

/// Side table from body identity to its callback
#[derive(Default)]
pub(crate) struct SensorTable {
    callbacks: HashMap<BodyHandle, SensorCallback>,
}

impl SensorTable {
    pub(crate) fn insert(&mut self, body: BodyHandle, callback: SensorCallback) {
        self.callbacks.insert(body, callback);
    }

    pub(crate) fn contains(&self, body: BodyHandle) -> bool {
        self.callbacks.contains_key(&body)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Run the callbacks of both participants, each seeing itself as "this".
    /// Returns how many callbacks fired.
    pub(crate) fn dispatch(&mut self, event: &ContactEvent, first: BodyRef<'_>, second: BodyRef<'_>) -> usize {
        let mut fired = 0;
        if let Some(callback) = self.callbacks.get_mut(&first.handle()) {
            log::trace!("Sensor callback for {:?} (other: {:?})", first.handle(), second.handle());
            callback(event, first, second);
            fired += 1;
        }
        if let Some(callback) = self.callbacks.get_mut(&second.handle()) {
            log::trace!("Sensor callback for {:?} (other: {:?})", second.handle(), first.handle());
            callback(event, second, first);
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> ContactEvent {
        ContactEvent {
            fixture1: FixtureHandle::from_raw_parts(0, 0),
            fixture2: FixtureHandle::from_raw_parts(1, 0),
            body1: BodyHandle::from_raw_parts(4, 0),
            body2: BodyHandle::from_raw_parts(7, 1),
            is_sensor: false,
        }
    }

    #[test]
    fn test_other_side() {
        let e = event();
        assert_eq!(e.other(e.body1), Some(e.body2));
        assert_eq!(e.other(e.body2), Some(e.body1));
        assert_eq!(e.other(BodyHandle::from_raw_parts(9, 9)), None);
        assert!(e.involves(e.body2));
    }

    #[test]
    fn test_table_membership() {
        let mut table = SensorTable::default();
        assert!(table.is_empty());
        let body = BodyHandle::from_raw_parts(3, 0);
        table.insert(body, Box::new(|_, _, _| {}));
        assert!(table.contains(body));
        assert!(!table.contains(BodyHandle::from_raw_parts(3, 1)));
    }
}
