//! Single-writer, many-reader value cells.
//!
//! The background loops share two small pieces of state: the active drive
//! configuration (written by the connectivity poller and the manual recheck
//! button, read by the drive loop) and the match phase (written by the
//! competition callbacks, read by the status screen). Both are tiny enums, so
//! they are stored as one atomic byte. Readers see the last published value;
//! a reader may act on the previous value for one cycle after a publish, and
//! no reader ever blocks a writer.

use std::{
    fmt,
    marker::PhantomData,
    sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    },
};

/// A closed set of values that fits in one byte.
pub trait SnapshotValue: Copy {
    fn encode(self) -> u8;

    /// Inverse of [`encode`](Self::encode). Only ever receives bytes that
    /// `encode` produced.
    fn decode(raw: u8) -> Self;
}

/// Shared handle to the latest published value.
///
/// Clones refer to the same cell.
pub struct SnapshotCell<T> {
    raw:     Arc<AtomicU8>,
    _marker: PhantomData<T>,
}

impl<T> Clone for SnapshotCell<T> {
    fn clone(&self) -> Self {
        Self {
            raw:     self.raw.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: SnapshotValue> SnapshotCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            raw:     Arc::new(AtomicU8::new(initial.encode())),
            _marker: PhantomData,
        }
    }

    /// Replaces the value, returning the one it replaced.
    pub fn publish(&self, value: T) -> T { T::decode(self.raw.swap(value.encode(), Ordering::Relaxed)) }

    pub fn current(&self) -> T { T::decode(self.raw.load(Ordering::Relaxed)) }
}

impl<T: SnapshotValue + fmt::Debug> fmt::Debug for SnapshotCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SnapshotCell").field(&self.current()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Light {
        Red,
        Green,
    }

    impl SnapshotValue for Light {
        fn encode(self) -> u8 { self as u8 }

        fn decode(raw: u8) -> Self { if raw == 1 { Light::Green } else { Light::Red } }
    }

    #[test]
    fn readers_see_latest_publish() {
        let writer = SnapshotCell::new(Light::Red);
        let reader = writer.clone();
        assert_eq!(reader.current(), Light::Red);

        assert_eq!(writer.publish(Light::Green), Light::Red);
        assert_eq!(reader.current(), Light::Green);
    }
}
