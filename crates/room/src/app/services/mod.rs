mod atomic_io;
mod clock;
mod store;

pub(crate) use clock::{LocalWallClock, WallClock};
pub(crate) use store::{is_truthy, KeyValueStore, LocalStore};

#[cfg(test)]
pub(crate) use clock::FixedWallClock;
#[cfg(test)]
pub(crate) use store::{MemoryStore, StoreError};
