//! External collaborators consumed by the record store.
//!
//! # Responsibility
//! - Abstract the wall clock and identifier generation behind traits so the
//!   store can be driven deterministically in tests.

pub mod clock;
pub mod id_gen;

pub use clock::{Clock, FixedClock, SystemClock};
pub use id_gen::{IdGenerator, SequentialIds, UuidIds};
