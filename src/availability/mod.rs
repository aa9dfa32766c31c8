//! Room availability model.
//!
//! Tracks, for every room, which timeline slots are still free. The
//! [`AvailabilityArena`] owns one bitmap per room; the allocator mutates it
//! only through `consume` and `release`.
//!
//! # Components
//!
//! - **`Timeline`**: validated, uniform-length slot sequence. Windows never
//!   span a gap in it.
//! - **`RoomAvailability`**: free/consumed bitmap of one room.
//! - **`AvailabilityArena`**: all rooms' bitmaps, indexed by room.
//! - **`AvailabilityPolicy`**: quiet hours and blocked periods applied when
//!   rooms are first opened.

mod bitmap;
mod policy;
mod timeline;

pub use bitmap::{AvailabilityArena, RoomAvailability};
pub use policy::{AvailabilityPolicy, BlockedPeriod, DailyWindow};
pub use timeline::Timeline;
