//! Convention schedule generation.
//!
//! Assigns convention submissions (talks, panels, activities) to rooms and
//! contiguous timeslot ranges. Rooms are split into suitability pools; a
//! greedy first-fit allocator gives each submission the earliest free
//! window in the first suitable room of its pool, and reports every
//! submission it could not place together with the reason.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Convention`, `Submission`, `Room`,
//!   `Timeslot`, `AssignmentReport`
//! - **`generator`**: Timeslot generation over the convention bounds
//! - **`availability`**: Per-room free-slot bitmaps and availability policy
//! - **`pools`**: Room pool classification (Food, Hackerspace, General)
//! - **`scheduler`**: The allocator, duration mapping, abort, KPIs and the
//!   convention pipeline
//! - **`validation`**: Input integrity checks (duplicate IDs, timeline shape)
//! - **`config`**: TOML-loadable settings
//! - **`attendance`**: Seeded synthetic RSVP generation
//! - **`store`**: Convention storage seam and scheduling service
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, TimeDelta};
//! use trax_schedule::models::{Convention, Room, Submission};
//! use trax_schedule::scheduler::{generate_schedule, AbortHandle};
//! use trax_schedule::ScheduleConfig;
//!
//! let start = NaiveDate::from_ymd_opt(2013, 4, 26).unwrap().and_hms_opt(16, 0, 0).unwrap();
//! let mut convention = Convention::new("tc13", "Trax Con", start, start + TimeDelta::hours(48))
//!     .with_room(Room::new("1", "Ballroom"))
//!     .with_room(Room::new("2", "Food"))
//!     .with_submission(Submission::new("S1", "Opening ceremony"));
//!
//! let report = generate_schedule(&mut convention, &ScheduleConfig::default(), &AbortHandle::new())
//!     .unwrap();
//! assert_eq!(convention.timeslots.len(), 48);
//! assert_eq!(report.placement_for("S1").unwrap().room_id, "1");
//! ```

pub mod attendance;
pub mod availability;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod pools;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use config::ScheduleConfig;
pub use error::{Result, ScheduleError};
