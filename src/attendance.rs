//! Synthetic RSVP load.
//!
//! Generates fake attendees who RSVP to random submissions, for exercising
//! a convention before real sign-ups arrive. Uses its own seeded
//! `ChaCha8Rng`, so a given seed always produces the same attendees and
//! the allocator never sees any randomness.

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A generated attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticUser {
    /// Display name, "Random User {i}".
    pub name: String,
    /// Email, "{i}@randomtraxuser.com".
    pub email: String,
    /// Whether the RSVPs are publicly visible.
    pub public_rsvps: bool,
    /// Submission IDs RSVPed to, all distinct.
    pub rsvps: Vec<String>,
}

impl SyntheticUser {
    fn new(index: usize) -> Self {
        Self {
            name: format!("Random User {index}"),
            email: format!("{index}@randomtraxuser.com"),
            public_rsvps: true,
            rsvps: Vec::new(),
        }
    }
}

/// Creates `users` attendees, each RSVPing to `rsvps_per_user` distinct
/// submissions drawn from `submission_ids`.
///
/// The per-user count is capped at the number of submissions.
pub fn simulate_rsvps<S: AsRef<str>>(
    submission_ids: &[S],
    users: usize,
    rsvps_per_user: usize,
    seed: u64,
) -> Vec<SyntheticUser> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let per_user = rsvps_per_user.min(submission_ids.len());
    let mut pool: Vec<&str> = submission_ids.iter().map(AsRef::as_ref).collect();

    let generated: Vec<SyntheticUser> = (0..users)
        .map(|index| {
            let mut user = SyntheticUser::new(index);
            pool.shuffle(&mut rng);
            user.rsvps = pool[..per_user].iter().map(|id| id.to_string()).collect();
            user
        })
        .collect();

    tracing::debug!(users, per_user, seed, "generated synthetic RSVPs");
    generated
}

/// Number of RSVPs per submission.
pub fn rsvp_counts(users: &[SyntheticUser]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for user in users {
        for id in &user.rsvps {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Convention, Room, Submission};
    use crate::scheduler::{generate_schedule, AbortHandle};
    use crate::ScheduleConfig;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn ids() -> Vec<String> {
        (0..10).map(|i| format!("S{i}")).collect()
    }

    #[test]
    fn test_names_and_emails() {
        let users = simulate_rsvps(&ids(), 3, 2, 7);
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].name, "Random User 0");
        assert_eq!(users[2].email, "2@randomtraxuser.com");
        assert!(users.iter().all(|u| u.public_rsvps));
    }

    #[test]
    fn test_rsvps_are_distinct() {
        let users = simulate_rsvps(&ids(), 20, 5, 42);
        for user in &users {
            let unique: HashSet<&String> = user.rsvps.iter().collect();
            assert_eq!(unique.len(), 5);
        }
        let total: usize = rsvp_counts(&users).values().sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_capped_at_submission_count() {
        let users = simulate_rsvps(&["A", "B"], 2, 10, 1);
        assert!(users.iter().all(|u| u.rsvps.len() == 2));
        assert!(simulate_rsvps::<&str>(&[], 2, 3, 1).iter().all(|u| u.rsvps.is_empty()));
    }

    #[test]
    fn test_seeded() {
        assert_eq!(simulate_rsvps(&ids(), 5, 3, 99), simulate_rsvps(&ids(), 5, 3, 99));
    }

    #[test]
    fn test_schedule_unaffected() {
        let start = NaiveDate::from_ymd_opt(2013, 4, 26)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap();
        let build = || {
            (0..10).fold(
                Convention::new("C", "Con", start, start + chrono::TimeDelta::hours(6))
                    .with_room(Room::new("R1", "Ballroom")),
                |c, i| c.with_submission(Submission::new(format!("S{i}"), "Talk")),
            )
        };
        let config = ScheduleConfig::default();

        let mut plain = build();
        let a = generate_schedule(&mut plain, &config, &AbortHandle::new()).unwrap();

        let mut loaded = build();
        let _users = simulate_rsvps(&ids(), 50, 4, 3);
        let b = generate_schedule(&mut loaded, &config, &AbortHandle::new()).unwrap();

        assert_eq!(a, b);
        assert_eq!(plain, loaded);
    }
}
