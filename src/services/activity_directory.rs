//! In-memory directory of extracurricular activities and their rosters.
//!
//! The set of activity names is fixed when the directory is built. Each
//! activity sits behind its own lock, so a signup or unregister is a single
//! check-then-mutate step that cannot interleave with another mutation of
//! the same roster.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;
use tracing::{info, warn};

use crate::database::seed_activities;
use crate::models::Activity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("Activity not found")]
    NotFound,
    #[error("{email} is already signed up")]
    AlreadySignedUp { email: String },
    #[error("{email} is not registered")]
    NotRegistered { email: String },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Confirmation {
    pub message: String,
}

/// Point-in-time copy of every activity, in directory order.
///
/// Serializes as a JSON object keyed by activity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitiesSnapshot {
    entries: Vec<(String, Activity)>,
}

impl ActivitiesSnapshot {
    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, activity)| activity)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ActivitiesSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, activity) in self.iter() {
            map.serialize_entry(name, activity)?;
        }
        map.end()
    }
}

#[derive(Debug)]
pub struct ActivityDirectory {
    order: Vec<String>,
    activities: HashMap<String, Mutex<Activity>>,
}

impl ActivityDirectory {
    /// Builds a directory from `(name, activity)` pairs. A repeated name keeps
    /// its first record.
    pub fn new(seed: impl IntoIterator<Item = (String, Activity)>) -> Self {
        let mut order = Vec::new();
        let mut activities = HashMap::new();
        for (name, activity) in seed {
            if activities.contains_key(&name) {
                warn!(activity = %name, "duplicate activity in seed ignored");
                continue;
            }
            order.push(name.clone());
            activities.insert(name, Mutex::new(activity));
        }
        Self { order, activities }
    }

    pub fn seeded() -> Self {
        Self::new(seed_activities::seed_activities())
    }

    pub fn list_activities(&self) -> ActivitiesSnapshot {
        let entries = self
            .order
            .iter()
            .filter_map(|name| {
                let slot = self.activities.get(name)?;
                Some((name.clone(), lock(slot).clone()))
            })
            .collect();
        ActivitiesSnapshot { entries }
    }

    pub fn signup(&self, activity_name: &str, email: &str) -> Result<Confirmation, DirectoryError> {
        let mut activity = self.roster(activity_name)?;
        if activity.is_registered(email) {
            warn!(activity = %activity_name, email = %email, "signup rejected: already signed up");
            return Err(DirectoryError::AlreadySignedUp {
                email: email.to_string(),
            });
        }
        activity.participants.push(email.to_string());
        info!(activity = %activity_name, email = %email, "participant signed up");

        Ok(Confirmation {
            message: format!("Signed up {} for {}", email, activity_name),
        })
    }

    pub fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Confirmation, DirectoryError> {
        let mut activity = self.roster(activity_name)?;
        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            warn!(activity = %activity_name, email = %email, "unregister rejected: not registered");
            return Err(DirectoryError::NotRegistered {
                email: email.to_string(),
            });
        };
        activity.participants.remove(pos);
        info!(activity = %activity_name, email = %email, "participant unregistered");

        Ok(Confirmation {
            message: format!("Unregistered {} from {}", email, activity_name),
        })
    }

    fn roster(&self, activity_name: &str) -> Result<MutexGuard<'_, Activity>, DirectoryError> {
        match self.activities.get(activity_name) {
            Some(slot) => Ok(lock(slot)),
            None => {
                warn!(activity = %activity_name, "unknown activity");
                Err(DirectoryError::NotFound)
            }
        }
    }
}

impl Default for ActivityDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

// A panic while holding the lock cannot leave a roster half-written: every
// mutation is a single push or remove.
fn lock(slot: &Mutex<Activity>) -> MutexGuard<'_, Activity> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn participants(dir: &ActivityDirectory, name: &str) -> Vec<String> {
        dir.list_activities()
            .get(name)
            .map(|a| a.participants.clone())
            .unwrap_or_default()
    }

    #[test]
    fn seeded_directory_lists_required_activities_in_order() {
        let dir = ActivityDirectory::seeded();
        let snapshot = dir.list_activities();
        let names: Vec<&str> = snapshot.names().collect();

        assert_eq!(&names[..2], &["Chess Club", "Programming Class"]);
        assert!(names.contains(&"Basketball Team"));
        let chess = snapshot.get("Chess Club").unwrap();
        assert!(chess.is_registered("michael@mergington.edu"));
        assert!(chess.is_registered("daniel@mergington.edu"));
    }

    #[test]
    fn signup_appends_to_roster() {
        let dir = ActivityDirectory::seeded();
        let before = participants(&dir, "Chess Club");

        let confirmation = dir
            .signup("Chess Club", "newstudent@mergington.edu")
            .unwrap();

        assert_eq!(
            confirmation.message,
            "Signed up newstudent@mergington.edu for Chess Club"
        );
        let mut expected = before;
        expected.push("newstudent@mergington.edu".to_string());
        assert_eq!(participants(&dir, "Chess Club"), expected);
    }

    #[test]
    fn duplicate_signup_is_rejected_and_roster_unchanged() {
        let dir = ActivityDirectory::seeded();
        let before = participants(&dir, "Chess Club");

        let err = dir
            .signup("Chess Club", "michael@mergington.edu")
            .unwrap_err();

        assert_eq!(
            err,
            DirectoryError::AlreadySignedUp {
                email: "michael@mergington.edu".to_string()
            }
        );
        assert!(err.to_string().contains("already signed up"));
        assert_eq!(participants(&dir, "Chess Club"), before);
    }

    #[test]
    fn unknown_activity_is_not_found_and_state_unchanged() {
        let dir = ActivityDirectory::seeded();
        let before = dir.list_activities();

        assert_eq!(
            dir.signup("Nonexistent Activity", "student@mergington.edu"),
            Err(DirectoryError::NotFound)
        );
        assert_eq!(
            dir.unregister("Nonexistent Activity", "student@mergington.edu"),
            Err(DirectoryError::NotFound)
        );
        assert_eq!(DirectoryError::NotFound.to_string(), "Activity not found");
        assert_eq!(dir.list_activities(), before);
    }

    #[test]
    fn unregister_removes_only_that_email() {
        let dir = ActivityDirectory::seeded();

        let confirmation = dir
            .unregister("Chess Club", "michael@mergington.edu")
            .unwrap();

        assert!(confirmation.message.starts_with("Unregistered"));
        assert_eq!(
            participants(&dir, "Chess Club"),
            vec!["daniel@mergington.edu".to_string()]
        );
    }

    #[test]
    fn unregister_of_absent_email_is_rejected() {
        let dir = ActivityDirectory::seeded();
        let before = participants(&dir, "Chess Club");

        let err = dir
            .unregister("Chess Club", "notregistered@mergington.edu")
            .unwrap_err();

        assert!(err.to_string().contains("not registered"));
        assert_eq!(participants(&dir, "Chess Club"), before);
    }

    #[test]
    fn signup_then_unregister_restores_roster_order() {
        let dir = ActivityDirectory::seeded();
        let before = participants(&dir, "Programming Class");

        dir.signup("Programming Class", "testflow@mergington.edu")
            .unwrap();
        dir.unregister("Programming Class", "testflow@mergington.edu")
            .unwrap();

        assert_eq!(participants(&dir, "Programming Class"), before);
    }

    #[test]
    fn unregister_from_middle_keeps_remaining_order() {
        let dir = ActivityDirectory::new(vec![(
            "Robotics".to_string(),
            Activity::new("Build robots", "Mondays", 5, &["a@x.edu", "b@x.edu", "c@x.edu"]),
        )]);

        dir.unregister("Robotics", "b@x.edu").unwrap();

        assert_eq!(participants(&dir, "Robotics"), vec!["a@x.edu", "c@x.edu"]);
    }

    #[test]
    fn capacity_is_not_enforced() {
        let dir = ActivityDirectory::new(vec![(
            "Tiny".to_string(),
            Activity::new("One seat", "Never", 1, &["first@x.edu"]),
        )]);

        assert!(dir.signup("Tiny", "second@x.edu").is_ok());
        assert_eq!(participants(&dir, "Tiny").len(), 2);
    }

    #[test]
    fn duplicate_seed_names_keep_first_record() {
        let dir = ActivityDirectory::new(vec![
            ("Choir".to_string(), Activity::new("first", "Mon", 10, &[])),
            ("Choir".to_string(), Activity::new("second", "Tue", 10, &[])),
        ]);

        let snapshot = dir.list_activities();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("Choir").unwrap().description, "first");
    }

    #[test]
    fn snapshot_is_detached_from_directory() {
        let dir = ActivityDirectory::seeded();
        let snapshot = dir.list_activities();

        dir.signup("Chess Club", "later@mergington.edu").unwrap();

        assert!(!snapshot
            .get("Chess Club")
            .unwrap()
            .is_registered("later@mergington.edu"));
    }

    #[test]
    fn snapshot_serializes_in_directory_order() {
        let dir = ActivityDirectory::new(vec![
            ("Zebra Club".to_string(), Activity::new("z", "Mon", 3, &[])),
            ("Alpha Club".to_string(), Activity::new("a", "Tue", 4, &["x@y.edu"])),
        ]);

        let json = serde_json::to_string(&dir.list_activities()).unwrap();

        assert_eq!(
            json,
            r#"{"Zebra Club":{"description":"z","schedule":"Mon","max_participants":3,"participants":[]},"Alpha Club":{"description":"a","schedule":"Tue","max_participants":4,"participants":["x@y.edu"]}}"#
        );
    }

    #[test]
    fn concurrent_duplicate_signups_admit_exactly_one() {
        let dir = Arc::new(ActivityDirectory::seeded());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let dir = Arc::clone(&dir);
                thread::spawn(move || dir.signup("Chess Club", "racer@mergington.edu").is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        let roster = participants(&dir, "Chess Club");
        assert_eq!(
            roster.iter().filter(|p| *p == "racer@mergington.edu").count(),
            1
        );
    }
}
