//! Identifier generation for requests, feedback and onboarding entries.
//!
//! ULIDs are lexicographically sortable by creation instant and carry 80 bits
//! of entropy, so independent Lambda instances can mint keys concurrently
//! without a central counter.

use ulid::Ulid;

pub fn new_id() -> String {
    Ulid::new().to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::{Duration, SystemTime};

    use ulid::Ulid;

    use super::new_id;

    #[test]
    fn ids_are_unique_across_bulk_generation() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_are_canonical_ulids() {
        let id = new_id();
        assert_eq!(id.len(), 26);
        assert!(id.parse::<Ulid>().is_ok());
    }

    #[test]
    fn ids_sort_by_creation_instant() {
        let earlier = SystemTime::now();
        let later = earlier + Duration::from_secs(2);
        let first = Ulid::from_datetime(earlier).to_string();
        let second = Ulid::from_datetime(later).to_string();
        assert!(first < second);
    }
}
