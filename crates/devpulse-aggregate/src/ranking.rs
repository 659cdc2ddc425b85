use std::collections::HashMap;

use devpulse_core::RepoStats;

struct Slot {
    stats: RepoStats,
    /// Position of the last entry that raised this slot's count.
    settled_at: usize,
}

/// Merge counted entities by name and rank them by total count, highest first.
///
/// Counts are summed and `last_active` keeps the latest timestamp seen for
/// the name. Equal totals keep input order, measured by the entry that last
/// added to each total: an entity that reached its count earlier ranks first,
/// so `[a:3, b:5, a:2]` ranks `b:5` ahead of `a:5`. Entities seen once keep
/// their first-seen order. Nothing is truncated.
pub fn rank_entities<I>(entries: I) -> Vec<RepoStats>
where
    I: IntoIterator<Item = RepoStats>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut slots: Vec<Slot> = Vec::new();

    for (seq, entry) in entries.into_iter().enumerate() {
        match index.get(&entry.name) {
            Some(&i) => {
                let slot = &mut slots[i];
                if entry.count > 0 {
                    slot.stats.count += entry.count;
                    slot.settled_at = seq;
                }
                if entry.last_active > slot.stats.last_active {
                    slot.stats.last_active = entry.last_active;
                }
            }
            None => {
                index.insert(entry.name.clone(), slots.len());
                slots.push(Slot {
                    stats: entry,
                    settled_at: seq,
                });
            }
        }
    }

    slots.sort_by(|a, b| {
        b.stats
            .count
            .cmp(&a.stats.count)
            .then(a.settled_at.cmp(&b.settled_at))
    });
    slots.into_iter().map(|s| s.stats).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn entry(name: &str, count: u64, at: OffsetDateTime) -> RepoStats {
        RepoStats {
            name: name.to_string(),
            count,
            last_active: at,
        }
    }

    const T0: OffsetDateTime = datetime!(2026-10-01 12:00 UTC);
    const T1: OffsetDateTime = datetime!(2026-10-05 12:00 UTC);
    const T2: OffsetDateTime = datetime!(2026-10-09 12:00 UTC);

    #[test]
    fn merges_duplicates_and_ranks() {
        let ranked = rank_entities(vec![entry("a", 3, T0), entry("b", 5, T1), entry("a", 2, T2)]);
        let got: Vec<(&str, u64)> = ranked.iter().map(|r| (r.name.as_str(), r.count)).collect();
        assert_eq!(got, vec![("b", 5), ("a", 5)]);
    }

    #[test]
    fn keeps_latest_last_active() {
        let ranked = rank_entities(vec![entry("a", 1, T2), entry("a", 1, T0), entry("a", 1, T1)]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].count, 3);
        assert_eq!(ranked[0].last_active, T2);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let ranked = rank_entities(vec![
            entry("zeta", 2, T0),
            entry("alpha", 2, T2),
            entry("mid", 7, T1),
            entry("beta", 2, T0),
        ]);
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["mid", "zeta", "alpha", "beta"]);
    }

    #[test]
    fn descending_by_count() {
        let ranked = rank_entities(vec![
            entry("x", 1, T0),
            entry("y", 9, T0),
            entry("z", 4, T0),
            entry("x", 10, T0),
        ]);
        let counts: Vec<u64> = ranked.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![11, 9, 4]);
    }

    #[test]
    fn zero_count_entry_does_not_move_tie_position() {
        let ranked = rank_entities(vec![entry("a", 2, T0), entry("b", 2, T0), entry("a", 0, T2)]);
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(ranked[0].last_active, T2);
    }

    #[test]
    fn empty_input() {
        assert!(rank_entities(Vec::<RepoStats>::new()).is_empty());
    }
}
