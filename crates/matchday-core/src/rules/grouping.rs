use crate::domain::{MatchRecord, ScheduledMatch, SlotIssue, SlotIssueKind, SlotKey, TeamRef};
use std::collections::HashMap;

/// Pairs records that share day, time and field.
///
/// Only slots holding exactly two records produce a match; teams keep the
/// order they had in `records`, and matches come out in order of each slot's
/// first record. Cheap enough to rerun after every confirmation change.
pub fn group(records: &[MatchRecord]) -> Vec<ScheduledMatch> {
    slots(records)
        .into_iter()
        .filter_map(|(key, members)| match members.as_slice() {
            [first, second] => Some(ScheduledMatch {
                match_day: key.match_day.to_string(),
                match_time: key.match_time.to_string(),
                field_name: key.field_name.to_string(),
                team_a: TeamRef::snapshot(first),
                team_b: TeamRef::snapshot(second),
            }),
            _ => None,
        })
        .collect()
}

/// Slots that [`group`] leaves without a match: a lone team, or three or
/// more teams booked on the same field at the same time.
pub fn slot_issues(records: &[MatchRecord]) -> Vec<SlotIssue> {
    slots(records)
        .into_iter()
        .filter_map(|(_, members)| {
            let kind = match members.len() {
                1 => SlotIssueKind::Unmatched,
                2 => return None,
                _ => SlotIssueKind::Overbooked,
            };
            Some(SlotIssue {
                slot: SlotKey::of(members.first()?),
                kind,
                teams: members
                    .iter()
                    .map(|record| record.team_name.clone())
                    .collect(),
            })
        })
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct BorrowedKey<'a> {
    match_day: &'a str,
    match_time: &'a str,
    field_name: &'a str,
}

fn slots(records: &[MatchRecord]) -> Vec<(BorrowedKey<'_>, Vec<&MatchRecord>)> {
    let mut order: Vec<(BorrowedKey<'_>, Vec<&MatchRecord>)> = Vec::new();
    let mut index: HashMap<BorrowedKey<'_>, usize> = HashMap::new();

    for record in records {
        let key = BorrowedKey {
            match_day: &record.match_day,
            match_time: &record.match_time,
            field_name: &record.field_name,
        };
        match index.get(&key) {
            Some(&position) => order[position].1.push(record),
            None => {
                index.insert(key, order.len());
                order.push((key, vec![record]));
            }
        }
    }

    order
}
