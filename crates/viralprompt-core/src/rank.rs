//! Per-run deduplication and ordering of collected records.

use std::collections::HashMap;

use crate::post::SocialPost;

/// Collapse records sharing a platform-native id.
///
/// Last write wins: a later record replaces the earlier one, but keeps the
/// position where the id was first seen.
#[must_use]
pub fn dedup_by_id(records: Vec<SocialPost>) -> Vec<SocialPost> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<SocialPost> = Vec::with_capacity(records.len());

    for record in records {
        match index.get(&record.id) {
            Some(&slot) => unique[slot] = record,
            None => {
                index.insert(record.id.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    unique
}

/// Stable sort, highest [`SocialPost::engagement_score`] first.
pub fn sort_by_engagement(records: &mut [SocialPost]) {
    records.sort_by(|a, b| b.engagement_score().cmp(&a.engagement_score()));
}

/// Dedup then rank, the last step of every collector before persisting.
#[must_use]
pub fn finalize(records: Vec<SocialPost>) -> Vec<SocialPost> {
    let mut unique = dedup_by_id(records);
    sort_by_engagement(&mut unique);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    fn video(id: &str, views: u64, query: &str) -> SocialPost {
        let mut post = SocialPost::new(
            Platform::YouTube,
            id,
            format!("https://www.youtube.com/watch?v={id}"),
        );
        post.engagement.views = views;
        post.search_query = Some(query.to_string());
        post
    }

    #[test]
    fn duplicate_ids_collapse_to_last_write() {
        let out = dedup_by_id(vec![
            video("a", 10, "first"),
            video("b", 20, "first"),
            video("a", 30, "second"),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "a");
        assert_eq!(out[0].search_query.as_deref(), Some("second"));
        assert_eq!(out[0].engagement.views, 30);
        assert_eq!(out[1].id, "b");
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut records = vec![
            video("low", 5, "q"),
            video("tie-1", 50, "q"),
            video("high", 500, "q"),
            video("tie-2", 50, "q"),
        ];
        sort_by_engagement(&mut records);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "tie-1", "tie-2", "low"]);
    }

    #[test]
    fn finalize_dedups_then_ranks() {
        let out = finalize(vec![
            video("x", 1, "q1"),
            video("y", 100, "q1"),
            video("x", 1_000, "q2"),
        ]);
        let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
        assert_eq!(out[0].engagement.views, 1_000);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(finalize(Vec::new()).is_empty());
    }
}
