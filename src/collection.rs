//! Pure operations over the ordered prompt collection.
//!
//! Every mutation leaves `sort_order` contiguous from zero, in display order.

use chrono::{DateTime, Utc};

use crate::models::prompt::StoredPrompt;
use crate::models::{Prompt, PromptDraft};

/// Category values that disable category filtering.
pub const ALL_CATEGORIES: [&str; 2] = ["all", "全部"];

/// Display order: `sort_order` ascending, most recently updated first on ties.
pub fn sort_prompts(prompts: &mut [Prompt]) {
    prompts.sort_by(|left, right| {
        left.sort_order
            .cmp(&right.sort_order)
            .then_with(|| right.updated_at.cmp(&left.updated_at))
    });
}

fn renumber(prompts: &mut [Prompt]) {
    for (index, prompt) in prompts.iter_mut().enumerate() {
        prompt.sort_order = index as i64;
    }
}

/// Turns records read from storage into a sorted, contiguous collection.
/// Records without an order take their position in the stored array; records
/// without a readable timestamp are stamped with `now`.
pub(crate) fn normalize(stored: Vec<StoredPrompt>, now: DateTime<Utc>) -> Vec<Prompt> {
    let mut prompts: Vec<Prompt> = stored
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.into_prompt(index as i64, now))
        .collect();
    sort_prompts(&mut prompts);
    renumber(&mut prompts);
    prompts
}

/// Inserts or replaces `draft` by id, stamping it with `now`.
///
/// An explicit `sort_order` on the draft wins. Without one, an existing
/// record keeps its slot and a new record goes to the end.
/// Returns the saved record as it ends up in the collection.
pub fn upsert(prompts: &mut Vec<Prompt>, draft: PromptDraft, now: DateTime<Utc>) -> Prompt {
    let existing = prompts.iter().position(|p| p.id == draft.id);
    let max_order = prompts.iter().map(|p| p.sort_order).max().unwrap_or(-1);

    let sort_order = match (draft.sort_order, existing) {
        (Some(explicit), _) => explicit,
        (None, Some(index)) => prompts[index].sort_order,
        (None, None) => max_order + 1,
    };

    let mut saved = draft.into_prompt(sort_order, now);
    match existing {
        Some(index) => prompts[index] = saved.clone(),
        None => prompts.push(saved.clone()),
    }

    sort_prompts(prompts);
    renumber(prompts);

    if let Some(stored) = prompts.iter().find(|p| p.id == saved.id) {
        saved.sort_order = stored.sort_order;
    }
    saved
}

/// Removes the record with `id`. Returns false, leaving the collection
/// untouched, when there is no such record.
pub fn remove(prompts: &mut Vec<Prompt>, id: &str) -> bool {
    let before = prompts.len();
    prompts.retain(|p| p.id != id);
    if prompts.len() == before {
        return false;
    }
    renumber(prompts);
    true
}

/// Moves the records named in `ids` to the front, in that order. Records not
/// named keep their relative order behind them; unknown ids are ignored.
pub fn reorder(prompts: Vec<Prompt>, ids: &[String]) -> Vec<Prompt> {
    let mut remaining: Vec<Option<Prompt>> = prompts.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(remaining.len());

    for id in ids {
        let slot = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|p| &p.id == id));
        if let Some(slot) = slot {
            ordered.extend(slot.take());
        }
    }
    ordered.extend(remaining.into_iter().flatten());

    renumber(&mut ordered);
    ordered
}

/// Category and free-text filter applied by the list endpoint.
#[derive(Debug, Default, Clone)]
pub struct PromptFilter {
    category: Option<String>,
    query: Option<String>,
}

impl PromptFilter {
    pub fn new(category: Option<&str>, query: Option<&str>) -> Self {
        let category = category
            .filter(|c| !c.is_empty())
            .filter(|c| !ALL_CATEGORIES.iter().any(|all| c.eq_ignore_ascii_case(all)))
            .map(str::to_lowercase);
        let query = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        Self { category, query }
    }

    pub fn matches(&self, prompt: &Prompt) -> bool {
        if let Some(category) = &self.category {
            if prompt.category.to_lowercase() != *category {
                return false;
            }
        }

        match &self.query {
            Some(query) => {
                let searchable = format!("{} {} {}", prompt.name, prompt.overview, prompt.content)
                    .to_lowercase();
                searchable.contains(query.as_str())
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 15, 8, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn prompt(id: &str, sort_order: i64) -> Prompt {
        Prompt {
            id: id.to_string(),
            category: "Code".to_string(),
            name: format!("name {}", id),
            overview: format!("overview {}", id),
            content: format!("content {}", id),
            updated_at: at(0),
            sort_order,
        }
    }

    fn draft(id: &str, sort_order: Option<i64>) -> PromptDraft {
        PromptDraft {
            id: id.to_string(),
            category: "Code".to_string(),
            name: format!("new name {}", id),
            overview: "o".to_string(),
            content: "c".to_string(),
            updated_at: None,
            sort_order,
        }
    }

    fn abc() -> Vec<Prompt> {
        vec![prompt("a", 0), prompt("b", 1), prompt("c", 2)]
    }

    fn ids(prompts: &[Prompt]) -> Vec<&str> {
        prompts.iter().map(|p| p.id.as_str()).collect()
    }

    fn assert_contiguous(prompts: &[Prompt]) {
        let orders: Vec<i64> = prompts.iter().map(|p| p.sort_order).collect();
        let expected: Vec<i64> = (0..prompts.len() as i64).collect();
        assert_eq!(orders, expected);
    }

    #[test]
    fn sort_breaks_ties_by_most_recent_update() {
        let mut older = prompt("older", 1);
        older.updated_at = at(0);
        let mut newer = prompt("newer", 1);
        newer.updated_at = at(5);
        let mut prompts = vec![older, prompt("first", 0), newer];

        sort_prompts(&mut prompts);
        assert_eq!(ids(&prompts), vec!["first", "newer", "older"]);
    }

    #[test]
    fn upsert_existing_keeps_its_slot() {
        let mut prompts = abc();
        let saved = upsert(&mut prompts, draft("b", None), at(10));

        assert_eq!(saved.sort_order, 1);
        assert_eq!(saved.name, "new name b");
        assert_eq!(saved.updated_at, at(10));
        assert_eq!(ids(&prompts), vec!["a", "b", "c"]);
        assert_contiguous(&prompts);
    }

    #[test]
    fn upsert_new_appends() {
        let mut prompts = abc();
        let saved = upsert(&mut prompts, draft("d", None), at(10));

        assert_eq!(saved.sort_order, 3);
        assert_eq!(ids(&prompts), vec!["a", "b", "c", "d"]);
        assert_contiguous(&prompts);
    }

    #[test]
    fn upsert_into_empty_collection() {
        let mut prompts = Vec::new();
        let saved = upsert(&mut prompts, draft("a", None), at(0));
        assert_eq!(saved.sort_order, 0);
        assert_eq!(prompts.len(), 1);
    }

    #[test]
    fn upsert_explicit_order_moves_record() {
        let mut prompts = abc();
        let saved = upsert(&mut prompts, draft("c", Some(0)), at(10));

        // "c" ties with "a" on order 0 and wins as the most recent update.
        assert_eq!(saved.sort_order, 0);
        assert_eq!(ids(&prompts), vec!["c", "a", "b"]);
        assert_contiguous(&prompts);
    }

    #[test]
    fn upsert_renumbers_large_explicit_order() {
        let mut prompts = abc();
        let saved = upsert(&mut prompts, draft("d", Some(40)), at(10));
        assert_eq!(saved.sort_order, 3);
        assert_contiguous(&prompts);
    }

    #[test]
    fn remove_renumbers_remaining() {
        let mut prompts = abc();
        assert!(remove(&mut prompts, "a"));
        assert_eq!(ids(&prompts), vec!["b", "c"]);
        assert_contiguous(&prompts);
    }

    #[test]
    fn remove_missing_leaves_collection_alone() {
        let mut prompts = abc();
        assert!(!remove(&mut prompts, "zzz"));
        assert_eq!(prompts, abc());
    }

    #[test]
    fn reorder_puts_named_first() {
        let reordered = reorder(abc(), &["c".to_string(), "a".to_string()]);
        assert_eq!(ids(&reordered), vec!["c", "a", "b"]);
        assert_contiguous(&reordered);
    }

    #[test]
    fn reorder_ignores_unknown_and_duplicate_ids() {
        let reordered = reorder(
            abc(),
            &["ghost".to_string(), "b".to_string(), "b".to_string()],
        );
        assert_eq!(ids(&reordered), vec!["b", "a", "c"]);
        assert_contiguous(&reordered);
    }

    #[test]
    fn reorder_with_no_ids_keeps_order() {
        let reordered = reorder(abc(), &[]);
        assert_eq!(reordered, abc());
    }

    #[test]
    fn normalize_sorts_and_fills_missing_orders() {
        let stored: Vec<StoredPrompt> = serde_json::from_value(serde_json::json!([
            {"id": "x", "category": "c", "name": "n", "overview": "o", "content": "c",
             "updatedAt": "2026-02-15T08:00:00.000Z", "sortOrder": 9},
            {"id": "y", "category": "c", "name": "n", "overview": "o", "content": "c",
             "updatedAt": "2026-02-15T08:00:00.000Z"}
        ]))
        .unwrap();

        let prompts = normalize(stored, at(30));
        assert_eq!(ids(&prompts), vec!["y", "x"]);
        assert_contiguous(&prompts);
    }

    #[test]
    fn filter_by_category_ignores_case() {
        let filter = PromptFilter::new(Some("code"), None);
        assert!(filter.matches(&prompt("a", 0)));

        let mut other = prompt("b", 0);
        other.category = "Creative".to_string();
        assert!(!filter.matches(&other));
    }

    #[test]
    fn all_sentinel_disables_category_filter() {
        let mut other = prompt("b", 0);
        other.category = "Creative".to_string();
        for category in ["all", "All", "ALL", "全部", ""] {
            assert!(PromptFilter::new(Some(category), None).matches(&other));
        }
    }

    #[test]
    fn query_searches_name_overview_and_content() {
        let p = prompt("a", 0);
        assert!(PromptFilter::new(None, Some("NAME A")).matches(&p));
        assert!(PromptFilter::new(None, Some("  overview ")).matches(&p));
        assert!(PromptFilter::new(None, Some("content a")).matches(&p));
        assert!(!PromptFilter::new(None, Some("missing")).matches(&p));
        assert!(PromptFilter::new(None, Some("   ")).matches(&p));
    }

    #[test]
    fn category_and_query_combine() {
        let p = prompt("a", 0);
        assert!(PromptFilter::new(Some("Code"), Some("content")).matches(&p));
        assert!(!PromptFilter::new(Some("Logic"), Some("content")).matches(&p));
    }
}
