use chrono::{DateTime, Utc};

use crate::models::Prompt;

fn seeded_at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

fn seed(
    id: &str,
    category: &str,
    name: &str,
    overview: &str,
    content: &str,
    updated_at: &str,
    sort_order: i64,
) -> Prompt {
    Prompt {
        id: id.to_string(),
        category: category.to_string(),
        name: name.to_string(),
        overview: overview.to_string(),
        content: content.to_string(),
        updated_at: seeded_at(updated_at),
        sort_order,
    }
}

/// The library a fresh deployment starts with.
pub fn seed_prompts() -> Vec<Prompt> {
    vec![
        seed(
            "creative-hook-generator",
            "Creative",
            "Viral opening line generator",
            "Social copy built on emotional triggers, vivid symbols and a clear call to action.",
            "You are a senior social media copywriter. Produce 5 title + body pairs, each with an emotional twist, a concrete scene and one actionable CTA.",
            "2026-02-15T08:00:00.000Z",
            0,
        ),
        seed(
            "logic-python-audit",
            "Logic",
            "Python logic audit",
            "Reviews recursion safety, side effects and potential memory risks.",
            "You are a strict Python reviewer. Explain boundary conditions and complexity traps, then provide a fixed implementation with tests.",
            "2026-02-14T10:30:00.000Z",
            1,
        ),
        seed(
            "system-qa-template",
            "System",
            "System prompt QA template",
            "Structured checks of model tone, policy compliance and output constraints.",
            "Check whether the reply follows policy, is factually traceable and respects format constraints. Give a pass/fail verdict with reasons.",
            "2026-02-13T16:45:00.000Z",
            2,
        ),
        seed(
            "code-review-assistant",
            "Code",
            "High-signal code review",
            "Finds behavioural regressions, correctness bugs and missing tests before style issues.",
            "You are a senior engineer. List issues by severity, then give actionable fixes and the test gaps they expose.",
            "2026-02-12T09:15:00.000Z",
            3,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_ordered_and_unique() {
        let seeds = seed_prompts();
        let orders: Vec<i64> = seeds.iter().map(|p| p.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);

        let mut ids: Vec<&str> = seeds.iter().map(|p| p.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), seeds.len());
        assert!(seeds.iter().all(|p| p.updated_at.timestamp() > 0));
    }
}
