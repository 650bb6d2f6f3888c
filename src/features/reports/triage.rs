//! Rule-based report triage: category classification and priority
//! assignment.
//!
//! Both functions are pure and deterministic. The keyword heuristic is
//! intentionally simple: substring matching over the lowercased title and
//! description, no tokenization, no learning.

use crate::features::reports::models::{ReportCategory, ReportPriority};

/// Keyword sets per category. Declaration order is the tie-break: when two
/// categories score equally, the one declared first wins.
const CATEGORY_KEYWORDS: &[(ReportCategory, &[&str])] = &[
    (
        ReportCategory::Pothole,
        &[
            "pothole", "road", "crack", "street", "hole", "asphalt", "pavement", "bumpy",
        ],
    ),
    (
        ReportCategory::Streetlight,
        &[
            "light",
            "lamp",
            "dark",
            "bulb",
            "street light",
            "illumination",
            "power",
            "electricity",
        ],
    ),
    (
        ReportCategory::Garbage,
        &[
            "trash", "waste", "garbage", "litter", "bin", "dump", "rubbish", "refuse", "cleanup",
        ],
    ),
    (
        ReportCategory::Water,
        &[
            "water", "leak", "pipe", "drain", "sewage", "flood", "overflow", "blockage",
            "drainage",
        ],
    ),
    (
        ReportCategory::Traffic,
        &[
            "traffic",
            "signal",
            "sign",
            "zebra crossing",
            "road sign",
            "stop sign",
            "traffic light",
            "junction",
        ],
    ),
    (
        ReportCategory::Safety,
        &[
            "safety", "danger", "hazard", "unsafe", "accident", "risk", "emergency", "urgent",
        ],
    ),
    (
        ReportCategory::Infrastructure,
        &[
            "bridge",
            "building",
            "wall",
            "fence",
            "barrier",
            "construction",
            "damage",
            "broken",
        ],
    ),
    (
        ReportCategory::Environment,
        &[
            "tree", "park", "garden", "pollution", "air", "noise", "green", "nature",
        ],
    ),
    (ReportCategory::Other, &[]),
];

/// Keywords that force high priority regardless of category
const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "emergency",
    "danger",
    "hazard",
    "accident",
    "injured",
    "hurt",
    "blocking",
    "blocked",
    "traffic",
    "school",
    "hospital",
    "fire",
    "gas leak",
];

/// Classify a report from its free text.
///
/// Each keyword contributes at most 1 to its category's score, no matter how
/// often it occurs. A winning score of 0 falls back to `Other`.
pub fn classify(title: &str, description: &str) -> ReportCategory {
    let text = format!("{} {}", title, description).to_lowercase();

    let mut best = ReportCategory::Other;
    let mut best_score = 0usize;

    for (category, keywords) in CATEGORY_KEYWORDS {
        let score = keywords.iter().filter(|k| text.contains(**k)).count();
        if score > best_score {
            best = *category;
            best_score = score;
        }
    }

    if best_score > 0 {
        best
    } else {
        ReportCategory::Other
    }
}

/// Assign a priority from the free text and the classified category.
///
/// The urgent-keyword check dominates the category table.
pub fn assign_priority(title: &str, description: &str, category: ReportCategory) -> ReportPriority {
    let text = format!("{} {}", title, description).to_lowercase();

    if URGENT_KEYWORDS.iter().any(|k| text.contains(k)) {
        return ReportPriority::High;
    }

    match category {
        ReportCategory::Safety | ReportCategory::Traffic => ReportPriority::High,
        ReportCategory::Water
        | ReportCategory::Streetlight
        | ReportCategory::Pothole
        | ReportCategory::Infrastructure => ReportPriority::Medium,
        ReportCategory::Garbage | ReportCategory::Environment | ReportCategory::Other => {
            ReportPriority::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_matches_dominant_category() {
        assert_eq!(
            classify("Pothole on main road", "Deep hole in the asphalt"),
            ReportCategory::Pothole
        );
        assert_eq!(
            classify("Overflowing bin", "Trash and litter everywhere"),
            ReportCategory::Garbage
        );
        assert_eq!(
            classify("Broken street light", "The lamp is dark, no bulb working"),
            ReportCategory::Streetlight
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        let a = classify("Water leak near the park", "A pipe is leaking");
        let b = classify("Water leak near the park", "A pipe is leaking");
        assert_eq!(a, b);
    }

    #[test]
    fn test_classify_falls_back_to_other() {
        assert_eq!(classify("Hello", "General question"), ReportCategory::Other);
        assert_eq!(classify("", ""), ReportCategory::Other);
    }

    #[test]
    fn test_classify_counts_each_keyword_once() {
        // "road" repeated many times scores 1 for pothole; two distinct
        // garbage keywords outrank it
        assert_eq!(
            classify("road road road", "trash and litter"),
            ReportCategory::Garbage
        );
    }

    #[test]
    fn test_classify_tie_break_is_declaration_order() {
        // "street" (pothole) vs "lamp" (streetlight): 1-1 tie, first
        // declared category wins
        assert_eq!(classify("street lamp", ""), ReportCategory::Pothole);
    }

    #[test]
    fn test_priority_urgent_keywords_dominate() {
        // Garbage maps to low, but "urgent" forces high
        assert_eq!(
            assign_priority("Urgent garbage pileup", "", ReportCategory::Garbage),
            ReportPriority::High
        );
        assert_eq!(
            assign_priority("Gas leak near school", "", ReportCategory::Other),
            ReportPriority::High
        );
    }

    #[test]
    fn test_priority_category_table() {
        assert_eq!(
            assign_priority("x", "y", ReportCategory::Safety),
            ReportPriority::High
        );
        assert_eq!(
            assign_priority("x", "y", ReportCategory::Pothole),
            ReportPriority::Medium
        );
        assert_eq!(
            assign_priority("x", "y", ReportCategory::Water),
            ReportPriority::Medium
        );
        assert_eq!(
            assign_priority("x", "y", ReportCategory::Garbage),
            ReportPriority::Low
        );
        assert_eq!(
            assign_priority("x", "y", ReportCategory::Other),
            ReportPriority::Low
        );
    }

    #[test]
    fn test_scenario_pothole_medium() {
        // Intake scenario: text contains "pothole", no urgent keyword
        let category = classify("Pothole near the market", "Large pothole damaging vehicles");
        assert_eq!(category, ReportCategory::Pothole);
        assert_eq!(
            assign_priority(
                "Pothole near the market",
                "Large pothole damaging vehicles",
                category
            ),
            ReportPriority::Medium
        );
    }
}
