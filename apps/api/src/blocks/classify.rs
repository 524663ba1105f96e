//! Derived-field classifiers for achievement blocks.
//!
//! Each classifier is an independent, pure function over the block's
//! category, title and content. Output order is first-found order, which
//! makes re-ingestion of identical text reproduce identical fields.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::blocks::models::{Block, StrengthLevel};
use crate::blocks::tables::{category_role_types, category_skills, ML_CATEGORY, TECH_SKILL_TERMS};

const MAX_SKILLS: usize = 8;
const MAX_KEYWORDS: usize = 15;
const MAX_ROLE_TYPES: usize = 4;
const MAX_COMPANY_TYPES: usize = 3;
const CATEGORY_DEFAULTS: usize = 3;

static TECH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(Java|Python|Scala|Kotlin|JavaScript|TypeScript|SQL|React|TensorFlow|Spark|AWS|EMR|DynamoDB|S3|ElasticSearch|SageMaker|Lambda|Amber|CloudFormation|CDK|Docker|Kubernetes|SpringMVC|Bootstrap)\b",
        r"(?i)\b(ML|AI|API|ETL|CI/CD|DevOps|SRE|GDPR|CCPA|DMA|A/B|UI/UX)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid tech pattern"))
    .collect()
});

static METRIC_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\d+(?:TB|PB|GB|[MBK])?\+?\s*(?:users|customers|countries|engineers|scientists|services|models|requests|TPS|years|months|weeks|days)",
        r"\$\d+[MBK]?\+?",
        r"\d+%\+?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid metric pattern"))
    .collect()
});

static ANY_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit pattern"));

// Strength signals. Matching is case-sensitive except for completeness terms.
const TOP_IMPACT: &[&str] = &["$10M", "1B+", "PB+", "17 countries", "500M"];
const MID_IMPACT: &[&str] = &["$", "M+", "TB+", "international"];
const OWNERSHIP_VERBS: &[&str] = &["led", "architected", "built", "designed", "sole engineer"];
const DELIVERY_VERBS: &[&str] = &["developed", "implemented", "created"];
const COMPLETENESS_TERMS: &[&str] = &["zero", "100%", "complete", "comprehensive"];

const SCALE_TERMS: &[&str] = &["1B+", "billion", "PB", "petabyte", "international", "17 countries"];
const FOUNDING_TERMS: &[&str] = &["0-to-1", "MVP", "sole engineer", "ground up", "pioneered"];

fn push_unique(out: &mut Vec<String>, value: &str) {
    if !out.iter().any(|existing| existing == value) {
        out.push(value.to_string());
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Up to 3 category defaults, then vocabulary terms found in the content.
pub fn derive_skills(category: &str, content: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in category_skills(category).iter().take(CATEGORY_DEFAULTS) {
        push_unique(&mut skills, skill);
    }

    let lowered = content.to_lowercase();
    for term in TECH_SKILL_TERMS {
        if lowered.contains(&term.to_lowercase()) {
            push_unique(&mut skills, term);
        }
    }

    skills.truncate(MAX_SKILLS);
    skills
}

/// Technology tokens followed by metric tokens, as they appear in the text.
pub fn derive_keywords(content: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for pattern in TECH_PATTERNS.iter().chain(METRIC_PATTERNS.iter()) {
        for m in pattern.find_iter(content) {
            push_unique(&mut keywords, m.as_str());
        }
    }
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

pub fn derive_role_types(category: &str, title: &str, content: &str) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    for role in category_role_types(category).iter().take(CATEGORY_DEFAULTS) {
        push_unique(&mut roles, role);
    }

    let content_lower = content.to_lowercase();

    if content.contains("ML") || content.contains("Machine Learning") || content_lower.contains("model")
    {
        push_unique(&mut roles, "ML Engineer");
    }

    if content_lower.contains("full-stack")
        || (content_lower.contains("frontend") && content_lower.contains("backend"))
    {
        push_unique(&mut roles, "Full-Stack Engineer");
    }

    let leadership = title.to_lowercase().contains("team")
        || content_lower.contains("mentor")
        || content_lower.contains("led");
    let has_lead_role = roles.iter().any(|r| r == "Tech Lead" || r == "Senior Engineer");
    if leadership && !has_lead_role {
        roles.push("Senior Engineer".to_string());
    }

    roles.truncate(MAX_ROLE_TYPES);
    roles
}

pub fn derive_company_types(category: &str, content: &str) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();

    if contains_any(content, SCALE_TERMS) {
        push_unique(&mut types, "Big Tech");
    }
    if contains_any(content, FOUNDING_TERMS) {
        push_unique(&mut types, "Startup");
        push_unique(&mut types, "Scale-up");
    }

    let lowered = content.to_lowercase();
    if content.contains('$') || lowered.contains("revenue") || lowered.contains("cost savings") {
        push_unique(&mut types, "Product-focused");
    }
    if category == ML_CATEGORY {
        push_unique(&mut types, "ML/AI Company");
    }

    if types.is_empty() {
        return vec!["Big Tech".into(), "Startup".into(), "Scale-up".into()];
    }
    types.truncate(MAX_COMPANY_TYPES);
    types
}

/// Additive strength score: impact (0-3) + ownership (0-2) + completeness (0-1).
pub fn strength_points(content: &str) -> u32 {
    let impact = if contains_any(content, TOP_IMPACT) {
        3
    } else if contains_any(content, MID_IMPACT) {
        2
    } else if ANY_DIGIT.is_match(content) {
        1
    } else {
        0
    };

    let ownership = if contains_any(content, OWNERSHIP_VERBS) {
        2
    } else if contains_any(content, DELIVERY_VERBS) {
        1
    } else {
        0
    };

    let completeness = u32::from(contains_any(&content.to_lowercase(), COMPLETENESS_TERMS));

    impact + ownership + completeness
}

pub fn determine_strength_level(content: &str) -> StrengthLevel {
    match strength_points(content) {
        p if p >= 5 => StrengthLevel::Essential,
        p if p >= 3 => StrengthLevel::Strong,
        _ => StrengthLevel::Good,
    }
}

/// Builds a fully classified block from its source fields.
pub fn classify(
    category: &str,
    subcategory: Option<&str>,
    title: &str,
    content: &str,
) -> Block {
    Block {
        id: None,
        category: category.to_string(),
        subcategory: subcategory.map(str::to_string),
        title: title.to_string(),
        content: content.to_string(),
        skills: derive_skills(category, content),
        keywords: derive_keywords(content),
        strength_level: determine_strength_level(content),
        role_types: derive_role_types(category, title, content),
        company_types: derive_company_types(category, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_essential_from_top_impact_and_ownership() {
        let content = "Single-handedly architected a pricing engine driving $10M in savings across 3 regions";
        assert_eq!(strength_points(content), 5);
        assert_eq!(determine_strength_level(content), StrengthLevel::Essential);
    }

    #[test]
    fn test_strength_thresholds_are_exact() {
        // 2 (mid impact) + 0 = 2 → good
        assert_eq!(determine_strength_level("Saved $ on hosting"), StrengthLevel::Good);
        // 1 (digit) + 2 (ownership) = 3 → strong
        assert_eq!(
            determine_strength_level("built 4 internal dashboards"),
            StrengthLevel::Strong
        );
        // 1 + 1 + 1 = 3 → strong
        assert_eq!(
            determine_strength_level("developed 2 services with complete test suites"),
            StrengthLevel::Strong
        );
        // 2 + 2 = 4 → strong, one short of essential
        assert_eq!(
            determine_strength_level("designed an international rollout"),
            StrengthLevel::Strong
        );
        // 2 + 2 + 1 = 5 → essential
        assert_eq!(
            determine_strength_level("designed an international rollout with zero downtime"),
            StrengthLevel::Essential
        );
    }

    #[test]
    fn test_ownership_verbs_are_case_sensitive() {
        assert_eq!(strength_points("Led the migration"), 0);
        assert_eq!(strength_points("she led the migration"), 2);
    }

    #[test]
    fn test_no_signals_is_good() {
        assert_eq!(strength_points("Wrote documentation"), 0);
        assert_eq!(determine_strength_level("Wrote documentation"), StrengthLevel::Good);
    }

    #[test]
    fn test_skills_category_defaults_then_content_terms() {
        let skills = derive_skills(
            "SYSTEM ARCHITECTURE & DESIGN",
            "Rebuilt the python ETL on AWS with a new API layer",
        );
        assert_eq!(
            skills,
            vec!["System Design", "Architecture", "Microservices", "Python", "AWS", "API"]
        );
    }

    #[test]
    fn test_skills_capped_and_deduplicated() {
        let skills = derive_skills(
            "SYSTEM ARCHITECTURE & DESIGN",
            "java python scala kotlin javascript typescript sql spark architecture",
        );
        assert_eq!(skills.len(), MAX_SKILLS);
        assert_eq!(skills.iter().filter(|s| *s == "Architecture").count(), 1);
    }

    #[test]
    fn test_keywords_tech_then_metrics() {
        let keywords = derive_keywords(
            "Scaled Kafka-free pipeline in Python on aws serving 50M users, cut cost 40% and saved $2M",
        );
        assert_eq!(keywords, vec!["Python", "aws", "50M users", "$2M", "40%"]);
    }

    #[test]
    fn test_keywords_deduplicate_first_occurrence() {
        let keywords = derive_keywords("Python service, another Python service, 10% then 10%");
        assert_eq!(keywords, vec!["Python", "10%"]);
    }

    #[test]
    fn test_keywords_capped() {
        let content = (1..=20)
            .map(|n| format!("{n}%"))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(derive_keywords(&content).len(), MAX_KEYWORDS);
    }

    #[test]
    fn test_role_types_content_triggers() {
        let roles = derive_role_types(
            "SYSTEM ARCHITECTURE & DESIGN",
            "Platform rebuild",
            "Shipped a ranking model behind a full-stack app",
        );
        assert_eq!(
            roles,
            vec![
                "Backend Engineer",
                "Software Engineer",
                "Systems Engineer",
                "ML Engineer"
            ]
        );
    }

    #[test]
    fn test_senior_role_skipped_when_lead_present() {
        let roles = derive_role_types(
            "TECHNICAL LEADERSHIP & MENTORING",
            "Team growth",
            "Ran weekly mentor sessions",
        );
        assert_eq!(roles, vec!["Senior Engineer", "Staff Engineer", "Tech Lead"]);

        let roles = derive_role_types("UNLISTED", "Team growth", "Ran sessions");
        assert_eq!(roles, vec!["Senior Engineer"]);
    }

    #[test]
    fn test_company_types() {
        assert_eq!(
            derive_company_types("OTHER", "Serving 1B+ requests as sole engineer"),
            vec!["Big Tech", "Startup", "Scale-up"]
        );
        assert_eq!(
            derive_company_types(ML_CATEGORY, "Grew revenue"),
            vec!["Product-focused", "ML/AI Company"]
        );
        assert_eq!(
            derive_company_types("OTHER", "Refactored the build"),
            vec!["Big Tech", "Startup", "Scale-up"]
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        let a = classify(ML_CATEGORY, Some("Models"), "Churn model", "Built a churn model for 2M users");
        let b = classify(ML_CATEGORY, Some("Models"), "Churn model", "Built a churn model for 2M users");
        assert_eq!(a, b);
        assert_eq!(a.subcategory.as_deref(), Some("Models"));
        assert!(a.id.is_none());
    }
}
