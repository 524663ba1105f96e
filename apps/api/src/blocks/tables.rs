//! Fixed classification tables keyed by category heading.
//!
//! Built once on first use and never mutated afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const ML_CATEGORY: &str = "MACHINE LEARNING & DATA SCIENCE";

/// Category → default skills, in priority order.
pub static CATEGORY_SKILLS: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        HashMap::from([
            (
                "SYSTEM ARCHITECTURE & DESIGN",
                &[
                    "System Design",
                    "Architecture",
                    "Microservices",
                    "API Design",
                    "Distributed Systems",
                ][..],
            ),
            (
                ML_CATEGORY,
                &[
                    "Machine Learning",
                    "ML",
                    "Data Science",
                    "Model Training",
                    "Python",
                    "TensorFlow",
                    "Spark",
                ][..],
            ),
            (
                "SCALE & PERFORMANCE",
                &[
                    "Scalability",
                    "Performance",
                    "High Traffic",
                    "Optimization",
                    "Distributed Systems",
                ][..],
            ),
            (
                "COST OPTIMIZATION & BUSINESS IMPACT",
                &[
                    "Cost Optimization",
                    "Business Impact",
                    "ROI",
                    "Resource Planning",
                ][..],
            ),
            (
                "TECHNICAL LEADERSHIP & MENTORING",
                &["Leadership", "Mentoring", "Team Building", "Coaching", "Management"][..],
            ),
            (
                "CROSS-FUNCTIONAL COLLABORATION",
                &[
                    "Collaboration",
                    "Communication",
                    "Cross-team",
                    "Stakeholder Management",
                ][..],
            ),
            (
                "INTERNATIONAL EXPANSION & REGULATORY COMPLIANCE",
                &["International", "Compliance", "GDPR", "Regulatory", "Localization"][..],
            ),
            (
                "DEVOPS & OPERATIONAL EXCELLENCE",
                &[
                    "DevOps",
                    "CI/CD",
                    "CloudFormation",
                    "Infrastructure",
                    "On-Call",
                    "Monitoring",
                ][..],
            ),
            (
                "INNOVATION & EXPERIMENTATION",
                &["Innovation", "Experimentation", "A/B Testing", "Research"][..],
            ),
            (
                "FULL-STACK DEVELOPMENT",
                &[
                    "Full-Stack",
                    "Frontend",
                    "Backend",
                    "JavaScript",
                    "Java",
                    "React",
                    "UI/UX",
                ][..],
            ),
            (
                "EARLY CAREER & FOUNDATION",
                &["Internship", "Early Career", "Algorithm", "Research"][..],
            ),
            (
                "LEADERSHIP & PROFESSIONAL SKILLS",
                &["Leadership", "Training", "Documentation", "Communication"][..],
            ),
            (
                "EDUCATION & ACADEMIC EXCELLENCE",
                &["Education", "Computer Science", "Academic"][..],
            ),
            (
                "TECHNICAL SKILLS EVIDENCE",
                &["Programming", "Languages", "Frameworks", "Tools"][..],
            ),
        ])
    });

/// Category → suitable role types, in priority order.
pub static CATEGORY_ROLE_TYPES: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| {
        HashMap::from([
            (
                "SYSTEM ARCHITECTURE & DESIGN",
                &[
                    "Backend Engineer",
                    "Software Engineer",
                    "Systems Engineer",
                    "Staff Engineer",
                ][..],
            ),
            (
                ML_CATEGORY,
                &[
                    "ML Engineer",
                    "Data Scientist",
                    "ML/AI Engineer",
                    "Research Engineer",
                ][..],
            ),
            (
                "SCALE & PERFORMANCE",
                &[
                    "Backend Engineer",
                    "Performance Engineer",
                    "Infrastructure Engineer",
                    "Staff Engineer",
                ][..],
            ),
            (
                "COST OPTIMIZATION & BUSINESS IMPACT",
                &["Senior Engineer", "Staff Engineer", "Tech Lead", "Product Engineer"][..],
            ),
            (
                "TECHNICAL LEADERSHIP & MENTORING",
                &[
                    "Senior Engineer",
                    "Staff Engineer",
                    "Tech Lead",
                    "Engineering Manager",
                ][..],
            ),
            (
                "CROSS-FUNCTIONAL COLLABORATION",
                &["Product Engineer", "Tech Lead", "Senior Engineer"][..],
            ),
            (
                "INTERNATIONAL EXPANSION & REGULATORY COMPLIANCE",
                &["Senior Engineer", "Staff Engineer", "Compliance Engineer"][..],
            ),
            (
                "DEVOPS & OPERATIONAL EXCELLENCE",
                &[
                    "DevOps Engineer",
                    "SRE",
                    "Platform Engineer",
                    "Infrastructure Engineer",
                ][..],
            ),
            (
                "INNOVATION & EXPERIMENTATION",
                &["Research Engineer", "Senior Engineer", "Product Engineer"][..],
            ),
            (
                "FULL-STACK DEVELOPMENT",
                &["Full-Stack Engineer", "Product Engineer", "Software Engineer"][..],
            ),
            (
                "EARLY CAREER & FOUNDATION",
                &["Software Engineer", "Junior Engineer"][..],
            ),
            (
                "LEADERSHIP & PROFESSIONAL SKILLS",
                &["Senior Engineer", "Staff Engineer", "Tech Lead"][..],
            ),
            (
                "EDUCATION & ACADEMIC EXCELLENCE",
                &["Software Engineer", "ML Engineer", "Research Engineer"][..],
            ),
            (
                "TECHNICAL SKILLS EVIDENCE",
                &[
                    "Software Engineer",
                    "Backend Engineer",
                    "ML Engineer",
                    "Full-Stack Engineer",
                ][..],
            ),
        ])
    });

/// Technology terms picked up from block content (case-insensitive).
pub const TECH_SKILL_TERMS: &[&str] = &[
    "Java",
    "Python",
    "Scala",
    "Kotlin",
    "JavaScript",
    "TypeScript",
    "SQL",
    "Spark",
    "TensorFlow",
    "AWS",
    "React",
    "Machine Learning",
    "System Design",
    "Architecture",
    "API",
    "DevOps",
    "Leadership",
    "Mentoring",
];

/// Every role type the classifier can emit, deduplicated, in table order.
pub static KNOWN_ROLE_TYPES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut categories: Vec<&&str> = CATEGORY_ROLE_TYPES.keys().collect();
    categories.sort();

    let mut roles: Vec<&'static str> = Vec::new();
    for category in categories {
        for role in CATEGORY_ROLE_TYPES[*category] {
            if !roles.contains(role) {
                roles.push(role);
            }
        }
    }
    for extra in ["ML Engineer", "Full-Stack Engineer", "Senior Engineer"] {
        if !roles.contains(&extra) {
            roles.push(extra);
        }
    }
    roles
});

pub fn category_skills(category: &str) -> &'static [&'static str] {
    CATEGORY_SKILLS.get(category).copied().unwrap_or(&[])
}

pub fn category_role_types(category: &str) -> &'static [&'static str] {
    CATEGORY_ROLE_TYPES.get(category).copied().unwrap_or(&[])
}
