use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tracked job application, as persisted.
///
/// The parsed vectors are filled by the (external) posting parser; any of
/// them may be missing for jobs entered by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobRecord {
    pub id: i64,
    pub role: Option<String>,
    pub company: Option<String>,
    pub url: Option<String>,
    pub salary: Option<String>,
    pub parsed_skills: Option<Vec<String>>,
    pub parsed_requirements: Option<Vec<String>>,
    pub parsed_responsibilities: Option<Vec<String>>,
    pub experience_level: Option<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: Option<String>,
    pub application_date: Option<NaiveDate>,
    pub last_update: Option<NaiveDate>,
    pub generated_cv_id: Option<Uuid>,
}

impl JobRecord {
    pub fn skills(&self) -> &[String] {
        self.parsed_skills.as_deref().unwrap_or_default()
    }

    pub fn requirements(&self) -> &[String] {
        self.parsed_requirements.as_deref().unwrap_or_default()
    }

    pub fn responsibilities(&self) -> &[String] {
        self.parsed_responsibilities.as_deref().unwrap_or_default()
    }

    pub fn role_title(&self) -> &str {
        self.role.as_deref().map(str::trim).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Staff,
    Principal,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Staff => "staff",
            ExperienceLevel::Principal => "principal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "junior" => Some(ExperienceLevel::Junior),
            "mid" => Some(ExperienceLevel::Mid),
            "senior" => Some(ExperienceLevel::Senior),
            "staff" => Some(ExperienceLevel::Staff),
            "principal" => Some(ExperienceLevel::Principal),
            _ => None,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_vectors_read_as_empty() {
        let job = JobRecord {
            id: 1,
            parsed_skills: Some(vec!["Rust".into()]),
            ..Default::default()
        };
        assert_eq!(job.skills(), &["Rust".to_string()]);
        assert!(job.requirements().is_empty());
        assert!(job.responsibilities().is_empty());
        assert_eq!(job.role_title(), "");
    }

    #[test]
    fn test_experience_level_parse() {
        assert_eq!(ExperienceLevel::parse(" Senior "), Some(ExperienceLevel::Senior));
        assert_eq!(ExperienceLevel::parse("lead"), None);
        assert_eq!(ExperienceLevel::Staff.to_string(), "staff");
    }
}
