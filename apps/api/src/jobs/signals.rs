//! Cheap signals derived from job text and dates: salary range, seniority,
//! and how long an application has gone without news.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::jobs::models::{ExperienceLevel, JobRecord};

static SALARY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[\d,]*").expect("valid salary pattern"));
static THOUSANDS_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d\s*k\b").expect("valid thousands pattern"));
static YEARS_EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\+?\s*years?\s*(?:of)?\s*experience").expect("valid years pattern")
});

const HOURLY_MARKERS: &[&str] = &["/hour", "per hour", "/hr", "hourly"];
const HOURS_PER_YEAR: i64 = 40 * 52;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalaryRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub currency: Option<String>,
}

/// Parses free-text salary such as `"£50,000 - £65,000"`, `"$80k-$120k"`
/// or `"£25 per hour"` into a yearly range. Figures too large to scale are
/// dropped.
pub fn parse_salary(text: &str) -> SalaryRange {
    let upper = text.to_uppercase();
    let currency = if text.contains('£') || upper.contains("GBP") {
        Some("GBP")
    } else if text.contains('$') || upper.contains("USD") {
        Some("USD")
    } else if text.contains('€') || upper.contains("EUR") {
        Some("EUR")
    } else {
        None
    }
    .map(str::to_string);

    let lower = text.to_lowercase();
    let thousands = THOUSANDS_SUFFIX.is_match(text);
    let hourly = HOURLY_MARKERS.iter().any(|m| lower.contains(m));

    let values: Vec<i64> = SALARY_NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().replace(',', "").parse::<i64>().ok())
        .filter_map(|n| if thousands { n.checked_mul(1000) } else { Some(n) })
        .filter_map(|n| if hourly { n.checked_mul(HOURS_PER_YEAR) } else { Some(n) })
        .collect();

    SalaryRange {
        min: values.iter().copied().min(),
        max: values.iter().copied().max(),
        currency,
    }
}

/// Seniority from explicit level words, then from "N years experience".
/// Defaults to mid when nothing matches.
pub fn determine_experience_level(text: &str) -> ExperienceLevel {
    let lower = text.to_lowercase();
    let has = |terms: &[&str]| terms.iter().any(|t| lower.contains(t));

    if has(&["junior", "entry level", "graduate", "early career"]) {
        return ExperienceLevel::Junior;
    }
    if has(&["staff engineer", "staff software"]) {
        return ExperienceLevel::Staff;
    }
    if has(&["principal", "distinguished"]) {
        return ExperienceLevel::Principal;
    }
    if has(&["senior", "sr.", "lead"]) {
        return ExperienceLevel::Senior;
    }
    if has(&["mid-level", "intermediate", "mid level"]) {
        return ExperienceLevel::Mid;
    }

    let years = YEARS_EXPERIENCE
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());

    match years {
        Some(0..=2) => ExperienceLevel::Junior,
        Some(3..=5) => ExperienceLevel::Mid,
        Some(6..=8) => ExperienceLevel::Senior,
        Some(_) => ExperienceLevel::Staff,
        None => ExperienceLevel::Mid,
    }
}

/// Stored level if recognised, else inferred from the role title.
pub fn experience_level_for(job: &JobRecord) -> ExperienceLevel {
    job.experience_level
        .as_deref()
        .and_then(ExperienceLevel::parse)
        .unwrap_or_else(|| determine_experience_level(job.role_title()))
}

/// Stored salary bounds if present, else parsed from the salary text.
pub fn salary_range_for(job: &JobRecord) -> SalaryRange {
    if job.salary_min.is_some() || job.salary_max.is_some() {
        return SalaryRange {
            min: job.salary_min.map(i64::from),
            max: job.salary_max.map(i64::from),
            currency: job.salary_currency.clone(),
        };
    }
    job.salary.as_deref().map(parse_salary).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StalenessLevel {
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Staleness {
    pub days_since_update: Option<i64>,
    pub staleness_level: StalenessLevel,
}

/// Days since the last update (falling back to the application date).
pub fn staleness(job: &JobRecord, today: NaiveDate) -> Staleness {
    let Some(reference) = job.last_update.or(job.application_date) else {
        return Staleness {
            days_since_update: None,
            staleness_level: StalenessLevel::Gray,
        };
    };

    let days = (today - reference).num_days();
    let staleness_level = match days {
        d if d < 7 => StalenessLevel::Green,
        d if d < 14 => StalenessLevel::Yellow,
        d if d < 21 => StalenessLevel::Orange,
        _ => StalenessLevel::Red,
    };

    Staleness {
        days_since_update: Some(days),
        staleness_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_salary_gbp_range() {
        let range = parse_salary("£50,000 - £65,000 per annum");
        assert_eq!(range.min, Some(50_000));
        assert_eq!(range.max, Some(65_000));
        assert_eq!(range.currency.as_deref(), Some("GBP"));
    }

    #[test]
    fn test_parse_salary_k_notation() {
        let range = parse_salary("$120k-$80k");
        assert_eq!(range.min, Some(80_000));
        assert_eq!(range.max, Some(120_000));
        assert_eq!(range.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_parse_salary_hourly() {
        let range = parse_salary("€40 per hour");
        assert_eq!(range.min, Some(40 * 40 * 52));
        assert_eq!(range.max, range.min);
        assert_eq!(range.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_parse_salary_without_numbers() {
        let range = parse_salary("Competitive, GBP");
        assert_eq!(range.min, None);
        assert_eq!(range.max, None);
        assert_eq!(range.currency.as_deref(), Some("GBP"));
        assert_eq!(parse_salary(""), SalaryRange::default());
    }

    #[test]
    fn test_parse_salary_drops_figures_that_overflow() {
        let range = parse_salary("£99999999999999999k");
        assert_eq!(range.min, None);
        assert_eq!(range.max, None);
        assert_eq!(range.currency.as_deref(), Some("GBP"));

        let hourly = parse_salary("£9999999999999999 per hour, or £30 per hour");
        assert_eq!(hourly.min, Some(30 * HOURS_PER_YEAR));
        assert_eq!(hourly.max, Some(30 * HOURS_PER_YEAR));
    }

    #[test]
    fn test_parse_salary_k_must_follow_a_digit() {
        let range = parse_salary("£50,000 per year + bank holidays");
        assert_eq!(range.min, Some(50_000));
        assert_eq!(range.max, Some(50_000));

        let spaced = parse_salary("£45 K - £55 K");
        assert_eq!(spaced.min, Some(45_000));
        assert_eq!(spaced.max, Some(55_000));
    }

    #[test]
    fn test_experience_keywords_take_priority() {
        assert_eq!(determine_experience_level("Graduate Software Engineer"), ExperienceLevel::Junior);
        assert_eq!(determine_experience_level("Staff Engineer, Payments"), ExperienceLevel::Staff);
        assert_eq!(determine_experience_level("Principal Data Scientist"), ExperienceLevel::Principal);
        assert_eq!(determine_experience_level("Tech Lead"), ExperienceLevel::Senior);
        assert_eq!(determine_experience_level("Intermediate developer"), ExperienceLevel::Mid);
    }

    #[test]
    fn test_experience_from_years() {
        assert_eq!(determine_experience_level("2 years experience"), ExperienceLevel::Junior);
        assert_eq!(determine_experience_level("5+ years of experience"), ExperienceLevel::Mid);
        assert_eq!(determine_experience_level("7 years experience"), ExperienceLevel::Senior);
        assert_eq!(determine_experience_level("10 years of experience"), ExperienceLevel::Staff);
        assert_eq!(determine_experience_level("Backend Engineer"), ExperienceLevel::Mid);
    }

    #[test]
    fn test_stored_values_win_over_inference() {
        let job = JobRecord {
            role: Some("Senior Engineer".into()),
            experience_level: Some("staff".into()),
            salary: Some("£40,000".into()),
            salary_min: Some(70_000),
            salary_currency: Some("GBP".into()),
            ..Default::default()
        };
        assert_eq!(experience_level_for(&job), ExperienceLevel::Staff);
        assert_eq!(salary_range_for(&job).min, Some(70_000));
        assert_eq!(salary_range_for(&job).max, None);

        let inferred = JobRecord {
            role: Some("Senior Engineer".into()),
            salary: Some("£40,000".into()),
            ..Default::default()
        };
        assert_eq!(experience_level_for(&inferred), ExperienceLevel::Senior);
        assert_eq!(salary_range_for(&inferred).max, Some(40_000));
    }

    #[test]
    fn test_staleness_thresholds() {
        let today = date(2025, 3, 22);
        let with_update = |d: NaiveDate| JobRecord {
            last_update: Some(d),
            ..Default::default()
        };

        let cases = [
            (date(2025, 3, 16), 6, StalenessLevel::Green),
            (date(2025, 3, 15), 7, StalenessLevel::Yellow),
            (date(2025, 3, 8), 14, StalenessLevel::Orange),
            (date(2025, 3, 2), 20, StalenessLevel::Orange),
            (date(2025, 3, 1), 21, StalenessLevel::Red),
        ];
        for (updated, days, level) in cases {
            let s = staleness(&with_update(updated), today);
            assert_eq!(s.days_since_update, Some(days));
            assert_eq!(s.staleness_level, level, "{days} days");
        }
    }

    #[test]
    fn test_staleness_falls_back_to_application_date() {
        let job = JobRecord {
            application_date: Some(date(2025, 1, 1)),
            ..Default::default()
        };
        let s = staleness(&job, date(2025, 1, 3));
        assert_eq!(s.days_since_update, Some(2));
        assert_eq!(s.staleness_level, StalenessLevel::Green);

        let unknown = staleness(&JobRecord::default(), date(2025, 1, 3));
        assert_eq!(unknown.days_since_update, None);
        assert_eq!(unknown.staleness_level, StalenessLevel::Gray);
    }
}
