use serde::Serialize;

use crate::blocks::tables::KNOWN_ROLE_TYPES;
use crate::jobs::models::JobRecord;

/// Normalized scoring input derived from a job. Never mutated by scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobRequirementVector {
    pub required_skills: Vec<String>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub preferred_role: Option<String>,
}

impl JobRequirementVector {
    pub fn from_job(job: &JobRecord) -> Self {
        Self {
            required_skills: job.skills().to_vec(),
            requirements: job.requirements().to_vec(),
            responsibilities: job.responsibilities().to_vec(),
            preferred_role: preferred_role(job.role_title()),
        }
    }
}

/// Longest known role type named in the title, else the title itself.
fn preferred_role(title: &str) -> Option<String> {
    if title.is_empty() {
        return None;
    }
    let lowered = title.to_lowercase();
    let known = KNOWN_ROLE_TYPES
        .iter()
        .filter(|role| lowered.contains(&role.to_lowercase()))
        .max_by_key(|role| role.len());

    Some(known.map_or_else(|| title.to_string(), |role| role.to_string()))
}
