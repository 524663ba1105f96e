use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::models::JobRecord;

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_job(&self, id: i64) -> Result<Option<JobRecord>, AppError>;

    /// Stores a generated CV for the job and links it as the job's current CV.
    async fn record_generated_cv(&self, job_id: i64, block_ids: &[i64]) -> Result<Uuid, AppError>;
}

const JOB_COLUMNS: &str = "id, role, company, url, salary, parsed_skills, parsed_requirements, \
                           parsed_responsibilities, experience_level, salary_min, salary_max, \
                           salary_currency, application_date, last_update, generated_cv_id";

#[derive(Clone)]
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn find_job(&self, id: i64) -> Result<Option<JobRecord>, AppError> {
        let job: Option<JobRecord> =
            sqlx::query_as(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(job)
    }

    async fn record_generated_cv(&self, job_id: i64, block_ids: &[i64]) -> Result<Uuid, AppError> {
        let cv_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO generated_cvs (id, job_id, selected_blocks, customizations)
            VALUES ($1, $2, $3, '{}'::jsonb)
            "#,
        )
        .bind(cv_id)
        .bind(job_id)
        .bind(block_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE jobs SET generated_cv_id = $1 WHERE id = $2")
            .bind(cv_id)
            .bind(job_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Generated CV {cv_id} for job {job_id} ({} blocks)", block_ids.len());
        Ok(cv_id)
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryJobRepository {
    jobs: std::sync::Mutex<Vec<JobRecord>>,
    pub generated: std::sync::Mutex<Vec<(Uuid, i64, Vec<i64>)>>,
}

#[cfg(test)]
impl MemoryJobRepository {
    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: std::sync::Mutex::new(jobs),
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[async_trait]
impl JobRepository for MemoryJobRepository {
    async fn find_job(&self, id: i64) -> Result<Option<JobRecord>, AppError> {
        Ok(self.jobs.lock().unwrap().iter().find(|j| j.id == id).cloned())
    }

    async fn record_generated_cv(&self, job_id: i64, block_ids: &[i64]) -> Result<Uuid, AppError> {
        let cv_id = Uuid::new_v4();
        self.generated
            .lock()
            .unwrap()
            .push((cv_id, job_id, block_ids.to_vec()));
        if let Some(job) = self.jobs.lock().unwrap().iter_mut().find(|j| j.id == job_id) {
            job.generated_cv_id = Some(cv_id);
        }
        Ok(cv_id)
    }
}
