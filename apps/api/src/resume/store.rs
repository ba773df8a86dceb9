use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{EducationRow, ExperienceRow, ProjectRow, SkillRow};
use crate::models::user::UserRow;
use crate::resume::structured::{
    education_id, experience_id, or_default, project_id, skill_id, StructuredResumeData,
};
use crate::scoring::competency::CompetencyUpdate;
use crate::scoring::store::set_resume_score;

/// Who wrote a row. User edits win over later resume uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Resume,
    User,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Resume => "resume",
            DataSource::User => "user",
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SaveSummary {
    pub skills: usize,
    pub projects: usize,
    pub experience: usize,
    pub education: usize,
    /// Rows skipped because a user edit owns them.
    pub preserved: usize,
    pub competency: Option<CompetencyUpdate>,
}

#[derive(Debug, Serialize)]
pub struct StoredResume {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub professional_summary: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Vec<SkillRow>,
    pub projects: Vec<ProjectRow>,
    pub experience: Vec<ExperienceRow>,
    pub education: Vec<EducationRow>,
}

/// Persists structured resume data for a user in one transaction.
///
/// Present personal-info fields are merged into the user row (created if
/// absent). Child rows are upserted by slug id; a `resume` write never
/// replaces a row whose source is `user`. When `resume_score` is given it
/// becomes the resume sub-score and the competency score is recomputed.
pub async fn save_resume(
    pool: &PgPool,
    user_id: &str,
    data: &StructuredResumeData,
    source: DataSource,
    resume_score: Option<i32>,
    resume_url: Option<&str>,
) -> Result<SaveSummary, AppError> {
    let mut tx = pool.begin().await?;

    upsert_profile(&mut tx, user_id, data, resume_url).await?;

    let mut summary = SaveSummary::default();

    for (category, names) in data.skills.categories() {
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            let id = skill_id(name);
            if id.is_empty() {
                continue;
            }
            let written = sqlx::query(
                r#"
                INSERT INTO resume_skills (user_id, skill_id, name, category, confidence, source, active, last_updated)
                VALUES ($1, $2, $3, $4, 1.0, $5, TRUE, NOW())
                ON CONFLICT (user_id, skill_id) DO UPDATE SET
                    name = EXCLUDED.name,
                    category = EXCLUDED.category,
                    confidence = EXCLUDED.confidence,
                    source = EXCLUDED.source,
                    active = TRUE,
                    last_updated = NOW()
                WHERE resume_skills.source <> 'user' OR EXCLUDED.source = 'user'
                "#,
            )
            .bind(user_id)
            .bind(&id)
            .bind(name)
            .bind(category)
            .bind(source.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();
            tally(&mut summary.skills, &mut summary.preserved, written);
        }
    }

    for project in &data.projects {
        let title = or_default(project.title.as_deref(), "Untitled");
        let written = sqlx::query(
            r#"
            INSERT INTO resume_projects (user_id, project_id, title, summary, tech_stack, source, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (user_id, project_id) DO UPDATE SET
                title = EXCLUDED.title,
                summary = EXCLUDED.summary,
                tech_stack = EXCLUDED.tech_stack,
                source = EXCLUDED.source,
                last_updated = NOW()
            WHERE resume_projects.source <> 'user' OR EXCLUDED.source = 'user'
            "#,
        )
        .bind(user_id)
        .bind(project_id(title))
        .bind(title)
        .bind(project.summary.as_deref())
        .bind(&project.tech_stack)
        .bind(source.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();
        tally(&mut summary.projects, &mut summary.preserved, written);
    }

    for exp in &data.experience {
        let company = or_default(exp.company.as_deref(), "Unknown");
        let role = or_default(exp.role.as_deref(), "Unknown");
        let written = sqlx::query(
            r#"
            INSERT INTO resume_experience (user_id, experience_id, role, company, duration, responsibilities, source, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (user_id, experience_id) DO UPDATE SET
                role = EXCLUDED.role,
                company = EXCLUDED.company,
                duration = EXCLUDED.duration,
                responsibilities = EXCLUDED.responsibilities,
                source = EXCLUDED.source,
                last_updated = NOW()
            WHERE resume_experience.source <> 'user' OR EXCLUDED.source = 'user'
            "#,
        )
        .bind(user_id)
        .bind(experience_id(company, role))
        .bind(role)
        .bind(company)
        .bind(exp.duration.as_deref())
        .bind(&exp.responsibilities)
        .bind(source.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();
        tally(&mut summary.experience, &mut summary.preserved, written);
    }

    for edu in &data.education {
        let institution = or_default(edu.institution.as_deref(), "Unknown");
        let degree = or_default(edu.degree.as_deref(), "Unknown");
        let written = sqlx::query(
            r#"
            INSERT INTO resume_education (user_id, education_id, institution, degree, field_of_study, year, source, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (user_id, education_id) DO UPDATE SET
                institution = EXCLUDED.institution,
                degree = EXCLUDED.degree,
                field_of_study = EXCLUDED.field_of_study,
                year = EXCLUDED.year,
                source = EXCLUDED.source,
                last_updated = NOW()
            WHERE resume_education.source <> 'user' OR EXCLUDED.source = 'user'
            "#,
        )
        .bind(user_id)
        .bind(education_id(institution, degree))
        .bind(institution)
        .bind(degree)
        .bind(edu.field_of_study.as_deref())
        .bind(edu.year.as_deref())
        .bind(source.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();
        tally(&mut summary.education, &mut summary.preserved, written);
    }

    if let Some(score) = resume_score {
        summary.competency = Some(set_resume_score(&mut tx, user_id, score).await?);
    }

    tx.commit().await?;

    info!(
        "Saved {} resume data for {}: {} skills, {} projects, {} roles, {} schools ({} user rows kept)",
        source.as_str(),
        user_id,
        summary.skills,
        summary.projects,
        summary.experience,
        summary.education,
        summary.preserved
    );
    Ok(summary)
}

fn tally(written: &mut usize, preserved: &mut usize, rows_affected: u64) {
    if rows_affected > 0 {
        *written += 1;
    } else {
        *preserved += 1;
    }
}

async fn upsert_profile(
    conn: &mut PgConnection,
    user_id: &str,
    data: &StructuredResumeData,
    resume_url: Option<&str>,
) -> Result<(), sqlx::Error> {
    let present = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let info = &data.personal_info;

    sqlx::query(
        r#"
        INSERT INTO users (uid, full_name, email, phone, location, professional_summary, resume_url, skills)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (uid) DO UPDATE SET
            full_name = COALESCE(EXCLUDED.full_name, users.full_name),
            email = COALESCE(EXCLUDED.email, users.email),
            phone = COALESCE(EXCLUDED.phone, users.phone),
            location = COALESCE(EXCLUDED.location, users.location),
            professional_summary = COALESCE(EXCLUDED.professional_summary, users.professional_summary),
            resume_url = COALESCE(EXCLUDED.resume_url, users.resume_url),
            skills = CASE WHEN cardinality(EXCLUDED.skills) > 0 THEN EXCLUDED.skills ELSE users.skills END,
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(present(&info.full_name))
    .bind(present(&info.email))
    .bind(present(&info.phone))
    .bind(present(&info.location))
    .bind(present(&data.professional_summary))
    .bind(resume_url)
    .bind(data.skills.flatten_unique())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Current structured resume data for a user. 404 if the user does not exist.
pub async fn load_resume(pool: &PgPool, user_id: &str) -> Result<StoredResume, AppError> {
    let user: UserRow = sqlx::query_as("SELECT * FROM users WHERE uid = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    let skills: Vec<SkillRow> = sqlx::query_as(
        "SELECT * FROM resume_skills WHERE user_id = $1 AND active ORDER BY category, name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let projects: Vec<ProjectRow> =
        sqlx::query_as("SELECT * FROM resume_projects WHERE user_id = $1 ORDER BY title")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    let experience: Vec<ExperienceRow> =
        sqlx::query_as("SELECT * FROM resume_experience WHERE user_id = $1 ORDER BY company, role")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    let education: Vec<EducationRow> = sqlx::query_as(
        "SELECT * FROM resume_education WHERE user_id = $1 ORDER BY institution, degree",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(StoredResume {
        full_name: user.full_name,
        email: user.email,
        phone: user.phone,
        location: user.location,
        professional_summary: user.professional_summary,
        resume_url: user.resume_url,
        skills,
        projects,
        experience,
        education,
    })
}
