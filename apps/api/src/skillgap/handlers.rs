use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::upload::read_upload;
use crate::skillgap::benchmarks::{company_benchmarks, Benchmark, COMPANIES};
use crate::skillgap::courses::{recommend_courses, Course};
use crate::skillgap::gap_analysis::GapReport;
use crate::skillgap::jd_parser::{ensure_jd_text, parse_jd_benchmarks};
use crate::state::AppState;
use crate::users::store::get_user;

/// POST /api/v1/skillgap/parse-jd
pub async fn handle_parse_jd(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<Benchmark>>, AppError> {
    let form = read_upload(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    info!("Parsing JD {} ({} bytes)", file.file_name, file.bytes.len());
    let text = state
        .extractor
        .extract(&file.file_name, file.content_type.as_deref(), file.bytes)
        .await?;
    let text = ensure_jd_text(&text)?;

    Ok(Json(parse_jd_benchmarks(&state.groq, text).await))
}

/// A company preset name or a custom benchmark list from a parsed JD.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GapTarget {
    Company(String),
    Custom(Vec<Benchmark>),
}

impl GapTarget {
    /// Display name and benchmarks for the target.
    pub fn resolve(&self) -> Result<(String, Vec<Benchmark>), AppError> {
        match self {
            GapTarget::Company(name) => company_benchmarks(name)
                .map(|(canonical, list)| (canonical.to_string(), list))
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "No benchmarks for company {name}. Known companies: {}",
                        COMPANIES.join(", ")
                    ))
                }),
            GapTarget::Custom(list) if list.is_empty() => Err(AppError::Validation(
                "target benchmark list is empty".to_string(),
            )),
            GapTarget::Custom(list) => Ok((
                "Custom Job".to_string(),
                list.iter()
                    .map(|b| Benchmark::new(b.skill.trim(), b.benchmark))
                    .collect(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeGapRequest {
    pub target: GapTarget,
    #[serde(default, alias = "studentSkills")]
    pub student_skills: Option<Vec<String>>,
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
}

/// POST /api/v1/skillgap/analyze
pub async fn handle_analyze_gap(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeGapRequest>,
) -> Result<Json<GapReport>, AppError> {
    let (target, benchmarks) = req.target.resolve()?;

    let student_skills = match (req.student_skills, req.user_id.as_deref().map(str::trim)) {
        (Some(skills), _) if !skills.is_empty() => skills,
        (_, Some(uid)) if !uid.is_empty() => get_user(&state.db, uid).await?.skills,
        _ => {
            return Err(AppError::Validation(
                "student_skills or user_id is required".to_string(),
            ))
        }
    };

    let report = state
        .gap_analyzer
        .analyze(&target, &student_skills, &benchmarks)
        .await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct CoursesRequest {
    #[serde(alias = "moduleName")]
    pub module: String,
}

#[derive(Debug, Serialize)]
pub struct CoursesResponse {
    pub courses: Vec<Course>,
}

/// POST /api/v1/skillgap/courses
pub async fn handle_courses(
    State(state): State<AppState>,
    Json(req): Json<CoursesRequest>,
) -> Result<Json<CoursesResponse>, AppError> {
    let module = req.module.trim();
    if module.is_empty() {
        return Err(AppError::Validation("module is required".to_string()));
    }

    let courses = recommend_courses(&state.groq, module).await?;
    Ok(Json(CoursesResponse { courses }))
}
