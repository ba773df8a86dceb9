//! Gap analysis: pluggable, trait-based comparison of a student's skills
//! with a set of benchmarks.
//!
//! `LlmGapAnalyzer` asks Groq for a semantic match and falls back to the
//! deterministic `KeywordGapAnalyzer` when the model is unavailable.
//! `AppState` holds an `Arc<dyn GapAnalyzer>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{CompletionRequest, LlmClient};
use crate::skillgap::benchmarks::Benchmark;
use crate::skillgap::prompts::GAP_ANALYSIS_PROMPT;

pub const PLAN_STEPS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub skill: String,
    pub student: i32,
    pub benchmark: i32,
}

impl RadarPoint {
    fn gap(&self) -> i32 {
        self.benchmark - self.student
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStep {
    pub step: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapReport {
    pub radar_data: Vec<RadarPoint>,
    pub upskilling_plan: Vec<PlanStep>,
    /// "keyword" | "llm"
    #[serde(default)]
    pub analyzer: String,
}

#[async_trait]
pub trait GapAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        target: &str,
        student_skills: &[String],
        benchmarks: &[Benchmark],
    ) -> Result<GapReport, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordGapAnalyzer
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic analyzer. A student skill equal to the benchmark skill
/// (ignoring case) meets it in full; a substring match in either direction
/// earns 60% of it; anything else scores 0.
pub struct KeywordGapAnalyzer;

#[async_trait]
impl GapAnalyzer for KeywordGapAnalyzer {
    async fn analyze(
        &self,
        _target: &str,
        student_skills: &[String],
        benchmarks: &[Benchmark],
    ) -> Result<GapReport, AppError> {
        Ok(keyword_gap_report(student_skills, benchmarks))
    }
}

fn match_strength(student_skills: &[String], skill: &str) -> f64 {
    let skill = skill.to_lowercase();
    let mut best = 0.0_f64;
    for own in student_skills {
        let own = own.trim().to_lowercase();
        if own.is_empty() {
            continue;
        }
        if own == skill {
            return 1.0;
        }
        if own.contains(&skill) || skill.contains(&own) {
            best = 0.6;
        }
    }
    best
}

pub fn keyword_gap_report(student_skills: &[String], benchmarks: &[Benchmark]) -> GapReport {
    let radar_data: Vec<RadarPoint> = benchmarks
        .iter()
        .map(|b| RadarPoint {
            skill: b.skill.clone(),
            student: (match_strength(student_skills, &b.skill) * b.benchmark as f64).round() as i32,
            benchmark: b.benchmark,
        })
        .collect();

    let upskilling_plan = build_plan(&radar_data);

    GapReport {
        radar_data,
        upskilling_plan,
        analyzer: "keyword".to_string(),
    }
}

/// Three steps targeting the widest gaps first, padded with general advice
/// when fewer than three skills fall short.
fn build_plan(radar: &[RadarPoint]) -> Vec<PlanStep> {
    let mut gaps: Vec<&RadarPoint> = radar.iter().filter(|p| p.gap() > 0).collect();
    gaps.sort_by(|a, b| b.gap().cmp(&a.gap()).then(b.benchmark.cmp(&a.benchmark)));

    let mut steps: Vec<(String, String)> = gaps
        .iter()
        .take(PLAN_STEPS)
        .map(|p| {
            if p.student == 0 {
                (
                    format!("Learn {}", p.skill),
                    format!(
                        "Start with the fundamentals of {} and build a small project that uses it. The target expects {}/100.",
                        p.skill, p.benchmark
                    ),
                )
            } else {
                (
                    format!("Deepen {}", p.skill),
                    format!(
                        "You have some exposure to {}. Close the remaining {}-point gap with advanced material and a production-style project.",
                        p.skill,
                        p.gap()
                    ),
                )
            }
        })
        .collect();

    let fillers = [
        (
            "Build a portfolio project",
            "Combine the target skills in one end-to-end project and publish it with a clear README.",
        ),
        (
            "Practice interviews",
            "Run mock technical interviews focused on the target role to turn knowledge into fluent answers.",
        ),
        (
            "Stay current",
            "Follow release notes and engineering blogs for the target stack and revisit this analysis monthly.",
        ),
    ];
    for (title, description) in fillers {
        if steps.len() >= PLAN_STEPS {
            break;
        }
        steps.push((title.to_string(), description.to_string()));
    }

    steps
        .into_iter()
        .enumerate()
        .map(|(i, (title, description))| PlanStep {
            step: format!("Step {}", i + 1),
            title,
            description,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// LlmGapAnalyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmGapAnalyzer {
    llm: LlmClient,
}

impl LlmGapAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl GapAnalyzer for LlmGapAnalyzer {
    async fn analyze(
        &self,
        target: &str,
        student_skills: &[String],
        benchmarks: &[Benchmark],
    ) -> Result<GapReport, AppError> {
        let prompt = GAP_ANALYSIS_PROMPT
            .replace("{target}", target)
            .replace("{student_skills}", &serde_json::to_string(student_skills).unwrap_or_default())
            .replace("{benchmarks}", &serde_json::to_string(benchmarks).unwrap_or_default());
        let request = CompletionRequest::prompt(prompt)
            .with_system(JSON_ONLY_SYSTEM)
            .json();

        match self.llm.call_json::<GapReport>(&request).await {
            Ok(report) => match sanitize_report(report, benchmarks) {
                Some(report) => {
                    info!("Gap analysis for {target} via {}", self.llm.model());
                    Ok(report)
                }
                None => {
                    warn!("Gap analysis response was incomplete, using keyword analyzer");
                    Ok(keyword_gap_report(student_skills, benchmarks))
                }
            },
            Err(e) => {
                warn!("Gap analysis model call failed, using keyword analyzer: {e}");
                Ok(keyword_gap_report(student_skills, benchmarks))
            }
        }
    }
}

/// Clamps model scores, pins each benchmark to the requested value and
/// tops up a short plan. Rejects a report with no radar data.
fn sanitize_report(mut report: GapReport, benchmarks: &[Benchmark]) -> Option<GapReport> {
    if report.radar_data.is_empty() {
        return None;
    }

    for point in &mut report.radar_data {
        point.student = point.student.clamp(0, 100);
        if let Some(b) = benchmarks
            .iter()
            .find(|b| b.skill.eq_ignore_ascii_case(&point.skill))
        {
            point.benchmark = b.benchmark;
        } else {
            point.benchmark = point.benchmark.clamp(0, 100);
        }
    }

    report.upskilling_plan.truncate(PLAN_STEPS);
    if report.upskilling_plan.len() < PLAN_STEPS {
        let extra = build_plan(&report.radar_data);
        let start = report.upskilling_plan.len();
        report
            .upskilling_plan
            .extend(extra.into_iter().skip(start).enumerate().map(|(i, mut s)| {
                s.step = format!("Step {}", start + i + 1);
                s
            }));
    }
    report.analyzer = "llm".to_string();
    Some(report)
}
