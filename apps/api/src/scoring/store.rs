use sqlx::types::Json;
use sqlx::{PgConnection, PgExecutor, PgPool};
use tracing::info;

use crate::errors::AppError;
use crate::models::activity::ActivityRow;
use crate::scoring::competency::{
    apply_activity, competency_for, ActivityEntry, ActivityType, CompetencyUpdate, Scores,
};

/// Loads the user's activity history in insertion order.
/// Rows with an unrecognised activity type are skipped.
pub async fn load_history<'e, E>(executor: E, user_id: &str) -> Result<Vec<ActivityEntry>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let rows: Vec<ActivityRow> = sqlx::query_as(
        "SELECT id, user_id, activity_type, score, recorded_at
         FROM activity_history WHERE user_id = $1 ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            ActivityType::parse(&row.activity_type).map(|activity_type| ActivityEntry {
                activity_type,
                score: row.score,
                timestamp: row.recorded_at,
            })
        })
        .collect())
}

/// Locks the user row and returns its stored sub-scores.
async fn lock_scores(conn: &mut PgConnection, user_id: &str) -> Result<Scores, AppError> {
    let row: Option<(Option<Json<Scores>>,)> =
        sqlx::query_as("SELECT scores FROM users WHERE uid = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?;

    let (scores,) = row.ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    Ok(scores.map(|s| s.0).unwrap_or_default())
}

async fn write_scores(
    conn: &mut PgConnection,
    user_id: &str,
    update: &CompetencyUpdate,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET scores = $2, competency_score = $3, updated_at = NOW() WHERE uid = $1",
    )
    .bind(user_id)
    .bind(Json(update.scores))
    .bind(update.competency_score)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Appends a quiz or interview result and recomputes the competency score.
///
/// Runs in a single transaction with the user row locked, so concurrent
/// submissions for the same user are serialized and none is lost.
pub async fn update_user_activity_score(
    pool: &PgPool,
    user_id: &str,
    kind: ActivityType,
    score: i32,
) -> Result<CompetencyUpdate, AppError> {
    let mut tx = pool.begin().await?;

    let scores = lock_scores(&mut tx, user_id).await?;

    sqlx::query("INSERT INTO activity_history (user_id, activity_type, score) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(kind.as_str())
        .bind(score)
        .execute(&mut *tx)
        .await?;

    let history = load_history(&mut *tx, user_id).await?;
    let update = apply_activity(scores, &history, kind);
    write_scores(&mut tx, user_id, &update).await?;

    tx.commit().await?;

    info!(
        "Recorded {} score {} for {}: competency {} (history {})",
        kind.as_str(),
        score,
        user_id,
        update.competency_score,
        history.len()
    );
    Ok(update)
}

/// Replaces the resume sub-score and recomputes the competency score,
/// keeping the quiz and interview averages. Expects to run inside the
/// caller's transaction.
pub async fn set_resume_score(
    conn: &mut PgConnection,
    user_id: &str,
    resume_score: i32,
) -> Result<CompetencyUpdate, AppError> {
    let mut scores = lock_scores(conn, user_id).await?;
    scores.resume = resume_score.clamp(0, 100);

    let history = load_history(&mut *conn, user_id).await?;
    let update = CompetencyUpdate {
        scores,
        competency_score: competency_for(&scores, &history),
    };
    write_scores(conn, user_id, &update).await?;
    Ok(update)
}
