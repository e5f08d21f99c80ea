use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::mood_entry::{MoodEntry, MoodEntryRequest};
use crate::AppState;

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let entries = sqlx::query_as::<_, MoodEntry>(
        r#"
        SELECT * FROM mood_entries
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}

pub async fn get_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<MoodEntry>> {
    let entry = sqlx::query_as::<_, MoodEntry>(
        "SELECT * FROM mood_entries WHERE id = $1 AND user_id = $2",
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Mood entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn create_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<MoodEntryRequest>,
) -> AppResult<(StatusCode, Json<MoodEntry>)> {
    let (mood, emotions, notes) = normalize(&body)?;

    let entry = sqlx::query_as::<_, MoodEntry>(
        r#"
        INSERT INTO mood_entries (id, user_id, mood, emotions, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(&mood)
    .bind(&emotions)
    .bind(&notes)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
    Json(body): Json<MoodEntryRequest>,
) -> AppResult<Json<MoodEntry>> {
    let (mood, emotions, notes) = normalize(&body)?;

    // Ownership check before any mutation. Someone else's entry reads the
    // same as a nonexistent one.
    verify_ownership(&state, entry_id, auth_user.id).await?;

    let entry = sqlx::query_as::<_, MoodEntry>(
        r#"
        UPDATE mood_entries
        SET mood = $3, emotions = $4, notes = $5
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(entry_id)
    .bind(auth_user.id)
    .bind(&mood)
    .bind(&emotions)
    .bind(&notes)
    .fetch_optional(&state.db)
    .await?
    // Entry deleted between the check and the update; surfaces as not found.
    .ok_or_else(|| AppError::NotFound("Mood entry not found".into()))?;

    Ok(Json(entry))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    verify_ownership(&state, entry_id, auth_user.id).await?;

    sqlx::query("DELETE FROM mood_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Fetch-then-mutate step shared by update and delete: the entry must exist
/// and belong to the caller.
async fn verify_ownership(state: &AppState, entry_id: Uuid, user_id: Uuid) -> AppResult<()> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM mood_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Mood entry not found".into()))?;

    Ok(())
}

/// Storage rules shared by create and update: `mood` must be non-empty once
/// trimmed, `emotions` falls back to an empty string, blank `notes` collapse
/// to NULL.
fn normalize(body: &MoodEntryRequest) -> AppResult<(String, String, Option<String>)> {
    let mood = body
        .mood
        .as_deref()
        .map(str::trim)
        .filter(|mood| !mood.is_empty())
        .ok_or_else(|| AppError::Validation("Mood is required".into()))?
        .to_string();

    let emotions = body
        .emotions
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let notes = body
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .map(str::to_string);

    Ok((mood, emotions, notes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(
        mood: Option<&str>,
        emotions: Option<&str>,
        notes: Option<&str>,
    ) -> MoodEntryRequest {
        MoodEntryRequest {
            mood: mood.map(String::from),
            emotions: emotions.map(String::from),
            notes: notes.map(String::from),
        }
    }

    #[test]
    fn missing_mood_is_rejected() {
        assert!(normalize(&body(None, None, None)).is_err());
    }

    #[test]
    fn empty_mood_is_rejected() {
        assert!(normalize(&body(Some(""), None, None)).is_err());
    }

    #[test]
    fn whitespace_only_mood_is_rejected() {
        assert!(normalize(&body(Some("   \t "), None, None)).is_err());
    }

    #[test]
    fn mood_is_stored_trimmed() {
        let (mood, emotions, notes) = normalize(&body(Some("  happy "), None, None)).unwrap();
        assert_eq!(mood, "happy");
        assert_eq!(emotions, "");
        assert_eq!(notes, None);
    }

    #[test]
    fn emotions_are_stored_trimmed() {
        let (_, emotions, _) =
            normalize(&body(Some("ok"), Some("  calm, hopeful "), None)).unwrap();
        assert_eq!(emotions, "calm, hopeful");
    }

    #[test]
    fn blank_notes_collapse_to_null() {
        let (_, _, notes) = normalize(&body(Some("ok"), None, Some("   "))).unwrap();
        assert_eq!(notes, None);
    }

    #[test]
    fn notes_are_stored_trimmed() {
        let (_, _, notes) = normalize(&body(Some("ok"), None, Some(" slept well "))).unwrap();
        assert_eq!(notes.as_deref(), Some("slept well"));
    }
}
