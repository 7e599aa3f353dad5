use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::DATETIME_FORMAT;
use crate::db::DatabaseError;
use crate::models::{Gender, Lifestyle, UserProfile};

/// Insert or replace a user's demographic profile.
pub fn upsert_user_profile(
    conn: &Connection,
    user_id: &Uuid,
    profile: &UserProfile,
) -> Result<(), DatabaseError> {
    let lifestyle_json = profile
        .lifestyle
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let now = chrono::Local::now().naive_local();

    conn.execute(
        "INSERT INTO user_profiles (user_id, age, gender, bmi, lifestyle, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(user_id) DO UPDATE SET
            age = excluded.age,
            gender = excluded.gender,
            bmi = excluded.bmi,
            lifestyle = excluded.lifestyle,
            updated_at = excluded.updated_at",
        params![
            user_id.to_string(),
            profile.age,
            profile.gender.as_str(),
            profile.bmi,
            lifestyle_json,
            now.format(DATETIME_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

/// Get a user's profile, or `None` for an unknown user.
pub fn get_user_profile(conn: &Connection, user_id: &Uuid) -> Result<Option<UserProfile>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT age, gender, bmi, lifestyle FROM user_profiles WHERE user_id = ?1",
            params![user_id.to_string()],
            |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((age, gender_str, bmi, lifestyle_json)) = row else {
        return Ok(None);
    };

    let lifestyle = lifestyle_json.and_then(|json| {
        serde_json::from_str::<Lifestyle>(&json)
            .map_err(|e| {
                tracing::warn!(user_id = %user_id, error = %e, "Corrupt lifestyle column, ignoring");
            })
            .ok()
    });

    Ok(Some(UserProfile {
        age,
        gender: Gender::from_str(&gender_str)?,
        bmi,
        lifestyle,
    }))
}
