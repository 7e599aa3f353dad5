use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{FamilyMember, Relationship};

/// Record one affected (or unaffected) relative.
pub fn insert_family_member(
    conn: &Connection,
    user_id: &Uuid,
    member: &FamilyMember,
) -> Result<(), DatabaseError> {
    let conditions_json = serde_json::to_string(&member.conditions)?;
    conn.execute(
        "INSERT INTO family_history (user_id, relationship, conditions) VALUES (?1, ?2, ?3)",
        params![user_id.to_string(), member.relationship.as_str(), conditions_json],
    )?;
    Ok(())
}

/// All recorded relatives for a user, in insertion order. Empty when none.
pub fn get_family_history(conn: &Connection, user_id: &Uuid) -> Result<Vec<FamilyMember>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT relationship, conditions FROM family_history
         WHERE user_id = ?1
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![user_id.to_string()], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut members = Vec::new();
    for row in rows {
        let (relationship_str, conditions_json) = row?;
        let relationship = Relationship::from_str(&relationship_str).unwrap_or_else(|_| {
            tracing::warn!(value = %relationship_str, "Unknown relationship, treating as other");
            Relationship::Other
        });
        let conditions: Vec<String> = serde_json::from_str(&conditions_json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Corrupt family conditions column, ignoring");
            Vec::new()
        });
        members.push(FamilyMember {
            relationship,
            conditions,
        });
    }
    Ok(members)
}
