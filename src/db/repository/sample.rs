use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DATE_FORMAT;
use crate::db::DatabaseError;
use crate::models::HealthSample;

/// Insert one dated self-tracking entry. Non-finite vital readings are
/// skipped; JSON has no representation for them.
pub fn insert_health_sample(
    conn: &Connection,
    user_id: &Uuid,
    sample: &HealthSample,
) -> Result<(), DatabaseError> {
    let vital_signs: BTreeMap<&str, f64> = sample
        .vital_signs
        .iter()
        .filter(|(metric, value)| {
            let finite = value.is_finite();
            if !finite {
                tracing::warn!(date = %sample.date, metric = %metric, "Skipping non-finite vital sign");
            }
            finite
        })
        .map(|(metric, value)| (metric.as_str(), *value))
        .collect();

    conn.execute(
        "INSERT INTO health_samples (user_id, sample_date, vital_signs, symptoms, overall_condition)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user_id.to_string(),
            sample.date.format(DATE_FORMAT).to_string(),
            serde_json::to_string(&vital_signs)?,
            serde_json::to_string(&sample.symptoms)?,
            sample.overall_condition,
        ],
    )?;
    Ok(())
}

/// A user's samples ordered by date ascending, optionally limited to an
/// inclusive `(from, to)` date range.
pub fn get_health_samples(
    conn: &Connection,
    user_id: &Uuid,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<Vec<HealthSample>, DatabaseError> {
    let (from, to) = match range {
        Some((from, to)) => (
            from.format(DATE_FORMAT).to_string(),
            to.format(DATE_FORMAT).to_string(),
        ),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT sample_date, vital_signs, symptoms, overall_condition
         FROM health_samples
         WHERE user_id = ?1 AND sample_date >= ?2 AND sample_date <= ?3
         ORDER BY sample_date ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![user_id.to_string(), from, to], |row| {
        Ok(SampleRow {
            date: row.get(0)?,
            vital_signs: row.get(1)?,
            symptoms: row.get(2)?,
            overall_condition: row.get(3)?,
        })
    })?;

    let mut samples = Vec::new();
    for row in rows {
        samples.push(sample_from_row(row?)?);
    }
    Ok(samples)
}

/// Delete every sample for a user. Returns the number removed.
pub fn delete_health_samples_for_user(conn: &Connection, user_id: &Uuid) -> Result<usize, DatabaseError> {
    let affected = conn.execute(
        "DELETE FROM health_samples WHERE user_id = ?1",
        params![user_id.to_string()],
    )?;
    Ok(affected)
}

struct SampleRow {
    date: String,
    vital_signs: String,
    symptoms: String,
    overall_condition: f64,
}

fn sample_from_row(row: SampleRow) -> Result<HealthSample, DatabaseError> {
    let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|e| {
        DatabaseError::InvalidEnum {
            field: "sample_date".into(),
            value: format!("{} ({e})", row.date),
        }
    })?;
    // null readings are dropped individually
    let vital_signs: BTreeMap<String, f64> =
        serde_json::from_str::<BTreeMap<String, Option<f64>>>(&row.vital_signs)
            .map(|raw| {
                raw.into_iter()
                    .filter_map(|(metric, value)| value.map(|v| (metric, v)))
                    .collect()
            })
            .unwrap_or_else(|e| {
                tracing::warn!(date = %date, error = %e, "Corrupt vital_signs column, ignoring");
                BTreeMap::new()
            });
    let symptoms: Vec<String> = serde_json::from_str(&row.symptoms).unwrap_or_else(|e| {
        tracing::warn!(date = %date, error = %e, "Corrupt symptoms column, ignoring");
        Vec::new()
    });

    Ok(HealthSample {
        date,
        vital_signs,
        symptoms,
        overall_condition: row.overall_condition,
    })
}
