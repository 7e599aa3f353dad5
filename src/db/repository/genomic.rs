use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{DiseaseType, GenomicDiseaseRisk, GenomicSummary};

/// Record a genomic percentile for one disease. A later value for the
/// same disease replaces the earlier one.
pub fn insert_genomic_risk(
    conn: &Connection,
    user_id: &Uuid,
    risk: &GenomicDiseaseRisk,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO genomic_risks (user_id, disease_type, risk_score)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(user_id, disease_type) DO UPDATE SET risk_score = excluded.risk_score",
        params![user_id.to_string(), risk.disease_type.tag().as_ref(), risk.risk_score],
    )?;
    Ok(())
}

/// Genomic summary for a user; `None` when nothing was ever recorded.
pub fn get_genomic_summary(conn: &Connection, user_id: &Uuid) -> Result<Option<GenomicSummary>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT disease_type, risk_score FROM genomic_risks
         WHERE user_id = ?1
         ORDER BY disease_type ASC",
    )?;
    let rows = stmt.query_map(params![user_id.to_string()], |row| {
        Ok(GenomicDiseaseRisk {
            disease_type: DiseaseType::parse(&row.get::<_, String>(0)?),
            risk_score: row.get(1)?,
        })
    })?;
    let disease_risks = rows.collect::<Result<Vec<_>, _>>()?;

    if disease_risks.is_empty() {
        Ok(None)
    } else {
        Ok(Some(GenomicSummary { disease_risks }))
    }
}
