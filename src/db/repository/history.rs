use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{DiseaseSummary, HistoryEntry, Sex, Symptom};

pub fn insert_history(conn: &Connection, entry: &HistoryEntry) -> Result<(), DatabaseError> {
    let symptoms = serde_json::to_string(&entry.selected_symptoms)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
    let disease = serde_json::to_string(&entry.detected_disease)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;

    conn.execute(
        "INSERT INTO history (id, user_id, user_name, user_age, user_sex,
         selected_symptoms, detected_disease, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entry.id.to_string(),
            entry.user_id.to_string(),
            entry.user_name,
            entry.user_age,
            entry.user_sex.as_str(),
            symptoms,
            disease,
            entry.timestamp.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// All history entries for one user, newest first.
pub fn history_for_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Vec<HistoryEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, user_name, user_age, user_sex,
         selected_symptoms, detected_disease, timestamp
         FROM history WHERE user_id = ?1 ORDER BY timestamp DESC",
    )?;

    let rows = stmt.query_map(params![user_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i64>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
            row.get::<_, String>(7)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (id, user_id, user_name, user_age, user_sex, symptoms, disease, timestamp) = row?;

        let selected_symptoms: Vec<Symptom> = serde_json::from_str(&symptoms)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;
        let detected_disease: DiseaseSummary = serde_json::from_str(&disease)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;

        entries.push(HistoryEntry {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            user_name,
            user_age,
            user_sex: Sex::from_str(&user_sex)?,
            selected_symptoms,
            detected_disease,
            timestamp: DateTime::parse_from_rfc3339(&timestamp)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_default(),
        });
    }
    Ok(entries)
}
