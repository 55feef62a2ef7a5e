use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Sex, User};

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, name, age, sex, email, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user.id.to_string(),
            user.name,
            user.age,
            user.sex.as_str(),
            user.email,
            user.password_hash,
            user.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn find_user_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<User>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, age, sex, email, password_hash, created_at
             FROM users WHERE email = ?1",
            params![email],
            map_user_row,
        )
        .optional()?;
    row.map(row_to_user).transpose()
}

pub fn find_user_by_id(conn: &Connection, id: &Uuid) -> Result<Option<User>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, name, age, sex, email, password_hash, created_at
             FROM users WHERE id = ?1",
            params![id.to_string()],
            map_user_row,
        )
        .optional()?;
    row.map(row_to_user).transpose()
}

type UserRow = (String, String, i64, String, String, String, String);

fn map_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn row_to_user(row: UserRow) -> Result<User, DatabaseError> {
    let (id, name, age, sex, email, password_hash, created_at) = row;
    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        name,
        age,
        sex: Sex::from_str(&sex)?,
        email,
        password_hash,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_default(),
    })
}
