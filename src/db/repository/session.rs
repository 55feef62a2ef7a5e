use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;

/// Server-side record of an issued bearer token. Only the SHA-256 hash
/// of the token is stored.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub token_hash: String,
    pub user_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub fn insert_session(conn: &Connection, session: &SessionRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO sessions (token_hash, user_id, issued_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            session.token_hash,
            session.user_id.to_string(),
            session.issued_at.to_rfc3339(),
            session.expires_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn find_session(
    conn: &Connection,
    token_hash: &str,
) -> Result<Option<SessionRecord>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT token_hash, user_id, issued_at, expires_at
             FROM sessions WHERE token_hash = ?1",
            params![token_hash],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((token_hash, user_id, issued_at, expires_at)) = row else {
        return Ok(None);
    };

    Ok(Some(SessionRecord {
        token_hash,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        issued_at: parse_timestamp(&issued_at),
        expires_at: parse_timestamp(&expires_at),
    }))
}

pub fn delete_session(conn: &Connection, token_hash: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM sessions WHERE token_hash = ?1", params![token_hash])?;
    Ok(())
}

/// Remove every session that expired before `now`. Returns the number
/// of rows deleted.
pub fn purge_expired(conn: &Connection, now: DateTime<Utc>) -> Result<usize, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM sessions WHERE expires_at < ?1",
        params![now.to_rfc3339()],
    )?;
    Ok(deleted)
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::user::insert_user;
    use crate::models::{Sex, User};

    fn seed_user(conn: &Connection) -> Uuid {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            age: 30,
            sex: Sex::Female,
            email: "ada@example.com".into(),
            password_hash: "hash".into(),
            created_at: Utc::now(),
        };
        insert_user(conn, &user).unwrap();
        user.id
    }

    fn session_for(user_id: Uuid, hash: &str, ttl: Duration) -> SessionRecord {
        let now = Utc::now();
        SessionRecord {
            token_hash: hash.into(),
            user_id,
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    #[test]
    fn insert_and_find_session() {
        let conn = open_memory_database().unwrap();
        let user_id = seed_user(&conn);
        insert_session(&conn, &session_for(user_id, "hash-1", Duration::hours(1))).unwrap();

        let found = find_session(&conn, "hash-1").unwrap().unwrap();
        assert_eq!(found.user_id, user_id);
        assert!(found.expires_at > Utc::now());
    }

    #[test]
    fn unknown_hash_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(find_session(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn delete_session_removes_row() {
        let conn = open_memory_database().unwrap();
        let user_id = seed_user(&conn);
        insert_session(&conn, &session_for(user_id, "hash-1", Duration::hours(1))).unwrap();

        delete_session(&conn, "hash-1").unwrap();
        assert!(find_session(&conn, "hash-1").unwrap().is_none());
    }

    #[test]
    fn purge_removes_only_expired() {
        let conn = open_memory_database().unwrap();
        let user_id = seed_user(&conn);
        insert_session(&conn, &session_for(user_id, "live", Duration::hours(1))).unwrap();
        insert_session(&conn, &session_for(user_id, "dead", Duration::hours(-1))).unwrap();

        let deleted = purge_expired(&conn, Utc::now()).unwrap();
        assert_eq!(deleted, 1);
        assert!(find_session(&conn, "live").unwrap().is_some());
        assert!(find_session(&conn, "dead").unwrap().is_none());
    }
}
