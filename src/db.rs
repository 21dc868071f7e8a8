use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};
use serde_json::Value;

use crate::models::NotificationRecord;

/// Meta key the buffered notices live under.
pub const USER_META_KEY: &str = "unagi_notifications";

pub fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(include_str!("../migrations/0-usermeta.sql"))])
}

pub fn fetch_user_meta(conn: &Connection, user_id: u64, key: &str) -> Result<Option<Value>> {
    let value = conn
        .prepare_cached(
            r#"
        SELECT
            meta_value
        FROM
            usermeta
        WHERE
            user_id = ?1
        AND
            meta_key = ?2
        "#,
        )?
        .query_row(rusqlite::params![user_id, key], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()
        .with_context(|| format!("reading meta `{key}` of user {user_id}"))?
        .flatten();

    // text column, whatever a producer wrote may not be json
    Ok(value.and_then(|raw| {
        serde_json::from_str::<Value>(&raw)
            .map_err(|e| tracing::debug!("user {user_id}: meta `{key}` is not json: {e}"))
            .ok()
    }))
}

pub fn update_user_meta(conn: &Connection, user_id: u64, key: &str, value: &Value) -> Result<()> {
    let value = serde_json::to_string(value)?;
    conn.execute(
        r#"
        INSERT INTO usermeta (
            user_id,
            meta_key,
            meta_value
        )
        VALUES (
            ?1,
            ?2,
            ?3
        )
        ON CONFLICT (
            user_id,
            meta_key
        )
        DO UPDATE SET
            meta_value = excluded.meta_value
        "#,
        rusqlite::params![user_id, key, value],
    )
    .with_context(|| format!("writing meta `{key}` of user {user_id}"))?;
    Ok(())
}

/// `None` when nothing is stored, or when what is stored is not a record.
pub fn fetch_notification(conn: &Connection, user_id: u64) -> Result<Option<NotificationRecord>> {
    let record = fetch_user_meta(conn, user_id, USER_META_KEY)?.and_then(|value| {
        serde_json::from_value::<NotificationRecord>(value)
            .map_err(|e| tracing::debug!("user {user_id}: not a notification record: {e}"))
            .ok()
    });
    Ok(record)
}

pub fn save_notification(conn: &Connection, user_id: u64, record: &NotificationRecord) -> Result<()> {
    let value = serde_json::to_value(record)?;
    update_user_meta(conn, user_id, USER_META_KEY, &value)
}
