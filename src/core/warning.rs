//! Warning persistence.
//!
//! Each function issues exactly one statement so a handler never performs more than
//! one persistence operation per invocation.

use crate::{
    entities::{Warning, warning},
    errors::Result,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use sea_orm::{DbErr, QueryOrder, Set, prelude::*};
use std::sync::atomic::{AtomicU32, Ordering};

/// Issue counter, distinguishes warnings recorded within the same millisecond.
static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// A warning about to be recorded.
#[derive(Debug, Clone)]
pub struct NewWarning {
    /// Guild id
    pub guild_id: u64,
    /// Warned member
    pub user_id: u64,
    /// Why
    pub reason: String,
    /// Issuing moderator
    pub moderator_id: u64,
}

/// Builds a warning id: base64 of the issuing millisecond and a per-process sequence.
#[must_use]
pub fn warning_id(issued_at: DateTime<Utc>, sequence: u32) -> String {
    STANDARD.encode(format!("{}-{sequence}", issued_at.timestamp_millis()))
}

/// Inserts a warning and returns the number of affected rows.
pub async fn record_warning(db: &DatabaseConnection, new: NewWarning) -> std::result::Result<u64, DbErr> {
    let now = Utc::now();
    let model = warning::ActiveModel {
        id: Set(warning_id(now, SEQUENCE.fetch_add(1, Ordering::Relaxed))),
        guild_id: Set(new.guild_id.to_string()),
        user_id: Set(new.user_id.to_string()),
        reason: Set(new.reason),
        moderator_id: Set(new.moderator_id.to_string()),
        created_at: Set(now),
    };

    let affected = Warning::insert(model).exec_without_returning(db).await?;
    tracing::info!(
        guild_id = new.guild_id,
        user_id = new.user_id,
        rows_affected = affected,
        "Recorded warning"
    );
    Ok(affected)
}

/// All warnings of `user_id` in `guild_id`, newest first.
pub async fn warnings_for_user(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
) -> Result<Vec<warning::Model>> {
    let warnings = Warning::find()
        .filter(warning::Column::GuildId.eq(guild_id.to_string()))
        .filter(warning::Column::UserId.eq(user_id.to_string()))
        .order_by_desc(warning::Column::CreatedAt)
        .all(db)
        .await?;
    tracing::info!(guild_id, user_id, rows = warnings.len(), "Listed warnings");
    Ok(warnings)
}

/// Removes every warning of `user_id` in `guild_id` and returns how many were removed.
pub async fn clear_warnings(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
) -> std::result::Result<u64, DbErr> {
    let result = Warning::delete_many()
        .filter(warning::Column::GuildId.eq(guild_id.to_string()))
        .filter(warning::Column::UserId.eq(user_id.to_string()))
        .exec(db)
        .await?;
    tracing::info!(
        guild_id,
        user_id,
        rows_affected = result.rows_affected,
        "Cleared warnings"
    );
    Ok(result.rows_affected)
}

/// Short fault code for a database error, shown to moderators alongside its message.
#[must_use]
pub const fn fault_code(err: &DbErr) -> &'static str {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => "CONN",
        DbErr::Exec(_) => "EXEC",
        DbErr::Query(_) => "QUERY",
        DbErr::RecordNotInserted => "NOT-INSERTED",
        DbErr::RecordNotFound(_) => "NOT-FOUND",
        _ => "DB",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use chrono::TimeZone;

    fn new_warning(user_id: u64, reason: &str) -> NewWarning {
        NewWarning {
            guild_id: 1,
            user_id,
            reason: reason.to_string(),
            moderator_id: 9,
        }
    }

    #[test]
    fn test_warning_id_is_base64_of_millis_and_sequence() {
        let at = Utc.timestamp_millis_opt(1_650_000_000_123).unwrap();
        let id = warning_id(at, 7);
        assert_eq!(id, STANDARD.encode("1650000000123-7"));
        assert_eq!(STANDARD.decode(&id).unwrap(), b"1650000000123-7");
        assert_ne!(warning_id(at, 7), warning_id(at, 8));
    }

    #[tokio::test]
    async fn test_back_to_back_warnings_get_distinct_ids() -> Result<()> {
        let db = setup_test_db().await?;
        for _ in 0..20 {
            assert_eq!(record_warning(&db, new_warning(5, "spam")).await?, 1);
        }

        let warnings = warnings_for_user(&db, 1, 5).await?;
        assert_eq!(warnings.len(), 20);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_and_list() -> Result<()> {
        let db = setup_test_db().await?;

        let affected = record_warning(&db, new_warning(5, "spam")).await?;
        assert_eq!(affected, 1);

        let warnings = warnings_for_user(&db, 1, 5).await?;
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].reason, "spam");
        assert_eq!(warnings[0].moderator_id, "9");
        assert_eq!(warnings[0].guild_id, "1");

        assert!(warnings_for_user(&db, 2, 5).await?.is_empty());
        assert!(warnings_for_user(&db, 1, 6).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_only_touches_target() -> Result<()> {
        let db = setup_test_db().await?;
        record_warning(&db, new_warning(5, "spam")).await?;
        record_warning(&db, new_warning(6, "flood")).await?;

        assert_eq!(clear_warnings(&db, 1, 5).await?, 1);
        assert_eq!(clear_warnings(&db, 1, 5).await?, 0);
        assert_eq!(warnings_for_user(&db, 1, 6).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_table_is_exec_fault() {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();

        let err = record_warning(&db, new_warning(5, "spam")).await.unwrap_err();
        assert_eq!(fault_code(&err), "EXEC");
    }
}
