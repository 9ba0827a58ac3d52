use anyhow::Context;
use sqlx::{Sqlite, SqlitePool, Transaction};
use time::OffsetDateTime;

use crate::users::repo_types::{NewUser, User, UserChanges};

const USER_COLUMNS: &str = "id, name, email, favorite_color, date_added, password_hash";

impl User {
    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    /// Oldest first; ties broken by id.
    pub async fn list(db: &SqlitePool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY date_added ASC, id ASC"
        ))
        .fetch_all(db)
        .await
        .context("list users")?;
        Ok(users)
    }

    /// Insert a new user. Returns `None` when the email is already taken.
    pub async fn create(db: &SqlitePool, new: &NewUser) -> anyhow::Result<Option<User>> {
        let res = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, favorite_color, date_added, password_hash)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.favorite_color)
        .bind(OffsetDateTime::now_utc())
        .bind(new.password_hash())
        .fetch_one(db)
        .await;

        match res {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(e).context("insert user"),
        }
    }

    /// Overwrite the editable fields of a user within a transaction.
    pub async fn update_tx(
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        changes: &UserChanges,
    ) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET name = ?, email = ?, favorite_color = ?
             WHERE id = ?
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.favorite_color)
        .bind(id)
        .execute(&mut **tx)
        .await
        .context("update user")?;
        Ok(res.rows_affected())
    }

    pub async fn delete_tx(tx: &mut Transaction<'_, Sqlite>, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await
            .context("delete user")?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn ann() -> NewUser {
        NewUser::new("Ann", "ann@example.com", Some("green".into()), "pw-ann").expect("new")
    }

    #[tokio::test]
    async fn create_then_find() {
        let db = db::memory().await;
        let created = User::create(&db, &ann()).await.expect("insert").expect("created");
        assert_eq!(created.name, "Ann");
        assert_eq!(created.favorite_color.as_deref(), Some("green"));

        let by_id = User::find_by_id(&db, created.id).await.expect("query");
        assert_eq!(by_id.map(|u| u.email), Some("ann@example.com".to_string()));

        let by_email = User::find_by_email(&db, "ann@example.com").await.expect("query");
        assert_eq!(by_email.map(|u| u.id), Some(created.id));

        assert!(User::find_by_id(&db, created.id + 100).await.expect("query").is_none());
    }

    #[tokio::test]
    async fn create_reports_taken_email() {
        let db = db::memory().await;
        assert!(User::create(&db, &ann()).await.expect("insert").is_some());
        assert!(User::create(&db, &ann()).await.expect("insert").is_none());
        assert_eq!(User::list(&db).await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() {
        let db = db::memory().await;
        let user = User::create(&db, &ann()).await.expect("insert").expect("created");

        {
            let mut tx = db.begin().await.expect("begin");
            let n = User::delete_tx(&mut tx, user.id).await.expect("delete");
            assert_eq!(n, 1);
        }

        assert!(User::find_by_id(&db, user.id).await.expect("query").is_some());
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let db = db::memory().await;
        let user = User::create(&db, &ann()).await.expect("insert").expect("created");

        let mut tx = db.begin().await.expect("begin");
        let changes = UserChanges {
            name: "Annie".into(),
            email: "annie@example.com".into(),
            favorite_color: None,
        };
        User::update_tx(&mut tx, user.id, &changes).await.expect("update");
        tx.commit().await.expect("commit");

        let after = User::find_by_id(&db, user.id).await.expect("query").expect("row");
        assert_eq!(after.name, "Annie");
        assert_eq!(after.email, "annie@example.com");
        assert_eq!(after.favorite_color, None);
        assert_eq!(after.password_hash, user.password_hash);
        assert_eq!(after.date_added, user.date_added);
    }
}
