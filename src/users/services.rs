use anyhow::Context;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::users::{
    dto::{non_empty, PasswordCheck, UpdateUserForm, UserForm},
    repo_types::{NewUser, User, UserChanges},
};

#[derive(Debug)]
pub enum Registration {
    Created(User),
    AlreadyExists,
}

/// Insert the user from a validated form unless the email is already taken.
pub async fn register(db: &SqlitePool, form: &UserForm) -> anyhow::Result<Registration> {
    if User::find_by_email(db, &form.email).await?.is_some() {
        warn!(email = %form.email, "email already registered; skipping insert");
        return Ok(Registration::AlreadyExists);
    }

    let new = NewUser::new(
        form.name.clone(),
        form.email.clone(),
        non_empty(form.favorite_color.clone()),
        &form.password,
    )?;

    match User::create(db, &new).await? {
        Some(user) => {
            info!(user_id = user.id, email = %user.email, "user added");
            Ok(Registration::Created(user))
        }
        None => {
            warn!(email = %form.email, "email taken between lookup and insert");
            Ok(Registration::AlreadyExists)
        }
    }
}

pub async fn update(db: &SqlitePool, id: i64, form: &UpdateUserForm) -> anyhow::Result<()> {
    let changes = UserChanges {
        name: form.name.clone(),
        email: form.email.clone(),
        favorite_color: non_empty(form.favorite_color.clone()),
    };
    let mut tx = db.begin().await.context("begin tx")?;
    User::update_tx(&mut tx, id, &changes).await?;
    tx.commit().await.context("commit tx")?;
    info!(user_id = id, "user updated");
    Ok(())
}

pub async fn delete(db: &SqlitePool, id: i64) -> anyhow::Result<()> {
    let mut tx = db.begin().await.context("begin tx")?;
    User::delete_tx(&mut tx, id).await?;
    tx.commit().await.context("commit tx")?;
    info!(user_id = id, "user deleted");
    Ok(())
}

/// Check `password` against the stored hash of the user owning `email`.
pub async fn check_password(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> anyhow::Result<PasswordCheck> {
    let user = User::find_by_email(db, email).await?;
    let passed = match &user {
        Some(u) => u.check_password(password)?,
        None => false,
    };
    Ok(PasswordCheck {
        email: email.to_string(),
        user_name: user.map(|u| u.name),
        passed,
    })
}
