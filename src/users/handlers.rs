use axum::{
    extract::State,
    response::Html,
    routing::get,
    Form, Router,
};
use tracing::{debug, error, instrument};
use validator::Validate;

use crate::{
    error::AppError,
    forms::FormErrors,
    render::Page,
    state::AppState,
    users::{
        dto::{PasswordForm, UpdateUserForm, UserForm},
        extractors::UserId,
        repo_types::User,
        services::{self, Registration},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/add", get(add_user_page).post(add_user))
        .route("/update/:id", get(update_page).post(update_user))
        .route("/delete/:id", get(delete_user))
        .route("/test_password", get(test_password_page).post(test_password))
}

async fn user_list_page(
    state: &AppState,
    form: &UserForm,
    errors: &FormErrors,
) -> Result<Page, AppError> {
    let users = User::list(&state.db).await?;
    Ok(Page::new("add_user.html")
        .with("form", form)
        .with("errors", errors)
        .with("our_users", &users))
}

async fn load_user(state: &AppState, id: i64) -> Result<User, AppError> {
    User::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)
}

#[instrument(skip(state))]
pub async fn add_user_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    user_list_page(&state, &UserForm::default(), &FormErrors::default())
        .await?
        .with("name", &None::<String>)
        .render(&state.templates)
}

#[instrument(skip(state, form))]
pub async fn add_user(
    State(state): State<AppState>,
    Form(form): Form<UserForm>,
) -> Result<Html<String>, AppError> {
    if let Err(errs) = form.validate() {
        let errors = FormErrors::from(&errs);
        return user_list_page(&state, &form, &errors)
            .await?
            .with("name", &None::<String>)
            .render(&state.templates);
    }

    // A taken email is skipped without telling the user.
    match services::register(&state.db, &form).await? {
        Registration::Created(user) => debug!(user_id = user.id, "new user listed"),
        Registration::AlreadyExists => debug!("duplicate email reported as added"),
    }

    let mut page = user_list_page(&state, &UserForm::default(), &FormErrors::default())
        .await?
        .with("name", &form.name);
    page.flash("User Added Successfully!");
    page.render(&state.templates)
}

#[instrument(skip(state))]
pub async fn update_page(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Html<String>, AppError> {
    let user = load_user(&state, id).await?;
    let form = UpdateUserForm {
        name: user.name.clone(),
        email: user.email.clone(),
        favorite_color: user.favorite_color.clone().unwrap_or_default(),
    };
    Page::new("update.html")
        .with("form", &form)
        .with("name_to_update", &user)
        .render(&state.templates)
}

#[instrument(skip(state, form))]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    Form(form): Form<UpdateUserForm>,
) -> Result<Html<String>, AppError> {
    let user = load_user(&state, id).await?;

    let mut page = Page::new("update.html").with("form", &form);
    match services::update(&state.db, id, &form).await {
        Ok(()) => {
            let updated = load_user(&state, id).await?;
            page = page.with("name_to_update", &updated);
            page.flash("User Updated Successfully!");
        }
        Err(e) => {
            error!(error = ?e, user_id = id, "update failed");
            page = page.with("name_to_update", &user);
            page.flash("Error! Looks like there was a problem... try again!");
        }
    }
    page.render(&state.templates)
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Html<String>, AppError> {
    let user = load_user(&state, id).await?;

    let outcome = services::delete(&state.db, id).await;
    let mut page = user_list_page(&state, &UserForm::default(), &FormErrors::default())
        .await?
        .with("name", &None::<String>);
    match outcome {
        Ok(()) => page.flash("User Deleted Successfully!!"),
        Err(e) => {
            error!(error = ?e, user_id = user.id, "delete failed");
            page.flash("Whoops! There was a problem deleting user, try again...");
        }
    }
    page.render(&state.templates)
}

#[instrument(skip(state))]
pub async fn test_password_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Page::new("test_password.html")
        .with("form", &PasswordForm::default())
        .with("errors", &FormErrors::default())
        .with("check", &None::<()>)
        .render(&state.templates)
}

#[instrument(skip(state, form))]
pub async fn test_password(
    State(state): State<AppState>,
    Form(form): Form<PasswordForm>,
) -> Result<Html<String>, AppError> {
    if let Err(errs) = form.validate() {
        return Page::new("test_password.html")
            .with("form", &form)
            .with("errors", &FormErrors::from(&errs))
            .with("check", &None::<()>)
            .render(&state.templates);
    }

    let check = services::check_password(&state.db, &form.email, &form.password).await?;
    Page::new("test_password.html")
        .with("form", &PasswordForm::default())
        .with("errors", &FormErrors::default())
        .with("check", &Some(check))
        .render(&state.templates)
}
