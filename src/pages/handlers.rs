use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Form, Router,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::AppError,
    forms::FormErrors,
    pages::dto::{NameForm, HOME},
    render::Page,
    state::AppState,
};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/user/:name", get(user))
        .route("/name", get(name_page).post(submit_name))
        .route("/health", get(|| async { "ok" }))
}

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Page::new("index.html")
        .with("first_name", HOME.first_name)
        .with("stuff", HOME.stuff)
        .with("favorite_pizza", &HOME.favorite_pizza)
        .render(&state.templates)
}

#[instrument(skip(state))]
pub async fn user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    Page::new("user.html")
        .with("user_name", &name)
        .render(&state.templates)
}

#[instrument(skip(state))]
pub async fn name_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Page::new("name.html")
        .with("name", &None::<String>)
        .with("form", &NameForm::default())
        .with("errors", &FormErrors::default())
        .render(&state.templates)
}

#[instrument(skip(state, form))]
pub async fn submit_name(
    State(state): State<AppState>,
    Form(form): Form<NameForm>,
) -> Result<Html<String>, AppError> {
    if let Err(errs) = form.validate() {
        return Page::new("name.html")
            .with("name", &None::<String>)
            .with("form", &form)
            .with("errors", &FormErrors::from(&errs))
            .render(&state.templates);
    }

    info!(name = %form.name, "name submitted");
    let mut page = Page::new("name.html")
        .with("name", &Some(&form.name))
        .with("form", &NameForm::default())
        .with("errors", &FormErrors::default());
    page.flash("Form Submitted Successfully!");
    page.render(&state.templates)
}
