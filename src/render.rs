use anyhow::Context as _;
use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::AppError;

/// A template render in progress: context values plus the flash messages
/// queued while handling the request.
pub struct Page {
    template: &'static str,
    context: Context,
    flashes: Vec<String>,
}

impl Page {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            context: Context::new(),
            flashes: Vec::new(),
        }
    }

    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.context.insert(key, value);
        self
    }

    pub fn flash(&mut self, message: impl Into<String>) {
        self.flashes.push(message.into());
    }

    pub fn render(mut self, templates: &Tera) -> Result<Html<String>, AppError> {
        self.context.insert("flashes", &self.flashes);
        let body = templates
            .render(self.template, &self.context)
            .with_context(|| format!("render template {}", self.template))?;
        Ok(Html(body))
    }
}
