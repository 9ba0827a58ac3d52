use serde::{Deserialize, Serialize};
use validator::Validate;

/// Single-field form behind `/name`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NameForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
}

/// Static context of the home page.
#[derive(Debug, Serialize)]
pub struct HomeContext {
    pub first_name: &'static str,
    pub stuff: &'static str,
    pub favorite_pizza: [&'static str; 4],
}

pub const HOME: HomeContext = HomeContext {
    first_name: "John",
    stuff: "This is <strong>Bold</strong> Text",
    favorite_pizza: ["Pepperoni", "Cheese", "Mushrooms", "41"],
};
