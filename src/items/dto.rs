use serde::Deserialize;

/// `GET /items` query. `page` stays a string so bad values fall back to 1
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    pub q: Option<String>,
    pub page: Option<String>,
}

/// `POST /items` form body.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    #[serde(default)]
    pub name: String,
    pub q: Option<String>,
}
