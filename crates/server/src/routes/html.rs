use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Html,
};

use crate::state::ServerState;

pub const FORM_PAGE: &str = concat!(
    "<h1>Response HTML plain text</h1>",
    "<form action=\"/form\" method=\"POST\">",
    "<label for=\"fname\">First name:</label><br>",
    "<input type=\"text\" id=\"fname\" name=\"fname\" value=\"John\"><br>",
    "<label for=\"lname\">Last name:</label><br>",
    "<input type=\"text\" id=\"lname\" name=\"lname\" value=\"Doe\"><br><br>",
    "<input type=\"submit\" value=\"Submit\">",
    "</form>",
);

type Pairs = Vec<(String, String)>;

/// Submitted names, gathered from the urlencoded body and the query string.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NameForm {
    pub fname: String,
    pub lname: String,
}

impl NameForm {
    /// First body value wins, then the first query value; absent fields read as empty strings.
    pub fn merged(body: &[(String, String)], query: &[(String, String)]) -> Self {
        let field = |key: &str| {
            body.iter()
                .chain(query)
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };
        Self { fname: field("fname"), lname: field("lname") }
    }
}

fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
}

/// Only a urlencoded body is read; any other or missing content type contributes no fields.
fn parse_form(query: Option<&str>, headers: &HeaderMap, body: &[u8]) -> Result<NameForm, serde_urlencoded::de::Error> {
    let query: Pairs = serde_urlencoded::from_str(query.unwrap_or_default())?;
    let body: Pairs = if is_urlencoded(headers) {
        serde_urlencoded::from_bytes(body)?
    } else {
        Vec::new()
    };
    Ok(NameForm::merged(&body, &query))
}

pub async fn hi(State(state): State<ServerState>) -> String {
    format!("Hello from {}", state.origin)
}

pub async fn plain_html() -> Html<&'static str> {
    Html(FORM_PAGE)
}

pub async fn form_submit(RawQuery(query): RawQuery, headers: HeaderMap, body: Bytes) -> String {
    match parse_form(query.as_deref(), &headers, &body) {
        Ok(input) => format!(
            "POST request successful\n\nFirst name = {}\nLast name = {}\n",
            input.fname, input.lname
        ),
        Err(e) => format!("ParseForm() err: {e}"),
    }
}
