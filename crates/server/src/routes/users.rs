use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

use crate::{
    errors::ApiError,
    records::{select, RecordSource, Selection, UserFilter},
};

/// `/users`, `/users?Id=<n>`, `/users?Name=<s>`.
pub async fn list(
    State(source): State<RecordSource>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Selection>, ApiError> {
    let filter = UserFilter::from_query(&pairs);
    match &filter {
        UserFilter::ById(id) => info!(id, "respond a single record by Id"),
        UserFilter::ByName(name) => info!(%name, "respond records by Name"),
        UserFilter::All => info!("respond all records"),
    }

    let records = source.load().await?;
    Ok(Json(select(records, &filter)?))
}
