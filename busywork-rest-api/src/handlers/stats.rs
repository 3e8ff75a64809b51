use axum::{extract::State, Json};
use busywork_interfaces::MeasurementRecord;
use tracing::info;

use crate::{context::VariantContext, errors::RestResult};

/// `GET /{variant}/stats`: every stored measurement of the variant, oldest first
pub async fn list_stats(State(ctx): State<VariantContext>) -> RestResult<Json<Vec<MeasurementRecord>>> {
    let records = ctx.store.find_all(ctx.framework).await?;
    info!(framework = %ctx.framework, count = records.len(), "Statistics listed");
    Ok(Json(records))
}
