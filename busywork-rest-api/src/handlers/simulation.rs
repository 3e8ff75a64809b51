//! Greeting and simulation endpoints
//!
//! Responses are plain text. The `desc` parameter is only ever stored, never
//! echoed back.

use axum::extract::State;
use busywork_interfaces::{MeasurementKind, NewMeasurement};
use busywork_web::{QueryParams, RequestId};
use std::time::Duration;
use tracing::info;

use crate::{context::VariantContext, errors::RestResult};

/// Suffix appended when the measurement was stored
pub const PERSISTED_SUFFIX: &str = " The result is persisted in the database.";

/// `GET /{variant}`
pub async fn hello(State(ctx): State<VariantContext>) -> String {
    let message = format!("{}: hello", ctx.framework.label());
    info!(framework = %ctx.framework, "{}", message);
    message
}

/// `GET /{variant}/cpu?iterations=&db=&desc=`
pub async fn cpu(
    State(ctx): State<VariantContext>,
    request_id: RequestId,
    query: QueryParams,
) -> RestResult<String> {
    let iterations = query.int_or("iterations", ctx.default_iterations);
    let persist = query.flag("db");

    let report = ctx.simulator.cpu(iterations).await?;
    let elapsed_ns = report.elapsed.as_nanos();

    info!(
        framework = %ctx.framework,
        iterations,
        elapsed_ns = saturating_nanos(report.elapsed),
        persist,
        "CPU consumption done"
    );

    let mut message = format!(
        "{}: CPU consumption is done with {} iterations in {} nano-seconds.",
        ctx.framework.label(),
        iterations,
        elapsed_ns
    );

    if persist {
        record(&ctx, &request_id, MeasurementKind::Cpu, iterations, report.elapsed, &query).await?;
        message.push_str(PERSISTED_SUFFIX);
    }

    Ok(message)
}

/// `GET /{variant}/memory?bites=&db=&desc=`
pub async fn memory(
    State(ctx): State<VariantContext>,
    request_id: RequestId,
    query: QueryParams,
) -> RestResult<String> {
    let bites = query.int_or("bites", ctx.default_bites);
    let persist = query.flag("db");

    let report = ctx.simulator.memory(bites).await?;
    let elapsed_ns = report.elapsed.as_nanos();

    info!(
        framework = %ctx.framework,
        bites,
        chunks = report.chunks,
        elapsed_ns = saturating_nanos(report.elapsed),
        persist,
        "Memory consumption done"
    );

    let mut message = format!(
        "{}: Memory consumption is done with {} bites in {} nano-seconds.",
        ctx.framework.label(),
        bites,
        elapsed_ns
    );

    if persist {
        record(&ctx, &request_id, MeasurementKind::Memory, bites, report.elapsed, &query).await?;
        message.push_str(PERSISTED_SUFFIX);
    }

    Ok(message)
}

fn saturating_nanos(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

async fn record(
    ctx: &VariantContext,
    request_id: &RequestId,
    kind: MeasurementKind,
    magnitude: i64,
    elapsed: Duration,
    query: &QueryParams,
) -> RestResult<()> {
    let measurement = NewMeasurement::new(ctx.framework, kind, magnitude, elapsed)
        .with_description(query.text("desc").map(str::to_string));

    let saved = ctx.store.save(measurement).await?;
    info!(
        framework = %ctx.framework,
        id = saved.id,
        kind = %kind,
        request_id = %request_id,
        "Measurement persisted"
    );
    Ok(())
}
