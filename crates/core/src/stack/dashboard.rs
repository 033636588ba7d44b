//! CloudWatch dashboard for the product handlers.
//!
//! Renders the dashboard body JSON from the stack exports. Deploying it is
//! left to `aws cloudwatch put-dashboard`.

use serde_json::{json, Value};

use super::outputs::StackExports;

pub const DASHBOARD_NAME: &str = "ProductsDashboard";

const LAMBDA_NAMESPACE: &str = "AWS/Lambda";
const WIDGET_WIDTH: usize = 6;
const WIDGET_HEIGHT: usize = 6;
const ONE_MINUTE: u64 = 60;
const FIVE_MINUTES: u64 = 300;

/// Pure function: build the dashboard body for the exported handlers.
///
/// Four time-series widgets laid out in a single row: P90 duration, P50
/// duration, error rate, and concurrent executions.
pub fn dashboard_body(exports: &StackExports, region: &str) -> Value {
    let widgets = [
        ("P90 Duration", duration_metrics(&exports.functions, "p90")),
        ("P50 Duration", duration_metrics(&exports.functions, "p50")),
        ("Error Rates", error_rate_metrics(&exports.functions)),
        (
            "ConcurrentExecutions",
            concurrency_metrics(&exports.functions),
        ),
    ];

    let widgets: Vec<Value> = widgets
        .into_iter()
        .enumerate()
        .map(|(i, (title, metrics))| {
            json!({
                "type": "metric",
                "x": i * WIDGET_WIDTH,
                "y": 0,
                "width": WIDGET_WIDTH,
                "height": WIDGET_HEIGHT,
                "properties": {
                    "title": title,
                    "view": "timeSeries",
                    "region": region,
                    "yAxis": {},
                    "metrics": metrics,
                }
            })
        })
        .collect();

    json!({ "widgets": widgets })
}

fn duration_metrics(functions: &[String], statistic: &str) -> Vec<Value> {
    functions
        .iter()
        .map(|name| {
            json!([
                LAMBDA_NAMESPACE,
                "Duration",
                "FunctionName",
                name,
                { "label": name, "period": ONE_MINUTE, "stat": statistic }
            ])
        })
        .collect()
}

fn error_rate_metrics(functions: &[String]) -> Vec<Value> {
    let mut metrics = Vec::with_capacity(functions.len() * 3);

    for (i, name) in functions.iter().enumerate() {
        metrics.push(json!([{
            "expression": format!("(errors{i} / invocations{i}) * 100"),
            "label": format!("{name} Error Rate"),
            "id": format!("expr{i}"),
        }]));
        metrics.push(json!([
            LAMBDA_NAMESPACE,
            "Errors",
            "FunctionName",
            name,
            { "id": format!("errors{i}"), "stat": "Sum", "period": FIVE_MINUTES, "visible": false }
        ]));
        metrics.push(json!([
            LAMBDA_NAMESPACE,
            "Invocations",
            "FunctionName",
            name,
            { "id": format!("invocations{i}"), "stat": "Sum", "period": FIVE_MINUTES, "visible": false }
        ]));
    }

    metrics
}

fn concurrency_metrics(functions: &[String]) -> Vec<Value> {
    functions
        .iter()
        .map(|name| {
            json!([
                LAMBDA_NAMESPACE,
                "ConcurrentExecutions",
                "FunctionName",
                name,
                { "label": name, "period": ONE_MINUTE, "stat": "Average" }
            ])
        })
        .collect()
}
