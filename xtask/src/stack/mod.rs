//! Stack declaration commands.
//!
//! Validates and prints the product stack, and renders the dashboard body
//! from its exports.

mod error;

pub use error::{Result, StackError};

use crate::prelude::*;
use products_core::stack::{
    dashboard_body, format_stack, products_stack, validate_stack, StackConfig, DASHBOARD_NAME,
};

/// Stack declaration commands.
#[derive(Debug, clap::Parser)]
pub struct StackCommand {
    #[command(subcommand)]
    pub action: StackAction,
}

/// Available stack actions.
#[derive(Debug, clap::Subcommand)]
pub enum StackAction {
    /// Validate and print the stack declaration.
    Show(ShowCommand),

    /// Print the CloudWatch dashboard body for the stack's handlers.
    Dashboard(DashboardCommand),
}

/// Validate and print the stack declaration.
#[derive(Debug, clap::Parser)]
pub struct ShowCommand {
    /// Base URL of the deployed HTTP API.
    #[arg(long, default_value = "http://localhost:3000")]
    pub api_endpoint: String,

    /// Table name to use.
    #[arg(long, default_value = "Products", env = "PRODUCT_TABLE")]
    pub table_name: String,
}

/// Render the dashboard body.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Print the CloudWatch dashboard body for the product handlers.

The output can be deployed with:
  aws cloudwatch put-dashboard --dashboard-name ProductsDashboard --dashboard-body file://body.json")]
pub struct DashboardCommand {
    /// Base URL of the deployed HTTP API.
    #[arg(long, default_value = "http://localhost:3000")]
    pub api_endpoint: String,

    /// AWS region the metrics live in.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,
}

/// Main entry point for stack command.
pub async fn run(command: StackCommand, global: crate::Global) -> Result<()> {
    match command.action {
        StackAction::Show(show_cmd) => run_show(show_cmd, &global),
        StackAction::Dashboard(dashboard_cmd) => run_dashboard(dashboard_cmd, &global),
    }
}

fn validated_stack(table_name: &str, global: &crate::Global) -> Result<StackConfig> {
    let stack = products_stack().with_table_name(table_name);

    if let Err(violations) = validate_stack(&stack) {
        if !global.is_silent() {
            aprintln!("{}", p_r("Stack violations:"));
            for violation in &violations {
                aprintln!("  {}", p_r(&format!("- {violation}")));
            }
            aprintln!();
        }
        return Err(StackError::Invalid(violations));
    }

    Ok(stack)
}

fn run_show(cmd: ShowCommand, global: &crate::Global) -> Result<()> {
    let stack = validated_stack(&cmd.table_name, global)?;

    if global.is_silent() {
        return Ok(());
    }

    for line in format_stack(&stack, &cmd.api_endpoint) {
        if line.starts_with("Stack:") {
            aprintln!("{}", p_c(&line));
        } else if !line.starts_with(' ') || line.trim_end().ends_with(':') {
            aprintln!("{}", p_b(&line));
        } else {
            aprintln!("{}", line);
        }
    }
    aprintln!();
    aprintln!("{}", p_g("Stack declaration is valid."));

    Ok(())
}

fn run_dashboard(cmd: DashboardCommand, global: &crate::Global) -> Result<()> {
    let stack = validated_stack(&products_stack().table.table_name, global)?;
    let exports = stack.exports(cmd.api_endpoint);
    let body = serde_json::to_string_pretty(&dashboard_body(&exports, &cmd.region))?;

    if global.is_verbose() {
        aprintln!("{} {}", p_b("Dashboard:"), DASHBOARD_NAME);
        aprintln!("{} {}", p_b("Handlers:"), exports.functions.join(", "));
        aprintln!();
    }

    // Printed even with --silent.
    println!("{body}");

    Ok(())
}
