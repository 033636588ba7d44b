//! Declarative description of the product stack.
//!
//! One table, four handlers, their grants on the table, the routes that
//! front them, and the values exported to the dashboard stack. This is
//! plain data: the server mounts its routes from it, `xtask` provisions the
//! table from it, and [`validate_stack`] checks its wiring.

mod dashboard;
mod function;
mod grants;
mod outputs;
mod routes;
mod table;
mod validation;

pub use dashboard::{dashboard_body, DASHBOARD_NAME};
pub use function::{
    shared_environment, Architecture, FunctionSpec, HandlerName, UnknownHandler,
    HANDLER_LOG_RETENTION_DAYS, HANDLER_MEMORY_MB, HANDLER_TIMEOUT, PRODUCT_TABLE_ENV,
};
pub use grants::{Access, Grant};
pub use outputs::{OutputSpec, OutputValue, StackExports};
pub use routes::{products_api, HttpApiSpec, HttpMethod, RouteSpec};
pub use table::{products_table, AttributeType, BillingMode, KeyAttribute, TableSpec, PARTITION_KEY};
pub use validation::{validate_stack, StackViolation};

/// The full stack declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    pub stack_name: String,
    pub table: TableSpec,
    pub functions: Vec<FunctionSpec>,
    pub grants: Vec<Grant>,
    pub api: HttpApiSpec,
    pub outputs: Vec<OutputSpec>,
}

impl StackConfig {
    /// Renames the table and points every handler's environment at it.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table = self.table.with_table_name(name);
        for function in &mut self.functions {
            function
                .environment
                .insert(PRODUCT_TABLE_ENV.to_string(), name.to_string());
        }
        self
    }

    /// Looks up a handler declaration by name.
    pub fn function(&self, name: HandlerName) -> Option<&FunctionSpec> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Routes served by the given handlers, in declaration order.
    pub fn routes_for(&self, handlers: &[HandlerName]) -> Vec<&RouteSpec> {
        self.api
            .routes
            .iter()
            .filter(|r| handlers.contains(&r.handler))
            .collect()
    }

    /// Names of the declared handlers, in the order the dashboard lists them.
    pub fn function_names(&self) -> Vec<HandlerName> {
        self.functions.iter().map(|f| f.name).collect()
    }

    /// Values exported to the dashboard stack.
    pub fn exports(&self, api_endpoint: impl Into<String>) -> StackExports {
        StackExports::new(api_endpoint, &self.function_names())
    }
}

/// Returns the canonical product stack.
pub fn products_stack() -> StackConfig {
    let table = products_table();
    let environment = shared_environment(&table.table_name);

    let functions = [
        HandlerName::GetProduct,
        HandlerName::PutProduct,
        HandlerName::DeleteProduct,
        HandlerName::GetAllProducts,
    ]
    .into_iter()
    .map(|name| FunctionSpec::new(name, environment.clone()))
    .collect();

    StackConfig {
        stack_name: "ServerlessProducts".to_string(),
        table,
        functions,
        grants: vec![
            Grant::read(HandlerName::GetProduct),
            Grant::read(HandlerName::GetAllProducts),
            Grant::write(HandlerName::PutProduct),
            Grant::write(HandlerName::DeleteProduct),
        ],
        api: products_api(),
        outputs: vec![OutputSpec {
            export_name: "ProductsApiUrl".to_string(),
            value: OutputValue::ApiEndpoint,
        }],
    }
}

/// Pure function: format a stack for display.
pub fn format_stack(stack: &StackConfig, api_endpoint: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Stack: {}", stack.stack_name),
        format!("  Table: {}", stack.table.table_name),
        format!(
            "    Partition key: {} ({})",
            stack.table.partition_key.name,
            stack.table.partition_key.attribute_type.as_str()
        ),
        format!("    Billing: {}", stack.table.billing_mode.as_str()),
        "  Handlers:".to_string(),
    ];

    for function in &stack.functions {
        lines.push(format!(
            "    {} ({} MB, {}s, {})",
            function.name,
            function.memory_mb,
            function.timeout.as_secs(),
            function.architecture.as_str()
        ));
        for (key, value) in &function.environment {
            lines.push(format!("      {key}={value}"));
        }
    }

    lines.push("  Grants:".to_string());
    for grant in &stack.grants {
        lines.push(format!("    {} <- {}", grant.handler, grant.access));
    }

    lines.push(format!("  API: {}", stack.api.api_name));
    for route in &stack.api.routes {
        lines.push(format!("    {route}"));
    }

    lines.push("  Outputs:".to_string());
    for output in &stack.outputs {
        let value = match output.value {
            OutputValue::ApiEndpoint => api_endpoint,
        };
        lines.push(format!("    {} = {}", output.export_name, value));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_stack_is_valid() {
        assert_eq!(validate_stack(&products_stack()), Ok(()));
    }

    #[test]
    fn test_every_handler_environment_names_the_table() {
        let stack = products_stack();

        for function in &stack.functions {
            assert_eq!(function.table_name(), Some(stack.table.table_name.as_str()));
        }
    }

    #[test]
    fn test_with_table_name_updates_environment() {
        let stack = products_stack().with_table_name("Products-Staging");

        assert_eq!(stack.table.table_name, "Products-Staging");
        for function in &stack.functions {
            assert_eq!(function.table_name(), Some("Products-Staging"));
        }
        assert_eq!(validate_stack(&stack), Ok(()));
    }

    #[test]
    fn test_routes_for_subset() {
        let stack = products_stack();
        let routes = stack.routes_for(&[HandlerName::GetProduct, HandlerName::GetAllProducts]);

        let rendered: Vec<String> = routes.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["GET /{id} -> GetProduct", "GET / -> GetAllProducts"]
        );
    }

    #[test]
    fn test_exports_list_every_handler() {
        let exports = products_stack().exports("https://api.example.com");

        assert_eq!(exports.api_endpoint, "https://api.example.com");
        assert_eq!(
            exports.functions,
            vec!["GetProduct", "PutProduct", "DeleteProduct", "GetAllProducts"]
        );
    }

    #[test]
    fn test_format_stack() {
        let lines = format_stack(&products_stack(), "http://localhost:3000");

        assert_eq!(lines[0], "Stack: ServerlessProducts");
        assert!(lines.contains(&"    Billing: PAY_PER_REQUEST".to_string()));
        assert!(lines.contains(&"    PutProduct (2048 MB, 20s, arm64)".to_string()));
        assert!(lines.contains(&"      PRODUCT_TABLE=Products".to_string()));
        assert!(lines.contains(&"    GetAllProducts <- read".to_string()));
        assert!(lines.contains(&"    PUT /{id} -> PutProduct".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "    ProductsApiUrl = http://localhost:3000"
        );
    }
}
