//! Structural checks on a [`StackConfig`].

use std::collections::HashMap;

use thiserror::Error;

use super::function::HandlerName;
use super::grants::Access;
use super::routes::HttpMethod;
use super::StackConfig;

/// A wiring mistake in a stack declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StackViolation {
    #[error("Table '{table_name}' must use on-demand billing")]
    NotOnDemand { table_name: String },

    #[error("Handler {handler} is declared more than once")]
    DuplicateHandler { handler: HandlerName },

    #[error("Handler {handler} environment does not set PRODUCT_TABLE={expected}")]
    MissingTableEnvironment {
        handler: HandlerName,
        expected: String,
    },

    #[error("Route {method} {path} is bound to undeclared handler {handler}")]
    UnresolvedRoute {
        method: HttpMethod,
        path: String,
        handler: HandlerName,
    },

    #[error("Route {method} {path} is declared {count} times")]
    AmbiguousRoute {
        method: HttpMethod,
        path: String,
        count: usize,
    },

    #[error("Handler {handler} has no route")]
    UnroutedHandler { handler: HandlerName },

    #[error("Handler {handler} has no grant on the table")]
    MissingGrant { handler: HandlerName },

    #[error("Grant targets undeclared handler {handler}")]
    GrantToUndeclaredHandler { handler: HandlerName },

    #[error("Handler {handler} is granted {granted} access but requires {required}")]
    WrongAccess {
        handler: HandlerName,
        granted: Access,
        required: Access,
    },

    #[error("Handler {handler} is granted both read and write access")]
    MixedAccess { handler: HandlerName },

    #[error("Handler {handler} holds {count} grants on the table")]
    DuplicateGrant { handler: HandlerName, count: usize },
}

/// Pure function: check the structural properties of a stack.
///
/// Returns every violation found, not just the first one.
pub fn validate_stack(stack: &StackConfig) -> Result<(), Vec<StackViolation>> {
    let mut violations = Vec::new();

    if !stack.table.billing_mode.is_on_demand() {
        violations.push(StackViolation::NotOnDemand {
            table_name: stack.table.table_name.clone(),
        });
    }

    check_functions(stack, &mut violations);
    check_routes(stack, &mut violations);
    check_grants(stack, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_functions(stack: &StackConfig, violations: &mut Vec<StackViolation>) {
    let mut seen: Vec<HandlerName> = Vec::new();

    for function in &stack.functions {
        if seen.contains(&function.name) {
            violations.push(StackViolation::DuplicateHandler {
                handler: function.name,
            });
        }
        seen.push(function.name);

        if function.table_name() != Some(stack.table.table_name.as_str()) {
            violations.push(StackViolation::MissingTableEnvironment {
                handler: function.name,
                expected: stack.table.table_name.clone(),
            });
        }
    }
}

fn check_routes(stack: &StackConfig, violations: &mut Vec<StackViolation>) {
    let mut counts: HashMap<(HttpMethod, &str), usize> = HashMap::new();

    for route in &stack.api.routes {
        *counts.entry((route.method, route.path.as_str())).or_default() += 1;

        if stack.function(route.handler).is_none() {
            violations.push(StackViolation::UnresolvedRoute {
                method: route.method,
                path: route.path.clone(),
                handler: route.handler,
            });
        }
    }

    let mut ambiguous: Vec<_> = counts.into_iter().filter(|(_, count)| *count > 1).collect();
    ambiguous.sort();
    for ((method, path), count) in ambiguous {
        violations.push(StackViolation::AmbiguousRoute {
            method,
            path: path.to_string(),
            count,
        });
    }

    for function in &stack.functions {
        if !stack.api.routes.iter().any(|r| r.handler == function.name) {
            violations.push(StackViolation::UnroutedHandler {
                handler: function.name,
            });
        }
    }
}

fn check_grants(stack: &StackConfig, violations: &mut Vec<StackViolation>) {
    for grant in &stack.grants {
        if stack.function(grant.handler).is_none() {
            violations.push(StackViolation::GrantToUndeclaredHandler {
                handler: grant.handler,
            });
        }
    }

    for function in &stack.functions {
        let granted: Vec<Access> = stack
            .grants
            .iter()
            .filter(|g| g.handler == function.name)
            .map(|g| g.access)
            .collect();

        let required = function.name.required_access();

        if granted.is_empty() {
            violations.push(StackViolation::MissingGrant {
                handler: function.name,
            });
        } else if granted.contains(&Access::Read) && granted.contains(&Access::Write) {
            violations.push(StackViolation::MixedAccess {
                handler: function.name,
            });
        } else {
            if granted.len() > 1 {
                violations.push(StackViolation::DuplicateGrant {
                    handler: function.name,
                    count: granted.len(),
                });
            }
            if granted[0] != required {
                violations.push(StackViolation::WrongAccess {
                    handler: function.name,
                    granted: granted[0],
                    required,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{products_stack, BillingMode, Grant, RouteSpec, PRODUCT_TABLE_ENV};

    fn violations(stack: &StackConfig) -> Vec<StackViolation> {
        validate_stack(stack).unwrap_err()
    }

    #[test]
    fn test_provisioned_table_is_rejected() {
        let mut stack = products_stack();
        stack.table.billing_mode = BillingMode::Provisioned {
            read_capacity: 5,
            write_capacity: 5,
        };

        assert_eq!(
            violations(&stack),
            vec![StackViolation::NotOnDemand {
                table_name: "Products".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_table_environment() {
        let mut stack = products_stack();
        stack.functions[0].environment.remove(PRODUCT_TABLE_ENV);

        assert_eq!(
            violations(&stack),
            vec![StackViolation::MissingTableEnvironment {
                handler: HandlerName::GetProduct,
                expected: "Products".to_string(),
            }]
        );
    }

    #[test]
    fn test_environment_pointing_at_another_table() {
        let mut stack = products_stack();
        stack.functions[1]
            .environment
            .insert(PRODUCT_TABLE_ENV.to_string(), "Orders".to_string());

        assert!(matches!(
            violations(&stack).as_slice(),
            [StackViolation::MissingTableEnvironment {
                handler: HandlerName::PutProduct,
                ..
            }]
        ));
    }

    #[test]
    fn test_duplicate_route_is_ambiguous() {
        let mut stack = products_stack();
        stack.api.routes.push(RouteSpec::new(
            HttpMethod::Get,
            "/{id}",
            HandlerName::GetAllProducts,
        ));

        assert_eq!(
            violations(&stack),
            vec![StackViolation::AmbiguousRoute {
                method: HttpMethod::Get,
                path: "/{id}".to_string(),
                count: 2,
            }]
        );
    }

    #[test]
    fn test_route_to_undeclared_handler() {
        let mut stack = products_stack();
        stack
            .functions
            .retain(|f| f.name != HandlerName::DeleteProduct);

        let found = violations(&stack);
        assert!(found.contains(&StackViolation::UnresolvedRoute {
            method: HttpMethod::Delete,
            path: "/{id}".to_string(),
            handler: HandlerName::DeleteProduct,
        }));
        assert!(found.contains(&StackViolation::GrantToUndeclaredHandler {
            handler: HandlerName::DeleteProduct,
        }));
    }

    #[test]
    fn test_handler_without_route() {
        let mut stack = products_stack();
        stack
            .api
            .routes
            .retain(|r| r.handler != HandlerName::GetAllProducts);

        assert_eq!(
            violations(&stack),
            vec![StackViolation::UnroutedHandler {
                handler: HandlerName::GetAllProducts,
            }]
        );
    }

    #[test]
    fn test_reader_granted_write() {
        let mut stack = products_stack();
        stack.grants.retain(|g| g.handler != HandlerName::GetProduct);
        stack.grants.push(Grant::write(HandlerName::GetProduct));

        assert_eq!(
            violations(&stack),
            vec![StackViolation::WrongAccess {
                handler: HandlerName::GetProduct,
                granted: Access::Write,
                required: Access::Read,
            }]
        );
    }

    #[test]
    fn test_writer_granted_read_as_well() {
        let mut stack = products_stack();
        stack.grants.push(Grant::read(HandlerName::PutProduct));

        assert_eq!(
            violations(&stack),
            vec![StackViolation::MixedAccess {
                handler: HandlerName::PutProduct,
            }]
        );
    }

    #[test]
    fn test_repeated_grant_is_rejected() {
        let mut stack = products_stack();
        stack.grants.push(Grant::read(HandlerName::GetProduct));

        assert_eq!(
            violations(&stack),
            vec![StackViolation::DuplicateGrant {
                handler: HandlerName::GetProduct,
                count: 2,
            }]
        );
    }

    #[test]
    fn test_repeated_wrong_grant_reports_both() {
        let mut stack = products_stack();
        stack.grants.retain(|g| g.handler != HandlerName::GetAllProducts);
        stack.grants.push(Grant::write(HandlerName::GetAllProducts));
        stack.grants.push(Grant::write(HandlerName::GetAllProducts));

        assert_eq!(
            violations(&stack),
            vec![
                StackViolation::DuplicateGrant {
                    handler: HandlerName::GetAllProducts,
                    count: 2,
                },
                StackViolation::WrongAccess {
                    handler: HandlerName::GetAllProducts,
                    granted: Access::Write,
                    required: Access::Read,
                },
            ]
        );
    }

    #[test]
    fn test_handler_without_grant() {
        let mut stack = products_stack();
        stack
            .grants
            .retain(|g| g.handler != HandlerName::DeleteProduct);

        assert_eq!(
            violations(&stack),
            vec![StackViolation::MissingGrant {
                handler: HandlerName::DeleteProduct,
            }]
        );
    }

    #[test]
    fn test_violation_display() {
        let violation = StackViolation::MissingTableEnvironment {
            handler: HandlerName::GetProduct,
            expected: "Products".to_string(),
        };
        assert_eq!(
            violation.to_string(),
            "Handler GetProduct environment does not set PRODUCT_TABLE=Products"
        );
    }
}
