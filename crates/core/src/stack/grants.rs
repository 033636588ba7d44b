use std::fmt;

use super::function::HandlerName;

/// Level of table access granted to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
        }
    }
}

/// A permission grant from the table to a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    pub handler: HandlerName,
    pub access: Access,
}

impl Grant {
    pub fn read(handler: HandlerName) -> Self {
        Self {
            handler,
            access: Access::Read,
        }
    }

    pub fn write(handler: HandlerName) -> Self {
        Self {
            handler,
            access: Access::Write,
        }
    }
}
