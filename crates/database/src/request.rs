use crate::driver::Vars;
use crate::error::DbError;
use serde::Serialize;
use serde_json::Value;

/// A single statement plus its bound variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRequest {
    pub statement: String,
    pub vars: Vars,
}

impl QueryRequest {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            vars: Vars::new(),
        }
    }

    /// Binds `name` to `value`, replacing any earlier binding of the same name.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Like `bind`, but accepts anything serde can serialize.
    pub fn try_bind<T: Serialize>(
        self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, DbError> {
        let name = name.into();
        match serde_json::to_value(value) {
            Ok(value) => Ok(self.bind(name, value)),
            Err(source) => Err(DbError::InvalidVariable { name, source }),
        }
    }
}
