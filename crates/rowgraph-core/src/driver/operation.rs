use crate::stmt::Statement;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Apply a schema statement. Never carries parameters nor returns rows.
    Ddl(String),

    /// Execute a statement that modifies rows, returning the affected count
    Execute(Statement),

    /// Execute a statement returning rows
    Query(Statement),
}

impl Operation {
    /// SQL text of the operation
    pub fn sql(&self) -> &str {
        match self {
            Operation::Ddl(sql) => sql,
            Operation::Execute(stmt) | Operation::Query(stmt) => &stmt.sql,
        }
    }

    pub fn is_ddl(&self) -> bool {
        matches!(self, Operation::Ddl(_))
    }
}
