use crate::{Serializer, ID_COLUMN};

use rowgraph_core::stmt::{Statement, Value};

impl Serializer {
    /// `INSERT INTO <table> (<columns>) VALUES (<placeholders>)`
    pub fn insert(&self, table: &str, columns: &[&str], values: Vec<Value>) -> Statement {
        debug_assert_eq!(columns.len(), values.len());

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.ident(table),
            self.ident_list(columns.iter().copied()),
            self.placeholders(columns.len()),
        );

        Statement::with_params(sql, values)
    }

    /// `UPDATE <table> SET <column> = ?, ... WHERE id = ?`
    pub fn update(&self, table: &str, id: &str, assignments: &[(&str, Value)]) -> Statement {
        let set = assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", self.ident(column)))
            .collect::<Vec<_>>()
            .join(", ");

        let mut params: Vec<Value> = assignments.iter().map(|(_, value)| value.clone()).collect();
        params.push(Value::from(id));

        let sql = format!(
            "UPDATE {} SET {set} WHERE {} = ?",
            self.ident(table),
            self.ident(ID_COLUMN)
        );

        Statement::with_params(sql, params)
    }

    /// `DELETE FROM <table> WHERE id = ?`
    pub fn delete(&self, table: &str, id: &str) -> Statement {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            self.ident(table),
            self.ident(ID_COLUMN)
        );
        Statement::with_params(sql, vec![Value::from(id)])
    }

    /// `SELECT * FROM <table> WHERE id = ?`
    pub fn select_by_id(&self, table: &str, id: &str) -> Statement {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ?",
            self.ident(table),
            self.ident(ID_COLUMN)
        );
        Statement::with_params(sql, vec![Value::from(id)])
    }

    /// Same as [`select_by_id`](Self::select_by_id), limited to one row.
    pub fn get(&self, table: &str, id: &str) -> Statement {
        let mut stmt = self.select_by_id(table, id);
        stmt.sql.push_str(" LIMIT 1");
        stmt
    }

    /// `SELECT * FROM <table> WHERE id IN (?, ...)`
    ///
    /// An empty id set renders `IN (NULL)`, which matches no row.
    pub fn select_in(&self, table: &str, ids: &[&str]) -> Statement {
        let placeholders = if ids.is_empty() {
            "NULL".to_string()
        } else {
            self.placeholders(ids.len())
        };

        let sql = format!(
            "SELECT * FROM {} WHERE {} IN ({placeholders})",
            self.ident(table),
            self.ident(ID_COLUMN)
        );

        Statement::with_params(sql, ids.iter().map(|id| Value::from(*id)).collect())
    }

    /// Ids associated with `parent_id` in a join table.
    ///
    /// `SELECT <child_key> FROM <join_table> WHERE <parent_key> = ?`
    pub fn child_ids(
        &self,
        join_table: &str,
        parent_key: &str,
        child_key: &str,
        parent_id: &str,
    ) -> Statement {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            self.ident(child_key),
            self.ident(join_table),
            self.ident(parent_key)
        );
        Statement::with_params(sql, vec![Value::from(parent_id)])
    }

    fn ident_list<'a>(&self, names: impl Iterator<Item = &'a str>) -> String {
        names
            .map(|name| self.ident(name).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
