use crate::{Serializer, ID_COLUMN};

use indexmap::IndexSet;
use rowgraph_core::schema::{normalize, ColumnDescriptor, Participant, RelationKind, SchemaMap};

/// `CREATE TABLE IF NOT EXISTS` for one table key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreateTable {
    /// Normalized table name
    pub name: String,

    /// Rendered column definitions, in declaration order
    pub columns: Vec<String>,

    pub statement: String,
}

/// Join table backing a many-valued relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinTableSpec {
    pub table_name: String,
    pub kind: RelationKind,
    pub first: Participant,
    pub second: Participant,
    pub statement: String,
}

/// Foreign key constraint added once both tables exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlterSpec {
    /// Table receiving the constraint
    pub table: String,

    /// Column the descriptor was declared with
    pub local_key: String,

    /// Explicit foreign key column, when it differs from `local_key`
    pub foreign_key: Option<String>,

    /// Referenced record, as declared
    pub referenced_table: String,

    pub statement: String,
}

/// Every schema statement derived from a [`SchemaMap`].
///
/// `tables` and `joins` are independent of each other. `alters` reference
/// tables created by them and may only run afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaPlan {
    pub tables: Vec<CreateTable>,
    pub joins: Vec<JoinTableSpec>,
    pub alters: Vec<AlterSpec>,
}

impl SchemaPlan {
    /// Statements that create tables and join tables.
    pub fn creates(&self) -> impl Iterator<Item = &str> {
        self.tables
            .iter()
            .map(|table| &table.statement[..])
            .chain(self.joins.iter().map(|join| &join.statement[..]))
    }

    /// Statements that add foreign key constraints.
    pub fn constraints(&self) -> impl Iterator<Item = &str> {
        self.alters.iter().map(|alter| &alter.statement[..])
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.joins.is_empty() && self.alters.is_empty()
    }
}

/// Derives the schema statements for every table key of `map`.
///
/// Identical join tables and constraints declared from more than one record
/// are emitted once.
pub fn synthesize(map: &SchemaMap, serializer: Serializer) -> SchemaPlan {
    let mut tables = vec![];
    let mut joins = IndexSet::new();
    let mut alters = IndexSet::new();

    for (key, descs) in map.iter() {
        let mut columns = vec![];

        for desc in descs.iter().filter(|desc| desc.is_persisted()) {
            if let Some(relation) = &desc.join {
                let join = serializer.join_table(desc, relation.kind, &relation.first, &relation.second);

                for participant in [&join.first, &join.second] {
                    alters.insert(serializer.alter(
                        &join.table_name,
                        &participant.key,
                        None,
                        &participant.table,
                    ));
                }

                joins.insert(join);
                continue;
            }

            if let Some(def) = serializer.column_def(desc) {
                columns.push(def);
            }

            if let Some(references) = &desc.references {
                let table = desc.table_name.clone().unwrap_or_else(|| normalize(key));
                alters.insert(serializer.alter(
                    &table,
                    desc.column(),
                    desc.foreign_key.as_deref(),
                    references,
                ));
            }
        }

        if !columns.is_empty() {
            tables.push(serializer.create_table(normalize(key), columns));
        }
    }

    SchemaPlan {
        tables,
        joins: joins.into_iter().collect(),
        alters: alters.into_iter().collect(),
    }
}

impl Serializer {
    pub fn create_table(&self, name: String, columns: Vec<String>) -> CreateTable {
        let statement = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.ident(&name),
            columns.join(",\n    ")
        );

        CreateTable {
            name,
            columns,
            statement,
        }
    }

    fn join_table(
        &self,
        desc: &ColumnDescriptor,
        kind: RelationKind,
        first: &Participant,
        second: &Participant,
    ) -> JoinTableSpec {
        let table_name = desc
            .table_name
            .clone()
            .unwrap_or_else(|| normalize(&format!("{}_{}", first.table, second.table)));

        let mut statement = format!(
            "CREATE TABLE IF NOT EXISTS {} ({} varchar(35) not null, {} varchar(35) not null",
            self.ident(&table_name),
            self.ident(&first.key),
            self.ident(&second.key),
        );

        if kind == RelationKind::OneToMany {
            statement.push_str(&format!(", UNIQUE ({})", self.ident(&second.key)));
        }

        statement.push(')');

        JoinTableSpec {
            table_name,
            kind,
            first: first.clone(),
            second: second.clone(),
            statement,
        }
    }

    /// `ALTER TABLE <table> ADD CONSTRAINT fk_<table>_<ref> FOREIGN KEY
    /// (<key>) REFERENCES <ref> (id)`
    pub fn alter(
        &self,
        table: &str,
        local_key: &str,
        foreign_key: Option<&str>,
        referenced_table: &str,
    ) -> AlterSpec {
        let referenced = normalize(referenced_table);
        let constraint = format!("fk_{table}_{referenced}");

        let statement = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.ident(table),
            self.ident(&constraint),
            self.ident(foreign_key.unwrap_or(local_key)),
            self.ident(&referenced),
            self.ident(ID_COLUMN),
        );

        AlterSpec {
            table: table.to_string(),
            local_key: local_key.to_string(),
            foreign_key: foreign_key.map(str::to_string),
            referenced_table: referenced_table.to_string(),
            statement,
        }
    }
}
