use rowgraph_core::{
    bail,
    schema::{extract_schema, normalize, DescribeRecord, RelationSpec},
    stmt::{Row, Value},
    Result,
};

/// A persisted record type.
///
/// The type describes its fields through [`DescribeRecord`]; the mapper
/// derives its table, columns and relations from that description. The
/// remaining methods connect in-memory values to rows.
pub trait Record: DescribeRecord + Send + Sync + Sized + 'static {
    /// Table the record is stored in.
    fn table_name() -> String {
        normalize(Self::NAME)
    }

    /// Builds a record from a result row.
    fn load(row: &Row) -> Result<Self>;

    /// The record's identity.
    fn id(&self) -> Result<String>;

    /// Value of the named attribute, as declared in the record's schema.
    fn field(&self, attribute: &str) -> Value;

    /// Records owned by this one, saved along with it.
    fn children(&self) -> Result<Vec<&dyn Entity>> {
        Ok(vec![])
    }

    /// Join row associating this record with one of its children, if the
    /// relation is stored in a join table.
    fn join(&self, child: &dyn Entity) -> Result<Option<Box<dyn Entity>>> {
        let _ = child;
        Ok(None)
    }
}

/// Object safe view of anything that can be written as a row.
///
/// Every [`Record`] is an entity; so is [`Association`].
pub trait Entity: Send + Sync {
    /// Type name, as declared
    fn type_name(&self) -> &str;

    fn table(&self) -> String;

    fn identity(&self) -> Result<String>;

    /// Columns and values of the row, in declaration order.
    fn values(&self) -> Result<Vec<(String, Value)>>;

    fn child_entities(&self) -> Result<Vec<&dyn Entity>>;

    fn join_with(&self, child: &dyn Entity) -> Result<Option<Box<dyn Entity>>>;
}

impl<T: Record> Entity for T {
    fn type_name(&self) -> &str {
        T::NAME
    }

    fn table(&self) -> String {
        T::table_name()
    }

    fn identity(&self) -> Result<String> {
        self.id()
    }

    fn values(&self) -> Result<Vec<(String, Value)>> {
        let schema = T::schema()?;
        let fragment = extract_schema(&schema);

        Ok(fragment
            .map
            .get(T::NAME)
            .unwrap_or_default()
            .iter()
            .filter(|desc| desc.has_definition())
            .map(|desc| (desc.column().to_string(), self.field(&desc.attribute_name)))
            .collect())
    }

    fn child_entities(&self) -> Result<Vec<&dyn Entity>> {
        self.children()
    }

    fn join_with(&self, child: &dyn Entity) -> Result<Option<Box<dyn Entity>>> {
        self.join(child)
    }
}

/// A row of a join table, pairing the identities of two records.
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    table: String,
    first: (String, String),
    second: (String, String),
}

impl Association {
    /// Pairs `first_id` and `second_id` in `table`.
    pub fn new(
        table: impl Into<String>,
        (first_key, first_id): (impl Into<String>, impl Into<String>),
        (second_key, second_id): (impl Into<String>, impl Into<String>),
    ) -> Association {
        Association {
            table: table.into(),
            first: (first_key.into(), first_id.into()),
            second: (second_key.into(), second_id.into()),
        }
    }

    /// The row of the join table declared by `relation`. The table is
    /// `table_name` when the relation's field overrides it, and
    /// `<first>_<second>` otherwise.
    pub fn for_relation(
        relation: &RelationSpec,
        table_name: Option<&str>,
        first_id: impl Into<String>,
        second_id: impl Into<String>,
    ) -> Association {
        let table = match table_name {
            Some(table) => table.to_string(),
            None => normalize(&format!("{}_{}", relation.first.table, relation.second.table)),
        };

        Association::new(
            table,
            (relation.first.key.clone(), first_id),
            (relation.second.key.clone(), second_id),
        )
    }

    /// The row of the join table declared on `T`'s `attribute` field.
    pub fn for_field<T: DescribeRecord>(
        attribute: &str,
        first_id: impl Into<String>,
        second_id: impl Into<String>,
    ) -> Result<Association> {
        let schema = T::schema()?;

        let Some(field) = schema.field(attribute) else {
            bail!("`{}` has no field `{attribute}`", T::NAME);
        };

        let Some(relation) = &field.annotations.join else {
            bail!("`{}.{attribute}` declares no join", T::NAME);
        };

        Ok(Association::for_relation(
            relation,
            field.annotations.table_name.as_deref(),
            first_id,
            second_id,
        ))
    }

    /// The conventional join row between a parent and a child: table
    /// `<parent>_<child>` with columns `<parent>_id` and `<child>_id`.
    pub fn link(parent: &dyn Entity, child: &dyn Entity) -> Result<Association> {
        let parent_name = normalize(parent.type_name());
        let child_name = normalize(child.type_name());

        Ok(Association::new(
            format!("{parent_name}_{child_name}"),
            (format!("{parent_name}_id"), parent.identity()?),
            (format!("{child_name}_id"), child.identity()?),
        ))
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }
}

impl Entity for Association {
    fn type_name(&self) -> &str {
        &self.table
    }

    fn table(&self) -> String {
        self.table.clone()
    }

    fn identity(&self) -> Result<String> {
        Ok(format!("{}/{}", self.first.1, self.second.1))
    }

    fn values(&self) -> Result<Vec<(String, Value)>> {
        Ok(vec![
            (self.first.0.clone(), Value::from(&self.first.1)),
            (self.second.0.clone(), Value::from(&self.second.1)),
        ])
    }

    fn child_entities(&self) -> Result<Vec<&dyn Entity>> {
        Ok(vec![])
    }

    fn join_with(&self, _child: &dyn Entity) -> Result<Option<Box<dyn Entity>>> {
        Ok(None)
    }
}

/// Generates a new record identity: a simple (hyphenless) v4 UUID, which fits
/// the 35 character identifier columns.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
