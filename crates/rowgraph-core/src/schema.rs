mod annotations;
pub use annotations::Annotations;

mod column;
pub use column::{ColumnDescriptor, Nullability};

mod describe;
pub use describe::{describe, Described};

mod extract;
pub use extract::{extract, extract_schema, SchemaFragment};

mod field;
pub use field::{Field, FieldKind, RecordRef};

mod name;
pub use name::normalize;

mod record;
pub use record::{DescribeRecord, RecordSchema, RecordSchemaBuilder};

mod relation;
pub use relation::{Participant, RelationKind, RelationSpec};

mod schema_map;
pub use schema_map::SchemaMap;

mod sql_type;
pub use sql_type::SqlType;
