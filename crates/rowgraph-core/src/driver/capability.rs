/// SQL dialect spoken by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Mysql,
    Sqlite,
}

#[derive(Debug)]
pub struct Capability {
    /// Dialect used when rendering identifiers and statements.
    pub flavor: Flavor,

    /// Supports `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY`. SQLite can
    /// only declare foreign keys when a table is created.
    pub alter_add_constraint: bool,
}

impl Capability {
    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        flavor: Flavor::Mysql,
        alter_add_constraint: true,
    };

    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        flavor: Flavor::Sqlite,
        alter_add_constraint: false,
    };
}
