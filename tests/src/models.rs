//! Sample records shared by the integration tests.

use rowgraph::{
    schema::{DescribeRecord, Field, FieldKind, RecordSchema, SqlType},
    stmt::{Row, Value},
    Association, Entity, Record, Result,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
}

impl DescribeRecord for Address {
    const NAME: &'static str = "Address";

    fn schema() -> Result<RecordSchema> {
        RecordSchema::builder(Self::NAME)
            .tagged("Street", FieldKind::Text, r#"column:"street""#)
            .tagged("City", FieldKind::Text, r#"column:"city""#)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,

    /// Embedded; its columns describe the `address` table, not `customer`.
    pub address: Address,
}

impl Customer {
    pub fn new(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            address: Address::default(),
        }
    }
}

impl DescribeRecord for Customer {
    const NAME: &'static str = "Customer";

    fn schema() -> Result<RecordSchema> {
        RecordSchema::builder(Self::NAME)
            .tagged(
                "ID",
                FieldKind::Text,
                r#"column:"id" datatype:"uuid.UUID" primaryKey:"true" null:"false""#,
            )
            .tagged("Name", FieldKind::Text, r#"column:"name""#)
            .field(
                Field::new("Email", FieldKind::Text)
                    .column("email")
                    .datatype(SqlType::Long),
            )
            .tagged("Address", FieldKind::record::<Address>(), r#"column:"address""#)
            .tagged("Session", FieldKind::Text, r#"column:"session" dbskip:"""#)
            .build()
    }
}

impl Record for Customer {
    fn load(row: &Row) -> Result<Self> {
        Ok(Customer {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            address: Address::default(),
        })
    }

    fn id(&self) -> Result<String> {
        Ok(self.id.clone())
    }

    fn field(&self, attribute: &str) -> Value {
        match attribute {
            "ID" => Value::from(&self.id),
            "Name" => Value::from(&self.name),
            "Email" => Value::from(&self.email),
            _ => Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(id: &str, name: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price,
        }
    }
}

impl DescribeRecord for Product {
    const NAME: &'static str = "Product";

    fn schema() -> Result<RecordSchema> {
        RecordSchema::builder(Self::NAME)
            .tagged(
                "ID",
                FieldKind::Text,
                r#"column:"id" datatype:"uuid.UUID" primaryKey:"true""#,
            )
            .tagged("Name", FieldKind::Text, r#"column:"name""#)
            .tagged("Price", FieldKind::Float, r#"column:"price""#)
            .build()
    }
}

impl Record for Product {
    fn load(row: &Row) -> Result<Self> {
        Ok(Product {
            id: row.get("id")?,
            name: row.get("name")?,
            price: row.get("price")?,
        })
    }

    fn id(&self) -> Result<String> {
        Ok(self.id.clone())
    }

    fn field(&self, attribute: &str) -> Value {
        match attribute {
            "ID" => Value::from(&self.id),
            "Name" => Value::from(&self.name),
            "Price" => Value::from(self.price),
            _ => Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer_id: Option<String>,
    pub total: f64,
    pub paid: bool,
    pub products: Vec<Product>,
}

impl Order {
    pub fn new(id: &str, products: Vec<Product>) -> Order {
        Order {
            id: id.to_string(),
            customer_id: None,
            total: products.iter().map(|product| product.price).sum(),
            paid: false,
            products,
        }
    }
}

impl DescribeRecord for Order {
    const NAME: &'static str = "Order";

    fn schema() -> Result<RecordSchema> {
        RecordSchema::builder(Self::NAME)
            .tagged(
                "ID",
                FieldKind::Text,
                r#"column:"id" datatype:"uuid.UUID" primaryKey:"true""#,
            )
            .tagged(
                "Customer",
                FieldKind::record_ptr::<Customer>(),
                r#"column:"customer_id" references:"Customer""#,
            )
            .tagged("Total", FieldKind::Float, r#"column:"total""#)
            .tagged("Paid", FieldKind::Boolean, r#"column:"paid" default:"0""#)
            .tagged(
                "Products",
                FieldKind::list(FieldKind::record::<Product>()),
                r#"column:"products" join:"Order:order_id,Product:product_id""#,
            )
            .build()
    }
}

impl Record for Order {
    fn load(row: &Row) -> Result<Self> {
        Ok(Order {
            id: row.get("id")?,
            customer_id: row.get_opt("customer_id")?,
            total: row.get("total")?,
            paid: row.get("paid")?,
            products: vec![],
        })
    }

    fn id(&self) -> Result<String> {
        Ok(self.id.clone())
    }

    fn field(&self, attribute: &str) -> Value {
        match attribute {
            "ID" => Value::from(&self.id),
            "Customer" => match &self.customer_id {
                Some(id) => Value::from(id),
                None => Value::Null,
            },
            "Total" => Value::from(self.total),
            "Paid" => Value::from(self.paid),
            _ => Value::Null,
        }
    }

    fn children(&self) -> Result<Vec<&dyn Entity>> {
        Ok(self
            .products
            .iter()
            .map(|product| product as &dyn Entity)
            .collect())
    }

    fn join(&self, child: &dyn Entity) -> Result<Option<Box<dyn Entity>>> {
        Ok(Some(Box::new(Association::for_field::<Order>(
            "Products",
            &self.id,
            child.identity()?,
        )?)))
    }
}

/// A record whose description cannot be parsed.
#[derive(Debug)]
pub struct Broken;

impl DescribeRecord for Broken {
    const NAME: &'static str = "Broken";

    fn schema() -> Result<RecordSchema> {
        RecordSchema::builder(Self::NAME)
            .tagged("ID", FieldKind::Text, r#"column:"id" datatype:"uuid.UUID""#)
            .tagged("Label", FieldKind::Text, r#"column:"label"#)
            .build()
    }
}

impl Record for Broken {
    fn load(_row: &Row) -> Result<Self> {
        Ok(Broken)
    }

    fn id(&self) -> Result<String> {
        Ok("broken".to_string())
    }

    fn field(&self, _attribute: &str) -> Value {
        Value::Null
    }
}
