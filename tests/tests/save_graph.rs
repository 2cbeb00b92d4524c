use pretty_assertions::assert_eq;
use rowgraph::{
    driver::{Capability, Operation},
    schema::{DescribeRecord, FieldKind, RecordSchema},
    stmt::{Row, Value},
    Association, Db, Entity, Record, Result,
};
use tests::{
    models::{Order, Product},
    ExecLog, LoggingDriver,
};

/// A tree of records joined by the conventional `node_node` table.
#[derive(Debug)]
struct Node {
    id: String,
    children: Vec<Node>,
}

fn node(id: &str, children: Vec<Node>) -> Node {
    Node {
        id: id.to_string(),
        children,
    }
}

impl DescribeRecord for Node {
    const NAME: &'static str = "Node";

    fn schema() -> Result<RecordSchema> {
        RecordSchema::builder(Self::NAME)
            .tagged(
                "ID",
                FieldKind::Text,
                r#"column:"id" datatype:"uuid.UUID" primaryKey:"true""#,
            )
            .tagged(
                "Children",
                FieldKind::list(FieldKind::record::<Node>()),
                r#"column:"children""#,
            )
            .build()
    }
}

impl Record for Node {
    fn load(row: &Row) -> Result<Self> {
        Ok(node(&row.get::<String>("id")?, vec![]))
    }

    fn id(&self) -> Result<String> {
        Ok(self.id.clone())
    }

    fn field(&self, attribute: &str) -> Value {
        match attribute {
            "ID" => Value::from(&self.id),
            _ => Value::Null,
        }
    }

    fn children(&self) -> Result<Vec<&dyn Entity>> {
        Ok(self.children.iter().map(|c| c as &dyn Entity).collect())
    }

    fn join(&self, child: &dyn Entity) -> Result<Option<Box<dyn Entity>>> {
        Ok(Some(Box::new(Association::link(self, child)?)))
    }
}

/// Products sold together, joined through a renamed table.
struct Bundle {
    id: String,
    products: Vec<Product>,
}

impl DescribeRecord for Bundle {
    const NAME: &'static str = "Bundle";

    fn schema() -> Result<RecordSchema> {
        RecordSchema::builder(Self::NAME)
            .tagged(
                "ID",
                FieldKind::Text,
                r#"column:"id" datatype:"uuid.UUID" primaryKey:"true""#,
            )
            .tagged(
                "Products",
                FieldKind::list(FieldKind::record::<Product>()),
                r#"column:"products" join:"Bundle:bundle_id,Product:product_id" tableName:"bundle_items""#,
            )
            .build()
    }
}

impl Record for Bundle {
    fn load(row: &Row) -> Result<Self> {
        Ok(Bundle {
            id: row.get("id")?,
            products: vec![],
        })
    }

    fn id(&self) -> Result<String> {
        Ok(self.id.clone())
    }

    fn field(&self, attribute: &str) -> Value {
        match attribute {
            "ID" => Value::from(&self.id),
            _ => Value::Null,
        }
    }

    fn children(&self) -> Result<Vec<&dyn Entity>> {
        Ok(self.products.iter().map(|p| p as &dyn Entity).collect())
    }

    fn join(&self, child: &dyn Entity) -> Result<Option<Box<dyn Entity>>> {
        let row = Association::for_field::<Bundle>("Products", &self.id, child.identity()?)?;
        Ok(Some(Box::new(row)))
    }
}

fn db(driver: LoggingDriver) -> (Db, ExecLog) {
    let log = driver.log();
    let db = tests::fake_db(driver, |builder| {
        builder.register::<Order>().register::<Product>();
    });
    (db, log)
}

/// `(table, params)` of every write, in dispatch order.
fn writes(log: &ExecLog) -> Vec<(String, Vec<Value>)> {
    log.operations()
        .into_iter()
        .filter_map(|op| match op {
            Operation::Execute(stmt) => {
                let table = stmt
                    .sql
                    .strip_prefix("INSERT INTO `")?
                    .split('`')
                    .next()?
                    .to_string();
                Some((table, stmt.params))
            }
            _ => None,
        })
        .collect()
}

fn ids(log: &ExecLog) -> Vec<String> {
    writes(log)
        .into_iter()
        .map(|(table, params)| {
            let ids: Vec<_> = params
                .iter()
                .filter_map(|v| v.as_str())
                .collect();
            format!("{table}:{}", ids.join("/"))
        })
        .collect()
}

#[tokio::test]
async fn parent_children_then_joins() {
    let (db, log) = db(LoggingDriver::fake(&Capability::MYSQL));

    let order = Order::new(
        "o1",
        vec![Product::new("p1", "Pen", 2.5), Product::new("p2", "Ink", 7.0)],
    );

    db.save(&order).await.unwrap();

    assert_eq!(
        ids(&log),
        [
            "order:o1",
            "product:p1/Pen",
            "product:p2/Ink",
            "order_product:o1/p1",
            "order_product:o1/p2",
        ]
    );

    let writes = writes(&log);
    assert_eq!(
        writes[0].1,
        [
            Value::from("o1"),
            Value::Null,
            Value::from(9.5),
            Value::from(false),
        ]
    );
}

#[tokio::test]
async fn record_without_children() {
    let (db, log) = db(LoggingDriver::fake(&Capability::MYSQL));

    db.save(&Product::new("p1", "Pen", 2.5)).await.unwrap();

    assert_eq!(ids(&log), ["product:p1/Pen"]);
}

#[tokio::test]
async fn grandchildren_follow_their_parent() {
    let (db, log) = db(LoggingDriver::fake(&Capability::MYSQL));

    let tree = node(
        "a",
        vec![node("b", vec![node("d", vec![])]), node("c", vec![])],
    );

    db.save(&tree).await.unwrap();

    assert_eq!(
        ids(&log),
        [
            "node:a",
            "node:b",
            "node:d",
            "node:c",
            "node_node:a/b",
            "node_node:b/d",
            "node_node:a/c",
        ]
    );
}

#[tokio::test]
async fn joins_written_after_every_root() {
    let (db, log) = db(LoggingDriver::fake(&Capability::MYSQL));

    let first = Order::new("o1", vec![Product::new("p1", "Pen", 1.0)]);
    let second = Order::new("o2", vec![Product::new("p2", "Ink", 1.0)]);

    db.save_all(&[&first, &second]).await.unwrap();

    assert_eq!(
        ids(&log),
        [
            "order:o1",
            "product:p1/Pen",
            "order:o2",
            "product:p2/Ink",
            "order_product:o1/p1",
            "order_product:o2/p2",
        ]
    );
}

#[tokio::test]
async fn failure_aborts_save() {
    let (db, log) = db(LoggingDriver::fake(&Capability::MYSQL).fail("INSERT INTO `product`", "duplicate key"));

    let order = Order::new(
        "o1",
        vec![Product::new("p1", "Pen", 2.5), Product::new("p2", "Ink", 7.0)],
    );

    let err = db.save(&order).await.unwrap_err();
    assert!(err.is_row_operation(), "{err}");
    assert_eq!(err.to_string(), "product INSERT \"p1\": duplicate key");

    // the order row stays; the second product and the join rows are never attempted
    assert_eq!(ids(&log), ["order:o1", "product:p1/Pen"]);
}

#[tokio::test]
async fn cyclic_graph_is_rejected() {
    let (db, log) = db(LoggingDriver::fake(&Capability::MYSQL));

    let tree = node("a", vec![node("b", vec![node("a", vec![])])]);

    let err = db.save(&tree).await.unwrap_err();
    assert!(err.is_cyclic_graph(), "{err}");

    assert_eq!(ids(&log), ["node:a", "node:b"]);
}

#[tokio::test]
async fn same_record_on_separate_branches() {
    let (db, log) = db(LoggingDriver::fake(&Capability::MYSQL));

    // "c" appears twice, but never as its own ancestor
    let tree = node(
        "a",
        vec![node("b", vec![node("c", vec![])]), node("c", vec![])],
    );

    db.save(&tree).await.unwrap();

    assert_eq!(writes(&log).len(), 7);
}

#[tokio::test]
async fn join_rows_use_the_declared_table() {
    let driver = LoggingDriver::fake(&Capability::MYSQL);
    let log = driver.log();
    let db = tests::fake_db(driver, |builder| {
        builder.register::<Bundle>().register::<Product>();
    });

    let (plan, _) = db.schema_plan().await;
    let joins: Vec<_> = plan.joins.iter().map(|j| &j.table_name[..]).collect();
    assert_eq!(joins, ["bundle_items"]);

    let bundle = Bundle {
        id: "b1".to_string(),
        products: vec![Product::new("p1", "Pen", 2.5)],
    };
    db.save(&bundle).await.unwrap();

    assert_eq!(
        ids(&log),
        ["bundle:b1", "product:p1/Pen", "bundle_items:b1/p1"]
    );
}
