use pretty_assertions::assert_eq;
use rowgraph::{stmt::Value, CmpOp, JoinKind, Query, TableRef};
use tests::models::{Customer, Order, Product};

fn sample_order() -> Order {
    let mut order = Order::new(
        "o1",
        vec![Product::new("p1", "Pen", 2.5), Product::new("p2", "Ink", 7.0)],
    );
    order.customer_id = Some("c1".to_string());
    order
}

#[tokio::test]
async fn create_tables() {
    let (db, _log) = tests::sqlite_db().await;

    // a second run is a no-op
    let report = db.create_tables().await;
    assert!(report.is_ok(), "{:#?}", report.failures);
    assert!(report.constraints_skipped);
    assert_eq!(report.applied, 5);
}

#[tokio::test]
async fn save_and_get() {
    let (db, log) = tests::sqlite_db().await;

    db.save(&Customer::new("c1", "Ann")).await.unwrap();
    db.save(&sample_order()).await.unwrap();

    assert_eq!(log.writes().len(), 6);

    let customer: Customer = db.get("c1").await.unwrap();
    assert_eq!(customer.name, "Ann");
    assert_eq!(customer.email, "ann@example.com");

    let order: Order = db.get("o1").await.unwrap();
    assert_eq!(order.customer_id.as_deref(), Some("c1"));
    assert_eq!(order.total, 9.5);
    assert!(!order.paid);
    assert!(order.products.is_empty());
}

#[tokio::test]
async fn missing_record() {
    let (db, _log) = tests::sqlite_db().await;

    let err = db.get::<Product>("nope").await.unwrap_err();
    assert!(err.is_record_not_found(), "{err}");

    assert!(db.select::<Product>("nope").await.unwrap().is_empty());
}

#[tokio::test]
async fn select_in() {
    let (db, log) = tests::sqlite_db().await;
    db.save(&sample_order()).await.unwrap();

    let mut products: Vec<Product> = db.select_in(&["p2", "p1", "p9"]).await.unwrap();
    products.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(
        products,
        [Product::new("p1", "Pen", 2.5), Product::new("p2", "Ink", 7.0)]
    );

    log.clear();
    assert!(db.select_in::<Product>(&[]).await.unwrap().is_empty());
    assert!(log.is_empty());
}

#[tokio::test]
async fn update_and_delete() {
    let (db, _log) = tests::sqlite_db().await;
    db.save(&sample_order()).await.unwrap();

    let changed = db
        .update::<Order>("o1", &[("paid", Value::from(true)), ("total", Value::from(3.0))])
        .await
        .unwrap();
    assert_eq!(changed, 1);

    let order: Order = db.get("o1").await.unwrap();
    assert!(order.paid);
    assert_eq!(order.total, 3.0);

    assert_eq!(db.update::<Order>("o9", &[("paid", Value::from(true))]).await.unwrap(), 0);
    assert_eq!(db.update::<Order>("o1", &[]).await.unwrap(), 0);

    db.delete(&Product::new("p1", "Pen", 2.5)).await.unwrap();
    assert!(db.get::<Product>("p1").await.unwrap_err().is_record_not_found());
    assert!(db.get::<Product>("p2").await.is_ok());
}

#[tokio::test]
async fn children_through_join_table() {
    let (db, _log) = tests::sqlite_db().await;
    let order = sample_order();
    db.save(&order).await.unwrap();

    let mut ids = db.child_ids::<Order, Product>(&order).await.unwrap();
    ids.sort();
    assert_eq!(ids, ["p1", "p2"]);

    let mut products = db.children::<Order, Product>(&order).await.unwrap();
    products.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(products, order.products);

    let other = Order::new("o2", vec![]);
    assert!(db.children::<Order, Product>(&other).await.unwrap().is_empty());
}

#[tokio::test]
async fn ad_hoc_query() {
    let (db, _log) = tests::sqlite_db().await;
    db.save(&sample_order()).await.unwrap();
    db.save(&Order::new("o2", vec![Product::new("p3", "Pad", 4.0)]))
        .await
        .unwrap();

    let query = Query::select("product", "p", Vec::<String>::new())
        .join(
            JoinKind::Inner,
            TableRef::new("order_product", "j", "product_id"),
            TableRef::new("product", "p", "id"),
        )
        .filter(TableRef::new("order_product", "j", "order_id"), CmpOp::Eq, "o1");

    let mut products: Vec<Product> = db.query(&query).await.unwrap();
    products.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(
        products.iter().map(|p| &p.id[..]).collect::<Vec<_>>(),
        ["p1", "p2"]
    );

    let query = Query::select("product", "p", ["id", "name", "price"])
        .filter(TableRef::new("product", "p", "price"), CmpOp::Gt, 5.0)
        .or(TableRef::new("product", "p", "name"), CmpOp::Eq, "Pad");

    let mut products: Vec<Product> = db.query(&query).await.unwrap();
    products.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(
        products.iter().map(|p| &p.name[..]).collect::<Vec<_>>(),
        ["Ink", "Pad"]
    );
}

#[tokio::test]
async fn failed_statement_names_the_row() {
    let (db, _log) = tests::sqlite_db().await;

    let query = Query::select("missing", "m", Vec::<String>::new());
    let err = db.query::<Product>(&query).await.unwrap_err();

    assert!(err.is_row_operation(), "{err}");
    assert!(err.to_string().starts_with("missing SELECT"), "{err}");
}
