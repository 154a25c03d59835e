use chrono::{TimeZone, Utc};
use jdl_core::ast::{JdlEntity, JdlField, JdlObject, JdlRelationship, RelationshipType};
use jdl_core::{convert, ConvertArgs};
use serde_json::json;

fn load(fixture: &str) -> JdlObject {
    serde_json::from_str(fixture).unwrap()
}

#[test]
fn test_invoice_end_to_end() {
    let jdl_object = load(include_str!("fixtures/invoice.json"));
    let timestamp = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();

    let result = convert(
        ConvertArgs::new(&jdl_object, "invoiceApp", "sql").with_creation_timestamp(timestamp),
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    let expected_json = json!({
        "invoiceApp": [{
            "name": "Invoice",
            "tableName": "invoice",
            "changelogDate": "20200101120001",
            "dto": "no",
            "service": "no",
            "pagination": "no",
            "jpaMetamodelFiltering": false,
            "fluentMethods": true,
            "readOnly": false,
            "embedded": false,
            "clientRootFolder": "",
            "fields": [{
                "fieldName": "name",
                "fieldType": "String",
                "validations": [{ "name": "required" }]
            }],
            "relationships": [],
            "applications": "*"
        }]
    });

    assert_eq!(json, expected_json);
}

#[test]
fn test_changelog_date_without_timestamp() {
    let jdl_object = load(include_str!("fixtures/invoice.json"));

    let result = convert(ConvertArgs::new(&jdl_object, "invoiceApp", "sql")).unwrap();
    let entities = result.get("invoiceApp").unwrap();

    assert_eq!(entities[0].changelog_date.len(), 14);
    assert!(entities[0].changelog_date.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_changelog_dates_follow_declaration_order() {
    let mut jdl_object = JdlObject::new();
    for name in ["A", "User", "B", "C"] {
        jdl_object.add_entity(JdlEntity::new(name));
    }
    let timestamp = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

    let result =
        convert(ConvertArgs::new(&jdl_object, "app", "sql").with_creation_timestamp(timestamp))
            .unwrap();
    let dates: Vec<&str> = result
        .get("app")
        .unwrap()
        .iter()
        .map(|entity| entity.changelog_date.as_str())
        .collect();

    assert_eq!(dates, vec!["20200101000001", "20200101000003", "20200101000004"]);
}

#[test]
fn test_built_in_entity_declaration_is_skipped() {
    let mut jdl_object = JdlObject::new();
    let mut user = JdlEntity::new("USER");
    user.add_field(JdlField::new("nickname", "String"));
    jdl_object.add_entity(user);
    jdl_object.add_entity(JdlEntity::new("Authority"));
    jdl_object.add_entity(JdlEntity::new("Invoice"));
    jdl_object.add_relationship(
        JdlRelationship::new("Invoice", "USER", RelationshipType::ManyToOne)
            .with_injected_fields(Some("owner"), Some("invoices")),
    );
    jdl_object.add_relationship(
        JdlRelationship::new("USER", "Invoice", RelationshipType::OneToMany)
            .with_injected_fields(Some("ownedInvoices"), None),
    );

    let result = convert(ConvertArgs::new(&jdl_object, "app", "sql")).unwrap();
    let entities = result.get("app").unwrap();

    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].name, "Invoice");
    assert_eq!(entities[0].relationships.len(), 1);
    assert_eq!(entities[0].relationships[0].relationship_name, "owner");
    assert_eq!(entities[0].relationships[0].other_entity_name, "uSER");
}

#[test]
fn test_shop_fixture() {
    let jdl_object = load(include_str!("fixtures/shop.json"));

    let result = convert(ConvertArgs::new(&jdl_object, "shop", "sql")).unwrap();
    let json = result.to_value().unwrap();
    let entities = json["shop"].as_array().unwrap();

    assert_eq!(entities.len(), 2);
    let customer = &entities[0];
    let order = &entities[1];

    assert_eq!(customer["name"], "Customer");
    assert_eq!(customer["tableName"], "customer");
    assert_eq!(customer["javadoc"], "A customer of the shop");
    assert_eq!(customer["dto"], "mapstruct");
    assert_eq!(customer["service"], "serviceClass");
    assert_eq!(customer["searchEngine"], false);
    assert_eq!(customer["relationships"].as_array().unwrap().len(), 2);
    assert_eq!(customer["relationships"][1]["otherEntityName"], "user");
    assert_eq!(customer["relationships"][1]["otherEntityField"], "login");
    assert_eq!(customer["relationships"][1]["ownerSide"], true);

    assert_eq!(order["tableName"], "product_order");
    assert_eq!(order["pagination"], "pagination");
    assert_eq!(order["searchEngine"], "elasticsearch");
    assert_eq!(order["fields"][1]["fieldValues"], "PENDING,SHIPPED");
    assert_eq!(
        order["relationships"],
        json!([{
            "relationshipType": "many-to-one",
            "otherEntityName": "customer",
            "relationshipName": "customer",
            "otherEntityRelationshipName": "orders",
            "otherEntityField": "email"
        }])
    );
}

#[test]
fn test_conversion_is_idempotent() {
    let jdl_object = load(include_str!("fixtures/shop.json"));
    let timestamp = Utc.with_ymd_and_hms(2021, 6, 1, 8, 30, 0).unwrap();
    let args = ConvertArgs::new(&jdl_object, "shop", "sql").with_creation_timestamp(timestamp);

    let first = convert(args.clone()).unwrap().to_json().unwrap();
    let second = convert(args).unwrap().to_json().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_calls_do_not_share_state() {
    let shop = load(include_str!("fixtures/shop.json"));
    let invoice = load(include_str!("fixtures/invoice.json"));

    convert(ConvertArgs::new(&shop, "shop", "sql")).unwrap();
    let result = convert(ConvertArgs::new(&invoice, "invoiceApp", "sql")).unwrap();

    assert_eq!(result.entities.len(), 1);
    let names: Vec<&str> = result
        .get("invoiceApp")
        .unwrap()
        .iter()
        .map(|entity| entity.name.as_str())
        .collect();
    assert_eq!(names, vec!["Invoice"]);
}

#[test]
fn test_key_order_of_serialized_entity() {
    let jdl_object = load(include_str!("fixtures/invoice.json"));

    let result = convert(ConvertArgs::new(&jdl_object, "invoiceApp", "sql")).unwrap();
    let json = result.to_value().unwrap();
    let keys: Vec<&str> = json["invoiceApp"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(keys.first(), Some(&"name"));
    assert_eq!(keys.last(), Some(&"applications"));
}
