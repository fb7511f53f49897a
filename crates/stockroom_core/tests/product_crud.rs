use std::str::FromStr;
use stockroom_core::{
    CategoryId, CategorySelection, DeleteTarget, EditChoice, FieldValue, Listing, NewProduct,
    ProductField, ProductRecord, ProductRepository, ProductService, ProductUpdate, RepoError,
    ServiceError, SqliteCategoryRepository, SqliteProductRepository, Store, ValidationError,
    MAX_CATEGORIES,
};
use tempfile::TempDir;

type Service = ProductService<SqliteProductRepository, SqliteCategoryRepository>;

fn setup() -> (TempDir, Store, Service) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("inventario.db"));
    store.initialize().unwrap();
    let service = ProductService::new(
        SqliteProductRepository::new(store.clone()),
        SqliteCategoryRepository::new(store.clone()),
    );
    (dir, store, service)
}

fn new_product(name: &str, quantity: i64, price: i64, category_id: CategoryId) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: format!("{name} description"),
        quantity,
        price,
        category_id,
    }
}

#[test]
fn get_after_insert_returns_exact_values_and_category_name() {
    let (_dir, _store, service) = setup();
    let tools = service.create_category_inline("Tools").unwrap();

    let cases = [(1, 0), (5, 10), (999, 123_456)];
    for (quantity, price) in cases {
        let id = service
            .add_product(new_product("Hammer", quantity, price, tools))
            .unwrap();
        let record = service.find_product(&id.to_string()).unwrap();
        assert_eq!(
            record,
            ProductRecord {
                id,
                name: "Hammer".to_string(),
                description: "Hammer description".to_string(),
                quantity,
                price,
                category_name: "Tools".to_string(),
            }
        );
    }
}

#[test]
fn add_product_validates_every_field() {
    let (_dir, _store, service) = setup();
    let tools = service.create_category_inline("Tools").unwrap();

    let mut blank_name = new_product("Hammer", 1, 1, tools);
    blank_name.name = " ".to_string();
    assert!(matches!(
        service.add_product(blank_name),
        Err(ServiceError::Validation(ValidationError::EmptyName))
    ));

    let mut blank_description = new_product("Hammer", 1, 1, tools);
    blank_description.description = String::new();
    assert!(matches!(
        service.add_product(blank_description),
        Err(ServiceError::Validation(ValidationError::EmptyDescription))
    ));

    assert!(matches!(
        service.add_product(new_product("Hammer", 0, 1, tools)),
        Err(ServiceError::Validation(
            ValidationError::NonPositiveQuantity(0)
        ))
    ));
    assert!(matches!(
        service.add_product(new_product("Hammer", 1, -1, tools)),
        Err(ServiceError::Validation(ValidationError::NegativePrice(-1)))
    ));
    assert_eq!(service.list_products().unwrap(), Listing::Empty);
}

#[test]
fn add_product_with_unknown_category_is_not_found() {
    let (_dir, _store, service) = setup();
    let err = service
        .add_product(new_product("Orphan", 1, 1, 404))
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(404)));
}

#[test]
fn list_products_is_joined_and_ordered_by_name() {
    let (_dir, _store, service) = setup();
    let tools = service.create_category_inline("Tools").unwrap();
    let garden = service.create_category_inline("Garden").unwrap();
    service.add_product(new_product("Saw", 3, 9, tools)).unwrap();
    service.add_product(new_product("Hose", 8, 15, garden)).unwrap();
    service.add_product(new_product("Axe", 2, 30, tools)).unwrap();

    let products = service.list_products().unwrap().into_vec();
    let summary: Vec<_> = products
        .iter()
        .map(|product| (product.name.as_str(), product.category_name.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![("Axe", "Tools"), ("Hose", "Garden"), ("Saw", "Tools")]
    );
}

#[test]
fn category_choices_append_create_new_entry() {
    let (_dir, _store, service) = setup();
    let empty = service.category_choices().unwrap();
    assert_eq!(empty.create_new_index(), 1);
    assert_eq!(
        service.select_category(&empty, "1").unwrap(),
        CategorySelection::CreateNew
    );

    let tools = service.create_category_inline("Tools").unwrap();
    let garden = service.create_category_inline("Garden").unwrap();
    let choices = service.category_choices().unwrap();
    assert_eq!(choices.create_new_index(), 3);
    assert_eq!(
        service.select_category(&choices, "1").unwrap(),
        CategorySelection::Existing(tools)
    );
    assert_eq!(
        service.select_category(&choices, " 2 ").unwrap(),
        CategorySelection::Existing(garden)
    );
    assert_eq!(
        service.select_category(&choices, "3").unwrap(),
        CategorySelection::CreateNew
    );
}

#[test]
fn category_selection_rejects_out_of_range_and_text() {
    let (_dir, _store, service) = setup();
    service.create_category_inline("Tools").unwrap();
    let choices = service.category_choices().unwrap();

    for raw in ["0", "3", "-1"] {
        assert!(matches!(
            service.select_category(&choices, raw),
            Err(ServiceError::OutOfRange { max: 2, .. })
        ));
    }
    assert!(matches!(
        service.select_category(&choices, "tools"),
        Err(ServiceError::Validation(ValidationError::NotANumber(_)))
    ));
}

#[test]
fn inline_category_creation_honors_uniqueness_and_cap() {
    let (_dir, _store, service) = setup();
    service.create_category_inline("Tools").unwrap();
    assert!(matches!(
        service.create_category_inline("Tools"),
        Err(ServiceError::DuplicateName(_))
    ));
    assert!(matches!(
        service.create_category_inline(""),
        Err(ServiceError::Validation(ValidationError::EmptyName))
    ));

    for index in 1..MAX_CATEGORIES {
        service
            .create_category_inline(&format!("Extra {index}"))
            .unwrap();
    }
    assert!(matches!(
        service.create_category_inline("Overflow"),
        Err(ServiceError::LimitExceeded { .. })
    ));
    assert_eq!(
        service.category_choices().unwrap().categories.len(),
        MAX_CATEGORIES
    );
}

#[test]
fn edit_each_field_keeps_last_value_and_leaves_others() {
    let (_dir, _store, service) = setup();
    let tools = service.create_category_inline("Tools").unwrap();
    let garden = service.create_category_inline("Garden").unwrap();
    let id = service
        .add_product(new_product("Hammer", 5, 10, tools))
        .unwrap();
    let other = service
        .add_product(new_product("Shovel", 7, 20, garden))
        .unwrap();
    let other_before = service.find_product(&other.to_string()).unwrap();

    service
        .update_product(id, ProductUpdate::Name("Mallet".to_string()))
        .unwrap();
    service
        .update_product(id, ProductUpdate::Name(" Claw hammer ".to_string()))
        .unwrap();
    service
        .update_product(id, ProductUpdate::Description("Rubber head".to_string()))
        .unwrap();
    service
        .update_product(id, ProductUpdate::Quantity(0))
        .unwrap();
    service.update_product(id, ProductUpdate::Price(12)).unwrap();
    service
        .update_product(id, ProductUpdate::Category(garden))
        .unwrap();

    let record = service.find_product(&id.to_string()).unwrap();
    assert_eq!(
        record,
        ProductRecord {
            id,
            name: "Claw hammer".to_string(),
            description: "Rubber head".to_string(),
            quantity: 0,
            price: 12,
            category_name: "Garden".to_string(),
        }
    );
    assert_eq!(
        service.find_product(&other.to_string()).unwrap(),
        other_before
    );
}

#[test]
fn edit_rejects_invalid_values_without_writing() {
    let (_dir, _store, service) = setup();
    let tools = service.create_category_inline("Tools").unwrap();
    let id = service
        .add_product(new_product("Hammer", 5, 10, tools))
        .unwrap();

    assert!(matches!(
        service.update_product(id, ProductUpdate::Name(String::new())),
        Err(ServiceError::Validation(ValidationError::EmptyName))
    ));
    assert!(matches!(
        service.update_product(id, ProductUpdate::Quantity(-1)),
        Err(ServiceError::Validation(ValidationError::NegativeQuantity(-1)))
    ));
    assert!(matches!(
        service.update_product(id, ProductUpdate::Price(-3)),
        Err(ServiceError::Validation(ValidationError::NegativePrice(-3)))
    ));
    assert!(matches!(
        service.update_product(id, ProductUpdate::Category(999)),
        Err(ServiceError::NotFound(999))
    ));
    assert!(matches!(
        service.update_product(id + 100, ProductUpdate::Price(1)),
        Err(ServiceError::NotFound(_))
    ));

    let record = service.find_product(&id.to_string()).unwrap();
    assert_eq!(record.name, "Hammer");
    assert_eq!(record.quantity, 5);
    assert_eq!(record.price, 10);
    assert_eq!(record.category_name, "Tools");
}

#[test]
fn edit_category_via_inline_creation() {
    let (_dir, _store, service) = setup();
    let tools = service.create_category_inline("Tools").unwrap();
    let id = service
        .add_product(new_product("Hammer", 5, 10, tools))
        .unwrap();

    let choices = service.category_choices().unwrap();
    let selection = service.select_category(&choices, "2").unwrap();
    assert_eq!(selection, CategorySelection::CreateNew);
    let fresh = service.create_category_inline("Hardware").unwrap();
    service
        .update_product(id, ProductUpdate::Category(fresh))
        .unwrap();

    let record = service.find_product(&id.to_string()).unwrap();
    assert_eq!(record.category_name, "Hardware");
}

#[test]
fn edit_menu_choices_parse_and_reject_unknown_options() {
    let expected = [
        ("1", EditChoice::Name),
        ("2", EditChoice::Description),
        ("3", EditChoice::Quantity),
        ("4", EditChoice::Price),
        ("5", EditChoice::Category),
        (" 6 ", EditChoice::Finish),
    ];
    for (raw, choice) in expected {
        assert_eq!(EditChoice::parse(raw).unwrap(), choice);
    }
    for raw in ["0", "7", "", "name"] {
        let err = EditChoice::parse(raw).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidOption(_)));
        assert!(err.is_recoverable());
    }
}

#[test]
fn resolve_product_id_uses_current_listing() {
    let (_dir, _store, service) = setup();
    let tools = service.create_category_inline("Tools").unwrap();
    let id = service
        .add_product(new_product("Hammer", 5, 10, tools))
        .unwrap();
    let products = service.list_products().unwrap().into_vec();

    assert_eq!(
        service
            .resolve_product_id(&id.to_string(), &products)
            .unwrap(),
        id
    );
    assert!(matches!(
        service.resolve_product_id("x", &products),
        Err(ServiceError::Validation(ValidationError::NotANumber(_)))
    ));
    assert!(matches!(
        service.resolve_product_id(&(id + 1).to_string(), &products),
        Err(ServiceError::InvalidId(_))
    ));
}

#[test]
fn delete_supports_cancel_sentinel_and_listed_ids() {
    let (_dir, _store, service) = setup();
    let tools = service.create_category_inline("Tools").unwrap();
    let id = service
        .add_product(new_product("Hammer", 5, 10, tools))
        .unwrap();
    let products = service.list_products().unwrap().into_vec();

    assert_eq!(
        service.parse_delete_target("Q", &products).unwrap(),
        DeleteTarget::Cancel
    );
    assert!(matches!(
        service.parse_delete_target("42x", &products),
        Err(ServiceError::Validation(ValidationError::NotANumber(_)))
    ));
    let target = service
        .parse_delete_target(&id.to_string(), &products)
        .unwrap();
    assert_eq!(target, DeleteTarget::Product(id));

    service.delete_product(id).unwrap();
    assert_eq!(service.list_products().unwrap(), Listing::Empty);
    assert!(matches!(
        service.delete_product(id),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn search_distinguishes_parse_failure_and_missing_id() {
    let (_dir, _store, service) = setup();
    assert!(matches!(
        service.find_product("one"),
        Err(ServiceError::Validation(ValidationError::NotANumber(_)))
    ));
    assert!(matches!(
        service.find_product("7"),
        Err(ServiceError::NotFound(7))
    ));
}

#[test]
fn field_names_outside_allow_list_fail_before_store_access() {
    let (dir, store, _service) = setup();
    let repo = SqliteProductRepository::new(store);

    assert_eq!(ProductField::from_str("price").unwrap(), ProductField::Price);
    assert_eq!(
        ProductField::from_str("category_id").unwrap(),
        ProductField::CategoryId
    );
    assert!(matches!(
        ProductField::from_str("stock"),
        Err(RepoError::InvalidField(field)) if field == "stock"
    ));

    // This store cannot be opened; reaching it would yield a Db error instead.
    let missing = SqliteProductRepository::new(Store::new(dir.path().join("no/such/dir.db")));
    assert!(matches!(
        missing.update_field_by_name(1, "id", FieldValue::Integer(9)),
        Err(RepoError::InvalidField(field)) if field == "id"
    ));
    assert!(matches!(
        missing.update_field_by_name(1, "quantity", FieldValue::Text("two".to_string())),
        Err(RepoError::FieldTypeMismatch(ProductField::Quantity))
    ));
    assert!(matches!(
        repo.update_field_by_name(1, "name", FieldValue::Integer(9)),
        Err(RepoError::FieldTypeMismatch(ProductField::Name))
    ));
}

#[test]
fn update_field_by_name_writes_allowed_column() {
    let (_dir, store, service) = setup();
    let tools = service.create_category_inline("Tools").unwrap();
    let id = service
        .add_product(new_product("Hammer", 5, 10, tools))
        .unwrap();

    SqliteProductRepository::new(store)
        .update_field_by_name(id, "quantity", FieldValue::Integer(2))
        .unwrap();
    assert_eq!(service.find_product(&id.to_string()).unwrap().quantity, 2);
}

#[test]
fn invalid_field_is_fatal_at_the_service_boundary() {
    let err: ServiceError = RepoError::InvalidField("stock".to_string()).into();
    assert!(matches!(err, ServiceError::InvalidField(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn repository_get_returns_none_for_missing_id() {
    let (_dir, store, _service) = setup();
    let repo = SqliteProductRepository::new(store);
    assert_eq!(repo.get_product(1).unwrap(), None);
}
