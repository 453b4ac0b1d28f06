//! Single-request services against the in-process mock backend.

use mycoffee_core::{BusinessPatch, InventoryPatch, Product, User};
use mycoffee_hal::{merge, ClientConfig, Hal, HalClient, HalError, Resource};
use mycoffee_services::{add_to_basket, Storefront};
use mycoffee_testkit::MockBackend;
use serde_json::{json, Value};

fn storefront(mock: &MockBackend) -> Storefront {
    Storefront::new(HalClient::anonymous(ClientConfig::with_base_url(mock.url())).unwrap())
}

fn hal<T: serde::de::DeserializeOwned>(value: Value) -> Hal<T> {
    merge(Resource::from_value(value).unwrap()).unwrap()
}

fn business_user(self_href: &str) -> Hal<User> {
    hal(json!({
        "username": "bean-bar",
        "authorities": [{"authority": "ROLE_BUSINESS"}],
        "_links": {"self": {"href": self_href}}
    }))
}

// =============================================================================
// Inventories
// =============================================================================

#[tokio::test]
async fn my_inventories_query_uses_user_uri() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        "GET",
        "/inventories/search/findByBusiness",
        200,
        json!({"_embedded": {"inventories": [
            {"name": "Shelf A", "location": "Front", "totalStock": 4,
             "_links": {"self": {"href": "/inventories/1"}}}
        ]}}),
    );
    let storefront = storefront(&mock);
    let user_uri = mock.url_for("/users/7");

    let inventories = storefront
        .inventories()
        .get_my_inventories(&business_user(&user_uri))
        .await
        .unwrap();

    assert_eq!(inventories.len(), 1);
    assert_eq!(inventories[0].name, "Shelf A");
    assert_eq!(
        mock.requests()[0].uri,
        format!("/inventories/search/findByBusiness?business={user_uri}")
    );
}

#[tokio::test]
async fn my_inventories_without_user_link_sends_nothing() {
    let mock = MockBackend::start().await.unwrap();
    let storefront = storefront(&mock);
    let user: Hal<User> = hal(json!({"username": "bean-bar"}));

    let err = storefront.inventories().get_my_inventories(&user).await.unwrap_err();

    assert!(matches!(err, HalError::MissingLink { ref rel } if rel == "self"));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn inventory_update_and_delete_follow_self_link() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        "PATCH",
        "/inventories/3",
        200,
        json!({"name": "Fridge", "location": "Back", "totalStock": 9}),
    );
    mock.route_empty("DELETE", "/inventories/3", 204);
    let storefront = storefront(&mock);

    let inventory = hal(json!({
        "name": "Fridge", "location": "Back", "totalStock": 8,
        "_links": {"self": {"href": mock.url_for("/inventories/3")}}
    }));

    let updated = storefront
        .inventories()
        .update_inventory(&inventory, &InventoryPatch::stock(9))
        .await
        .unwrap();
    assert_eq!(updated.total_stock, 9);
    assert_eq!(
        mock.requests_to("PATCH", "/inventories/3")[0].body,
        Some(json!({"totalStock": 9}))
    );

    storefront.inventories().delete_inventory(&inventory).await.unwrap();
    assert_eq!(mock.requests_to("DELETE", "/inventories/3").len(), 1);
}

#[tokio::test]
async fn inventory_delete_without_self_link_fails() {
    let mock = MockBackend::start().await.unwrap();
    let storefront = storefront(&mock);
    let inventory = hal(json!({"name": "Fridge", "location": "Back", "totalStock": 8}));

    let err = storefront
        .inventories()
        .delete_inventory(&inventory)
        .await
        .unwrap_err();

    assert!(matches!(err, HalError::MissingLink { .. }));
    assert_eq!(mock.request_count(), 0);
}

// =============================================================================
// Records
// =============================================================================

#[tokio::test]
async fn owner_records_use_encoded_absolute_uri() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        "GET",
        "/records/search/findByOwnedBy",
        200,
        json!({"_embedded": {"records": [{"id": 1, "name": "Roast log", "beans": "Huila"}]}}),
    );
    let storefront = storefront(&mock);

    let records = storefront
        .records()
        .get_records_by_owned_by(&business_user("/users/alice"))
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name.as_deref(), Some("Roast log"));
    assert_eq!(records[0].extra.get("beans"), Some(&json!("Huila")));

    let uri = &mock.requests()[0].uri;
    let expected = mock
        .url_for("/users/alice")
        .replace(':', "%3A")
        .replace('/', "%2F");
    assert_eq!(uri, &format!("/records/search/findByOwnedBy?user={expected}"));
}

#[tokio::test]
async fn owner_record_failure_is_an_empty_list() {
    let mock = MockBackend::start().await.unwrap();
    mock.route_text("GET", "/records/search/findByOwnedBy", 500, "boom");
    let storefront = storefront(&mock);

    let records = storefront
        .records()
        .get_records_by_owned_by(&business_user("/users/alice"))
        .await;

    assert!(records.is_empty());
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn record_relation_follows_link() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        "GET",
        "/records/4/product",
        200,
        json!({"name": "Espresso", "price": 2.5, "stock": 10, "available": true,
               "partOfLoyaltyProgram": false}),
    );
    let storefront = storefront(&mock);

    let record = hal(json!({
        "id": 4,
        "_links": {
            "self": {"href": "/records/4"},
            "product": {"href": "/records/4/product{?projection}", "templated": true}
        }
    }));

    let product: Hal<Product> = storefront
        .records()
        .get_record_relation(&record, "product")
        .await
        .unwrap();
    assert_eq!(product.name, "Espresso");
    assert_eq!(mock.requests()[0].uri, "/records/4/product");

    let err = storefront
        .records()
        .get_record_relation::<Product>(&record, "owner")
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::MissingLink { ref rel } if rel == "owner"));
}

// =============================================================================
// Basket items
// =============================================================================

#[tokio::test]
async fn update_quantity_reads_then_posts_whole_item() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        "GET",
        "/basketItems/12",
        200,
        json!({"id": 12, "quantity": 1, "_links": {"self": {"href": "/basketItems/12"}}}),
    );
    mock.route(
        "POST",
        "/basketItems/12",
        200,
        json!({"id": 12, "quantity": 4, "_links": {"self": {"href": "/basketItems/12"}}}),
    );
    let storefront = storefront(&mock);

    let item = storefront.basket_items().update_quantity("12", 4).await.unwrap();
    assert_eq!(item.quantity, 4);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[1].method, "POST");
    let body = requests[1].body.as_ref().unwrap();
    assert_eq!(body["quantity"], json!(4));
    assert_eq!(body["id"], json!(12));
}

#[tokio::test]
async fn zero_quantity_is_rejected_locally() {
    let mock = MockBackend::start().await.unwrap();
    let storefront = storefront(&mock);

    let err = storefront.basket_items().update_quantity("12", 0).await.unwrap_err();
    assert!(err.is_rejected_locally());
    assert_eq!(mock.request_count(), 0);
}

// =============================================================================
// Businesses and users
// =============================================================================

#[tokio::test]
async fn business_update_normalizes_payload() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        "PATCH",
        "/businesses/5",
        200,
        json!({"username": "bean-bar", "name": "Bean Bar", "address": "1 Main St",
               "openingTime": "07:30:00"}),
    );
    let storefront = storefront(&mock);

    let patch = BusinessPatch {
        opening_time: Some("07:30".into()),
        password: Some(String::new()),
        ..Default::default()
    };
    let updated = storefront
        .businesses()
        .update_business("5", &patch)
        .await
        .unwrap();

    assert_eq!(updated.opening_time.as_deref(), Some("07:30:00"));
    assert_eq!(
        mock.requests()[0].body,
        Some(json!({"openingTime": "07:30:00"}))
    );
}

#[tokio::test]
async fn identity_decodes_roles() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        "GET",
        "/identity",
        200,
        json!({"username": "bean-bar", "authorities": [{"authority": "ROLE_BUSINESS"}],
               "_links": {"self": {"href": "/users/bean-bar"}}}),
    );
    let storefront = storefront(&mock);

    let me = storefront.users().identity().await.unwrap();
    assert!(me.can_edit_business("bean-bar"));
    assert!(!me.is_admin());
    assert_eq!(me.id_segment(), Some("bean-bar"));
}

#[tokio::test]
async fn basket_lookup_never_falls_back_to_another_customer() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        "GET",
        "/baskets",
        200,
        json!({"_embedded": {"baskets": [
            {"id": 1, "customer": "/customers/bob"},
            {"id": 2, "username": "carol"}
        ]}}),
    );
    let storefront = storefront(&mock);
    let alice = User {
        id: None,
        username: "alice".into(),
        email: None,
        authorities: vec![],
    };

    assert!(storefront.baskets().find_for_user(&alice).await.unwrap().is_none());
}

#[tokio::test]
async fn username_prefix_does_not_claim_another_basket() {
    let mock = MockBackend::start().await.unwrap();
    mock.route(
        "GET",
        "/baskets",
        200,
        json!({"_embedded": {"baskets": [
            {"id": 1, "customer": "/customers/alice", "_links": {"self": {"href": "/baskets/1"}}}
        ]}}),
    );
    mock.route(
        "POST",
        "/baskets",
        201,
        json!({"id": 2, "customer": "/customers/al", "_links": {"self": {"href": "/baskets/2"}}}),
    );
    mock.route("POST", "/basketItems", 201, json!({"id": 5, "quantity": 1}));
    let storefront = storefront(&mock);
    let al = User {
        id: None,
        username: "al".into(),
        email: None,
        authorities: vec![],
    };

    assert!(storefront.baskets().find_for_user(&al).await.unwrap().is_none());

    let added = add_to_basket(&storefront, &al, "7", 1).await.unwrap();
    assert!(added.created_basket);
    assert_eq!(added.basket.id, Some(2));
    assert_eq!(
        mock.requests_to("POST", "/baskets")[0].body,
        Some(json!({"customer": "/customers/al"}))
    );
    let item_body = mock.requests_to("POST", "/basketItems")[0].body.clone().unwrap();
    assert_eq!(item_body["basket"], json!("/baskets/2"));
}
