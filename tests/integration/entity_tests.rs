//! Entity CRUD and edit screen tests over HTTP.

use ifoodapp::form::FormValues;
use ifoodapp::{Dish, ErrorKind, Menu, Order, OrderStatus, Payment, PaymentType, Transport};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::TestFixture;

#[tokio::test]
async fn test_create_posts_clean_body() {
    let fixture = TestFixture::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dishes"))
        .and(body_json(json!({
            "name": "Pho",
            "price": 9.5,
            "menu": { "id": 2 },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11,
            "name": "Pho",
            "price": 9.5,
            "menu": { "id": 2 },
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let dish = Dish::builder()
        .id(99)
        .name("Pho")
        .description("")
        .price(9.5)
        .menu(Menu::reference(2))
        .build();
    let created = fixture.client.dishes().create(&dish).await.expect("create should succeed");

    assert_eq!(created.id, Some(11));
    assert_eq!(created.menu.and_then(|menu| menu.id), Some(2));
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "title": "Not Found",
            "status": 404,
        })))
        .mount(&fixture.server)
        .await;

    let err = fixture.client.orders().get(404).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_get_decodes_enums_and_dates() {
    let fixture = TestFixture::start().await;

    Mock::given(method("GET"))
        .and(path("/api/payments/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "paymentDate": "2024-05-01T12:30:00Z",
            "amount": 42.0,
            "paymentType": "CREDIT_CARD",
        })))
        .mount(&fixture.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 8,
            "status": "COMPLETED",
            "customer": { "id": 1, "name": "Ana" },
        })))
        .mount(&fixture.server)
        .await;

    let payment: Payment = fixture.client.payments().get(3).await.unwrap();
    assert_eq!(payment.payment_type, Some(PaymentType::CreditCard));
    assert!(payment.payment_date.is_some());

    let order: Order = fixture.client.orders().get(8).await.unwrap();
    assert_eq!(order.status, Some(OrderStatus::Completed));
    assert!(order.status.is_some_and(|status| status.is_final()));
}

#[tokio::test]
async fn test_update_patch_and_delete() {
    let fixture = TestFixture::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/menus/4"))
        .and(body_json(json!({ "id": 4, "name": "Dinner" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": 4, "name": "Dinner" })),
        )
        .expect(1)
        .mount(&fixture.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/menus/4"))
        .and(body_json(json!({ "id": 4, "description": "Late" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "name": "Dinner",
            "description": "Late",
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/menus/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let menus = fixture.client.menus();
    let updated = menus
        .update(&Menu::builder().id(4).name("Dinner").build())
        .await
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Dinner"));

    let patched = menus
        .partial_update(&Menu::builder().id(4).description("Late").build())
        .await
        .unwrap();
    assert_eq!(patched.name.as_deref(), Some("Dinner"));
    assert_eq!(patched.description.as_deref(), Some("Late"));

    menus.delete(4).await.unwrap();
    assert_eq!(fixture.client.stats().requests_sent, 3);
    assert_eq!(fixture.client.transport_type(), Transport::Http);
}

#[tokio::test]
async fn test_editor_saves_form_over_http() {
    let fixture = TestFixture::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dishes"))
        .and(body_json(json!({
            "name": "Mapo tofu",
            "price": 11.5,
            "spicyLevel": 3,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 21,
            "name": "Mapo tofu",
            "price": 11.5,
            "spicyLevel": 3,
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let mut editor = fixture.client.editor::<Dish>();
    editor.reset();

    let form = FormValues::new()
        .with("name", "Mapo tofu")
        .with("price", "11.50")
        .with("spicyLevel", "3")
        .with("description", "")
        .with("menu", "");
    let saved = editor.save_form(&form).await.cloned();

    assert_eq!(saved.and_then(|dish| dish.id), Some(21));
    assert!(editor.update_success());
    assert!(editor.error().is_none());
}

#[tokio::test]
async fn test_editor_reports_conflict() {
    let fixture = TestFixture::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/dishes/5"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "title": "Conflict",
            "status": 409,
            "detail": "dish was modified concurrently",
        })))
        .mount(&fixture.server)
        .await;

    let mut editor = fixture.client.editor::<Dish>();
    let form = FormValues::new().with("id", "5").with("name", "Ramen");
    assert!(editor.save_form(&form).await.is_none());

    let error = editor.error().expect("conflict should be exposed");
    assert_eq!(error.kind(), ErrorKind::Conflict);
    assert!(!editor.update_success());
    assert!(!editor.updating());
}
