use serde_json::json;

use super::*;
use crate::net::test_helpers::logged_in_rig;
use crate::net::types::Rol;

fn checkout(address: &str) -> CheckoutRequest {
    CheckoutRequest { usuario_id: 1, direccion_envio: address.into(), metodo_pago: MetodoPago::Paypal }
}

#[tokio::test]
async fn get_passes_user_id_and_defaults_missing_lines() {
    let rig = logged_in_rig("/carrito", Rol::User);
    rig.transport.push_json(200, &json!({ "id": 4, "detalles": null }));

    let cart = rig.gateway.cart().get(1).await.unwrap();

    assert_eq!(cart.id, Some(4));
    assert!(cart.detalles.is_empty());
    assert_eq!(rig.transport.last_request().query, vec![("usuarioId".to_owned(), "1".to_owned())]);
}

#[tokio::test]
async fn null_cart_reads_as_empty() {
    let rig = logged_in_rig("/carrito", Rol::User);
    rig.transport.push(200, "");

    assert_eq!(rig.gateway.cart().get(1).await.unwrap(), Carrito::default());
}

#[tokio::test]
async fn add_item_posts_camel_case_body() {
    let rig = logged_in_rig("/perfumes/3", Rol::User);
    rig.transport.push_json(201, &json!({ "id": 99, "cantidad": 2 }));

    rig.gateway.cart().add_item(&AddItem { usuario_id: 1, perfume_id: 3, cantidad: 2 }).await.unwrap();

    assert_eq!(
        rig.transport.last_request().body,
        Some(json!({ "usuarioId": 1, "perfumeId": 3, "cantidad": 2 }))
    );
}

#[tokio::test]
async fn zero_quantity_is_rejected_locally() {
    let rig = logged_in_rig("/perfumes/3", Rol::User);
    let err = rig.gateway.cart().add_item(&AddItem { usuario_id: 1, perfume_id: 3, cantidad: 0 }).await;
    assert!(matches!(err, Err(ApiError::Validation(_))));
    assert_eq!(rig.transport.request_count(), 0);
}

#[tokio::test]
async fn update_and_remove_target_the_line() {
    let rig = logged_in_rig("/carrito", Rol::User);

    rig.gateway.cart().update_quantity(12, 3).await.unwrap();
    let request = rig.transport.last_request();
    assert!(request.url.ends_with("/carrito/items/12"));
    assert_eq!(request.body, Some(json!({ "cantidad": 3 })));

    rig.gateway.cart().remove_item(12, 1).await.unwrap();
    let request = rig.transport.last_request();
    assert_eq!(request.method, reqwest::Method::DELETE);
    assert_eq!(request.query, vec![("usuarioId".to_owned(), "1".to_owned())]);
}

#[tokio::test]
async fn checkout_requires_an_address() {
    let rig = logged_in_rig("/carrito", Rol::User);

    let err = rig.gateway.cart().checkout(&checkout("  ")).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(rig.transport.request_count(), 0);
}

#[tokio::test]
async fn checkout_posts_payment_method_and_returns_receipt() {
    let rig = logged_in_rig("/carrito", Rol::User);
    rig.transport.push_json(200, &json!({ "id": 31, "total": 240.0 }));

    let receipt = rig.gateway.cart().checkout(&checkout("Calle 1")).await.unwrap();

    assert_eq!(receipt.id, Some(31));
    assert_eq!(
        rig.transport.last_request().body,
        Some(json!({ "usuarioId": 1, "direccionEnvio": "Calle 1", "metodoPago": "PAYPAL" }))
    );
}

#[tokio::test]
async fn failed_checkout_surfaces_server_message() {
    let rig = logged_in_rig("/carrito", Rol::User);
    rig.transport.push(500, r#"{"message":"Stock insuficiente"}"#);

    let err = rig.gateway.cart().checkout(&checkout("Calle 1")).await.unwrap_err();

    assert_eq!(err.user_message(), "Error 500: Stock insuficiente");
    assert!(rig.session.is_authenticated());
}

#[tokio::test]
async fn process_purchase_returns_the_invoice() {
    let rig = logged_in_rig("/carrito", Rol::User);
    rig.transport.push_json(
        200,
        &json!({
            "id": 40,
            "usuarioId": 1,
            "total": 99.9,
            "detalles": [{ "nombreProducto": "Brisa", "cantidad": 1, "precioUnitario": 99.9, "subtotal": 99.9 }],
        }),
    );

    let factura = rig.gateway.invoices().process_purchase(&checkout("Calle 1")).await.unwrap();

    assert_eq!(factura.id, 40);
    assert_eq!(factura.detalles.len(), 1);
    assert!(rig.transport.last_request().url.ends_with("/facturas/procesar-compra"));
}
