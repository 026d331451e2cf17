use serde_json::json;

use super::*;
use crate::net::test_helpers::logged_in_rig;
use crate::net::types::Rol;

#[tokio::test]
async fn profile_reads_own_user() {
    let rig = logged_in_rig("/perfil", Rol::User);
    rig.transport.push_json(200, &json!({ "id": 1, "nombre": "Ana", "correo": "a@x.com", "rol": "USER" }));

    let user = rig.gateway.users().profile().await.unwrap();

    assert_eq!(user.correo, "a@x.com");
    let request = rig.transport.last_request();
    assert_eq!(request.method, reqwest::Method::GET);
    assert!(request.url.ends_with("/usuarios/profile"));
}

#[tokio::test]
async fn update_profile_omits_unset_fields() {
    let rig = logged_in_rig("/perfil", Rol::User);
    rig.transport.push_json(200, &json!({ "id": 1, "nombre": "Ana María", "correo": "a@x.com", "rol": "USER" }));

    let update = ProfileUpdate { nombre: Some("Ana María".into()), ..ProfileUpdate::default() };
    let user = rig.gateway.users().update_profile(&update).await.unwrap();

    assert_eq!(user.nombre, "Ana María");
    let request = rig.transport.last_request();
    assert_eq!(request.method, reqwest::Method::PUT);
    assert_eq!(request.body, Some(json!({ "nombre": "Ana María" })));
}

#[tokio::test]
async fn list_tolerates_single_object_body() {
    let rig = logged_in_rig("/admin/usuarios", Rol::Admin);
    rig.transport.push_json(200, &json!({ "id": 3, "nombre": "Leo", "correo": "l@x.com", "rol": "CLIENTE" }));

    let users = rig.gateway.users().list().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].rol, Rol::User);
    assert!(rig.transport.last_request().url.ends_with("/usuarios"));
}

#[tokio::test]
async fn list_forbidden_with_token_keeps_session() {
    let rig = logged_in_rig("/admin/usuarios", Rol::User);
    rig.transport.push(403, r#"{"message":"Acceso denegado"}"#);

    let err = rig.gateway.users().list().await.unwrap_err();

    assert!(matches!(err, ApiError::Forbidden { .. }));
    assert!(rig.session.is_authenticated());
    assert_eq!(rig.navigator.history(), vec!["/admin/usuarios".to_owned()]);
}

#[tokio::test]
async fn delete_targets_the_user() {
    let rig = logged_in_rig("/admin/usuarios", Rol::Admin);
    rig.transport.push(204, "");

    rig.gateway.users().delete(3).await.unwrap();

    let request = rig.transport.last_request();
    assert_eq!(request.method, reqwest::Method::DELETE);
    assert!(request.url.ends_with("/usuarios/3"));
}
