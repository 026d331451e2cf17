use serde_json::json;

use super::*;
use crate::net::test_helpers::logged_in_rig;
use crate::net::types::Rol;

fn draft() -> CustomPerfumeDraft {
    CustomPerfumeDraft {
        nombre: "  Brisa  ".into(),
        descripcion: Some(String::new()),
        imagen_url: Some("https://img.test/b.png".into()),
        usuario_id: Some(1),
        notas_ids: vec![3, 4],
    }
}

#[test]
fn validate_names_the_first_missing_field() {
    let blank = CustomPerfumeDraft { nombre: "   ".into(), ..draft() };
    let Err(ApiError::Validation(msg)) = blank.validate() else { panic!("expected validation error") };
    assert!(msg.contains("name"));

    let orphan = CustomPerfumeDraft { usuario_id: None, ..draft() };
    assert!(matches!(orphan.validate(), Err(ApiError::Validation(_))));

    let no_notes = CustomPerfumeDraft { notas_ids: vec![], ..draft() };
    let Err(ApiError::Validation(msg)) = no_notes.validate() else { panic!("expected validation error") };
    assert!(msg.contains("note"));

    assert!(draft().validate().is_ok());
}

#[tokio::test]
async fn create_sends_owner_reference_and_note_ids() {
    let rig = logged_in_rig("/crear-perfume", Rol::User);
    rig.transport.push_json(201, &json!({ "id": 11, "nombre": "Brisa", "notas": null }));

    let created = rig.gateway.custom_perfumes().create(&draft()).await.unwrap();

    assert_eq!(created.id, Some(11));
    assert!(created.notas.is_empty());
    assert_eq!(
        rig.transport.last_request().body,
        Some(json!({
            "nombre": "Brisa",
            "imagenUrl": "https://img.test/b.png",
            "usuario": { "id": 1 },
            "notasIds": [3, 4],
        }))
    );
}

#[tokio::test]
async fn invalid_draft_is_rejected_without_a_request() {
    let rig = logged_in_rig("/crear-perfume", Rol::User);

    let err = rig.gateway.custom_perfumes().create(&CustomPerfumeDraft::default()).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(rig.transport.request_count(), 0);
}

#[tokio::test]
async fn update_sends_incomplete_draft_anyway() {
    let rig = logged_in_rig("/mis-perfumes", Rol::User);
    rig.transport.push_json(200, &json!({ "id": 11, "nombre": "" }));

    let incomplete = CustomPerfumeDraft { nombre: String::new(), notas_ids: vec![], ..draft() };
    rig.gateway.custom_perfumes().update(11, &incomplete).await.unwrap();

    let request = rig.transport.last_request();
    assert_eq!(request.method, reqwest::Method::PUT);
    assert!(request.url.ends_with("/perfumes-personalizados/11"));
}

#[tokio::test]
async fn by_user_hits_user_scoped_path() {
    let rig = logged_in_rig("/mis-perfumes", Rol::User);
    rig.transport.push(200, "[]");

    assert!(rig.gateway.custom_perfumes().by_user(1).await.unwrap().is_empty());
    assert!(rig.transport.last_request().url.ends_with("/perfumes-personalizados/usuario/1"));
}
