//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo test --test api_tests -- --ignored`

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

async fn setup(client: &Client) -> Value {
    let response = client
        .get(format!("{}/setup-fase2", BASE_URL))
        .send()
        .await
        .expect("Failed to send setup request");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse setup response")
}

/// Client holding an admin session cookie
async fn admin_client() -> Client {
    let client = session_client();
    setup(&client).await;

    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("username", "admin"), ("password", "admin123")])
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    client
}

/// Client holding a guest session cookie
async fn guest_client() -> Client {
    let client = session_client();
    setup(&client).await;

    let response = client
        .get(format!("{}/login-invitado", BASE_URL))
        .send()
        .await
        .expect("Failed to send guest login request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    client
}

async fn first_client_id(client: &Client) -> i64 {
    let clients: Value = client
        .get(format!("{}/api/clientes", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    clients[0]["id"].as_i64().expect("No seeded client")
}

async fn list_equipment(client: &Client) -> Vec<Value> {
    client
        .get(format!("{}/api/equipos", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

fn unique_serial(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

async fn get_json(client: &Client, path: &str) -> Value {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
    response.json().await.expect("Failed to parse response")
}

async fn log_maintenance(client: &Client, equipo_id: i64, descripcion: &str) {
    let response = client
        .post(format!("{}/api/mantenimientos", BASE_URL))
        .json(&json!({ "equipo_id": equipo_id, "descripcion": descripcion }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn create_equipment(client: &Client, cliente_id: i64, serial: &str) -> Value {
    let response = client
        .post(format!("{}/api/equipos", BASE_URL))
        .json(&json!({
            "cliente_id": cliente_id,
            "nombre": "UPS Sala 1",
            "tipo": "UPS",
            "serial": serial,
            "ubicacion": "Sótano",
            "observaciones": "Batería cambiada en enero"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = Client::new()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_setup_is_idempotent() {
    let client = session_client();
    setup(&client).await;

    let body = setup(&client).await;
    assert_eq!(body["creados"]["usuarios"], 0);
    assert_eq!(body["creados"]["clientes"], 0);
    assert_eq!(body["mensaje"], "La base de datos ya existe. No se hicieron cambios.");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = session_client();
    setup(&client).await;

    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("username", "admin"), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // No session was opened
    let response = client
        .get(format!("{}/api/equipos", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_dashboard_requires_session() {
    let response = session_client()
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
#[ignore]
async fn test_logout_invalidates_session() {
    let client = admin_client().await;

    let response = client
        .get(format!("{}/logout", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .get(format!("{}/api/clientes", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_create_equipment_roundtrip() {
    let client = admin_client().await;
    let cliente_id = first_client_id(&client).await;
    let serial = unique_serial("RT");

    let created = create_equipment(&client, cliente_id, &serial).await;
    assert_eq!(created["estado"], "Operativo");

    let listed = list_equipment(&client).await;
    let found = listed
        .iter()
        .find(|e| e["serial"] == serial.as_str())
        .expect("Created equipment not listed");
    assert_eq!(found["nombre"], "UPS Sala 1");
    assert_eq!(found["cliente_id"], cliente_id);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_rejected() {
    let client = admin_client().await;
    let cliente_id = first_client_id(&client).await;
    let serial = unique_serial("DUP");
    create_equipment(&client, cliente_id, &serial).await;
    let before = list_equipment(&client).await.len();

    let response = client
        .post(format!("{}/api/equipos", BASE_URL))
        .json(&json!({
            "cliente_id": cliente_id,
            "nombre": "Otro",
            "tipo": "UPS",
            "serial": serial,
            "ubicacion": "Piso 2"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
    assert_eq!(list_equipment(&client).await.len(), before);
}

#[tokio::test]
#[ignore]
async fn test_missing_field_rejected() {
    let client = admin_client().await;
    let cliente_id = first_client_id(&client).await;

    let response = client
        .post(format!("{}/api/equipos", BASE_URL))
        .json(&json!({ "cliente_id": cliente_id, "nombre": "Sin serial" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_partial_update_keeps_other_fields() {
    let client = admin_client().await;
    let cliente_id = first_client_id(&client).await;
    let created = create_equipment(&client, cliente_id, &unique_serial("UPD")).await;
    let id = created["id"].as_i64().expect("No id");

    let response = client
        .put(format!("{}/api/equipos/{}", BASE_URL, id))
        .json(&json!({ "estado": "Falla" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["estado"], "Falla");
    assert_eq!(updated["observaciones"], "Batería cambiada en enero");
    assert_eq!(updated["serial"], created["serial"]);
}

#[tokio::test]
#[ignore]
async fn test_invalid_status_rejected() {
    let client = admin_client().await;
    let cliente_id = first_client_id(&client).await;
    let created = create_equipment(&client, cliente_id, &unique_serial("EST")).await;

    let response = client
        .put(format!("{}/api/equipos/{}", BASE_URL, created["id"]))
        .json(&json!({ "estado": "Roto" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_delete_equipment_cascades_maintenance() {
    let client = admin_client().await;
    let cliente_id = first_client_id(&client).await;
    let doomed = create_equipment(&client, cliente_id, &unique_serial("DEL")).await;
    let kept = create_equipment(&client, cliente_id, &unique_serial("KEEP")).await;
    let id = doomed["id"].as_i64().expect("No id");
    let kept_id = kept["id"].as_i64().expect("No id");

    log_maintenance(&client, id, "Limpieza de filtros").await;
    log_maintenance(&client, id, "Cambio de batería").await;
    log_maintenance(&client, kept_id, "Revisión general").await;

    let history = get_json(&client, &format!("/api/mantenimientos/{}", id)).await;
    let history = history.as_array().expect("Expected a list");
    assert_eq!(history.len(), 2);
    // Newest first
    assert_eq!(history[0]["descripcion"], "Cambio de batería");
    assert_eq!(history[1]["descripcion"], "Limpieza de filtros");
    assert_eq!(history[0]["usuario"], "admin");

    let response = client
        .delete(format!("{}/api/equipos/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/api/mantenimientos/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Other equipment keeps its log
    let survivors = get_json(&client, &format!("/api/mantenimientos/{}", kept_id)).await;
    let survivors = survivors.as_array().expect("Expected a list");
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0]["descripcion"], "Revisión general");
}

#[tokio::test]
#[ignore]
async fn test_blank_maintenance_description_rejected() {
    let client = admin_client().await;
    let cliente_id = first_client_id(&client).await;
    let created = create_equipment(&client, cliente_id, &unique_serial("BLK")).await;
    let id = created["id"].as_i64().expect("No id");

    let response = client
        .post(format!("{}/api/mantenimientos", BASE_URL))
        .json(&json!({ "equipo_id": id, "descripcion": "   " }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let history = get_json(&client, &format!("/api/mantenimientos/{}", id)).await;
    assert_eq!(history.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_client_with_equipment_cannot_be_deleted() {
    let client = admin_client().await;

    let response = client
        .post(format!("{}/api/clientes", BASE_URL))
        .json(&json!({ "nombre": format!("Cliente {}", unique_serial("CLI")), "direccion": "Calle 100" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.expect("Failed to parse response");
    let cliente_id = created["id"].as_i64().expect("No id");

    let equipment = create_equipment(&client, cliente_id, &unique_serial("OWN")).await;

    let response = client
        .delete(format!("{}/api/clientes/{}", BASE_URL, cliente_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Equipment is untouched by the refused delete
    let response = client
        .get(format!("{}/api/equipos/{}", BASE_URL, equipment["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .delete(format!("{}/api/equipos/{}", BASE_URL, equipment["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .delete(format!("{}/api/clientes/{}", BASE_URL, cliente_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .delete(format!("{}/api/clientes/{}", BASE_URL, cliente_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_guest_cannot_mutate() {
    let admin = admin_client().await;
    let cliente_id = first_client_id(&admin).await;
    let created = create_equipment(&admin, cliente_id, &unique_serial("GST")).await;
    let id = created["id"].as_i64().expect("No id");
    log_maintenance(&admin, id, "Inspección inicial").await;

    let guest = guest_client().await;
    let equipment_before = list_equipment(&guest).await;
    let clients_before = get_json(&guest, "/api/clientes").await;
    let users_before = get_json(&admin, "/api/usuarios").await;
    let history_before = get_json(&guest, &format!("/api/mantenimientos/{}", id)).await;

    let attempts = [
        guest.post(format!("{}/api/equipos", BASE_URL)).json(&json!({
            "cliente_id": cliente_id,
            "nombre": "Intruso",
            "tipo": "UPS",
            "serial": unique_serial("GST"),
            "ubicacion": "Lobby"
        })),
        guest
            .put(format!("{}/api/equipos/{}", BASE_URL, id))
            .json(&json!({ "estado": "Falla" })),
        guest.delete(format!("{}/api/equipos/{}", BASE_URL, id)),
        guest
            .post(format!("{}/api/mantenimientos", BASE_URL))
            .json(&json!({ "equipo_id": id, "descripcion": "No autorizado" })),
        guest
            .post(format!("{}/api/clientes", BASE_URL))
            .json(&json!({ "nombre": "Cliente intruso" })),
        guest.delete(format!("{}/api/clientes/{}", BASE_URL, cliente_id)),
        guest
            .post(format!("{}/api/usuarios", BASE_URL))
            .json(&json!({ "username": "intruso", "password": "secreto" })),
    ];
    for request in attempts {
        let response = request.send().await.expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    assert_eq!(list_equipment(&guest).await, equipment_before);
    assert_eq!(get_json(&guest, "/api/clientes").await, clients_before);
    assert_eq!(get_json(&admin, "/api/usuarios").await, users_before);
    assert_eq!(
        get_json(&guest, &format!("/api/mantenimientos/{}", id)).await,
        history_before
    );
}

#[tokio::test]
#[ignore]
async fn test_user_cannot_delete_own_account() {
    let admin = admin_client().await;
    let username = format!("tec-{}", uuid::Uuid::new_v4().simple());

    let response = admin
        .post(format!("{}/api/usuarios", BASE_URL))
        .json(&json!({ "username": username, "password": "clave-segura" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.expect("Failed to parse response");
    let user_id = created["id"].as_i64().expect("No id");

    let own = session_client();
    let response = own
        .post(format!("{}/login", BASE_URL))
        .form(&[("username", username.as_str()), ("password", "clave-segura")])
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = own
        .delete(format!("{}/api/usuarios/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Another full account may remove it
    let response = admin
        .delete(format!("{}/api/usuarios/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_login_missing_field_renders_form() {
    let client = session_client();
    setup(&client).await;

    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("username", "admin")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("<form"));
}

#[tokio::test]
#[ignore]
async fn test_concurrent_setup_seeds_once() {
    let runners: Vec<Client> = (0..4).map(|_| Client::new()).collect();
    let (a, b, c, d) = tokio::join!(
        setup(&runners[0]),
        setup(&runners[1]),
        setup(&runners[2]),
        setup(&runners[3])
    );
    let seeded: u64 = [a, b, c, d]
        .iter()
        .map(|body| body["creados"]["clientes"].as_u64().unwrap_or(0))
        .sum();
    assert!(seeded == 0 || seeded == 2, "seeded {} clients", seeded);

    let client = admin_client().await;
    let clients = get_json(&client, "/api/clientes").await;
    let clients = clients.as_array().expect("Expected a list");
    for seed in ["GNB Sudameris - Torre A", "Edificio Avianca"] {
        let count = clients.iter().filter(|c| c["nombre"] == seed).count();
        assert!(count <= 1, "{} seeded {} times", seed, count);
    }
}

#[tokio::test]
#[ignore]
async fn test_reserved_user_cannot_be_deleted() {
    let client = admin_client().await;
    let users: Vec<Value> = client
        .get(format!("{}/api/usuarios", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    for reserved in ["admin", "invitado"] {
        let user = users
            .iter()
            .find(|u| u["username"] == reserved)
            .expect("Reserved user not provisioned");
        let response = client
            .delete(format!("{}/api/usuarios/{}", BASE_URL, user["id"]))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
#[ignore]
async fn test_export_pdf() {
    let client = admin_client().await;
    let cliente_id = first_client_id(&client).await;

    let response = client
        .get(format!("{}/exportar-pdf?cliente_id={}", BASE_URL, cliente_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");

    let bytes = response.bytes().await.expect("Failed to read body");
    assert!(bytes.starts_with(b"%PDF"));
}
