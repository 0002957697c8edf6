use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use models::db::{connect_with_config, DatabaseConfig};
use server::auth::StaticKeyStore;
use server::{startup, ServerState};

const KEY: &str = "84dcb7c09b4a4af8a67f4577ffe9b255";

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

    fn get(&self, path: &str) -> reqwest::RequestBuilder { self.client.get(self.url(path)).header("X-API-KEY", KEY) }

    fn post(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.client.post(self.url(path)).header("X-API-KEY", KEY).json(body)
    }

    fn put(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.client.put(self.url(path)).header("X-API-KEY", KEY).json(body)
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder { self.client.delete(self.url(path)).header("X-API-KEY", KEY) }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState::from_db(db, Arc::new(StaticKeyStore::new([KEY])));
    let app = startup::build_app(state, Duration::from_secs(3));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()), client: reqwest::Client::new() })
}

fn student(name: &str, branch: &str, company_id: Uuid) -> Value {
    json!({
        "name": name,
        "phone": "6388768118",
        "dob": "02/07/2000",
        "branch": branch,
        "company": {"id": company_id},
        "status": "ACCEPTED"
    })
}

async fn create_company(app: &TestApp, name: &str, category: &str) -> anyhow::Result<Value> {
    let res = app.post("/companies", &json!({"name": name, "category": category})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    Ok(res.json().await?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app.client.get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_gate_rejects_bad_key_and_content_type() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app.client.get(app.url("/companies")).header("X-API-KEY", "wrong").send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    assert_eq!(res.text().await?, "authentication failed");

    let res = app
        .client
        .post(app.url("/companies"))
        .header("X-API-KEY", KEY)
        .body(r#"{"name":"Wipro","category":"MASS"}"#)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(res.text().await?, "Header Content-Type incorrect");
    Ok(())
}

#[tokio::test]
async fn e2e_company_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app.get("/companies").send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));

    let created = create_company(&app, "Wipro", "MASS").await?;
    let id = created["id"].as_str().unwrap().to_string();

    let fetched: Value = app.get(&format!("/companies/{id}")).send().await?.json().await?;
    assert_eq!(fetched, created);

    let res = app.put(&format!("/companies/{id}"), &json!({"name": "Wipro Ltd", "category": "OPEN DREAM"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["category"], "OPEN DREAM");

    let res = app.post("/companies", &json!({"name": "Acme", "category": "STARTUP"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "Invalid Parameter: invalid category");

    let res = app.delete(&format!("/companies/{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = app.delete(&format!("/companies/{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, format!("Entity Not Found: id not found: {id}"));
    Ok(())
}

#[tokio::test]
async fn e2e_student_flow() -> anyhow::Result<()> {
    let app = start_server().await?;
    let mass = create_company(&app, "Wipro", "MASS").await?;
    let core = create_company(&app, "L&T", "CORE").await?;
    let mass_id: Uuid = mass["id"].as_str().unwrap().parse()?;
    let core_id: Uuid = core["id"].as_str().unwrap().parse()?;

    let res = app.get("/students").send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "DB Error: no rows found");

    let res = app.post("/students", &student("Monika Jaiswal", "ECE", mass_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let monika: Value = res.json().await?;
    let monika_id = monika["id"].as_str().unwrap().to_string();
    assert_ne!(monika_id, Uuid::nil().to_string());
    assert_eq!(monika["branch"], "ECE");
    assert_eq!(monika["company"], mass);

    let res = app.post("/students", &student("Meera", "CSE", core_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "Invalid Parameter: invalid branch for this company category");

    let res = app.post("/students", &student("Arjun", "CIVIL", Uuid::new_v4())).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let mut short_phone = student("Arjun", "CIVIL", core_id);
    short_phone["phone"] = json!("12345");
    let res = app.post("/students", &short_phone).send().await?;
    assert_eq!(res.text().await?, "Invalid Parameter: phone number must be 10-12 digit long");

    let res = app.post("/students", &student("Arjun", "CIVIL", core_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let joined: Value = app
        .get("/students?name=Monika%20Jaiswal&branch=ECE&includeCompany=true")
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(joined.as_array().unwrap().len(), 1);
    assert_eq!(joined[0]["company"]["name"], "Wipro");

    let plain: Value = app.get("/students").send().await?.json().await?;
    assert_eq!(plain.as_array().unwrap().len(), 2);
    assert!(plain[0].get("company").is_none());

    let res = app.get("/students?branch=ISE").send().await?;
    assert_eq!(res.text().await?, "DB Error: no rows found");

    let res = app.get("/students?name=Mo").send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "Invalid Parameter: name should be minimum of three characters long");

    let mut update = student("Monika J", "ECE", mass_id);
    update["status"] = json!("REJECTED");
    let res = app.put(&format!("/students/{monika_id}"), &update).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let first: Value = app.get(&format!("/students/{monika_id}")).send().await?.json().await?;
    let second: Value = app.get(&format!("/students/{monika_id}")).send().await?.json().await?;
    assert_eq!(first, second);
    assert_eq!(first["status"], "REJECTED");
    assert_eq!(first["company"]["id"], mass["id"]);

    // still referenced by a student
    let res = app.delete(&format!("/companies/{}", mass_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = app.delete(&format!("/students/{monika_id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = app.get(&format!("/students/{monika_id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = app.get("/students/not-a-uuid").send().await?;
    assert_eq!(res.text().await?, "Invalid Parameter: not-a-uuid");
    Ok(())
}
