use leadgen_crm::connect;
use leadgen_crm::domain::auth::{AuthSession, Plan, User};
use leadgen_crm::domain::lead::{LeadStatus, UpdateLead};
use leadgen_crm::domain::types::{CampaignId, CompanyName, UserId};
use leadgen_crm::models::config::ClientConfig;
use leadgen_crm::repository::errors::RepositoryError;
use leadgen_crm::repository::{CampaignReader, CampaignWriter, LeadReader, LeadWriter};
use leadgen_crm::viewmodel::auth::Session;
use serde_json::json;

mod common;

use common::{StubServer, lead_id, tenant};

fn signed_in(token: &str) -> Session {
    let session = Session::new();
    session.set(AuthSession {
        user: User {
            id: UserId::new("u-1").expect("valid"),
            name: "Jane".to_string(),
            email: "jane@acme.io".to_string(),
            plan: Plan::Growth,
            tenant_id: Some(tenant("acme")),
        },
        tenant: None,
        token: token.to_string(),
    });
    session
}

#[tokio::test]
async fn lists_tenant_leads_with_bearer_token() {
    let server = StubServer::start(|_| {
        (
            200,
            json!([
                {"id": "1", "companyName": "Initech", "contactName": "Bill", "contactEmail": "bill@initech.com", "status": "FOLLOW_UP", "tenantId": "acme"},
                {"id": "2", "companyName": "Globex", "contactName": "Hank", "contactEmail": "hank@globex.com", "contactPhone": "+15550100", "status": "INTERESTED"}
            ])
            .to_string(),
        )
    })
    .await;
    let repo = connect(&server.config(), &signed_in("jwt-1")).expect("client builds");

    let leads = repo
        .list_tenant_leads(&tenant("acme"))
        .await
        .expect("leads listed");

    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].status, LeadStatus::FollowUp);
    assert_eq!(leads[1].contact_phone.as_deref(), Some("+15550100"));

    let request = server.last_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/leads/tenant/acme");
    assert_eq!(request.authorization.as_deref(), Some("Bearer jwt-1"));
}

#[tokio::test]
async fn configured_token_is_used_until_sign_in() {
    let server = StubServer::start(|_| (200, "[]".to_string())).await;
    let config = ClientConfig {
        token: Some("static".to_string()),
        ..server.config()
    };
    let session = Session::new();
    let repo = connect(&config, &session).expect("client builds");

    repo.list_tenant_leads(&tenant("acme")).await.expect("listed");
    assert_eq!(
        server.last_request().authorization.as_deref(),
        Some("Bearer static")
    );

    session.set(signed_in("personal").current().expect("session"));
    repo.list_tenant_leads(&tenant("acme")).await.expect("listed");
    assert_eq!(
        server.last_request().authorization.as_deref(),
        Some("Bearer personal")
    );
}

#[tokio::test]
async fn unauthorized_response_drops_the_configured_token() {
    let server = StubServer::start(|_| (401, json!({"message": "Token revoked"}).to_string())).await;
    let config = ClientConfig {
        token: Some("static".to_string()),
        ..server.config()
    };
    let repo = connect(&config, &Session::new()).expect("client builds");

    for _ in 0..2 {
        let err = repo
            .list_tenant_leads(&tenant("acme"))
            .await
            .expect_err("unauthorized");
        assert!(matches!(err, RepositoryError::Unauthorized(_)));
    }

    let sent: Vec<Option<String>> = server
        .requests()
        .into_iter()
        .map(|request| request.authorization)
        .collect();
    assert_eq!(sent, vec![Some("Bearer static".to_string()), None]);
}

#[tokio::test]
async fn unauthorized_response_ends_the_session() {
    let server = StubServer::start(|_| (401, json!({"message": "Token expired"}).to_string())).await;
    let session = signed_in("stale");
    let repo = connect(&server.config(), &session).expect("client builds");

    let err = repo
        .get_dashboard_leads(&tenant("acme"))
        .await
        .expect_err("unauthorized");

    assert!(matches!(err, RepositoryError::Unauthorized(ref message) if message == "Token expired"));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn dashboard_sends_tenant_query_and_defaults_missing_stats() {
    let server = StubServer::start(|_| (200, json!({"leads": []}).to_string())).await;
    let repo = connect(&server.config(), &signed_in("jwt")).expect("client builds");

    let dashboard = repo
        .get_dashboard_leads(&tenant("acme"))
        .await
        .expect("dashboard");

    assert!(dashboard.leads.is_empty());
    assert_eq!(
        (
            dashboard.stats.interested,
            dashboard.stats.follow_up,
            dashboard.stats.high_priority
        ),
        (0, 0, 0)
    );
    assert_eq!(
        server.last_request().target,
        "/leads/dashboard/leads?tenantId=acme"
    );
}

#[tokio::test]
async fn bulk_requests_carry_tenant_and_ids() {
    let server = StubServer::start(|request| {
        let count = request.json()["leadIds"].as_array().map_or(0, Vec::len);
        (200, json!({"message": "ok", "count": count}).to_string())
    })
    .await;
    let repo = connect(&server.config(), &signed_in("jwt")).expect("client builds");
    let ids = [lead_id("1"), lead_id("2")];

    let deleted = repo
        .bulk_delete_leads(&tenant("acme"), &ids)
        .await
        .expect("bulk delete");
    assert_eq!(deleted.count, 2);
    let request = server.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/leads/leads/bulk-delete");
    assert_eq!(request.json(), json!({"tenantId": "acme", "leadIds": ["1", "2"]}));

    repo.bulk_update_lead_status(&tenant("acme"), &ids, LeadStatus::NotInterested)
        .await
        .expect("bulk status");
    let request = server.last_request();
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.target, "/leads/leads/bulk-status");
    assert_eq!(
        request.json(),
        json!({"tenantId": "acme", "leadIds": ["1", "2"], "status": "NOT_INTERESTED"})
    );
}

#[tokio::test]
async fn single_lead_mutations_use_their_endpoints() {
    let server = StubServer::start(|request| match request.method.as_str() {
        "DELETE" => (204, String::new()),
        _ => (
            200,
            json!({"id": "7", "companyName": "Umbrella", "contactName": "Alice", "contactEmail": "alice@umbrella.com", "status": "IMMEDIATE_ACTION"})
                .to_string(),
        ),
    })
    .await;
    let repo = connect(&server.config(), &signed_in("jwt")).expect("client builds");

    repo.update_lead_status(&lead_id("7"), LeadStatus::ImmediateAction)
        .await
        .expect("status updated");
    let request = server.last_request();
    assert_eq!((request.method.as_str(), request.target.as_str()), ("PATCH", "/leads/7/status"));
    assert_eq!(request.json(), json!({"status": "IMMEDIATE_ACTION"}));

    let updates = UpdateLead {
        company_name: Some(CompanyName::new("Umbrella Corp").expect("valid")),
        ..UpdateLead::default()
    };
    repo.update_lead(&lead_id("7"), &updates)
        .await
        .expect("lead updated");
    let request = server.last_request();
    assert_eq!((request.method.as_str(), request.target.as_str()), ("PUT", "/leads/7"));
    assert_eq!(request.json(), json!({"companyName": "Umbrella Corp"}));

    repo.delete_lead(&lead_id("7"), &tenant("acme"))
        .await
        .expect("lead deleted");
    let request = server.last_request();
    assert_eq!((request.method.as_str(), request.target.as_str()), ("DELETE", "/leads/7"));
}

#[tokio::test]
async fn missing_lead_is_none_and_server_errors_keep_a_generic_message() {
    let server = StubServer::start(|request| {
        if request.target.starts_with("/leads/lead/") {
            (404, json!({"message": "Lead not found"}).to_string())
        } else {
            (500, "<html>Internal Server Error</html>".to_string())
        }
    })
    .await;
    let repo = connect(&server.config(), &signed_in("jwt")).expect("client builds");

    let missing = repo
        .get_lead_by_id(&lead_id("404"), &tenant("acme"))
        .await
        .expect("not found maps to none");
    assert!(missing.is_none());

    let err = repo
        .list_tenant_leads(&tenant("acme"))
        .await
        .expect_err("server failure");
    assert!(matches!(
        err,
        RepositoryError::ServerError { status: 500, ref message }
            if message == "Request failed with status code 500"
    ));
}

#[tokio::test]
async fn campaign_reads_and_deletes_send_tenant_in_body() {
    let server = StubServer::start(|request| match request.method.as_str() {
        "GET" => (
            200,
            json!({"id": "c-1", "tenantId": "acme", "templateId": "tpl-1", "scheduledAt": null, "createdAt": "2025-03-01T09:00:00Z"})
                .to_string(),
        ),
        _ => (200, json!({"message": "deleted"}).to_string()),
    })
    .await;
    let repo = connect(&server.config(), &signed_in("jwt")).expect("client builds");
    let campaign_id = CampaignId::new("c-1").expect("valid");

    let campaign = repo
        .get_campaign_by_id(&campaign_id, &tenant("acme"))
        .await
        .expect("campaign loaded")
        .expect("campaign exists");
    assert!(campaign.scheduled_at.is_none());
    let request = server.last_request();
    assert_eq!(request.target, "/campaigns/get/c-1");
    assert_eq!(request.json(), json!({"tenantId": "acme"}));

    repo.delete_campaign(&campaign_id, &tenant("acme"))
        .await
        .expect("campaign deleted");
    let request = server.last_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.target, "/campaigns/delete/c-1");
    assert_eq!(request.json(), json!({"tenantId": "acme"}));
}

#[tokio::test]
async fn unreachable_backend_is_a_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);

    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        timeout_ms: 2_000,
        ..ClientConfig::default()
    };
    let repo = connect(&config, &Session::new()).expect("client builds");

    let err = repo
        .list_tenant_leads(&tenant("acme"))
        .await
        .expect_err("nothing listens");

    assert!(matches!(err, RepositoryError::ConnectionError(_)));
}
