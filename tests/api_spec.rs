use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use tp_calculator::api::create_router;
use tp_calculator::db::Database;
use tp_calculator::estimator::Estimator;
use tp_calculator::models::*;

fn sample_dataset() -> RawDataset {
    RawDataset {
        pages: vec![
            PageRecord {
                id: 1,
                name: "A".to_string(),
                category: "Executive".to_string(),
                section_ids: Some("1,2".to_string()),
                estimated_time: 5.0,
            },
            PageRecord {
                id: 2,
                name: "B".to_string(),
                category: "Sales".to_string(),
                section_ids: None,
                estimated_time: 15.0,
            },
        ],
        etl_tasks: vec![
            EtlTask { section_id: 1, estimated_time: 3.0 },
            EtlTask { section_id: 2, estimated_time: 4.0 },
            EtlTask { section_id: 3, estimated_time: 100.0 },
        ],
        deployment_tasks: vec![DeploymentTask {
            name: "Deploy X".to_string(),
            estimated_time: 2.0,
        }],
        managers: vec![Person {
            name: "Maya".to_string(),
            hourly_rate: 75.0,
        }],
        developers: vec![Person {
            name: "Dev".to_string(),
            hourly_rate: 50.0,
        }],
    }
}

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    db.replace_dataset(&sample_dataset())
        .expect("Failed to store dataset");
    let reference = db.load_reference_data().expect("Failed to load dataset");
    let app = create_router(Estimator::new(reference));
    TestServer::new(app).expect("Failed to create test server")
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();
        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }
}

mod ui {
    use super::*;

    #[tokio::test]
    async fn serves_the_calculator_page() {
        let server = setup();
        let response = server.get("/").await;
        response.assert_status_ok();
        assert!(response.text().contains("Time and Cost Calculator"));
    }

    #[tokio::test]
    async fn ignores_stale_estimate_responses() {
        let server = setup();
        let page = server.get("/").await.text();
        assert!(page.contains("const requestId = ++latestRequest;"));
        assert_eq!(page.matches("if (requestId !== latestRequest) return;").count(), 2);
    }
}

mod reference_tables {
    use super::*;

    #[tokio::test]
    async fn lists_pages_with_share_of_total() {
        let server = setup();
        let response = server.get("/api/v1/pages").await;

        response.assert_status_ok();
        let pages: Vec<PageOverview> = response.json();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].name, "A");
        assert_eq!(pages[0].percent_of_total, 0.25);
        assert_eq!(pages[1].percent_of_total, 0.75);
    }

    #[tokio::test]
    async fn filters_pages_by_category() {
        let server = setup();
        let response = server
            .get("/api/v1/pages")
            .add_query_param("category", "Sales")
            .await;

        response.assert_status_ok();
        let pages: Vec<PageOverview> = response.json();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].name, "B");
        assert_eq!(pages[0].percent_of_total, 0.75);
    }

    #[tokio::test]
    async fn lists_deployment_tasks() {
        let server = setup();
        let tasks: Vec<DeploymentTask> = server.get("/api/v1/deployment-tasks").await.json();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Deploy X");
    }

    #[tokio::test]
    async fn lists_managers_and_developers() {
        let server = setup();

        let managers: Vec<Person> = server.get("/api/v1/managers").await.json();
        assert_eq!(managers[0].name, "Maya");
        assert_eq!(managers[0].hourly_rate, 75.0);

        let developers: Vec<Person> = server.get("/api/v1/developers").await.json();
        assert_eq!(developers[0].name, "Dev");
    }
}

mod estimate {
    use super::*;

    #[tokio::test]
    async fn returns_time_and_cost_for_a_complete_selection() {
        let server = setup();
        let response = server
            .post("/api/v1/estimate")
            .json(&json!({
                "pages": ["A"],
                "deployment_tasks": ["Deploy X"],
                "manager": "Maya",
                "developer": "Dev"
            }))
            .await;

        response.assert_status_ok();
        let outcome: EstimateOutcome = response.json();
        let estimate = outcome.estimate().expect("complete estimate");
        // 5 page + 2 deployment + 7 ETL + 10 modeling
        assert_eq!(estimate.etl_time, 7.0);
        assert_eq!(estimate.total_time, 24.0);
        assert_eq!(estimate.total_cost, 3000.0);
    }

    #[tokio::test]
    async fn tags_the_outcome_status() {
        let server = setup();
        let body: serde_json::Value = server
            .post("/api/v1/estimate")
            .json(&json!({ "pages": ["B"], "manager": "Maya", "developer": "Dev" }))
            .await
            .json();

        assert_eq!(body["status"], "complete");
        assert_eq!(body["estimate"]["total_time"], 25.0);
    }

    #[tokio::test]
    async fn reports_missing_roles() {
        let server = setup();
        let response = server
            .post("/api/v1/estimate")
            .json(&json!({ "pages": ["A"], "manager": "Maya" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "incomplete", "missing": ["developer"] }));
    }

    #[tokio::test]
    async fn accepts_an_empty_body_object() {
        let server = setup();
        let response = server.post("/api/v1/estimate").json(&json!({})).await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "status": "incomplete",
            "missing": ["manager", "developer"]
        }));
    }

    #[tokio::test]
    async fn rejects_an_unknown_page() {
        let server = setup();
        let response = server
            .post("/api/v1/estimate")
            .json(&json!({ "pages": ["Nope"], "manager": "Maya", "developer": "Dev" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Nope"));
    }

    #[tokio::test]
    async fn rejects_an_unknown_developer() {
        let server = setup();
        let response = server
            .post("/api/v1/estimate")
            .json(&json!({ "manager": "Maya", "developer": "Ghost" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("developers"));
    }
}
