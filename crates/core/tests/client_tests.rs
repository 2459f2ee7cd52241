// ═══════════════════════════════════════════════════════════════════
// Client Tests — HttpTransactionApi against a mock transaction service
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use mockito::{Matcher, Server};
use serde_json::json;

use crypto_tracker_core::client::http::HttpTransactionApi;
use crypto_tracker_core::client::traits::TransactionApi;
use crypto_tracker_core::errors::CoreError;
use crypto_tracker_core::models::settings::ClientSettings;
use crypto_tracker_core::models::transaction::{NewTransaction, TransactionType};

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn api_for(server: &Server) -> HttpTransactionApi {
    let settings = ClientSettings::with_base_url(format!("{}/api/", server.url()));
    HttpTransactionApi::new(&settings).unwrap()
}

const TRANSACTIONS_BODY: &str = r#"[
    {
        "id": 1,
        "type": "BUY",
        "symbol": "BTC",
        "amount": 0.5,
        "priceJpy": 5000000,
        "transactionDate": "2024-01-15T10:30:00",
        "exchange": "Coincheck",
        "notes": null,
        "sessionId": "abc",
        "createdAt": "2024-01-15T10:31:02.123"
    },
    {
        "id": 2,
        "type": "SEND",
        "symbol": "BTC",
        "amount": 0.1,
        "priceJpy": null,
        "transactionDate": "2024-02-01T08:00"
    }
]"#;

// ═══════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════

mod construction {
    use super::*;

    #[test]
    fn name_is_service_name() {
        let api = HttpTransactionApi::new(&ClientSettings::default()).unwrap();
        assert_eq!(api.name(), "TransactionService");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Endpoints
// ═══════════════════════════════════════════════════════════════════

mod endpoints {
    use super::*;

    #[tokio::test]
    async fn get_transactions_parses_log() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/transactions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(TRANSACTIONS_BODY)
            .create_async()
            .await;

        let txs = api_for(&server).get_transactions().await.unwrap();

        mock.assert_async().await;
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].id, Some(1));
        assert_eq!(txs[0].tx_type, TransactionType::Buy);
        assert_eq!(txs[0].price_jpy, Some(5_000_000.0));
        assert_eq!(txs[0].session_id.as_deref(), Some("abc"));
        assert_eq!(txs[1].tx_type, TransactionType::Send);
        assert_eq!(txs[1].price_jpy, None);
        assert_eq!(
            txs[1].transaction_date,
            NaiveDate::from_ymd_opt(2024, 2, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn add_transaction_posts_camel_case_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/transactions")
            .match_body(Matcher::PartialJson(json!({
                "type": "BUY",
                "symbol": "ETH",
                "amount": 1.5,
                "priceJpy": 300000.0,
                "transactionDate": "2024-03-01T09:15:00",
                "exchange": "bitFlyer"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":42,"type":"BUY","symbol":"ETH","amount":1.5,"priceJpy":300000,
                    "transactionDate":"2024-03-01T09:15:00","exchange":"bitFlyer"}"#,
            )
            .create_async()
            .await;

        let new_tx = NewTransaction::new(
            TransactionType::Buy,
            "eth",
            1.5,
            Some(300_000.0),
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap(),
        )
        .with_exchange("bitFlyer");

        let saved = api_for(&server).add_transaction(&new_tx).await.unwrap();

        mock.assert_async().await;
        assert_eq!(saved.id, Some(42));
        assert_eq!(saved.symbol, "ETH");
    }

    #[tokio::test]
    async fn delete_transaction_uses_id_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/transactions/7")
            .with_status(204)
            .create_async()
            .await;

        api_for(&server).delete_transaction(7).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn calculate_tax_parses_report() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/transactions/calculate-tax")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "totalGainLoss": 150000.0,
                    "totalPurchaseAmount": 1000000.0,
                    "totalSaleAmount": 650000.0,
                    "transactionSummaries": [{
                        "symbol": "BTC",
                        "totalAmount": 0.2,
                        "totalPurchasePrice": 500000.0,
                        "totalSalePrice": 650000.0,
                        "gainLoss": 150000.0
                    }],
                    "calculatedAt": "2024-12-31T23:59:59",
                    "sessionId": "abc"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let report = api_for(&server).calculate_tax().await.unwrap();

        mock.assert_async().await;
        assert_eq!(report.total_gain_loss, 150_000.0);
        assert_eq!(report.transaction_summaries.len(), 1);
        assert_eq!(report.transaction_summaries[0].symbol, "BTC");
        assert!(report.calculated_at.is_some());
    }

    #[tokio::test]
    async fn clear_data_hits_clear_endpoint() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/transactions/clear")
            .with_status(200)
            .create_async()
            .await;

        api_for(&server).clear_data().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn health_check_reports_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/health")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"UP"}"#)
            .create_async()
            .await;

        let health = api_for(&server).health_check().await.unwrap();
        assert!(health.is_up());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Error Mapping
// ═══════════════════════════════════════════════════════════════════

mod errors {
    use super::*;

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/transactions")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let err = api_for(&server).get_transactions().await.unwrap_err();
        match err {
            CoreError::Api {
                service,
                status,
                message,
            } => {
                assert_eq!(service, "TransactionService");
                assert_eq!(status, 500);
                assert_eq!(message, "Fetching transactions failed: Internal Server Error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_error_body_keeps_action_message() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/api/transactions/99")
            .with_status(404)
            .create_async()
            .await;

        let err = api_for(&server).delete_transaction(99).await.unwrap_err();
        match err {
            CoreError::Api { status, message, .. } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Deleting transaction failed");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn long_error_body_is_truncated() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/transactions/calculate-tax")
            .with_status(400)
            .with_body("x".repeat(1000))
            .create_async()
            .await;

        let err = api_for(&server).calculate_tax().await.unwrap_err();
        match err {
            CoreError::Api { message, .. } => {
                assert_eq!(message.len(), "Calculating tax failed: ".len() + 200);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_deserialization_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/transactions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = api_for(&server).get_transactions().await.unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        let settings = ClientSettings {
            base_url: "http://127.0.0.1:1/api".into(),
            timeout_secs: 2,
            ..ClientSettings::default()
        };
        let api = HttpTransactionApi::new(&settings).unwrap();

        let err = api.health_check().await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)), "got {err:?}");
    }
}
