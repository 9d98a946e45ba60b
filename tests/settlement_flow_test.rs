use std::sync::Arc;

use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use payment_risk_engine::config::{ApiSettings, LoggingSettings, ProviderSettings, Settings};
use payment_risk_engine::models::{
    Channel, PayoutDetails, RateSource, SettlementOutcome, TransactionRequest,
};
use payment_risk_engine::risk::FixedNoise;
use payment_risk_engine::services::settlement::SettlementOrchestrator;
use payment_risk_engine::utils::time::now_ms;

fn settings_for(server: &MockServer) -> Settings {
    Settings {
        api: ApiSettings::default(),
        providers: ProviderSettings {
            rate_api_url: format!("{}/v4/latest/USD", server.uri()),
            ip_api_url: format!("{}/ip", server.uri()),
            processor_base_url: server.uri(),
            lookup_timeout_seconds: 2,
            processor_timeout_seconds: 5,
        },
        logging: LoggingSettings::default(),
    }
}

fn orchestrator_for(server: &MockServer) -> SettlementOrchestrator {
    SettlementOrchestrator::new(&settings_for(server))
        .unwrap()
        .with_noise(Arc::new(FixedNoise(0.0)))
}

fn wu_request(mtcn: &str) -> TransactionRequest {
    TransactionRequest {
        amount_usd: dec!(897),
        channel: Channel::WesternUnion,
        identifier: Some(mtcn.to_string()),
        client_ip: None,
        timestamp_ms: now_ms(),
    }
}

async fn mount_wu_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/wu-to-jazzcash"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "pkr_amount": 304774,
            "iban": "PK36SCBL0000001123456702",
            "account_name": "Test Account",
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_settlement_with_unreachable_rate_provider() {
    // No rate or IP mocks are mounted, so both lookups fail and the
    // engine degrades: sentinel IP, fallback PKR rate of 278.5.
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/wu-to-jazzcash"))
        .and(body_partial_json(json!({
            "mtcn": "5554443322",
            "amount_usd": 897.0,
            "tax": {
                "gst": 152.49,
                "income_tax": 44.85,
                "total_tax": 197.34,
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "iban": "PK36SCBL0000001123456702",
            "account_name": "Test Account",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);
    let outcome = orchestrator.settle(wu_request("5554443322")).await.unwrap();

    match outcome {
        SettlementOutcome::Success { payout } => match payout {
            PayoutDetails::BankDeposit {
                iban,
                converted_total,
                ..
            } => {
                assert_eq!(iban, "PK36SCBL0000001123456702");
                // 897 + 197.34 tax = 1094.34 USD at the fallback rate.
                assert_eq!(converted_total, (1094.34_f64 * 278.5).round() as i64);
            }
            other => panic!("expected bank deposit, got {:?}", other),
        },
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_live_rates_override_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/latest/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rates": { "PKR": 280.0, "EUR": 0.9, "JPY": 150.0 }
        })))
        .mount(&server)
        .await;
    mount_wu_success(&server).await;

    let orchestrator = orchestrator_for(&server);
    let outcome = orchestrator.settle(wu_request("5554443322")).await.unwrap();

    match outcome {
        SettlementOutcome::Success {
            payout: PayoutDetails::BankDeposit { converted_total, .. },
        } => {
            assert_eq!(converted_total, (1094.34_f64 * 280.0).round() as i64);
        }
        other => panic!("expected success, got {:?}", other),
    }

    let (rates, source) = orchestrator.rate_service().rate_table().await;
    assert_eq!(source, RateSource::Live);
    assert_eq!(rates[&payment_risk_engine::models::Currency::Pkr], 280.0);
    // Codes outside the supported set are ignored; untouched entries keep
    // their fallback values.
    assert_eq!(rates[&payment_risk_engine::models::Currency::Gbp], 0.79);
}

#[tokio::test]
async fn test_blacklisted_mtcn_blocks_without_processor_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/wu-to-jazzcash"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);
    let outcome = orchestrator.settle(wu_request("1111111111")).await.unwrap();

    assert!(matches!(outcome, SettlementOutcome::Blocked { .. }));
    assert_eq!(orchestrator.failure_count(Channel::WesternUnion).await, 0);
}

#[tokio::test]
async fn test_suspicious_ip_blocks_jazzcash_over_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ip": "192.168.1.1" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/process-payment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);
    // 50 (over limit) + 40 (suspicious IP) = 90 > 70.
    let request = TransactionRequest {
        amount_usd: dec!(6000),
        channel: Channel::JazzCash,
        identifier: None,
        client_ip: None,
        timestamp_ms: now_ms(),
    };
    let outcome = orchestrator.settle(request).await.unwrap();
    assert!(matches!(outcome, SettlementOutcome::Blocked { .. }));
}

#[tokio::test]
async fn test_three_declines_lock_out_western_union() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/wu-to-jazzcash"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Invalid MTCN",
        })))
        .expect(3)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);

    for attempt in 1..=3 {
        let outcome = orchestrator.settle(wu_request("5554443322")).await.unwrap();
        match outcome {
            SettlementOutcome::Declined { reason } => assert_eq!(reason, "Invalid MTCN"),
            other => panic!("expected decline, got {:?}", other),
        }
        assert_eq!(
            orchestrator.failure_count(Channel::WesternUnion).await,
            attempt
        );
    }

    // Fourth attempt is rejected before scoring or any processor call.
    let outcome = orchestrator.settle(wu_request("5554443322")).await.unwrap();
    match outcome {
        SettlementOutcome::Blocked { reason } => {
            assert!(reason.contains("too many attempts"));
        }
        other => panic!("expected lockout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_success_resets_failure_count() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/wu-to-jazzcash"))
        .and(body_partial_json(json!({ "mtcn": "9998887776" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Invalid MTCN",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/wu-to-jazzcash"))
        .and(body_partial_json(json!({ "mtcn": "5554443322" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "iban": "PK36SCBL0000001123456702",
            "account_name": "Test Account",
        })))
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);

    orchestrator.settle(wu_request("9998887776")).await.unwrap();
    orchestrator.settle(wu_request("9998887776")).await.unwrap();
    assert_eq!(orchestrator.failure_count(Channel::WesternUnion).await, 2);

    let outcome = orchestrator.settle(wu_request("5554443322")).await.unwrap();
    assert!(matches!(outcome, SettlementOutcome::Success { .. }));
    assert_eq!(orchestrator.failure_count(Channel::WesternUnion).await, 0);
}

#[tokio::test]
async fn test_blocked_attempt_still_counts_toward_velocity() {
    let server = MockServer::start().await;

    // The follow-up attempt must carry exactly the velocity contribution
    // (+30, fixed noise 0): the blocked attempt moved the timestamp.
    Mock::given(method("POST"))
        .and(path("/api/wu-to-jazzcash"))
        .and(body_partial_json(json!({ "fraudScore": 30.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "iban": "PK36SCBL0000001123456702",
            "account_name": "Test Account",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);

    let blocked = orchestrator.settle(wu_request("1111111111")).await.unwrap();
    assert!(matches!(blocked, SettlementOutcome::Blocked { .. }));

    let outcome = orchestrator.settle(wu_request("5554443322")).await.unwrap();
    assert!(matches!(outcome, SettlementOutcome::Success { .. }));
}

#[tokio::test]
async fn test_unreachable_processor_declines_with_distinct_reason() {
    let server = MockServer::start().await;
    // Point the processor at a refused port; rate and IP lookups still
    // degrade through the mock server.
    let mut settings = settings_for(&server);
    settings.providers.processor_base_url = "http://127.0.0.1:9".to_string();
    let orchestrator = SettlementOrchestrator::new(&settings)
        .unwrap()
        .with_noise(Arc::new(FixedNoise(0.0)));

    let outcome = orchestrator.settle(wu_request("5554443322")).await.unwrap();
    match outcome {
        SettlementOutcome::Declined { reason } => {
            assert!(reason.contains("unreachable"));
        }
        other => panic!("expected decline, got {:?}", other),
    }
    assert_eq!(orchestrator.failure_count(Channel::WesternUnion).await, 1);
}

#[tokio::test]
async fn test_crypto_settles_locally_without_processor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);
    let request = TransactionRequest {
        amount_usd: dec!(897),
        channel: Channel::Crypto,
        identifier: None,
        client_ip: None,
        timestamp_ms: now_ms(),
    };
    let outcome = orchestrator.settle(request).await.unwrap();

    match outcome {
        SettlementOutcome::Success {
            payout: PayoutDetails::CryptoTransfer { wallet, txid, .. },
        } => {
            assert!(wallet.starts_with("bc1q"));
            assert!(txid.starts_with("0x"));
        }
        other => panic!("expected crypto transfer, got {:?}", other),
    }
}
