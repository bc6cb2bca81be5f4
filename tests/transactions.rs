//! End-to-end transaction scenarios over a real listener.

use ledger_service::ledger::Balances;

mod common;
use common::TestService;

#[tokio::test]
async fn pay_debits_balance() {
    let service = TestService::start(1000, 0).await;

    let (status, _, body) = service.post("/pay", "150").await;
    assert_eq!(status, 200);
    assert_eq!(body, "current balance: 850, current bank: 0");
    assert_eq!(service.ledger.snapshot(), Balances { balance: 850, bank: 0 });

    service.stop().await;
}

#[tokio::test]
async fn pay_over_balance_is_rejected() {
    let service = TestService::start(1000, 0).await;

    let (status, _, body) = service.post("/pay", "1500").await;
    assert_eq!(status, 200);
    assert_eq!(body, "low balance");
    assert_eq!(service.ledger.snapshot(), Balances { balance: 1000, bank: 0 });

    service.stop().await;
}

#[tokio::test]
async fn save_moves_funds_to_bank() {
    let service = TestService::start(1000, 0).await;

    let (status, _, body) = service.post("/save", "200").await;
    assert_eq!(status, 200);
    assert_eq!(body, "current balance: 800, current bank: 200");

    let (_, _, body) = service.post("/save", "900").await;
    assert_eq!(body, "low balance for bank transfer");
    assert_eq!(service.ledger.snapshot(), Balances { balance: 800, bank: 200 });

    service.stop().await;
}

#[tokio::test]
async fn invalid_amounts_leave_ledger_untouched() {
    let service = TestService::start(1000, 0).await;

    for (path, input) in [
        ("/pay", "not-a-number"),
        ("/pay", ""),
        ("/pay", "-100"),
        ("/save", "12.5"),
        ("/save", "-1"),
    ] {
        let (status, _, body) = service.post(path, input).await;
        assert_eq!(status, 200, "{path} {input:?}");
        assert_eq!(body, "invalid amount", "{path} {input:?}");
    }
    assert_eq!(service.ledger.snapshot(), Balances { balance: 1000, bank: 0 });

    service.stop().await;
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let service = TestService::start(1000, 0).await;

    let (_, id, _) = service.post_with_id("/pay", "1", Some("abc-123")).await;
    assert_eq!(id, "abc-123");

    let (_, first, _) = service.post("/pay", "1").await;
    let (_, second, _) = service.post_with_id("/pay", "1", Some("   ")).await;
    assert!(first.len() >= 22);
    assert!(second.len() >= 22);
    assert_ne!(first, second);

    service.stop().await;
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let service = TestService::start(1000, 0).await;

    let (status, _, _) = service.post("/withdraw", "10").await;
    assert_eq!(status, 404);
    assert_eq!(service.ledger.snapshot(), Balances { balance: 1000, bank: 0 });

    service.stop().await;
}
