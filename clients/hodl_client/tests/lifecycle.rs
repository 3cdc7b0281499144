use std::cell::RefCell;

use assert_matches::assert_matches;
use hodl_client::{
    ClientConfig, ClientError, LockStatus, Notice, Notifier, Orchestrator, PreconditionError,
    SandboxLedger, SandboxWallet, Session, TokenReader, TxEffect, WalletConnector,
};
use soroban_sdk::{Address, Env};

const COIN: i128 = 10_000_000;

#[derive(Default)]
struct Recorder(RefCell<Vec<Notice>>);

impl Notifier for Recorder {
    fn notify(&self, notice: Notice) {
        self.0.borrow_mut().push(notice);
    }
}

struct Harness {
    hodl: Orchestrator<SandboxLedger, Recorder>,
    wallet: SandboxWallet,
    account: Address,
}

fn harness() -> Harness {
    let config = ClientConfig::default();
    let ledger = SandboxLedger::deploy(Env::default(), &config);
    ledger.set_timestamp(1_700_000_000);
    let mut wallet = SandboxWallet::new(ledger.generate_account(), config.network.clone());
    let account = wallet.connect().unwrap();
    Harness {
        hodl: Orchestrator::with_notifier(ledger, config, Recorder::default()),
        wallet,
        account,
    }
}

/// Faucet plus approval, the state every lock test starts from.
async fn funded() -> Harness {
    let mut h = harness();
    let session = Session::establish(&h.wallet, h.hodl.config()).unwrap();
    h.hodl.claim_test_coin(&session).await.unwrap();
    h.hodl.approve_spend(&session).await.unwrap();
    h
}

#[tokio::test]
async fn faucet_funds_the_account() {
    let mut h = harness();
    let session = Session::establish(&h.wallet, h.hodl.config()).unwrap();

    let receipt = h.hodl.claim_test_coin(&session).await.unwrap();

    assert_eq!(receipt.effect, TxEffect::Funded { amount: 100 * COIN });
    assert_eq!(h.hodl.balance(&h.account).await.unwrap(), "100.0");
}

#[tokio::test]
async fn lock_without_approval_is_blocked_locally() {
    let mut h = harness();
    let session = Session::establish(&h.wallet, h.hodl.config()).unwrap();
    h.hodl.claim_test_coin(&session).await.unwrap();

    let result = h.hodl.create_lock(&session, "10", "1 week", 20).await;

    assert_eq!(
        result,
        Err(PreconditionError::InsufficientAllowance {
            required: 10 * COIN,
            granted: 0
        }
        .into())
    );
    assert_eq!(h.hodl.ledger().pending(), 0);
    assert!(h.hodl.locks().is_empty());
}

#[tokio::test]
async fn early_exit_then_claim() {
    let mut h = funded().await;
    let session = Session::establish(&h.wallet, h.hodl.config()).unwrap();

    let created = h.hodl.create_lock(&session, "10", "1 week", 20).await.unwrap();
    assert_eq!(created.effect, TxEffect::Locked { index: 0 });
    assert_eq!(h.hodl.locks().len(), 1);
    assert_eq!(h.hodl.locks()[0].lock.status, LockStatus::Active);
    assert_eq!(h.hodl.balance(&h.account).await.unwrap(), "90.0");

    // Too early for a plain redeem; the vault's reason is passed through.
    let early = h.hodl.redeem(&session, 0).await.unwrap_err();
    assert_eq!(early.code(), Some(206));
    assert_eq!(
        early.to_string(),
        "Transaction rejected: Can't redeem now: lock window has not elapsed"
    );
    assert_eq!(h.hodl.locks()[0].lock.status, LockStatus::Active);

    h.hodl.force_redeem(&session, 0).await.unwrap();
    let lock = &h.hodl.locks()[0].lock;
    assert_eq!(lock.status, LockStatus::ForceRedeemed);
    assert_eq!(lock.amount, 8 * COIN);
    assert_eq!(lock.amount_record, 10 * COIN);
    assert_eq!(h.hodl.balance(&h.account).await.unwrap(), "98.0");
    let receiver = h.hodl.ledger().deployment().penalty_receiver.clone();
    assert_eq!(h.hodl.ledger().balance_of(&receiver).await, Ok(2 * COIN));

    let claimed = h.hodl.claim(&session, 0).await.unwrap();
    assert_eq!(claimed.effect, TxEffect::Claimed { index: 0, token_id: 0 });
    assert_eq!(h.hodl.locks()[0].lock.status, LockStatus::Claimed);
    assert_eq!(h.hodl.locks()[0].lock.receipt_id, Some(0));
    assert_eq!(h.hodl.receipt_count(&h.account).await, Ok(1));

    let receipts = h.hodl.receipts().await.unwrap();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].0, 0);
    assert_eq!(receipts[0].1.amount, 10 * COIN);
    assert_eq!(receipts[0].1.penalty_ratio, 20);

    let again = h.hodl.claim(&session, 0).await.unwrap_err();
    assert_eq!(again.code(), Some(207));
}

#[tokio::test]
async fn redeem_after_window_returns_everything() {
    let mut h = funded().await;
    let session = Session::establish(&h.wallet, h.hodl.config()).unwrap();

    h.hodl.create_lock(&session, "5.5", "10 seconds", 50).await.unwrap();
    assert_eq!(h.hodl.balance(&h.account).await.unwrap(), "94.5");

    h.hodl.ledger().advance_time(10);
    let receipt = h.hodl.redeem(&session, 0).await.unwrap();

    assert_matches!(
        receipt.effect,
        TxEffect::Redeemed { index: 0, ref lock } if lock.status == LockStatus::Redeemed
    );
    assert_eq!(h.hodl.balance(&h.account).await.unwrap(), "100.0");

    let views = h.hodl.lock_views().await.unwrap();
    assert_eq!(views[0].amount, "5.5");
    assert_eq!(views[0].lock_window, "10 seconds");
    assert_eq!(views[0].penalty, "50%");
    assert_eq!(views[0].status, "Redeemed");
    assert_eq!(views[0].lock_at, "2023-11-14T22:13:20Z");
    assert_eq!(views[0].unlock_at, "2023-11-14T22:13:30Z");
}

#[tokio::test]
async fn locks_list_in_creation_order() {
    let mut h = funded().await;
    let session = Session::establish(&h.wallet, h.hodl.config()).unwrap();

    for (amount, window) in [("1", "1 day"), ("2", "1 minute"), ("3", "1 month")] {
        h.hodl.create_lock(&session, amount, window, 10).await.unwrap();
    }

    let amounts: Vec<(u32, i128)> = h
        .hodl
        .locks()
        .iter()
        .map(|entry| (entry.index, entry.lock.amount))
        .collect();
    assert_eq!(amounts, vec![(0, COIN), (1, 2 * COIN), (2, 3 * COIN)]);
}

#[tokio::test]
async fn vault_lock_limit_surfaces_as_rejection() {
    let mut h = funded().await;
    let admin = h.hodl.ledger().deployment().admin.clone();
    h.hodl.ledger().vault().set_max_locks_per_user(&admin, &1);
    let session = Session::establish(&h.wallet, h.hodl.config()).unwrap();

    h.hodl.create_lock(&session, "1", "1 day", 0).await.unwrap();
    let err = h.hodl.create_lock(&session, "1", "1 day", 0).await.unwrap_err();

    assert_eq!(err.code(), Some(203));
    assert_eq!(h.hodl.locks().len(), 1);
}

#[tokio::test]
async fn lock_beyond_balance_is_blocked_locally() {
    let mut h = funded().await;
    let session = Session::establish(&h.wallet, h.hodl.config()).unwrap();

    let err = h
        .hodl
        .create_lock(&session, "1000", "1 day", 0)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ClientError::Precondition(PreconditionError::InsufficientBalance {
            required: 1000 * COIN,
            available: 100 * COIN,
        })
    );
    assert_eq!(
        err.to_string(),
        "Balance 1000000000 is below the lock amount 10000000000"
    );
    assert_eq!(h.hodl.ledger().pending(), 0);
    assert!(h.hodl.locks().is_empty());
    assert_eq!(h.hodl.balance(&h.account).await.unwrap(), "100.0");
}

#[tokio::test]
async fn notices_track_submit_and_confirm() {
    let mut h = funded().await;
    let session = Session::establish(&h.wallet, h.hodl.config()).unwrap();
    h.hodl.create_lock(&session, "1", "1 day", 0).await.unwrap();
    let _ = h.hodl.redeem(&session, 0).await;

    let notices = h.hodl.notifier().0.borrow();
    let actions: Vec<String> = notices.iter().map(|n| n.to_string()).collect();
    assert_eq!(
        actions,
        vec![
            "Transaction created: 0x0000000000000001",
            "Transaction confirmed: 0x0000000000000001",
            "Transaction created: 0x0000000000000002",
            "Transaction confirmed: 0x0000000000000002",
            "Transaction created: 0x0000000000000003",
            "Transaction confirmed: 0x0000000000000003",
            "Transaction created: 0x0000000000000004",
            "redeem failed: Transaction rejected: Can't redeem now: lock window has not elapsed",
        ]
    );
}

#[tokio::test]
async fn disconnected_wallet_cannot_open_a_session() {
    let mut h = harness();
    h.wallet.disconnect();
    assert!(!h.wallet.is_active());
    assert_matches!(
        Session::establish(&h.wallet, h.hodl.config()),
        Err(ClientError::Environment(_))
    );
}
