//! Walks one account through the whole lock lifecycle against the
//! in-process sandbox and prints the resulting lock list.

use chrono::Utc;
use hodl_client::{
    ClientConfig, ClientError, Orchestrator, SandboxLedger, SandboxWallet, Session,
    WalletConnector,
};
use soroban_sdk::Env;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ClientError> {
    let config = ClientConfig::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hodl_client=info,hodl_sandbox=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ledger = SandboxLedger::deploy(Env::default(), &config);
    ledger.set_timestamp(Utc::now().timestamp().max(0) as u64);

    let mut wallet = SandboxWallet::new(ledger.generate_account(), config.network.clone());
    let account = wallet.connect()?;

    let mut hodl = Orchestrator::new(ledger, config);
    let session = Session::establish(&wallet, hodl.config())?;

    hodl.claim_test_coin(&session).await?;
    info!(balance = %hodl.balance(&account).await?, "funded from faucet");

    hodl.approve_spend(&session).await?;
    hodl.create_lock(&session, "10", "1 week", 20).await?;
    hodl.create_lock(&session, "5.5", "10 seconds", 50).await?;

    hodl.force_redeem(&session, 0).await?;
    hodl.ledger().advance_time(10);
    hodl.redeem(&session, 1).await?;
    let claim = hodl.claim(&session, 0).await?;
    info!(?claim.effect, "receipt claimed");

    for view in hodl.lock_views().await? {
        println!(
            "#{} {:>6} of {:>6}  {:<10}  {} -> {}  penalty {:<4}  {}",
            view.index,
            view.amount,
            view.init_amount,
            view.lock_window,
            view.lock_at,
            view.unlock_at,
            view.penalty,
            view.status,
        );
    }
    for (token_id, info) in hodl.receipts().await? {
        println!(
            "receipt {token_id}: {} locked until {} at {}%",
            info.amount, info.unlock_at, info.penalty_ratio
        );
    }
    info!(
        balance = %hodl.balance(&account).await?,
        receipts = hodl.receipt_count(&account).await?,
        "done"
    );
    Ok(())
}
