use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use coordinator::config::CoordinatorConfig;
use coordinator::executor::Executor;
use coordinator::model::VenueKind;
use coordinator::monitor::Monitor;
use coordinator::repo::Repo;
use coordinator::signer::{ExecutorSigner, KeyStore};
use coordinator::venues::module_service::ModuleServiceRegistry;
use coordinator::venues::perp_a::PerpAAdapter;
use coordinator::venues::perp_b::PerpBAdapter;
use coordinator::venues::perp_c::PerpCAdapter;
use coordinator::venues::price_source::AggregatorPriceSource;
use coordinator::venues::spot::SpotAdapter;
use coordinator::venues::{PriceSource, VenueAdapter};
use coordinator::{api, schema};
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = cli::Cli::parse();
    match cli.command {
        cli::Command::Schema => {
            println!("{}", schema::get_schema_json());
            Ok(())
        }
        cli::Command::Serve { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(serve(host, port))
        }
    }
}

async fn serve(host: String, port: u16) -> anyhow::Result<()> {
    let config = CoordinatorConfig::from_env()?;
    let repo = Repo::open(&config.db_path)?;
    let executor_signer = Arc::new(ExecutorSigner::from_private_key(&config.executor_private_key)?);
    let key_store = Arc::new(KeyStore::new(config.key_store_master_secret.clone()));

    let module_registry = ModuleServiceRegistry::new();
    let spot_module = module_registry.get_or_init(
        config.spot.chain_id,
        config.spot.module_address,
        config.spot.vault_address,
        &config.spot.rpc_url,
        executor_signer.clone(),
    )?;
    let perp_a_module = module_registry.get_or_init(
        config.perp_a.chain_id,
        config.perp_a.module_address,
        config.perp_a.vault_address,
        &config.perp_a.rpc_url,
        executor_signer.clone(),
    )?;

    let mut rpc_urls = HashMap::new();
    rpc_urls.insert(VenueKind::Spot, config.spot.rpc_url.clone());
    rpc_urls.insert(VenueKind::PerpA, config.perp_a.rpc_url.clone());
    rpc_urls.insert(VenueKind::PerpC, config.perp_c.rpc_url.clone());
    let prices: Arc<dyn PriceSource> = Arc::new(AggregatorPriceSource::new(rpc_urls, repo.clone()));

    let spot = Arc::new(SpotAdapter::new(
        spot_module.clone(),
        "spot".to_string(),
        config.spot.router_address,
        config.spot.collateral_token,
        config.spot.collateral_decimals,
        repo.clone(),
        prices.clone(),
    ));
    let perp_a = Arc::new(PerpAAdapter::new(
        perp_a_module.clone(),
        config.perp_a.order_vault_address,
        config.perp_a.wrapped_gas_token,
        config.perp_a.collateral_token,
        config.perp_a.execution_fee_wei,
        config.perp_a.protocol_fee_receiver,
        prices.clone(),
    ));
    let perp_b = Arc::new(PerpBAdapter::new(config.perp_b.network, key_store.clone()));
    let perp_c = Arc::new(PerpCAdapter::new(
        config.perp_c.rpc_url.clone(),
        config.perp_c.order_book_address,
        key_store.clone(),
        prices.clone(),
    ));

    let mut adapters: HashMap<VenueKind, Arc<dyn VenueAdapter>> = HashMap::new();
    adapters.insert(VenueKind::Spot, spot);
    adapters.insert(VenueKind::PerpA, perp_a);
    adapters.insert(VenueKind::PerpB, perp_b);
    adapters.insert(VenueKind::PerpC, perp_c.clone());

    let executor = Arc::new(Executor::new(repo.clone(), adapters.clone(), config.fee_policy));
    let monitor = Arc::new(Monitor::new(repo.clone(), adapters, Some(perp_c)));

    let module_services = vec![spot_module, perp_a_module];
    let state = api::state::AppState::new(repo, executor, monitor.clone(), module_services, config.admin_jwt_secret.clone());

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let lock_path = config.monitor_lock_path.clone();

    let monitor_task = {
        let monitor = monitor.clone();
        tokio::spawn(async move { monitor.run_forever(&lock_path, shutdown_rx).await })
    };

    tokio::select! {
        result = api::serve(&host, port, state) => result,
        result = monitor_task => {
            let _ = shutdown_tx.send(true);
            result.context("monitor task panicked")??;
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            let _ = shutdown_tx.send(true);
            Ok(())
        }
    }
}
