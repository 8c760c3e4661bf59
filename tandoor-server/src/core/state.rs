use shared::{AppError, AppResult, ErrorCode};

use crate::core::Config;
use crate::db::Storage;
use crate::live::BroadcastHub;
use crate::orders::OrderManager;
use crate::stats::StatsService;
use crate::subscription::SubscriptionService;

/// Shared application state, one instance of each service.
///
/// Everything inside is `Arc`-backed, so cloning per request is cheap.
///
/// | field        | purpose                               |
/// |--------------|---------------------------------------|
/// | config       | immutable runtime configuration       |
/// | storage      | embedded redb store                   |
/// | hub          | realtime fan-out to connected clients |
/// | subscription | tenant access gate + admin actions    |
/// | orders       | order creation and state machine      |
/// | stats        | daily dashboard aggregates            |
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Storage,
    pub hub: BroadcastHub,
    pub subscription: SubscriptionService,
    pub orders: OrderManager,
    pub stats: StatsService,
}

impl AppState {
    /// Open storage and wire up the services.
    ///
    /// Creates the data directory if it does not exist yet.
    pub fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            AppError::with_message(
                ErrorCode::ConfigError,
                format!("Cannot create data dir {}: {}", config.data_dir, e),
            )
        })?;

        let storage = Storage::open(config.db_path())?;
        let hub = BroadcastHub::new();
        let subscription = SubscriptionService::new(storage.clone(), hub.clone());
        let orders = OrderManager::new(storage.clone(), hub.clone(), subscription.clone());
        let stats = StatsService::new(storage.clone(), config.timezone);

        Ok(Self {
            config: config.clone(),
            storage,
            hub,
            subscription,
            orders,
            stats,
        })
    }
}
