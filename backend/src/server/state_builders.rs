//! Storage selection and HTTP state wiring.

use std::sync::Arc;

use pagination::PageLimits;
use tracing::{info, warn};

use larder::inbound::http::state::{HttpState, HttpStatePorts, Repositories};
use larder::outbound::memory::MemoryStore;
use larder::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselRecipeRelationRepository, DieselRecipeRepository,
    DieselSubscriptionRepository, DieselUserRepository, run_pending_migrations,
};

use super::config::ServerSettings;

/// Where the repositories keep their data.
#[derive(Clone)]
pub(crate) enum Storage {
    Postgres(DbPool),
    Memory(Arc<MemoryStore>),
}

/// Connect to PostgreSQL when configured, otherwise fall back to memory.
///
/// # Errors
/// Returns [`std::io::Error`] when migrations fail or the pool cannot be
/// built.
pub(crate) async fn connect_storage(settings: &ServerSettings) -> std::io::Result<Storage> {
    let Some(pool_config) = settings.pool_config() else {
        warn!("no database URL configured; data is kept in memory and lost on restart");
        return Ok(Storage::Memory(Arc::new(MemoryStore::new())));
    };
    if settings.run_migrations {
        run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
    }
    let max_size = pool_config.max_size();
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    info!(max_size, "database pool ready");
    Ok(Storage::Postgres(pool))
}

fn postgres_ports(pool: &DbPool) -> HttpStatePorts {
    HttpStatePorts::from_repositories(Repositories {
        catalogue: Arc::new(DieselCatalogueRepository::new(pool.clone())),
        recipes: Arc::new(DieselRecipeRepository::new(pool.clone())),
        relations: Arc::new(DieselRecipeRelationRepository::new(pool.clone())),
        subscriptions: Arc::new(DieselSubscriptionRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
    })
}

fn memory_ports(store: &Arc<MemoryStore>) -> HttpStatePorts {
    HttpStatePorts::from_repositories(Repositories {
        catalogue: store.clone(),
        recipes: store.clone(),
        relations: store.clone(),
        subscriptions: store.clone(),
        users: store.clone(),
    })
}

/// Build handler state over the selected storage.
pub(crate) fn build_http_state(storage: &Storage, page_limits: PageLimits) -> HttpState {
    let ports = match storage {
        Storage::Postgres(pool) => postgres_ports(pool),
        Storage::Memory(store) => memory_ports(store),
    };
    HttpState::new(ports, page_limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder::domain::ports::CatalogueQuery;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn memory_state_serves_the_seeded_catalogue() {
        let store = Arc::new(MemoryStore::new());
        store.add_tag("Lunch", "#49B64E", "lunch");
        let state = build_http_state(&Storage::Memory(store), PageLimits::new(3, 9));

        let tags = state.catalogue.list_tags().await.expect("tags listed");

        assert_eq!(tags.len(), 1);
        assert_eq!(state.page_limits.default_size(), 3);
    }
}
