//! crates/meal_planner_core/src/resolver.rs
//!
//! Composes recipe providers into a single fail-soft `RecipeSource`.
//!
//! Providers are tried in order; each either answers with a recipe or misses, and a
//! miss (including a network failure) moves on to the next provider. Answers from
//! cacheable providers are kept in a bounded LRU cache whose entries expire after a
//! fixed time-to-live.

use crate::domain::{Recipe, RecipeId};
use crate::ports::{PortError, RecipeProvider, RecipeSource};
use async_trait::async_trait;
use futures::future::join_all;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(n) => n,
    None => unreachable!(),
};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

struct CachedRecipe {
    recipe: Arc<Recipe>,
    expires_at: Instant,
}

impl CachedRecipe {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

pub struct RecipeResolver {
    providers: Vec<Arc<dyn RecipeProvider>>,
    cache: RwLock<LruCache<RecipeId, CachedRecipe>>,
    ttl: Duration,
}

impl RecipeResolver {
    /// Creates a resolver trying `providers` in the given order, with the default cache bounds.
    pub fn new(providers: Vec<Arc<dyn RecipeProvider>>) -> Self {
        Self::with_cache(providers, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }

    pub fn with_cache(
        providers: Vec<Arc<dyn RecipeProvider>>,
        capacity: NonZeroUsize,
        ttl: Duration,
    ) -> Self {
        Self {
            providers,
            cache: RwLock::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn cached(&self, id: &RecipeId) -> Option<Arc<Recipe>> {
        // LruCache::get updates recency, so even reads take the write lock.
        let mut cache = self.cache.write().await;
        let fresh = cache
            .get(id)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.recipe.clone());
        if fresh.is_none() {
            cache.pop(id);
        }
        fresh
    }
}

#[async_trait]
impl RecipeSource for RecipeResolver {
    async fn get_recipe_by_id(&self, id: &RecipeId) -> Option<Arc<Recipe>> {
        if let Some(hit) = self.cached(id).await {
            return Some(hit);
        }

        for provider in self.providers.iter().filter(|p| p.handles(id)) {
            match provider.fetch_recipe(id).await {
                Ok(recipe) => {
                    let recipe = Arc::new(recipe);
                    if provider.cacheable() {
                        let entry = CachedRecipe {
                            recipe: recipe.clone(),
                            expires_at: Instant::now() + self.ttl,
                        };
                        self.cache.write().await.push(id.clone(), entry);
                    }
                    return Some(recipe);
                }
                Err(PortError::NotFound(_)) => {
                    debug!(provider = provider.name(), recipe_id = %id, "Recipe not held by provider");
                }
                Err(e) => {
                    warn!(provider = provider.name(), recipe_id = %id, "Recipe lookup failed: {}", e);
                }
            }
        }

        debug!(recipe_id = %id, "Recipe could not be resolved by any provider");
        None
    }
}

/// Resolves every id concurrently. Ids that miss are simply absent from the result.
pub async fn resolve_all<'a, I>(source: &dyn RecipeSource, ids: I) -> HashMap<RecipeId, Arc<Recipe>>
where
    I: IntoIterator<Item = &'a RecipeId>,
{
    let lookups = ids.into_iter().map(|id| async move {
        source
            .get_recipe_by_id(id)
            .await
            .map(|recipe| (id.clone(), recipe))
    });

    join_all(lookups).await.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{chain, recipe, StaticProvider};

    #[tokio::test]
    async fn falls_back_to_the_next_provider_on_failure() {
        let remote = Arc::new(StaticProvider::failing("remote", true));
        let local = Arc::new(StaticProvider::new(
            "local",
            vec![recipe("api-7", "Cached Remote Soup", &[])],
        ));
        let resolver = RecipeResolver::new(chain(&[remote.clone(), local.clone()]));

        let found = resolver.get_recipe_by_id(&RecipeId::from("api-7")).await;

        assert_eq!(found.map(|r| r.title.clone()), Some("Cached Remote Soup".to_string()));
        assert_eq!(remote.calls(), 1);
        assert_eq!(local.calls(), 1);
    }

    #[tokio::test]
    async fn providers_only_see_ids_they_handle() {
        let remote = Arc::new(StaticProvider::failing("remote", true));
        let local = Arc::new(StaticProvider::new("local", vec![recipe("recipe-001", "Salad", &[])]));
        let resolver = RecipeResolver::new(chain(&[remote.clone(), local]));

        assert!(resolver.get_recipe_by_id(&RecipeId::from("recipe-001")).await.is_some());
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn successful_lookups_are_memoized() {
        let local = Arc::new(StaticProvider::new("local", vec![recipe("recipe-001", "Salad", &[])]));
        let resolver = RecipeResolver::new(chain(&[local.clone()]));
        let id = RecipeId::from("recipe-001");

        resolver.get_recipe_by_id(&id).await;
        resolver.get_recipe_by_id(&id).await;

        assert_eq!(local.calls(), 1);
        assert_eq!(resolver.cached_count().await, 1);
    }

    #[tokio::test]
    async fn cache_is_bounded_by_capacity() {
        let remote = Arc::new(StaticProvider::new(
            "remote",
            vec![recipe("api-1", "One", &[]), recipe("api-2", "Two", &[]), recipe("api-3", "Three", &[])],
        ));
        let capacity = NonZeroUsize::new(2).unwrap();
        let resolver = RecipeResolver::with_cache(chain(&[remote.clone()]), capacity, DEFAULT_CACHE_TTL);

        for id in ["api-1", "api-2", "api-3"] {
            assert!(resolver.get_recipe_by_id(&RecipeId::from(id)).await.is_some());
        }
        assert_eq!(resolver.cached_count().await, 2);

        // The least recently used entry was evicted and is fetched again.
        resolver.get_recipe_by_id(&RecipeId::from("api-1")).await;
        assert_eq!(remote.calls(), 4);
        assert_eq!(resolver.cached_count().await, 2);
    }

    #[tokio::test]
    async fn expired_entries_are_fetched_again() {
        let remote = Arc::new(StaticProvider::new("remote", vec![recipe("api-5", "Five", &[])]));
        let resolver =
            RecipeResolver::with_cache(chain(&[remote.clone()]), DEFAULT_CACHE_CAPACITY, Duration::ZERO);
        let id = RecipeId::from("api-5");

        resolver.get_recipe_by_id(&id).await;
        resolver.get_recipe_by_id(&id).await;

        assert_eq!(remote.calls(), 2);
    }

    #[tokio::test]
    async fn in_memory_providers_are_not_cached() {
        let local = Arc::new(StaticProvider::in_memory("local", vec![recipe("recipe-001", "Salad", &[])]));
        let resolver = RecipeResolver::new(chain(&[local.clone()]));
        let id = RecipeId::from("recipe-001");

        resolver.get_recipe_by_id(&id).await;
        resolver.get_recipe_by_id(&id).await;

        assert_eq!(local.calls(), 2);
        assert_eq!(resolver.cached_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_ids_resolve_to_none() {
        let local = Arc::new(StaticProvider::new("local", vec![]));
        let resolver = RecipeResolver::new(chain(&[local]));

        assert!(resolver.get_recipe_by_id(&RecipeId::from("nope")).await.is_none());
        assert_eq!(resolver.cached_count().await, 0);
    }

    #[tokio::test]
    async fn resolve_all_drops_misses() {
        let local = Arc::new(StaticProvider::new("local", vec![recipe("a", "A", &[])]));
        let resolver = RecipeResolver::new(chain(&[local]));
        let ids = [RecipeId::from("a"), RecipeId::from("b")];

        let resolved = resolve_all(&resolver, ids.iter()).await;

        assert_eq!(resolved.len(), 1);
        assert!(resolved.contains_key(&RecipeId::from("a")));
    }
}
