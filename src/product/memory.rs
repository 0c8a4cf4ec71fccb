//! Process-local repository backing the router in tests.

use async_trait::async_trait;
use chrono::Utc;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;

use super::{
    Product, ProductDraft,
    repository::{ProductRepository, RepositoryError},
};

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryProductRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.products.values().rev().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let now = Utc::now();
        let product = Product {
            id: state.last_id,
            name: draft.name.clone(),
            price: draft.price,
            availability: draft.availability,
            created_at: now,
            updated_at: now,
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: i64,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.products.get_mut(&id).map(|product| {
            product.name.clone_from(&draft.name);
            product.price = draft.price;
            product.availability = draft.availability;
            product.updated_at = Utc::now();
            product.clone()
        }))
    }

    async fn toggle_availability(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.products.get_mut(&id).map(|product| {
            product.availability = !product.availability;
            product.updated_at = Utc::now();
            product.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.products.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
