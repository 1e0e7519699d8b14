use crate::domain::portfolio::{Holding, PortfolioRepository};
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct ListHoldingsUseCase {
    repo: Arc<dyn PortfolioRepository>,
}

impl ListHoldingsUseCase {
    pub fn new(repo: Arc<dyn PortfolioRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Holding>, AppError> {
        Ok(self.repo.list_for_user(user_id).await?)
    }
}
