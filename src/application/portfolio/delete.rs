use crate::domain::portfolio::PortfolioRepository;
use crate::shared::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct DeleteHoldingUseCase {
    repo: Arc<dyn PortfolioRepository>,
}

impl DeleteHoldingUseCase {
    pub fn new(repo: Arc<dyn PortfolioRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id, user_id).await? {
            return Err(AppError::NotFound("Portfolio item not found".to_string()));
        }

        tracing::info!("Portfolio item deleted");
        Ok(())
    }
}
