use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{
    BouquetConfiguration, BouquetFilters, BouquetPreview, BouquetRules, BouquetRulesEnvelope,
    BouquetValidation,
};

/// Bouquet service. Generation and validation happen remotely; this
/// client only builds requests.
#[derive(Clone)]
pub struct BouquetService {
    client: ApiClient,
}

impl BouquetService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn preview(&self, filters: &BouquetFilters) -> Result<BouquetPreview, ApiError> {
        self.client
            .get_query("/bouquet/preview", &filters.to_query())
            .await
    }

    pub async fn validate(
        &self,
        configuration: &BouquetConfiguration,
    ) -> Result<BouquetValidation, ApiError> {
        self.client.post("/bouquet/validate", configuration).await
    }

    pub async fn rules(&self) -> Result<BouquetRules, ApiError> {
        let envelope: BouquetRulesEnvelope = self.client.get("/bouquet/rules").await?;
        Ok(envelope.rules)
    }
}
