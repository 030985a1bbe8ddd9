use serde_json::json;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{PaymentConfirmation, PaymentIntent};

/// Checkout endpoints hosted by the order service. Card details never pass
/// through here; the payment provider collects them against the intent's
/// client secret.
#[derive(Clone)]
pub struct PaymentService {
    client: ApiClient,
}

impl PaymentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_payment_intent(&self, order_id: i64) -> Result<PaymentIntent, ApiError> {
        self.client
            .post_empty(&format!("/orders/{order_id}/create-payment-intent"))
            .await
    }

    pub async fn confirm_payment(
        &self,
        order_id: i64,
        payment_intent_id: &str,
    ) -> Result<PaymentConfirmation, ApiError> {
        self.client
            .post(
                &format!("/orders/{order_id}/confirm-payment"),
                &json!({ "payment_intent_id": payment_intent_id }),
            )
            .await
    }
}
