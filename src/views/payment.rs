use tracing::info;

use crate::error::{FormError, ViewError};
use crate::models::{Order, OrderStatus, PaymentConfirmation, PaymentIntent};
use crate::services::{OrderService, PaymentService};

pub fn ensure_payable(order: &Order) -> Result<(), FormError> {
    if order.status != OrderStatus::PendingPayment {
        return Err(FormError::new("This order is not pending payment"));
    }
    Ok(())
}

/// Loads the order and opens a payment intent for it. Card details are
/// collected by the payment provider against `client_secret`.
pub async fn start_checkout(
    orders: &OrderService,
    payments: &PaymentService,
    order_id: i64,
) -> Result<(Order, PaymentIntent), ViewError> {
    let order = orders.order(order_id).await?;
    ensure_payable(&order)?;
    let intent = payments.create_payment_intent(order_id).await?;
    info!("Created payment intent {} for order {}", intent.payment_intent_id, order_id);
    Ok((order, intent))
}

pub async fn complete_checkout(
    payments: &PaymentService,
    order_id: i64,
    payment_intent_id: &str,
) -> Result<PaymentConfirmation, ViewError> {
    Ok(payments.confirm_payment(order_id, payment_intent_id).await?)
}
