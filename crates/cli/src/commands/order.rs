//! Custom order status commands.

use freshcounter_admin::services::OrderStatusService;
use freshcounter_core::{Actor, normalize_gid};

use super::{admin_client, print_json};

fn service() -> Result<OrderStatusService, super::CommandError> {
    let (client, config) = admin_client()?;
    Ok(OrderStatusService::new(client, config.shop_name().to_string()))
}

pub async fn status(order: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order_id = normalize_gid("Order", order)?;
    let record = service()?.get(&order_id).await?;
    print_json(&record)?;
    Ok(())
}

pub async fn set_status(
    order: &str,
    status: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let order_id = normalize_gid("Order", order)?;
    let actor = Actor::new(first_name, last_name);
    let outcome = service()?
        .update_order_status(&order_id, status, &actor)
        .await?;

    if outcome.changed {
        tracing::info!(order_id = %order_id, status = %status, "Status updated");
    } else {
        tracing::info!(order_id = %order_id, "Status unchanged, nothing written");
    }
    print_json(&outcome)?;
    Ok(())
}

pub async fn steps(order: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order_id = normalize_gid("Order", order)?;
    let steps = service()?.status_steps(&order_id).await?;
    print_json(&steps)?;
    Ok(())
}
