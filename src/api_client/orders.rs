use super::{ApiError, AuthenticatedClient, Operation};
use crate::domain::{
    NewOrder, NewOrderLine, Order, OrderId, OrderLine, OrderLineId, OrderLineUpdate, OrderUpdate,
};

const ORDERS: &str = "orders";
const ORDER_LINES: &str = "order_lines";

impl AuthenticatedClient {
    #[tracing::instrument(name = "Creating order", skip(self))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        self.create(Operation::CreateOrder, ORDERS, order).await
    }

    #[tracing::instrument(name = "Fetching order", skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.fetch(Operation::GetOrder, ORDERS, id).await
    }

    #[tracing::instrument(name = "Updating order", skip(self, update), fields(order_id = %id))]
    pub async fn update_order(&self, id: &OrderId, update: &OrderUpdate) -> Result<Order, ApiError> {
        self.update(Operation::UpdateOrder, ORDERS, id, update).await
    }

    #[tracing::instrument(name = "Deleting order", skip(self), fields(order_id = %id))]
    pub async fn delete_order(&self, id: &OrderId) -> Result<(), ApiError> {
        self.delete(Operation::DeleteOrder, ORDERS, id).await
    }

    /// Lines are created in bulk: the service takes an array and answers
    /// with the created lines in the same order.
    #[tracing::instrument(name = "Creating order lines", skip(self), fields(count = lines.len()))]
    pub async fn create_order_lines(
        &self,
        lines: &[NewOrderLine],
    ) -> Result<Vec<OrderLine>, ApiError> {
        self.create(Operation::CreateOrderLines, ORDER_LINES, lines)
            .await
    }

    #[tracing::instrument(name = "Fetching order line", skip(self), fields(order_line_id = %id))]
    pub async fn get_order_line(&self, id: &OrderLineId) -> Result<OrderLine, ApiError> {
        self.fetch(Operation::GetOrderLine, ORDER_LINES, id).await
    }

    #[tracing::instrument(
        name = "Updating order line",
        skip(self, update),
        fields(order_line_id = %id)
    )]
    pub async fn update_order_line(
        &self,
        id: &OrderLineId,
        update: &OrderLineUpdate,
    ) -> Result<OrderLine, ApiError> {
        self.update(Operation::UpdateOrderLine, ORDER_LINES, id, update)
            .await
    }

    #[tracing::instrument(name = "Deleting order line", skip(self), fields(order_line_id = %id))]
    pub async fn delete_order_line(&self, id: &OrderLineId) -> Result<(), ApiError> {
        self.delete(Operation::DeleteOrderLine, ORDER_LINES, id)
            .await
    }
}
