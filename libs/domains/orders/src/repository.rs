use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::OrderResult;
use crate::models::{Order, OrderStatus};

/// Repository trait for Order persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: Order) -> OrderResult<Order>;

    async fn get_by_id(&self, id: ObjectId) -> OrderResult<Option<Order>>;

    /// All orders, newest first
    async fn list(&self) -> OrderResult<Vec<Order>>;

    /// One user's orders, newest first
    async fn list_by_user(&self, user: ObjectId) -> OrderResult<Vec<Order>>;

    /// `None` if no order has this id
    async fn update_status(&self, id: ObjectId, status: OrderStatus)
    -> OrderResult<Option<Order>>;

    /// `true` if a document was removed
    async fn delete(&self, id: ObjectId) -> OrderResult<bool>;

    async fn count(&self) -> OrderResult<u64>;

    /// Sum of `totalPrice` over every order; 0 when there are none
    async fn total_sales(&self) -> OrderResult<f64>;
}
