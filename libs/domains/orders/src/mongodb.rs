//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, oid::ObjectId},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::OrderResult;
use crate::models::{Order, OrderStatus};
use crate::repository::OrderRepository;

pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "orders")
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Order>(collection_name),
        }
    }

    /// Indexes backing the per-user listing and the newest-first sort.
    pub async fn init_indexes(&self) -> OrderResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "user": 1, "dateOrdered": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_user_date_ordered".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "dateOrdered": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_date_ordered".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Order indexes created successfully");
        Ok(())
    }

    async fn find_newest_first(&self, filter: Document) -> OrderResult<Vec<Order>> {
        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { "dateOrdered": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

/// `$sum` yields a double for double inputs but an integer for an empty
/// or integral set.
fn sum_as_f64(value: Option<&Bson>) -> f64 {
    match value {
        Some(Bson::Double(v)) => *v,
        Some(Bson::Int32(v)) => f64::from(*v),
        Some(Bson::Int64(v)) => *v as f64,
        _ => 0.0,
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(order_id = %order.id, user_id = %order.user))]
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.collection.insert_one(&order).await?;

        tracing::info!(total_price = order.total_price, "Order created successfully");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> OrderResult<Option<Order>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> OrderResult<Vec<Order>> {
        self.find_newest_first(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn list_by_user(&self, user: ObjectId) -> OrderResult<Vec<Order>> {
        self.find_newest_first(doc! { "user": user }).await
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: ObjectId,
        status: OrderStatus,
    ) -> OrderResult<Option<Order>> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": { "status": status.to_string() } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(order_id = %id, %status, "Order status updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> OrderResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count > 0 {
            tracing::info!(order_id = %id, "Order deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> OrderResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    #[instrument(skip(self))]
    async fn total_sales(&self) -> OrderResult<f64> {
        let pipeline = vec![doc! {
            "$group": { "_id": Bson::Null, "totalSales": { "$sum": "$totalPrice" } }
        }];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        let total = cursor
            .try_next()
            .await?
            .map(|group| sum_as_f64(group.get("totalSales")))
            .unwrap_or(0.0);
        Ok(total)
    }
}
