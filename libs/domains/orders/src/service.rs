//! Order Service - placing orders and assembling populated views

use domain_products::{Product, ProductRepository};
use domain_users::{UserRepository, UserSummary};
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderInput, OrderItem, OrderStatus};
use crate::repository::OrderRepository;

/// An order with its owner's `{id, name}`, if the user still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithUser {
    pub order: Order,
    pub user: Option<UserSummary>,
}

/// An order with its owner and the products its line items reference.
/// Deleted products are absent from `products`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub user: Option<UserSummary>,
    pub products: HashMap<ObjectId, Product>,
}

/// Order service; reads products and users through their repositories.
pub struct OrderService<O: OrderRepository, P: ProductRepository, U: UserRepository> {
    repository: Arc<O>,
    products: Arc<P>,
    users: Arc<U>,
}

impl<O, P, U> OrderService<O, P, U>
where
    O: OrderRepository,
    P: ProductRepository,
    U: UserRepository,
{
    pub fn new(repository: O, products: Arc<P>, users: Arc<U>) -> Self {
        Self {
            repository: Arc::new(repository),
            products,
            users,
        }
    }

    async fn user_summary(&self, id: ObjectId) -> OrderResult<Option<UserSummary>> {
        Ok(self.users.get_by_id(id).await?.map(UserSummary::from))
    }

    /// Fetch every product in `ids` not already in `cache`.
    async fn load_products(
        &self,
        ids: Vec<ObjectId>,
        cache: &mut HashMap<ObjectId, Product>,
    ) -> OrderResult<()> {
        for id in ids {
            if cache.contains_key(&id) {
                continue;
            }
            if let Some(product) = self.products.get_by_id(id).await? {
                cache.insert(id, product);
            }
        }
        Ok(())
    }

    /// Place an order. Every line item must name a stored product and the
    /// owner a stored user; the total is priced from the products as they
    /// are now.
    #[instrument(skip(self, input), fields(items = input.order_items.len()))]
    pub async fn create_order(&self, input: OrderInput) -> OrderResult<Order> {
        let user = ObjectId::parse_str(input.user.trim()).map_err(|_| OrderError::InvalidUser)?;
        if self.users.get_by_id(user).await?.is_none() {
            tracing::info!(user_id = %user, "Rejected order for unknown user");
            return Err(OrderError::InvalidUser);
        }

        let mut items = Vec::with_capacity(input.order_items.len());
        let mut total_price = 0.0;
        for item in &input.order_items {
            let product_id = ObjectId::parse_str(item.product.trim())
                .map_err(|_| OrderError::InvalidProduct)?;
            let product = self
                .products
                .get_by_id(product_id)
                .await?
                .ok_or(OrderError::InvalidProduct)?;

            total_price += product.price * f64::from(item.quantity);
            items.push(OrderItem {
                product: product_id,
                quantity: item.quantity,
            });
        }

        self.repository
            .create(Order::new(input, user, items, total_price))
            .await
    }

    /// Every order, newest first, with owners populated.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> OrderResult<Vec<OrderWithUser>> {
        let orders = self.repository.list().await?;

        let mut users: HashMap<ObjectId, Option<UserSummary>> = HashMap::new();
        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let user = match users.get(&order.user) {
                Some(cached) => cached.clone(),
                None => {
                    let summary = self.user_summary(order.user).await?;
                    users.insert(order.user, summary.clone());
                    summary
                }
            };
            result.push(OrderWithUser { order, user });
        }
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: ObjectId) -> OrderResult<OrderDetails> {
        let order = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        let user = self.user_summary(order.user).await?;
        let mut products = HashMap::new();
        self.load_products(order.product_ids(), &mut products).await?;

        Ok(OrderDetails {
            order,
            user,
            products,
        })
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: ObjectId, status: OrderStatus) -> OrderResult<Order> {
        self.repository
            .update_status(id, status)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: ObjectId) -> OrderResult<()> {
        if !self.repository.delete(id).await? {
            return Err(OrderError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn total_sales(&self) -> OrderResult<f64> {
        self.repository.total_sales().await
    }

    #[instrument(skip(self))]
    pub async fn count_orders(&self) -> OrderResult<u64> {
        self.repository.count().await
    }

    /// One user's orders, newest first, with products populated. An unknown
    /// user simply has no orders.
    #[instrument(skip(self))]
    pub async fn user_orders(&self, user: ObjectId) -> OrderResult<Vec<OrderDetails>> {
        let orders = self.repository.list_by_user(user).await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let summary = self.user_summary(user).await?;
        let mut products = HashMap::new();
        for order in &orders {
            self.load_products(order.product_ids(), &mut products).await?;
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let referenced = order
                    .product_ids()
                    .into_iter()
                    .filter_map(|id| products.get(&id).map(|p| (id, p.clone())))
                    .collect();
                OrderDetails {
                    order,
                    user: summary.clone(),
                    products: referenced,
                }
            })
            .collect())
    }
}

impl<O, P, U> Clone for OrderService<O, P, U>
where
    O: OrderRepository,
    P: ProductRepository,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            products: Arc::clone(&self.products),
            users: Arc::clone(&self.users),
        }
    }
}
