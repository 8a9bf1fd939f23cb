use chrono::{DateTime, Utc};
use domain_products::{Product, ProductResponse};
use domain_users::UserSummary;
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Fulfilment state of an order
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

/// Line item embedded in an order document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ObjectId,
    pub quantity: i32,
}

/// Order document as stored in the `orders` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub order_items: Vec<OrderItem>,
    pub shipping_address1: String,
    #[serde(default)]
    pub shipping_address2: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    #[serde(default)]
    pub status: OrderStatus,
    /// Σ price × quantity, priced when the order was placed
    pub total_price: f64,
    pub user: ObjectId,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date_ordered: DateTime<Utc>,
}

impl Order {
    /// New pending order from a validated body whose references are resolved.
    pub fn new(input: OrderInput, user: ObjectId, items: Vec<OrderItem>, total_price: f64) -> Self {
        Self {
            id: ObjectId::new(),
            order_items: items,
            shipping_address1: input.shipping_address1,
            shipping_address2: input.shipping_address2,
            city: input.city,
            zip: input.zip,
            country: input.country,
            phone: input.phone,
            status: OrderStatus::Pending,
            total_price,
            user,
            date_ordered: DateTime::from_timestamp_millis(Utc::now().timestamp_millis())
                .unwrap_or_default(),
        }
    }

    /// Distinct product ids across the line items.
    pub fn product_ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = Vec::with_capacity(self.order_items.len());
        for item in &self.order_items {
            if !ids.contains(&item.product) {
                ids.push(item.product);
            }
        }
        ids
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemInput {
    #[schema(example = "64b7f0c2a1b2c3d4e5f60719")]
    pub product: String,
    #[validate(range(min = 1, max = 10_000))]
    pub quantity: i32,
}

/// Body of `POST /`. The total is computed server side.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    #[validate(length(min = 1, max = 100))]
    #[validate(nested)]
    pub order_items: Vec<OrderItemInput>,
    #[validate(length(min = 1, max = 200))]
    pub shipping_address1: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub shipping_address2: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 20))]
    pub zip: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(length(min = 1, max = 30))]
    pub phone: String,
    #[schema(example = "64b7f0c2a1b2c3d4e5f6071a")]
    pub user: String,
}

/// Body of `PUT /{id}`; only the status is mutable.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Order owner as rendered: a bare id, or `{id, name}` when populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UserField {
    Id(String),
    /// `null` when the user no longer exists
    Summary(Option<UserSummary>),
}

/// Line item product as rendered: a bare id, or the product document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ProductField {
    Id(String),
    /// `null` when the product was deleted after the order was placed
    Populated(Option<Box<ProductResponse>>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub product: ProductField,
    pub quantity: i32,
}

/// Order as rendered over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[schema(example = "64b7f0c2a1b2c3d4e5f6071b")]
    pub id: String,
    pub order_items: Vec<OrderItemResponse>,
    pub shipping_address1: String,
    pub shipping_address2: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub status: OrderStatus,
    pub total_price: f64,
    pub user: UserField,
    pub date_ordered: DateTime<Utc>,
}

impl OrderResponse {
    fn render(order: Order, user: UserField, order_items: Vec<OrderItemResponse>) -> Self {
        Self {
            id: order.id.to_hex(),
            order_items,
            shipping_address1: order.shipping_address1,
            shipping_address2: order.shipping_address2,
            city: order.city,
            zip: order.zip,
            country: order.country,
            phone: order.phone,
            status: order.status,
            total_price: order.total_price,
            user,
            date_ordered: order.date_ordered,
        }
    }

    fn item_ids(order: &Order) -> Vec<OrderItemResponse> {
        order
            .order_items
            .iter()
            .map(|item| OrderItemResponse {
                product: ProductField::Id(item.product.to_hex()),
                quantity: item.quantity,
            })
            .collect()
    }

    /// Owner as `{id, name}`, line items as ids.
    pub fn with_user(order: Order, user: Option<UserSummary>) -> Self {
        let items = Self::item_ids(&order);
        Self::render(order, UserField::Summary(user), items)
    }

    /// Owner as `{id, name}` and every line item's product embedded.
    pub fn detailed(
        order: Order,
        user: Option<UserSummary>,
        products: &HashMap<ObjectId, Product>,
    ) -> Self {
        let items = order
            .order_items
            .iter()
            .map(|item| OrderItemResponse {
                product: ProductField::Populated(
                    products
                        .get(&item.product)
                        .cloned()
                        .map(|product| Box::new(ProductResponse::from(product))),
                ),
                quantity: item.quantity,
            })
            .collect();
        Self::render(order, UserField::Summary(user), items)
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let items = Self::item_ids(&order);
        let user = UserField::Id(order.user.to_hex());
        Self::render(order, user, items)
    }
}

/// `GET /get/totalsales`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalSales {
    pub total_sales: f64,
}

/// `GET /get/count`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCount {
    pub order_count: u64,
}
