//! Wire types mirrored from the BizFlow backend
//!
//! Every response shares the [`ApiResponse`] envelope; list endpoints wrap a
//! [`PageResponse`] inside it. Field names follow the backend's camelCase.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Backend identifier type
pub type EntityId = i64;

/// Envelope code the backend uses for success
pub const SUCCESS_CODE: i32 = 1000;

/// Reorder level assumed when a product does not define one
pub const DEFAULT_REORDER_LEVEL: i32 = 10;

/// Response envelope shared by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Business status code (`1000` on success)
    #[serde(default = "default_code")]
    pub code: i32,

    /// Human readable message, localized by the backend
    #[serde(default)]
    pub message: Option<String>,

    /// Payload
    #[serde(default = "Option::default")]
    pub result: Option<T>,

    /// Server time the response was produced
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,

    /// Field level validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

const fn default_code() -> i32 {
    SUCCESS_CODE
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in a success envelope
    pub fn success(result: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: Some("Thành công".to_string()),
            result: Some(result),
            timestamp: None,
            errors: None,
        }
    }

    /// Whether the envelope reports success
    pub const fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Total items across all pages
    #[serde(default)]
    pub total_elements: u64,
    /// Number of pages
    #[serde(default)]
    pub total_pages: u32,
    /// Requested page size
    #[serde(default)]
    pub size: u32,
    /// Zero-based page number
    #[serde(default)]
    pub number: u32,
}

impl<T> PageResponse<T> {
    /// Build a single page holding every item
    pub fn from_items(content: Vec<T>) -> Self {
        let len = content.len();
        Self {
            total_elements: len as u64,
            total_pages: u32::from(len > 0),
            size: u32::try_from(len).unwrap_or(u32::MAX),
            number: 0,
            content,
        }
    }

    /// Whether the page holds no items
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl<T> Default for PageResponse<T> {
    fn default() -> Self {
        Self::from_items(Vec::new())
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(crate::Error::validation(
                        stringify!($name),
                        format!("unknown value '{other}'"),
                    )),
                }
            }
        }
    };
}

wire_enum! {
    /// Role of a staff account
    UserRole {
        /// Platform administrator
        Admin => "ADMIN",
        /// Store owner
        Owner => "OWNER",
        /// Store employee
        Employee => "EMPLOYEE",
    }
}

wire_enum! {
    /// Account status
    UserStatus {
        /// Account can log in
        Active => "ACTIVE",
        /// Account disabled
        Inactive => "INACTIVE",
        /// Account locked after failed logins
        Locked => "LOCKED",
    }
}

wire_enum! {
    /// Sales status of a product
    ProductStatus {
        /// On sale
        Active => "ACTIVE",
        /// Temporarily off sale
        Inactive => "INACTIVE",
        /// No longer carried
        Discontinued => "DISCONTINUED",
    }
}

wire_enum! {
    /// Lifecycle status of an order
    OrderStatus {
        /// Created, awaiting confirmation
        Pending => "PENDING",
        /// Confirmed by the store
        Confirmed => "CONFIRMED",
        /// Being prepared
        Processing => "PROCESSING",
        /// Out for delivery
        Shipping => "SHIPPING",
        /// Delivered to the customer
        Delivered => "DELIVERED",
        /// Fully paid
        Paid => "PAID",
        /// Partially paid
        PaidPartial => "PAID_PARTIAL",
        /// Delivered on credit, nothing paid yet
        Unpaid => "UNPAID",
        /// Cancelled
        Cancelled => "CANCELLED",
    }
}

wire_enum! {
    /// How an order is settled
    PaymentType {
        /// Paid in cash
        Cash => "CASH",
        /// Sold on credit
        Credit => "CREDIT",
        /// Bank transfer
        Transfer => "TRANSFER",
    }
}

/// Staff account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier
    pub id: EntityId,
    /// Login name
    pub username: String,
    /// Display name
    #[serde(default)]
    pub full_name: String,
    /// Role
    pub role: UserRole,
    /// Account status
    pub status: UserStatus,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Store the account belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<EntityId>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier
    pub id: EntityId,
    /// Stock keeping unit
    pub sku: String,
    /// Display name
    pub name: String,
    /// Sell price
    pub price: Decimal,
    /// Purchase price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Decimal>,
    /// Units on hand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    /// Threshold at or below which the product is low on stock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i32>,
    /// Sales status, kept raw so unknown values still render
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Category identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<EntityId>,
    /// Category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// Unit of measure identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<EntityId>,
    /// Unit of measure name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    /// Free text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<EntityId>,
}

impl Product {
    /// Parsed status, `None` when absent or not a known value
    pub fn parsed_status(&self) -> Option<ProductStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Effective reorder level; an absent or zero level falls back to the default
    pub fn effective_reorder_level(&self) -> i32 {
        self.reorder_level
            .filter(|level| *level != 0)
            .unwrap_or(DEFAULT_REORDER_LEVEL)
    }

    /// Whether stock is at or below the reorder level.
    ///
    /// Products without a stock figure are never low.
    pub fn is_low_stock(&self) -> bool {
        self.stock
            .is_some_and(|stock| stock <= self.effective_reorder_level())
    }
}

/// Line item of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Product sold
    pub product_id: EntityId,
    /// Product name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Quantity sold
    pub quantity: i32,
    /// Price per unit
    #[serde(default)]
    pub unit_price: Decimal,
    /// Line total
    #[serde(default)]
    pub total_amount: Decimal,
}

/// Sales order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Identifier
    pub id: EntityId,
    /// Human facing order code
    #[serde(alias = "orderNumber")]
    pub order_code: String,
    /// Order total
    #[serde(default)]
    pub total_amount: Decimal,
    /// Amount already paid
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Outstanding amount
    #[serde(default)]
    pub remaining_amount: Decimal,
    /// Status
    pub status: OrderStatus,
    /// Linked customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<EntityId>,
    /// Linked customer name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Settlement type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    /// Line items
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Customer with purchase statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Identifier
    pub id: EntityId,
    /// Display name
    #[serde(alias = "name")]
    pub full_name: String,
    /// Phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Customer type (retail, wholesale)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Tax code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    /// Status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Outstanding debt
    #[serde(default)]
    pub total_debt: Decimal,
    /// Lifetime purchases
    #[serde(default)]
    pub total_purchase_amount: Decimal,
    /// Number of orders
    #[serde(default)]
    pub total_orders: u32,
}

/// Stock snapshot of a single product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    /// Product identifier
    pub product_id: EntityId,
    /// Product SKU
    #[serde(default)]
    pub sku: String,
    /// Product name
    #[serde(default)]
    pub product_name: String,
    /// Units on hand
    pub stock: i32,
    /// Reorder threshold
    pub reorder_level: i32,
}

impl StockAlert {
    /// Derive an alert from a product, if it is low on stock
    pub fn from_product(product: &Product) -> Option<Self> {
        if !product.is_low_stock() {
            return None;
        }
        Some(Self {
            product_id: product.id,
            sku: product.sku.clone(),
            product_name: product.name.clone(),
            stock: product.stock.unwrap_or_default(),
            reorder_level: product.effective_reorder_level(),
        })
    }
}

/// Outstanding customer debt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtReport {
    /// Identifier of the debt record
    pub id: EntityId,
    /// Debtor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<EntityId>,
    /// Debtor name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Order that created the debt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<EntityId>,
    /// Original amount
    #[serde(default)]
    pub amount: Decimal,
    /// Amount repaid
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Amount still owed
    #[serde(default)]
    pub remaining_amount: Decimal,
    /// Status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
}

/// Inventory level of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    /// Product identifier
    pub product_id: EntityId,
    /// Units on hand
    #[serde(default)]
    pub quantity: i32,
    /// Reorder threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i32>,
    /// Last change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Dashboard aggregates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    /// Staff accounts
    pub total_users: u64,
    /// Catalog size
    pub total_products: u64,
    /// Products at or below their reorder level
    pub low_stock_count: u64,
    /// Orders on record
    pub total_orders: u64,
    /// Sum of order totals, cancelled orders excluded
    pub total_revenue: Decimal,
    /// Sum of unpaid balances
    pub outstanding_amount: Decimal,
    /// Low stock details
    #[serde(default)]
    pub stock_alerts: Vec<StockAlert>,
}

impl ReportData {
    /// Aggregate dashboard figures from the cached collections
    pub fn aggregate(users: &[User], products: &[Product], orders: &[Order]) -> Self {
        let stock_alerts: Vec<StockAlert> =
            products.iter().filter_map(StockAlert::from_product).collect();
        let live_orders = || orders.iter().filter(|o| o.status != OrderStatus::Cancelled);

        Self {
            total_users: users.len() as u64,
            total_products: products.len() as u64,
            low_stock_count: stock_alerts.len() as u64,
            total_orders: orders.len() as u64,
            total_revenue: live_orders().map(|o| o.total_amount).sum(),
            outstanding_amount: live_orders().map(|o| o.remaining_amount).sum(),
            stock_alerts,
        }
    }
}

/// Credentials for `POST /v1/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name
    #[validate(length(min = 3, max = 30, message = "Username phải từ 3-30 ký tự"))]
    pub username: String,
    /// Password
    #[validate(length(min = 6, message = "Mật khẩu phải ít nhất 6 ký tự"))]
    pub password: String,
}

/// Token pair returned by login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Account identifier
    #[serde(default)]
    pub user_id: Option<EntityId>,
    /// Login name
    #[serde(default)]
    pub username: Option<String>,
    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Role
    #[serde(default)]
    pub role: Option<String>,
    /// Access token
    #[serde(default)]
    pub token: Option<String>,
    /// Refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Self-service registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login name
    #[validate(length(min = 3, max = 30, message = "Username phải từ 3-30 ký tự"))]
    pub username: String,
    /// Password
    #[validate(length(min = 6, message = "Mật khẩu phải ít nhất 6 ký tự"))]
    pub password: String,
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Tên đầy đủ không được rỗng"))]
    pub full_name: String,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 15))]
    pub phone: Option<String>,
}

/// Password recovery request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Account email
    #[validate(email(message = "Email không hợp lệ"))]
    pub email: String,
}

/// Refresh token exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token issued at login
    pub refresh_token: String,
}

/// Full product record sent on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    /// Stock keeping unit
    #[validate(length(min = 1, max = 50, message = "SKU không được rỗng"))]
    pub sku: String,
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Tên sản phẩm không được rỗng"))]
    pub name: String,
    /// Sell price
    #[validate(custom(function = "validate_positive_price"))]
    pub price: Decimal,
    /// Purchase price
    pub cost_price: Decimal,
    /// Units on hand
    pub stock: i32,
    /// Reorder threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i32>,
    /// Sales status
    pub status: ProductStatus,
    /// Category
    pub category_id: EntityId,
    /// Unit of measure
    pub unit_id: EntityId,
    /// Owning store
    pub store_id: EntityId,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// Picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

fn validate_positive_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_positive() && !price.is_zero() {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("Giá phải lớn hơn 0".into());
        Err(err)
    }
}

/// Stock receipt
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryImportRequest {
    /// Product received
    pub product_id: EntityId,
    /// Units received
    #[validate(range(min = 1, message = "Số lượng phải >= 1"))]
    pub quantity: i32,
    /// Unit cost of the receipt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<Decimal>,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Debt repayment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DebtPaymentRequest {
    /// Amount repaid
    #[validate(custom(function = "validate_positive_price"))]
    pub amount: Decimal,
    /// Payment method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// AI chat prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Question for the assistant
    pub prompt: String,
}

/// AI chat answer (not wrapped in the envelope)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Assistant answer
    pub answer: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal::prelude::FromPrimitive;

    fn product(stock: Option<i32>, reorder_level: Option<i32>) -> Product {
        Product {
            id: 1,
            sku: "XM-HT-001".to_string(),
            name: "Xi măng Hà Tiên".to_string(),
            price: Decimal::from(95_000),
            cost_price: None,
            stock,
            reorder_level,
            status: Some("ACTIVE".to_string()),
            image_url: None,
            category_id: None,
            category_name: None,
            unit_id: None,
            unit_name: None,
            description: None,
            store_id: None,
        }
    }

    #[rstest]
    #[case(Some(5), Some(10), true)]
    #[case(Some(15), Some(10), false)]
    #[case(Some(10), Some(10), true)]
    #[case(Some(9), None, true)]
    #[case(Some(11), None, false)]
    #[case(None, Some(10), false)]
    #[case(Some(5), Some(0), true)]
    #[case(Some(11), Some(0), false)]
    fn test_low_stock_classification(
        #[case] stock: Option<i32>,
        #[case] reorder_level: Option<i32>,
        #[case] expected: bool,
    ) {
        assert_eq!(product(stock, reorder_level).is_low_stock(), expected);
    }

    #[test]
    fn test_envelope_with_page_deserializes() {
        let json = r#"{
            "code": 1000,
            "message": "Thành công",
            "result": {
                "content": [
                    {"id": 7, "sku": "G-01", "name": "Gạch", "price": 1200.5, "stock": 40, "unitName": "viên"}
                ],
                "totalElements": 1, "totalPages": 1, "size": 100, "number": 0
            },
            "timestamp": "2025-03-01T10:15:30.123"
        }"#;

        let envelope: ApiResponse<PageResponse<Product>> = serde_json::from_str(json).unwrap();

        assert!(envelope.is_success());
        assert!(envelope.timestamp.is_some());
        let page = envelope.result.unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].price, Decimal::from_f64(1200.5).unwrap());
        assert_eq!(page.content[0].unit_name.as_deref(), Some("viên"));
    }

    #[test]
    fn test_order_accepts_order_number_alias() {
        let json = r#"{"id": 3, "orderNumber": "DH-0003", "totalAmount": 500000, "status": "PAID_PARTIAL"}"#;
        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.order_code, "DH-0003");
        assert_eq!(order.status, OrderStatus::PaidPartial);
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_order_status_has_nine_values() {
        assert_eq!(OrderStatus::ALL.len(), 9);
        assert_eq!("paid_partial".parse::<OrderStatus>().unwrap(), OrderStatus::PaidPartial);
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_unknown_product_status_kept_raw() {
        let mut p = product(Some(1), None);
        p.status = Some("ARCHIVED".to_string());
        assert_eq!(p.parsed_status(), None);
        assert_eq!(p.status.as_deref(), Some("ARCHIVED"));
    }

    #[test]
    fn test_product_payload_validation() {
        let mut payload = ProductPayload {
            sku: "XM-01".to_string(),
            name: "Xi măng".to_string(),
            price: Decimal::from(90_000),
            cost_price: Decimal::from(80_000),
            stock: 0,
            reorder_level: Some(10),
            status: ProductStatus::Active,
            category_id: 1,
            unit_id: 1,
            store_id: 1,
            description: None,
            image_url: None,
        };
        assert!(payload.validate().is_ok());

        payload.price = Decimal::ZERO;
        let err = crate::Error::from_validation(&payload.validate().unwrap_err());
        assert_eq!(err.to_string(), "Validation error: price - Giá phải lớn hơn 0");
    }

    #[test]
    fn test_product_payload_serializes_camel_case() {
        let payload = ProductPayload {
            sku: "S".to_string(),
            name: "N".to_string(),
            price: Decimal::from(1),
            cost_price: Decimal::from(1),
            stock: 3,
            reorder_level: None,
            status: ProductStatus::Inactive,
            category_id: 1,
            unit_id: 2,
            store_id: 1,
            description: None,
            image_url: None,
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["costPrice"], serde_json::json!(1.0));
        assert_eq!(value["unitId"], serde_json::json!(2));
        assert_eq!(value["status"], serde_json::json!("INACTIVE"));
        assert!(value.get("reorderLevel").is_none());
    }

    #[test]
    fn test_report_aggregate_excludes_cancelled_revenue() {
        let order = |id, total: i64, remaining: i64, status| Order {
            id,
            order_code: format!("DH-{id}"),
            total_amount: Decimal::from(total),
            paid_amount: Decimal::from(total - remaining),
            remaining_amount: Decimal::from(remaining),
            status,
            customer_id: None,
            customer_name: None,
            payment_type: None,
            notes: None,
            created_at: None,
            items: Vec::new(),
        };
        let orders = vec![
            order(1, 100, 0, OrderStatus::Paid),
            order(2, 50, 20, OrderStatus::PaidPartial),
            order(3, 999, 999, OrderStatus::Cancelled),
        ];
        let products = vec![product(Some(5), Some(10)), product(Some(15), Some(10))];

        let report = ReportData::aggregate(&[], &products, &orders);

        assert_eq!(report.total_orders, 3);
        assert_eq!(report.total_revenue, Decimal::from(150));
        assert_eq!(report.outstanding_amount, Decimal::from(20));
        assert_eq!(report.low_stock_count, 1);
        assert_eq!(report.stock_alerts[0].stock, 5);
    }

    #[test]
    fn test_page_from_items() {
        let page = PageResponse::from_items(vec![1, 2, 3]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
        assert!(PageResponse::<i32>::default().is_empty());
    }
}
