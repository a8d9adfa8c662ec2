//! Product catalog screen
//!
//! Client-side search and status filters over the cached `products-list`,
//! one shared create/edit form, two-step deletion and CSV export of the
//! filtered rows.

use crate::app::{App, keys};
use crate::error::{ExportError, ViewError, ViewResult};
use crate::export;
use crate::gate::{AuthGate, GateDecision};
use crate::messages;
use crate::shell::Route;
use crate::state::ScreenState;
use bizflow_client::services::ProductService;
use bizflow_core::types::{EntityId, Product, ProductPayload, ProductStatus};
use bizflow_query::{Query, QueryClient};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

const DEFAULT_STORE_ID: EntityId = 1;
const DEFAULT_CATEGORY_ID: EntityId = 1;
const DEFAULT_UNIT_ID: EntityId = 1;
const DEFAULT_REORDER_FIELD: &str = "10";

/// Status filter of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filtering
    #[default]
    All,
    /// Only products whose raw status equals this one
    Only(ProductStatus),
}

impl StatusFilter {
    /// Whether a raw status passes the filter
    pub fn matches(self, status: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == Some(wanted.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = bizflow_core::Error;

    fn from_str(s: &str) -> bizflow_core::Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Whether `product` matches a case-insensitive name or SKU search
pub fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.to_lowercase();
    term.is_empty()
        || product.name.to_lowercase().contains(&term)
        || product.sku.to_lowercase().contains(&term)
}

/// Badge label for a raw status value
pub fn status_label(status: &str) -> &str {
    match status {
        "ACTIVE" => "Đang bán",
        "INACTIVE" => "Tạm ngưng",
        "DISCONTINUED" => "Bỏ mẫu",
        other => other,
    }
}

/// Unit cell text
pub fn unit_label(product: &Product) -> String {
    match (&product.unit_name, product.unit_id) {
        (Some(name), _) if !name.is_empty() => name.clone(),
        (_, Some(id)) => format!("ID: {id}"),
        _ => messages::UNIT_UNSET.to_string(),
    }
}

/// One table row as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    /// Identifier
    pub id: EntityId,
    /// SKU
    pub sku: String,
    /// Name
    pub name: String,
    /// Unit cell
    pub unit: String,
    /// Purchase price
    pub cost_price: Option<Decimal>,
    /// Sell price
    pub price: Decimal,
    /// Units on hand
    pub stock: Option<i32>,
    /// At or below the reorder level
    pub low_stock: bool,
    /// Badge label
    pub status: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit: unit_label(product),
            cost_price: product.cost_price,
            price: product.price,
            stock: product.stock,
            low_stock: product.is_low_stock(),
            status: product
                .status
                .as_deref()
                .map(status_label)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Shared create/edit form
///
/// Numeric fields hold the text as typed and are coerced on submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductForm {
    /// Set when editing an existing product
    pub id: Option<EntityId>,
    /// SKU
    pub sku: String,
    /// Name
    pub name: String,
    /// Sell price
    pub price: String,
    /// Purchase price
    pub cost_price: String,
    /// Units on hand
    pub stock: String,
    /// Reorder threshold
    pub reorder_level: String,
    /// Sales status
    pub status: Option<ProductStatus>,
    /// Category
    pub category_id: Option<EntityId>,
    /// Unit of measure
    pub unit_id: Option<EntityId>,
    /// Description
    pub description: String,
    /// Picture
    pub image_url: String,
}

impl ProductForm {
    /// Blank form for a new product
    pub fn blank() -> Self {
        Self {
            status: Some(ProductStatus::Active),
            unit_id: Some(DEFAULT_UNIT_ID),
            stock: "0".to_string(),
            reorder_level: DEFAULT_REORDER_FIELD.to_string(),
            ..Self::default()
        }
    }

    /// Form prefilled from an existing product
    pub fn edit(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            sku: product.sku.clone(),
            name: product.name.clone(),
            price: product.price.to_string(),
            cost_price: product
                .cost_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            stock: product.stock.map(|s| s.to_string()).unwrap_or_default(),
            reorder_level: product
                .reorder_level
                .map_or_else(|| DEFAULT_REORDER_FIELD.to_string(), |r| r.to_string()),
            status: product.parsed_status(),
            category_id: product.category_id,
            unit_id: product.unit_id,
            description: product.description.clone().unwrap_or_default(),
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }

    /// Whether submitting creates a product
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Full record to send, with defaults for absent fields
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidField`] if a numeric field does not parse.
    pub fn to_payload(&self) -> ViewResult<ProductPayload> {
        Ok(ProductPayload {
            sku: self.sku.trim().to_string(),
            name: self.name.trim().to_string(),
            price: parse_decimal("price", &self.price)?,
            cost_price: parse_decimal("costPrice", &self.cost_price)?,
            stock: parse_int("stock", &self.stock)?.unwrap_or(0),
            reorder_level: parse_int("reorderLevel", &self.reorder_level)?,
            status: self.status.unwrap_or(ProductStatus::Active),
            category_id: non_zero(self.category_id).unwrap_or(DEFAULT_CATEGORY_ID),
            unit_id: non_zero(self.unit_id).unwrap_or(DEFAULT_UNIT_ID),
            store_id: DEFAULT_STORE_ID,
            description: non_blank(&self.description),
            image_url: non_blank(&self.image_url),
        })
    }
}

fn parse_decimal(field: &'static str, raw: &str) -> ViewResult<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(raw).map_err(|e| ViewError::invalid_field(field, e.to_string()))
}

fn parse_int(field: &'static str, raw: &str) -> ViewResult<Option<i32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|e: std::num::ParseIntError| ViewError::invalid_field(field, e.to_string()))
}

fn non_zero(id: Option<EntityId>) -> Option<EntityId> {
    id.filter(|id| *id != 0)
}

fn non_blank(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Outcome message shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Action succeeded
    Success(String),
    /// Action failed
    Failure(String),
}

impl Notice {
    /// Message text
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

/// View model of the product catalog
#[derive(Debug, Clone)]
pub struct ProductCatalogView {
    gate: AuthGate,
    cache: QueryClient,
    service: ProductService,
    query: Query<Vec<Product>>,
    search: String,
    status_filter: StatusFilter,
    form: Option<ProductForm>,
    pending_delete: Option<EntityId>,
    notice: Option<Notice>,
}

impl ProductCatalogView {
    /// Catalog over the shared cache
    ///
    /// # Errors
    ///
    /// Returns an error if `products-list` is cached with another type.
    pub fn new(app: &App) -> ViewResult<Self> {
        Ok(Self {
            gate: app.gate(),
            cache: app.cache.clone(),
            service: app.services.products.clone(),
            query: app.products_query()?,
            search: String::new(),
            status_filter: StatusFilter::All,
            form: None,
            pending_delete: None,
            notice: None,
        })
    }

    /// Check the gate and load the catalog
    ///
    /// A failed load is reported through [`Self::screen`].
    pub async fn mount(&mut self) -> GateDecision {
        let decision = self.gate.check(Route::Products);
        if decision == GateDecision::Allow {
            if let Err(err) = self.query.load().await {
                warn!(error = %err, "Product catalog failed to load");
            }
        }
        decision
    }

    /// Screen state with the filtered rows
    pub fn screen(&self) -> ScreenState<Vec<ProductRow>> {
        ScreenState::from_query(
            &self.query.state(),
            |products| self.filter(products).map(ProductRow::from).collect(),
            |err| messages::server_or(err, messages::PRODUCTS_LOAD_FAILED),
        )
    }

    /// Current search term
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Change the search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Current status filter
    pub const fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    /// Change the status filter
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    fn filter<'a>(&'a self, products: &'a [Product]) -> impl Iterator<Item = &'a Product> + 'a {
        products.iter().filter(|p| {
            matches_search(p, &self.search) && self.status_filter.matches(p.status.as_deref())
        })
    }

    /// Cached products passing both filters
    pub fn filtered(&self) -> Vec<Product> {
        self.query
            .data()
            .map(|products| self.filter(&products).cloned().collect())
            .unwrap_or_default()
    }

    /// Displayed rows
    pub fn rows(&self) -> Vec<ProductRow> {
        self.filtered().iter().map(ProductRow::from).collect()
    }

    /// Last action outcome
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Open the form for a new product
    pub fn open_new(&mut self) -> &mut ProductForm {
        self.form.insert(ProductForm::blank())
    }

    /// Open the form on an existing product
    pub fn open_edit(&mut self, product: &Product) -> &mut ProductForm {
        self.form.insert(ProductForm::edit(product))
    }

    /// Open the edit form for a product of the loaded catalog
    ///
    /// Filters are ignored; the product only has to be cached.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ProductNotFound`] when no cached product has `id`.
    pub fn open_edit_by_id(&mut self, id: EntityId) -> ViewResult<&mut ProductForm> {
        let product = self
            .query
            .data()
            .and_then(|products| products.into_iter().find(|p| p.id == id))
            .ok_or(ViewError::ProductNotFound(id))?;
        Ok(self.open_edit(&product))
    }

    /// Open form, if any
    pub const fn form(&self) -> Option<&ProductForm> {
        self.form.as_ref()
    }

    /// Open form for editing, if any
    pub const fn form_mut(&mut self) -> Option<&mut ProductForm> {
        self.form.as_mut()
    }

    /// Close the form without submitting
    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form
    ///
    /// Forms with an id update that product, others create one. The catalog
    /// is refetched before this returns. On failure the form stays open.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NoOpenForm`] without an open form, a field error
    /// if coercion fails, or the mutation error.
    pub async fn submit(&mut self) -> ViewResult<Product> {
        let form = self.form.as_ref().ok_or(ViewError::NoOpenForm)?;
        let payload = form.to_payload()?;
        let id = form.id;

        let (result, success, failure) = match id {
            Some(id) => {
                debug!(id, "Submitting product update");
                let outcome = self
                    .cache
                    .mutate(
                        self.service.update_product(id, &payload),
                        &[keys::PRODUCTS_LIST],
                    )
                    .await;
                (outcome, messages::PRODUCT_UPDATED, messages::PRODUCT_UPDATE_FAILED)
            }
            None => {
                debug!(sku = %payload.sku, "Submitting new product");
                let outcome = self
                    .cache
                    .mutate(self.service.create_product(&payload), &[keys::PRODUCTS_LIST])
                    .await;
                (outcome, messages::PRODUCT_CREATED, messages::PRODUCT_CREATE_FAILED)
            }
        };

        match result.map(|envelope| envelope.result) {
            Ok(saved) => {
                self.form = None;
                self.notice = Some(Notice::Success(success.to_string()));
                info!(id = ?id, "Product saved");
                saved.ok_or_else(|| bizflow_client::ClientError::MissingResult.into())
            }
            Err(err) => {
                self.notice = Some(Notice::Failure(failure.to_string()));
                Err(err.into())
            }
        }
    }

    /// Ask for confirmation before deleting `id`
    ///
    /// Returns the prompt to show.
    pub fn request_delete(&mut self, id: EntityId) -> &'static str {
        self.pending_delete = Some(id);
        messages::DELETE_CONFIRM
    }

    /// Product awaiting delete confirmation
    pub const fn pending_delete(&self) -> Option<EntityId> {
        self.pending_delete
    }

    /// Drop the pending deletion; nothing is sent
    pub fn cancel_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            debug!(id, "Deletion cancelled");
        }
    }

    /// Delete the product awaiting confirmation
    ///
    /// The catalog is refetched before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NothingToConfirm`] when no deletion was requested,
    /// or the mutation error.
    pub async fn confirm_delete(&mut self) -> ViewResult<EntityId> {
        let id = self.pending_delete.take().ok_or(ViewError::NothingToConfirm)?;

        match self
            .cache
            .mutate(self.service.delete_product(id), &[keys::PRODUCTS_LIST])
            .await
        {
            Ok(_) => {
                self.notice = Some(Notice::Success(messages::PRODUCT_DELETED.to_string()));
                Ok(id)
            }
            Err(err) => {
                self.notice = Some(Notice::Failure(messages::PRODUCT_DELETE_FAILED.to_string()));
                Err(err.into())
            }
        }
    }

    /// Write the filtered rows as CSV to `writer`
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Empty`] when no row passes the filters.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        export::write_products_csv(&self.filtered(), writer)
    }

    /// Export the filtered rows into `dir`
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Empty`] when no row passes the filters, or the
    /// write error.
    pub fn export_csv(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf, ExportError> {
        export::export_products(&self.filtered(), dir, date)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn product(id: EntityId, sku: &str, name: &str, status: &str) -> Product {
        Product {
            id,
            sku: sku.to_string(),
            name: name.to_string(),
            price: Decimal::from(10),
            cost_price: None,
            stock: None,
            reorder_level: None,
            status: Some(status.to_string()),
            image_url: None,
            category_id: None,
            category_name: None,
            unit_id: None,
            unit_name: None,
            description: None,
            store_id: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = [
            product(1, "XM-01", "Xi măng Hà Tiên", "ACTIVE"),
            product(2, "G-01", "Gạch", "ACTIVE"),
        ];
        let hits: Vec<_> = items.iter().filter(|p| matches_search(p, "xi măng")).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        assert!(matches_search(&items[1], "g-0"));
    }

    #[rstest]
    #[case("ACTIVE", "Đang bán")]
    #[case("INACTIVE", "Tạm ngưng")]
    #[case("DISCONTINUED", "Bỏ mẫu")]
    #[case("ARCHIVED", "ARCHIVED")]
    fn test_status_labels(#[case] raw: &str, #[case] label: &str) {
        assert_eq!(status_label(raw), label);
    }

    #[test]
    fn test_unit_label_fallbacks() {
        let mut item = product(1, "A", "A", "ACTIVE");
        assert_eq!(unit_label(&item), messages::UNIT_UNSET);
        item.unit_id = Some(4);
        assert_eq!(unit_label(&item), "ID: 4");
        item.unit_name = Some("Bao".to_string());
        assert_eq!(unit_label(&item), "Bao");
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "inactive".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ProductStatus::Inactive)
        );
        assert!("bogus".parse::<StatusFilter>().is_err());
        assert!(!StatusFilter::Only(ProductStatus::Active).matches(None));
    }

    #[test]
    fn test_blank_form_defaults() {
        let form = ProductForm::blank();
        assert!(form.is_new());
        assert_eq!(form.status, Some(ProductStatus::Active));
        assert_eq!(form.unit_id, Some(1));
        assert_eq!(form.stock, "0");
        assert_eq!(form.reorder_level, "10");
    }

    #[test]
    fn test_payload_fills_defaults() {
        let form = ProductForm {
            sku: " SP-9 ".to_string(),
            name: "Cát vàng".to_string(),
            price: "120000".to_string(),
            category_id: Some(0),
            ..ProductForm::default()
        };

        let payload = form.to_payload().unwrap();

        assert_eq!(payload.sku, "SP-9");
        assert_eq!(payload.price, Decimal::from(120_000));
        assert_eq!(payload.cost_price, Decimal::ZERO);
        assert_eq!(payload.stock, 0);
        assert_eq!(payload.reorder_level, None);
        assert_eq!(payload.status, ProductStatus::Active);
        assert_eq!(payload.category_id, 1);
        assert_eq!(payload.unit_id, 1);
        assert_eq!(payload.store_id, 1);
        assert_eq!(payload.description, None);
    }

    #[test]
    fn test_payload_rejects_bad_number() {
        let form = ProductForm {
            price: "mười".to_string(),
            ..ProductForm::blank()
        };
        let err = form.to_payload().unwrap_err();
        assert!(matches!(err, ViewError::InvalidField { field: "price", .. }));
    }

    #[test]
    fn test_edit_form_keeps_id_and_values() {
        let mut item = product(7, "SP-7", "Thép", "INACTIVE");
        item.stock = Some(3);
        let form = ProductForm::edit(&item);
        assert!(!form.is_new());
        assert_eq!(form.id, Some(7));
        assert_eq!(form.stock, "3");
        assert_eq!(form.reorder_level, "10");
        assert_eq!(form.status, Some(ProductStatus::Inactive));
    }

    #[rstest]
    #[case("măng", true)]
    #[case("MĂNG", true)]
    #[case("măng ", false)]
    #[case(" ", true)]
    #[case("  ", false)]
    #[case("xm-", true)]
    fn test_search_term_is_not_trimmed(#[case] term: &str, #[case] expected: bool) {
        let item = product(1, "XM-HT", "Xi măng", "ACTIVE");
        assert_eq!(matches_search(&item, term), expected);
    }

    #[test]
    fn test_single_space_does_not_match_every_row() {
        let item = product(2, "G-04", "Gạch", "ACTIVE");
        assert!(!matches_search(&item, " "));
    }

    proptest! {
        #[test]
        fn prop_search_hits_contain_term(names in prop::collection::vec("[a-zA-Z ]{0,12}", 0..20), term in "[a-zA-Z ]{0,3}") {
            let items: Vec<Product> = names
                .iter()
                .enumerate()
                .map(|(i, n)| product(i as EntityId, "", n, "ACTIVE"))
                .collect();
            let needle = term.to_lowercase();

            for item in &items {
                let hit = matches_search(item, &term);
                prop_assert_eq!(hit, item.name.to_lowercase().contains(&needle));
            }
        }

        #[test]
        fn prop_empty_search_matches_everything(name in ".{0,20}", sku in ".{0,10}") {
            let item = product(1, &sku, &name, "ACTIVE");
            prop_assert!(matches_search(&item, ""));
        }
    }
}
