//! Catalog export to CSV
//!
//! Files start with a UTF-8 byte order mark so spreadsheet tools pick the
//! right encoding for the Vietnamese headers.

use crate::error::ExportError;
use bizflow_core::types::Product;
use chrono::NaiveDate;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// UTF-8 byte order mark
pub const BOM: &str = "\u{FEFF}";

/// Header row of the product export
pub const PRODUCT_HEADERS: [&str; 8] = [
    "ID",
    "SKU",
    "Tên sản phẩm",
    "Đơn vị",
    "Giá vốn",
    "Giá bán",
    "Tồn kho",
    "Trạng thái",
];

/// File name for an export made on `date` (UTC)
pub fn export_filename(date: NaiveDate) -> String {
    format!("danh_sach_san_pham_{}.csv", date.format("%Y-%m-%d"))
}

fn export_row(product: &Product) -> [String; 8] {
    let unit = product
        .unit_name
        .clone()
        .filter(|name| !name.is_empty())
        .or_else(|| product.unit_id.map(|id| id.to_string()))
        .unwrap_or_default();

    [
        product.id.to_string(),
        product.sku.clone(),
        product.name.clone(),
        unit,
        product
            .cost_price
            .map(|price| price.to_string())
            .unwrap_or_default(),
        product.price.to_string(),
        product.stock.unwrap_or(0).to_string(),
        product.status.clone().unwrap_or_default(),
    ]
}

/// Write `products` as CSV to `writer`
///
/// # Errors
///
/// Returns [`ExportError::Empty`] when there is nothing to write, or an
/// encoding or I/O error.
pub fn write_products_csv<W: Write>(products: &[Product], mut writer: W) -> Result<(), ExportError> {
    if products.is_empty() {
        return Err(ExportError::Empty);
    }

    writer.write_all(BOM.as_bytes())?;
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(PRODUCT_HEADERS)?;
    for product in products {
        csv.write_record(export_row(product))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write `products` to `<dir>/danh_sach_san_pham_<date>.csv`
///
/// # Errors
///
/// Returns [`ExportError::Empty`] when there is nothing to write, or an
/// encoding or I/O error. No file is created for an empty export.
pub fn export_products(products: &[Product], dir: &Path, date: NaiveDate) -> Result<PathBuf, ExportError> {
    if products.is_empty() {
        return Err(ExportError::Empty);
    }

    let path = dir.join(export_filename(date));
    let file = File::create(&path)?;
    write_products_csv(products, BufWriter::new(file))?;

    info!(path = %path.display(), rows = products.len(), "Products exported");
    Ok(path)
}
