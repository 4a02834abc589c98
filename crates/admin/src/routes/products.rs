//! Admin product management routes.
//!
//! The create and edit forms post `multipart/form-data` because they carry
//! the product photo alongside the text fields. Size labels and stock
//! counts arrive as parallel `size[]` / `stock[]` lists and are zipped
//! pairwise; an unmatched trailing entry on either side is dropped.

use askama::Template;
use axum::{
    Router,
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use warung_core::{Price, ProductId};

use crate::db::{AdminProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::SizeEntry;
use crate::services::uploads;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", post(create))
        .route("/products/new", get(new_form))
        .route("/products/{id}", post(update))
        .route("/products/{id}/edit", get(edit_form))
        .route("/products/{id}/delete", post(delete))
}

// =============================================================================
// View and Query Types
// =============================================================================

/// Existing size row shown in the edit form.
#[derive(Debug, Clone)]
pub struct SizeFieldView {
    pub size: String,
    pub stock: i32,
}

/// Product data shown in the edit form.
#[derive(Debug, Clone)]
pub struct ProductFormView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub price: i64,
    pub sizes: Vec<SizeFieldView>,
}

#[derive(Debug, Deserialize)]
pub struct FormQuery {
    pub error: Option<String>,
}

/// Map a form error code to a human message.
fn error_message(code: &str) -> String {
    match code {
        "missing_name" => "Nama produk wajib diisi.".to_owned(),
        "invalid_price" => "Harga harus berupa angka bulat tidak negatif.".to_owned(),
        "invalid_stock" => "Stok harus berupa angka bulat tidak negatif.".to_owned(),
        "missing_image" => "Foto produk wajib diunggah.".to_owned(),
        "invalid_image" => "Nama berkas foto tidak valid.".to_owned(),
        "duplicate_size" => "Ukuran tidak boleh ganda.".to_owned(),
        _ => "Gagal menyimpan produk, silakan coba lagi.".to_owned(),
    }
}

// =============================================================================
// Templates
// =============================================================================

/// New product form template.
#[derive(Template)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    pub admin_username: String,
    pub error_message: Option<String>,
}

/// Edit product form template.
#[derive(Template)]
#[template(path = "products/edit.html")]
pub struct EditProductTemplate {
    pub admin_username: String,
    pub product: ProductFormView,
    pub error_message: Option<String>,
}

// =============================================================================
// Multipart Parsing
// =============================================================================

/// Fields collected from the product form.
#[derive(Debug, Default)]
struct ProductFormData {
    name: String,
    price_raw: String,
    size_labels: Vec<String>,
    stock_values: Vec<String>,
    /// Original filename and bytes, present when a file was selected.
    image: Option<(String, Vec<u8>)>,
}

/// Drain a multipart stream into `ProductFormData`.
async fn read_product_form(mut multipart: Multipart) -> Result<ProductFormData> {
    let mut data = ProductFormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => {
                data.name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
            }
            "price" => {
                data.price_raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
            }
            "size[]" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
                data.size_labels.push(value);
            }
            "stock[]" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
                data.stock_values.push(value);
            }
            "image" => {
                let filename = field.file_name().map(ToOwned::to_owned).unwrap_or_default();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
                // Browsers submit an empty file part when nothing was picked
                if !filename.is_empty() && !bytes.is_empty() {
                    data.image = Some((filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(data)
}

/// Validated text fields from the product form.
#[derive(Debug)]
struct ValidatedFields {
    name: String,
    price: Price,
    sizes: Vec<SizeEntry>,
}

/// Validate the text fields, returning an error code on failure.
fn validate_fields(data: &ProductFormData) -> std::result::Result<ValidatedFields, &'static str> {
    let name = data.name.trim().to_owned();
    if name.is_empty() {
        return Err("missing_name");
    }

    let price = match data.price_raw.trim().parse::<i64>() {
        Ok(v) if v >= 0 => Price::new(v),
        _ => return Err("invalid_price"),
    };

    // Pairwise zip; unmatched trailing entries are dropped
    let mut sizes = Vec::new();
    for (label, stock_raw) in data.size_labels.iter().zip(data.stock_values.iter()) {
        let label = label.trim();
        if label.is_empty() {
            continue;
        }

        let stock = match stock_raw.trim().parse::<i32>() {
            Ok(v) if v >= 0 => v,
            _ => return Err("invalid_stock"),
        };

        sizes.push(SizeEntry {
            size: label.to_owned(),
            stock,
        });
    }

    Ok(ValidatedFields { name, price, sizes })
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the new product form.
///
/// GET /products/new
async fn new_form(
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(query): Query<FormQuery>,
) -> Response {
    let template = NewProductTemplate {
        admin_username: admin.username.to_string(),
        error_message: query.error.as_deref().map(error_message),
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
    .into_response()
}

/// Create a product from the multipart form.
///
/// POST /products
#[instrument(skip(state, multipart))]
async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    multipart: Multipart,
) -> Result<Response> {
    let data = read_product_form(multipart).await?;

    let fields = match validate_fields(&data) {
        Ok(fields) => fields,
        Err(code) => return Ok(Redirect::to(&format!("/products/new?error={code}")).into_response()),
    };

    // A new product always needs a photo
    let Some((filename, bytes)) = data.image else {
        return Ok(Redirect::to("/products/new?error=missing_image").into_response());
    };

    let image_path = match uploads::store_image(&state.config().upload_dir, &filename, &bytes).await
    {
        Ok(path) => path,
        Err(uploads::UploadError::InvalidFilename) => {
            return Ok(Redirect::to("/products/new?error=invalid_image").into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let repo = AdminProductRepository::new(state.pool());
    match repo
        .create_with_sizes(&fields.name, &image_path, fields.price, &fields.sizes)
        .await
    {
        Ok(product_id) => {
            tracing::info!(product_id = %product_id, admin = %admin.username, "product created");
            Ok(Redirect::to("/?success=product_created").into_response())
        }
        Err(RepositoryError::Conflict(_)) => {
            // The transaction rolled back, so the stored photo belongs to nothing
            uploads::discard_image(&state.config().upload_dir, &image_path).await;
            Ok(Redirect::to("/products/new?error=duplicate_size").into_response())
        }
        Err(e) => {
            uploads::discard_image(&state.config().upload_dir, &image_path).await;
            Err(e.into())
        }
    }
}

/// Render the edit product form.
///
/// GET /products/{id}/edit
#[instrument(skip(state))]
async fn edit_form(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
    Query(query): Query<FormQuery>,
) -> Result<Response> {
    let repo = AdminProductRepository::new(state.pool());
    let Some(entry) = repo.get_with_sizes(ProductId::new(id)).await? else {
        return Err(AppError::NotFound(format!("product {id} not found")));
    };

    let product = ProductFormView {
        id: entry.product.id.as_i32(),
        name: entry.product.name,
        image: entry.product.image,
        price: entry.product.price.amount(),
        sizes: entry
            .sizes
            .into_iter()
            .map(|s| SizeFieldView {
                size: s.size,
                stock: s.stock,
            })
            .collect(),
    };

    let template = EditProductTemplate {
        admin_username: admin.username.to_string(),
        product,
        error_message: query.error.as_deref().map(error_message),
    };

    Ok(Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
    .into_response())
}

/// Update a product from the multipart form.
///
/// Keeping the photo is the default: the image field is only applied when
/// a new file was actually submitted.
///
/// POST /products/{id}
#[instrument(skip(state, multipart))]
async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Response> {
    let data = read_product_form(multipart).await?;

    let fields = match validate_fields(&data) {
        Ok(fields) => fields,
        Err(code) => {
            return Ok(Redirect::to(&format!("/products/{id}/edit?error={code}")).into_response());
        }
    };

    let image_path = match data.image {
        Some((filename, bytes)) => {
            match uploads::store_image(&state.config().upload_dir, &filename, &bytes).await {
                Ok(path) => Some(path),
                Err(uploads::UploadError::InvalidFilename) => {
                    return Ok(
                        Redirect::to(&format!("/products/{id}/edit?error=invalid_image"))
                            .into_response(),
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        None => None,
    };

    let repo = AdminProductRepository::new(state.pool());
    match repo
        .update_with_sizes(
            ProductId::new(id),
            &fields.name,
            image_path.as_deref(),
            fields.price,
            &fields.sizes,
        )
        .await
    {
        Ok(()) => {
            tracing::info!(product_id = id, admin = %admin.username, "product updated");
            Ok(Redirect::to("/?success=product_updated").into_response())
        }
        Err(RepositoryError::NotFound(_)) => {
            if let Some(path) = &image_path {
                uploads::discard_image(&state.config().upload_dir, path).await;
            }
            Err(AppError::NotFound(format!("product {id} not found")))
        }
        Err(RepositoryError::Conflict(_)) => {
            if let Some(path) = &image_path {
                uploads::discard_image(&state.config().upload_dir, path).await;
            }
            Ok(Redirect::to(&format!("/products/{id}/edit?error=duplicate_size")).into_response())
        }
        Err(e) => {
            if let Some(path) = &image_path {
                uploads::discard_image(&state.config().upload_dir, path).await;
            }
            Err(e.into())
        }
    }
}

/// Delete a product.
///
/// POST /products/{id}/delete
#[instrument(skip(state))]
async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<Response> {
    let repo = AdminProductRepository::new(state.pool());
    match repo.delete(ProductId::new(id)).await {
        Ok(()) => {
            tracing::info!(product_id = id, admin = %admin.username, "product deleted");
            Ok(Redirect::to("/?success=product_deleted").into_response())
        }
        Err(RepositoryError::NotFound(_)) => {
            Err(AppError::NotFound(format!("product {id} not found")))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(
        name: &str,
        price: &str,
        sizes: &[&str],
        stocks: &[&str],
    ) -> ProductFormData {
        ProductFormData {
            name: name.to_owned(),
            price_raw: price.to_owned(),
            size_labels: sizes.iter().map(|s| (*s).to_owned()).collect(),
            stock_values: stocks.iter().map(|s| (*s).to_owned()).collect(),
            image: None,
        }
    }

    #[test]
    fn test_validate_accepts_basic_form() {
        let data = form("Kaos Polos", "50000", &["S", "M"], &["5", "3"]);
        let fields = validate_fields(&data).unwrap();
        assert_eq!(fields.name, "Kaos Polos");
        assert_eq!(fields.price, Price::new(50000));
        assert_eq!(
            fields.sizes,
            vec![
                SizeEntry {
                    size: "S".to_owned(),
                    stock: 5
                },
                SizeEntry {
                    size: "M".to_owned(),
                    stock: 3
                },
            ]
        );
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let data = form("   ", "50000", &[], &[]);
        assert_eq!(validate_fields(&data).unwrap_err(), "missing_name");
    }

    #[test]
    fn test_validate_rejects_non_numeric_price() {
        let data = form("Kaos", "lima puluh ribu", &[], &[]);
        assert_eq!(validate_fields(&data).unwrap_err(), "invalid_price");

        let data = form("Kaos", "-1", &[], &[]);
        assert_eq!(validate_fields(&data).unwrap_err(), "invalid_price");
    }

    #[test]
    fn test_validate_rejects_bad_stock() {
        let data = form("Kaos", "50000", &["S"], &["banyak"]);
        assert_eq!(validate_fields(&data).unwrap_err(), "invalid_stock");
    }

    #[test]
    fn test_validate_zips_and_truncates() {
        // Trailing size without a stock value is dropped
        let data = form("Kaos", "50000", &["S", "M", "L"], &["5", "3"]);
        let fields = validate_fields(&data).unwrap();
        assert_eq!(fields.sizes.len(), 2);

        // Blank labels are skipped entirely
        let data = form("Kaos", "50000", &["", "M"], &["9", "3"]);
        let fields = validate_fields(&data).unwrap();
        assert_eq!(fields.sizes.len(), 1);
        assert_eq!(fields.sizes[0].size, "M");
        assert_eq!(fields.sizes[0].stock, 3);
    }

    #[test]
    fn test_validate_trims_labels() {
        let data = form("Kaos", "50000", &[" XL "], &["2"]);
        let fields = validate_fields(&data).unwrap();
        assert_eq!(fields.sizes[0].size, "XL");
    }
}
