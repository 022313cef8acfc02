//! # Catalog Maintenance
//!
//! Category and product administration, gated by role capability: only
//! admins may change the catalog, while anyone who can operate the till
//! may read it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::Engine;
use brewpos_core::{validation, AuthContext, Category, Product, ValidationError};
use brewpos_db::{DbError, ProductListing};

/// Input for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub category_id: String,
    pub price_cents: i64,
    pub stock: i64,
}

impl ProductInput {
    fn validate(&self) -> EngineResult<()> {
        validation::validate_name("name", &self.name)?;
        validation::validate_price_cents(self.price_cents)?;
        validation::validate_stock(self.stock)?;
        Ok(())
    }
}

impl Engine {
    /// Creates a category. Admin only.
    pub async fn create_category(&self, auth: &AuthContext, name: &str) -> EngineResult<Category> {
        self.require_catalog_admin(auth, "create category")?;
        validation::validate_name("name", name)?;

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        match self.db().catalog().insert_category(&category).await {
            Ok(()) => {}
            Err(DbError::UniqueViolation { .. }) => {
                return Err(EngineError::Validation(ValidationError::Duplicate {
                    field: "name".to_string(),
                    value: category.name,
                }));
            }
            Err(e) => return Err(e.into()),
        }

        info!(id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Creates a product. Admin only.
    pub async fn create_product(
        &self,
        auth: &AuthContext,
        input: ProductInput,
    ) -> EngineResult<Product> {
        self.require_catalog_admin(auth, "create product")?;
        input.validate()?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            category_id: input.category_id.clone(),
            price_cents: input.price_cents,
            stock: input.stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        match self.db().catalog().insert_product(&product).await {
            Ok(()) => {}
            Err(DbError::ForeignKeyViolation { .. }) => {
                return Err(EngineError::not_found("Category", &input.category_id));
            }
            Err(e) => return Err(e.into()),
        }

        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Updates a product's name, category, price and stock. Admin only.
    pub async fn update_product(
        &self,
        auth: &AuthContext,
        product_id: &str,
        input: ProductInput,
    ) -> EngineResult<Product> {
        self.require_catalog_admin(auth, "update product")?;
        input.validate()?;

        let mut product = self
            .db()
            .catalog()
            .get_product(product_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Product", product_id))?;

        product.name = input.name.trim().to_string();
        product.category_id = input.category_id.clone();
        product.price_cents = input.price_cents;
        product.stock = input.stock;

        match self.db().catalog().update_product(&product).await {
            Ok(()) => {}
            Err(DbError::ForeignKeyViolation { .. }) => {
                return Err(EngineError::not_found("Category", &input.category_id));
            }
            Err(e) => return Err(e.into()),
        }

        info!(id = %product.id, "Product updated");
        Ok(product)
    }

    /// Deactivates a product (soft delete). Admin only.
    ///
    /// Historical sale lines keep their snapshots; the product simply
    /// stops appearing on the sale screen.
    pub async fn deactivate_product(&self, auth: &AuthContext, product_id: &str) -> EngineResult<()> {
        self.require_catalog_admin(auth, "deactivate product")?;

        match self.db().catalog().soft_delete_product(product_id).await {
            Ok(()) => {}
            Err(DbError::NotFound { .. }) => {
                return Err(EngineError::not_found("Product", product_id));
            }
            Err(e) => return Err(e.into()),
        }

        info!(id = %product_id, "Product deactivated");
        Ok(())
    }

    /// Lists active products with category names for the sale screen.
    pub async fn list_products(&self, auth: &AuthContext) -> EngineResult<Vec<ProductListing>> {
        self.require_till_operator(auth, "list products")?;

        let products = self.db().catalog().list_active_products().await?;
        Ok(products)
    }

    /// Lists active categories.
    pub async fn list_categories(&self, auth: &AuthContext) -> EngineResult<Vec<Category>> {
        self.require_till_operator(auth, "list categories")?;

        let categories = self.db().catalog().list_categories().await?;
        Ok(categories)
    }

    fn require_catalog_admin(&self, auth: &AuthContext, action: &str) -> EngineResult<()> {
        if auth.role.can_administer_catalog() {
            Ok(())
        } else {
            Err(EngineError::forbidden(action))
        }
    }
}
