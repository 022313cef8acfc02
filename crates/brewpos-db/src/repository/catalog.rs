//! # Catalog Repository
//!
//! Database operations for categories and products.
//!
//! ## Stock Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who Writes products.stock?                           │
//! │                                                                         │
//! │  SaleRepository::commit_sale ── conditional decrement, inside the      │
//! │                                 checkout transaction (the ONLY path    │
//! │                                 that consumes stock)                   │
//! │                                                                         │
//! │  CatalogRepository::update ──── admin restock / correction             │
//! │                                                                         │
//! │  Nothing else touches the column. The CHECK (stock >= 0) constraint    │
//! │  is the last line of defense.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use brewpos_core::{Category, Product};

/// An active product joined with its category name, as the sale screen
/// lists it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub category_name: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Inserts a category.
    ///
    /// A duplicate name surfaces as `DbError::UniqueViolation` via the
    /// UNIQUE constraint on `categories.name`.
    pub async fn insert_category(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a category by ID.
    pub async fn get_category(&self, id: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, is_active, created_at, updated_at
            FROM categories
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Lists active categories ordered by name.
    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, is_active, created_at, updated_at
            FROM categories
            WHERE is_active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Inserts a product.
    ///
    /// A missing category surfaces as `DbError::ForeignKeyViolation`.
    pub async fn insert_product(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, category_id, price_cents, stock,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category_id)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a product's mutable fields (admin edit / restock).
    pub async fn update_product(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                category_id = ?3,
                price_cents = ?4,
                stock = ?5,
                is_active = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category_id)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Gets a product by its ID.
    pub async fn get_product(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category_id, price_cents, stock,
                   is_active, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets an active product by its ID.
    ///
    /// Used by the cart line service: deactivated products cannot be sold.
    pub async fn get_active_product(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category_id, price_cents, stock,
                   is_active, created_at, updated_at
            FROM products
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists active products with their category name, ordered by name.
    pub async fn list_active_products(&self) -> DbResult<Vec<ProductListing>> {
        let products = sqlx::query_as::<_, ProductListing>(
            r#"
            SELECT p.id, p.name, p.category_id, c.name AS category_name,
                   p.price_cents, p.stock
            FROM products p
            INNER JOIN categories c ON c.id = p.category_id
            WHERE p.is_active = 1
            ORDER BY p.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Soft-deletes a product by setting is_active = false.
    ///
    /// ## Why Soft Delete?
    /// - Historical sale lines still reference this product
    /// - Can be restored if deactivated by mistake
    pub async fn soft_delete_product(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET is_active = 0, updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (used by the seed binary to avoid double-seeding).
    pub async fn count_products(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use uuid::Uuid;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn category(name: &str) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn product(name: &str, category_id: &str, price_cents: i64, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category_id: category_id.to_string(),
            price_cents,
            stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_product() {
        let db = test_db().await;
        let cat = category("Coffee");
        db.catalog().insert_category(&cat).await.unwrap();

        let p = product("Espresso", &cat.id, 1500, 10);
        db.catalog().insert_product(&p).await.unwrap();

        let fetched = db.catalog().get_product(&p.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Espresso");
        assert_eq!(fetched.price_cents, 1500);
        assert_eq!(fetched.stock, 10);
    }

    #[tokio::test]
    async fn test_duplicate_category_name_rejected() {
        let db = test_db().await;
        db.catalog().insert_category(&category("Coffee")).await.unwrap();

        let err = db
            .catalog()
            .insert_category(&category("Coffee"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_product_requires_existing_category() {
        let db = test_db().await;
        let p = product("Orphan", "no-such-category", 1000, 5);

        let err = db.catalog().insert_product(&p).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_listing_joins_category_name() {
        let db = test_db().await;
        let cat = category("Pastries");
        db.catalog().insert_category(&cat).await.unwrap();
        db.catalog()
            .insert_product(&product("Croissant", &cat.id, 900, 12))
            .await
            .unwrap();

        let listings = db.catalog().list_active_products().await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].category_name, "Pastries");
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_listing() {
        let db = test_db().await;
        let cat = category("Tea");
        db.catalog().insert_category(&cat).await.unwrap();
        let p = product("Chai", &cat.id, 800, 4);
        db.catalog().insert_product(&p).await.unwrap();

        db.catalog().soft_delete_product(&p.id).await.unwrap();

        assert!(db.catalog().list_active_products().await.unwrap().is_empty());
        assert!(db
            .catalog()
            .get_active_product(&p.id)
            .await
            .unwrap()
            .is_none());
        // Still reachable by plain get (history needs it).
        assert!(db.catalog().get_product(&p.id).await.unwrap().is_some());
    }
}
