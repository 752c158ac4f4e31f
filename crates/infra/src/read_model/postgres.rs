//! Postgres-backed product repository.
//!
//! Schema lives in `migrations/0001_products.sql`. Optional filter fields are
//! bound as nullable parameters (`$n IS NULL OR column = $n`) so one prepared
//! statement serves every filter combination.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use shopadmin_core::{CategoryId, ProductId};
use shopadmin_products::{
    PageRequest, ProductFilter, ProductPage, ProductRepository, ProductStatus, ProductSummary,
    StorageError,
};

/// Product repository over a SQLx Postgres pool.
///
/// ## Thread Safety
///
/// Uses SQLx connection pool which is thread-safe (Arc + Send + Sync).
///
/// ## Ordering
///
/// Listings are ordered by `products.id` ascending, so repeated reads of
/// unchanged data page identically.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: Arc<PgPool>,
}

/// Idempotent product schema (`CREATE ... IF NOT EXISTS` only).
pub const SCHEMA: &str = include_str!("../../migrations/0001_products.sql");

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the product tables if they are missing. Safe to run on every start.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

const FILTER_CLAUSE: &str = r#"
    ($1::text IS NULL OR p.name ILIKE $1)
    AND ($2::bigint IS NULL OR p.category1_id = $2)
    AND ($3::bigint IS NULL OR p.category2_id = $3)
    AND ($4::smallint IS NULL OR p.status = $4)
"#;

/// Bound filter values, in `$1..$4` order.
struct FilterParams {
    name_pattern: Option<String>,
    category1_id: Option<i64>,
    category2_id: Option<i64>,
    status: Option<i16>,
}

impl From<&ProductFilter> for FilterParams {
    fn from(filter: &ProductFilter) -> Self {
        Self {
            name_pattern: filter
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(like_pattern),
            category1_id: filter.category1_id.map(i64::from),
            category2_id: filter.category2_id.map(i64::from),
            status: filter.status.map(|s| s.code() as i16),
        }
    }
}

/// `%needle%` with LIKE metacharacters escaped, so the match is a plain
/// substring search.
fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_page(
        &self,
        filter: &ProductFilter,
        page: Option<PageRequest>,
    ) -> Result<ProductPage, StorageError> {
        let params = FilterParams::from(filter);

        // Count and rows read from one snapshot.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("set_isolation", e))?;

        let count_sql = format!("SELECT COUNT(*) AS total FROM products p WHERE {FILTER_CLAUSE}");
        let count_row = sqlx::query(&count_sql)
            .bind(params.name_pattern.as_deref())
            .bind(params.category1_id)
            .bind(params.category2_id)
            .bind(params.status)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("count_products", e))?;

        let total: i64 = count_row
            .try_get("total")
            .map_err(|e| StorageError::Query(format!("failed to read count: {e}")))?;

        // LIMIT NULL is LIMIT ALL in Postgres.
        let limit: Option<i64> = page.map(|p| i64::try_from(p.page_size()).unwrap_or(i64::MAX));
        let offset: i64 = page
            .map(|p| i64::try_from(p.offset()).unwrap_or(i64::MAX))
            .unwrap_or(0);

        let select_sql = format!(
            r#"
            SELECT
                p.id,
                p.name,
                p.category1_id,
                c1.name AS category1_name,
                p.category2_id,
                c2.name AS category2_name,
                p.price,
                p.stock,
                p.status,
                p.image_url,
                p.created_at
            FROM products p
            LEFT JOIN category1 c1 ON c1.id = p.category1_id
            LEFT JOIN category2 c2 ON c2.id = p.category2_id
            WHERE {FILTER_CLAUSE}
            ORDER BY p.id ASC
            LIMIT $5 OFFSET $6
            "#
        );
        let rows = sqlx::query(&select_sql)
            .bind(params.name_pattern.as_deref())
            .bind(params.category1_id)
            .bind(params.category2_id)
            .bind(params.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("list_products", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit", e))?;

        let items = rows
            .iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProductPage {
            items,
            total_count: total.max(0) as u64,
        })
    }

    async fn update_status(
        &self,
        product_id: ProductId,
        status: ProductStatus,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE products SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(product_id.get())
            .bind(status.code() as i16)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_product_status", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_product_names(&self) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query("SELECT name FROM products ORDER BY name ASC")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_product_names", e))?;

        rows.iter()
            .map(|r| {
                r.try_get::<String, _>("name")
                    .map_err(|e| StorageError::Query(format!("failed to read name: {e}")))
            })
            .collect()
    }
}

fn product_from_row(row: &PgRow) -> Result<ProductSummary, StorageError> {
    let corrupt = |what: &str, e: &dyn core::fmt::Display| {
        StorageError::Query(format!("invalid product row ({what}): {e}"))
    };
    let get_err = |e: sqlx::Error| StorageError::Query(format!("failed to read product row: {e}"));

    let id: i64 = row.try_get("id").map_err(get_err)?;
    let category1_id: i64 = row.try_get("category1_id").map_err(get_err)?;
    let category2_id: i64 = row.try_get("category2_id").map_err(get_err)?;
    let price: i64 = row.try_get("price").map_err(get_err)?;
    let stock: i32 = row.try_get("stock").map_err(get_err)?;
    let status: i16 = row.try_get("status").map_err(get_err)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(get_err)?;

    Ok(ProductSummary {
        id: ProductId::new(id).map_err(|e| corrupt("id", &e))?,
        name: row.try_get("name").map_err(get_err)?,
        category1_id: CategoryId::new(category1_id).map_err(|e| corrupt("category1_id", &e))?,
        category1_name: row.try_get("category1_name").map_err(get_err)?,
        category2_id: CategoryId::new(category2_id).map_err(|e| corrupt("category2_id", &e))?,
        category2_name: row.try_get("category2_name").map_err(get_err)?,
        price: u64::try_from(price).map_err(|e| corrupt("price", &e))?,
        stock: u32::try_from(stock).map_err(|e| corrupt("stock", &e))?,
        status: ProductStatus::from_code(i64::from(status)).map_err(|e| corrupt("status", &e))?,
        image_url: row.try_get("image_url").map_err(get_err)?,
        created_at,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StorageError {
    let mapped = match err {
        sqlx::Error::Database(db_err) => {
            StorageError::Query(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::PoolTimedOut => {
            StorageError::Unavailable(format!("timed out acquiring a connection in {}", operation))
        }
        sqlx::Error::PoolClosed => {
            StorageError::Unavailable(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::Io(e) => StorageError::Unavailable(format!("io error in {}: {}", operation, e)),
        sqlx::Error::Tls(e) => StorageError::Unavailable(format!("tls error in {}: {}", operation, e)),
        other => StorageError::Query(format!("{} failed: {}", operation, other)),
    };
    tracing::warn!(operation, "postgres product repository error: {mapped}");
    mapped
}
