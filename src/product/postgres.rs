//! `PostgreSQL` product repository.

use async_trait::async_trait;
use sqlx::{Connection, PgPool};
use tracing::{Instrument, debug, info_span, instrument};

use super::{
    Product, ProductDraft,
    repository::{ProductRepository, RepositoryError},
    schema::TableSchema,
};

/// Statements rendered once from the table definition.
#[derive(Debug, Clone)]
struct Statements {
    create_table: String,
    list: String,
    find: String,
    insert: String,
    update: String,
    toggle: String,
    delete: String,
}

impl Statements {
    fn render(schema: &TableSchema) -> Self {
        let table = schema.table;
        let columns = schema.column_list();
        Self {
            create_table: schema.create_table_sql(),
            list: format!("SELECT {columns} FROM {table} ORDER BY id DESC"),
            find: format!("SELECT {columns} FROM {table} WHERE id = $1"),
            insert: format!(
                "INSERT INTO {table} (name, price, availability) VALUES ($1, $2, $3) RETURNING {columns}"
            ),
            update: format!(
                "UPDATE {table} SET name = $2, price = $3, availability = $4, updated_at = NOW() WHERE id = $1 RETURNING {columns}"
            ),
            toggle: format!(
                "UPDATE {table} SET availability = NOT availability, updated_at = NOW() WHERE id = $1 RETURNING {columns}"
            ),
            delete: format!("DELETE FROM {table} WHERE id = $1"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
    statements: Statements,
}

impl PgProductRepository {
    #[must_use]
    pub fn new(pool: PgPool, schema: &TableSchema) -> Self {
        Self {
            pool,
            statements: Statements::render(schema),
        }
    }

    /// Create the table when it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the DDL statement fails.
    #[instrument(skip(self))]
    pub async fn sync_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(&self.statements.create_table)
            .execute(&self.pool)
            .await?;
        debug!("products table synchronized");
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let span = info_span!("db.query", db.system = "postgresql", db.operation = "SELECT");
        let products = sqlx::query_as::<_, Product>(&self.statements.list)
            .fetch_all(&self.pool)
            .instrument(span)
            .await?;
        Ok(products)
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let span = info_span!("db.query", db.system = "postgresql", db.operation = "SELECT");
        let product = sqlx::query_as::<_, Product>(&self.statements.find)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;
        Ok(product)
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let span = info_span!("db.query", db.system = "postgresql", db.operation = "INSERT");
        let product = sqlx::query_as::<_, Product>(&self.statements.insert)
            .bind(&draft.name)
            .bind(draft.price)
            .bind(draft.availability)
            .fetch_one(&self.pool)
            .instrument(span)
            .await?;
        Ok(product)
    }

    async fn update(
        &self,
        id: i64,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        let span = info_span!("db.query", db.system = "postgresql", db.operation = "UPDATE");
        let product = sqlx::query_as::<_, Product>(&self.statements.update)
            .bind(id)
            .bind(&draft.name)
            .bind(draft.price)
            .bind(draft.availability)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;
        Ok(product)
    }

    async fn toggle_availability(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let span = info_span!("db.query", db.system = "postgresql", db.operation = "UPDATE");
        let product = sqlx::query_as::<_, Product>(&self.statements.toggle)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;
        Ok(product)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let span = info_span!("db.query", db.system = "postgresql", db.operation = "DELETE");
        let result = sqlx::query(&self.statements.delete)
            .bind(id)
            .execute(&self.pool)
            .instrument(span)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        let span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        async {
            let mut conn = self.pool.acquire().await?;
            conn.ping().await
        }
        .instrument(span)
        .await?;
        Ok(())
    }
}
