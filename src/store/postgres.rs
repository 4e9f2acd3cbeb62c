//! PostgreSQL-backed customer store. The customers table lives in a schema named from config (default `cms`).

use super::CustomerStore;
use crate::error::AppError;
use crate::model::Customer;
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const CUSTOMERS_TABLE: &str = "customers";

const COLUMNS: &str = "customer_id, first_name, last_name, email, phone";

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct PgCustomerStore {
    pool: PgPool,
    /// Schema-qualified, quoted table name (e.g. `"cms"."customers"`).
    table: String,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgCustomerStore {
            pool,
            table: format!("{}.{}", quoted(schema), quoted(CUSTOMERS_TABLE)),
        }
    }

    /// Create the schema and customers table if they do not exist.
    pub async fn ensure_table(&self, schema: &str) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                customer_id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                first_name TEXT,
                last_name TEXT,
                email TEXT,
                phone TEXT
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, customer: &Customer) -> Result<Customer, AppError> {
        let sql = format!(
            "INSERT INTO {} (first_name, last_name, email, phone) VALUES ($1, $2, $3, $4) RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert-or-replace at a caller-supplied id, then move the identity sequence past the highest id.
    async fn upsert(&self, customer_id: i32, customer: &Customer) -> Result<Customer, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} ({cols}) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (customer_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone
            RETURNING {cols}
            "#,
            self.table,
            cols = COLUMNS
        );
        tracing::debug!(sql = %sql, customer_id, "query");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(customer_id)
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .fetch_one(&mut *tx)
            .await?;
        let advance = format!(
            "SELECT setval(pg_get_serial_sequence($1, 'customer_id'), GREATEST((SELECT MAX(customer_id) FROM {}), 1))",
            self.table
        );
        sqlx::query(&advance)
            .bind(&self.table)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn save(&self, customer: Customer) -> Result<Customer, AppError> {
        match customer.customer_id {
            Some(id) => self.upsert(id, &customer).await,
            None => self.insert(&customer).await,
        }
    }

    async fn find_by_id(&self, customer_id: i32) -> Result<Option<Customer>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE customer_id = $1", COLUMNS, self.table);
        tracing::debug!(sql = %sql, customer_id, "query");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY customer_id", COLUMNS, self.table);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn delete_by_id(&self, customer_id: i32) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE customer_id = $1", self.table);
        tracing::debug!(sql = %sql, customer_id, "query");
        sqlx::query(&sql).bind(customer_id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into (admin URL on the `postgres` database, target database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let (without_query, query) = match url.split_once('?') {
        Some((head, q)) => (head, format!("?{}", q)),
        None => (url, String::new()),
    };
    let path_start = without_query
        .rfind('/')
        .ok_or_else(|| AppError::Db(sqlx::Error::Configuration("DATABASE_URL: no path".into())))?
        + 1;
    let db_name = without_query.get(path_start..).unwrap_or("").trim();
    let base = without_query.get(..path_start).unwrap_or(without_query);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}
