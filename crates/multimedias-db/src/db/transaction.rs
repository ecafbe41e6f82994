//! Per-item transactions
//!
//! Each selected item of a bulk action is written inside its own transaction,
//! so a host-record reset and the matching publication change land together.

use sqlx::{PgPool, Postgres, Transaction};
use std::ops::{Deref, DerefMut};

/// Open transaction tagged with the operation it belongs to.
///
/// Failures are returned as `sqlx::Error` so callers classify them like any
/// other database failure.
///
/// ```ignore
/// let mut tx = TransactionGuard::begin(pool, "resubmission").await?;
/// sqlx::query("UPDATE media_hosts SET ...").execute(&mut **tx).await?;
/// tx.commit().await?;
/// ```
pub struct TransactionGuard<'a> {
    operation: &'static str,
    transaction: Option<Transaction<'a, Postgres>>,
}

impl<'a> TransactionGuard<'a> {
    pub async fn begin(pool: &'a PgPool, operation: &'static str) -> sqlx::Result<Self> {
        let transaction = pool.begin().await.inspect_err(|e| {
            tracing::error!(operation, error = %e, "Failed to begin transaction");
        })?;
        tracing::debug!(operation, "Transaction started");

        Ok(Self {
            operation,
            transaction: Some(transaction),
        })
    }

    pub async fn commit(mut self) -> sqlx::Result<()> {
        if let Some(tx) = self.transaction.take() {
            tx.commit().await.inspect_err(|e| {
                tracing::error!(
                    operation = self.operation,
                    error = %e,
                    "Failed to commit transaction"
                );
            })?;
            tracing::debug!(operation = self.operation, "Transaction committed");
        }
        Ok(())
    }

    pub async fn rollback(mut self) -> sqlx::Result<()> {
        if let Some(tx) = self.transaction.take() {
            tx.rollback().await.inspect_err(|e| {
                tracing::error!(
                    operation = self.operation,
                    error = %e,
                    "Failed to roll back transaction"
                );
            })?;
            tracing::debug!(operation = self.operation, "Transaction rolled back");
        }
        Ok(())
    }
}

impl<'a> Deref for TransactionGuard<'a> {
    type Target = Transaction<'a, Postgres>;

    fn deref(&self) -> &Self::Target {
        self.transaction
            .as_ref()
            .expect("transaction used after commit or rollback")
    }
}

impl DerefMut for TransactionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.transaction
            .as_mut()
            .expect("transaction used after commit or rollback")
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        // sqlx rolls an unfinished transaction back when it is dropped.
        if self.transaction.is_some() {
            tracing::warn!(
                operation = self.operation,
                "Transaction dropped without commit, rolling back"
            );
        }
    }
}
