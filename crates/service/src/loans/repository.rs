use async_trait::async_trait;

use super::domain::Loan;
use crate::errors::ServiceError;

/// Storage collaborator for loan accounts.
///
/// Implementations enforce uniqueness of `mobile_number` and `loan_number` and
/// report a violation as [`ServiceError::AlreadyExists`].
#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Loan>, ServiceError>;
    async fn find_by_loan_number(&self, loan_number: &str) -> Result<Option<Loan>, ServiceError>;
    /// Insert when `loan_id` is `None`, otherwise update the mutable balance fields.
    async fn save(&self, loan: Loan) -> Result<Loan, ServiceError>;
    /// Fails with [`ServiceError::NotFound`] when no stored row was removed.
    async fn delete(&self, loan: &Loan) -> Result<(), ServiceError>;
}
