//! Process-local loan storage.
//!
//! Backs `storage.backend = "memory"` and tests. Uniqueness checks run under the
//! same lock as the write, so concurrent creates for one mobile number admit
//! exactly one row.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::domain::Loan;
use super::repository::LoanRepository;
use crate::errors::ServiceError;

#[derive(Default)]
pub struct InMemoryLoanRepository {
    state: Mutex<MemState>,
}

#[derive(Default)]
struct MemState {
    next_id: i64,
    rows: BTreeMap<i64, Loan>,
}

impl MemState {
    /// A stored row already holds `loan`'s mobile number or loan number.
    fn conflicts(&self, loan: &Loan) -> bool {
        self.rows
            .values()
            .filter(|r| r.loan_id != loan.loan_id)
            .any(|r| r.mobile_number == loan.mobile_number || r.loan_number == loan.loan_number)
    }
}

impl InMemoryLoanRepository {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> Result<MutexGuard<'_, MemState>, ServiceError> {
        self.state.lock().map_err(|_| ServiceError::Db("loan store lock poisoned".into()))
    }

    /// All stored rows ordered by id.
    pub fn snapshot(&self) -> Result<Vec<Loan>, ServiceError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }
}

#[async_trait]
impl LoanRepository for InMemoryLoanRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Loan>, ServiceError> {
        let state = self.lock()?;
        Ok(state.rows.values().find(|r| r.mobile_number == mobile_number).cloned())
    }

    async fn find_by_loan_number(&self, loan_number: &str) -> Result<Option<Loan>, ServiceError> {
        let state = self.lock()?;
        Ok(state.rows.values().find(|r| r.loan_number == loan_number).cloned())
    }

    async fn save(&self, mut loan: Loan) -> Result<Loan, ServiceError> {
        let mut state = self.lock()?;
        match loan.loan_id {
            None => {
                if state.conflicts(&loan) {
                    return Err(ServiceError::already_registered(&loan.mobile_number));
                }
                state.next_id += 1;
                let id = state.next_id;
                loan.loan_id = Some(id);
                state.rows.insert(id, loan.clone());
                Ok(loan)
            }
            Some(id) => {
                let existing = state.rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("loan"))?;
                // identity columns are immutable once stored
                existing.loan_type = loan.loan_type;
                existing.total_loan = loan.total_loan;
                existing.amount_paid = loan.amount_paid;
                existing.outstanding_amount = loan.outstanding_amount;
                Ok(existing.clone())
            }
        }
    }

    async fn delete(&self, loan: &Loan) -> Result<(), ServiceError> {
        let mut state = self.lock()?;
        loan.loan_id
            .and_then(|id| state.rows.remove(&id))
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("loan"))
    }
}
