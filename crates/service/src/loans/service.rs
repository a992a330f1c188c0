use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use models::loan::{validate_balances, validate_loan_type, validate_mobile_number};

use super::domain::{Loan, UpdateLoanInput};
use super::number::generate_loan_number;
use super::repository::LoanRepository;
use crate::errors::ServiceError;

/// Attempts at drawing an unused loan number before giving up.
const MAX_LOAN_NUMBER_ATTEMPTS: usize = 5;

/// Values stamped on every new account.
#[derive(Debug, Clone)]
pub struct LoanDefaults {
    pub loan_type: String,
    pub total_loan: i32,
    pub loan_number_prefix: String,
}

impl Default for LoanDefaults {
    fn default() -> Self {
        Self { loan_type: "Home Loan".into(), total_loan: 100_000, loan_number_prefix: String::new() }
    }
}

impl From<&configs::LoansConfig> for LoanDefaults {
    fn from(cfg: &configs::LoansConfig) -> Self {
        Self {
            loan_type: cfg.loan_type.clone(),
            total_loan: cfg.total_loan,
            loan_number_prefix: cfg.loan_number_prefix.clone(),
        }
    }
}

/// Loan account lifecycle: create, fetch, update and delete by mobile number.
///
/// Stateless apart from its collaborators; every call round-trips to the repository.
pub struct LoanService {
    repo: Arc<dyn LoanRepository>,
    defaults: LoanDefaults,
}

impl LoanService {
    pub fn new(repo: Arc<dyn LoanRepository>, defaults: LoanDefaults) -> Self { Self { repo, defaults } }

    pub fn defaults(&self) -> &LoanDefaults { &self.defaults }

    /// Open a new account for `mobile_number` with the configured defaults.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::loans::{memory::InMemoryLoanRepository, LoanDefaults, LoanService};
    /// let svc = LoanService::new(Arc::new(InMemoryLoanRepository::new()), LoanDefaults::default());
    /// let loan = tokio_test::block_on(svc.create("9876543210")).unwrap();
    /// assert_eq!(loan.loan_type, "Home Loan");
    /// assert_eq!(loan.outstanding_amount, loan.total_loan);
    /// assert!(tokio_test::block_on(svc.create("9876543210")).is_err());
    /// ```
    #[instrument(skip(self))]
    pub async fn create(&self, mobile_number: &str) -> Result<Loan, ServiceError> {
        validate_mobile_number(mobile_number)?;
        if self.repo.find_by_mobile_number(mobile_number).await?.is_some() {
            return Err(ServiceError::already_registered(mobile_number));
        }

        let loan_number = self.allocate_loan_number().await?;
        let fresh = Loan::open(mobile_number, loan_number, &self.defaults.loan_type, self.defaults.total_loan);
        let saved = self.repo.save(fresh).await?;
        info!(loan_number = %saved.loan_number, total_loan = saved.total_loan, event = "loan_created", "loan account created");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, mobile_number: &str) -> Result<Loan, ServiceError> {
        validate_mobile_number(mobile_number)?;
        self.repo
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Loan not found with the given input data mobileNumber : '{}'", mobile_number)))
    }

    /// Overwrite the balances of the account named by `input.loan_number`.
    ///
    /// Returns `Ok(false)` when no such account exists. The outstanding amount is
    /// always recomputed as `total_loan - amount_paid`.
    #[instrument(skip(self, input), fields(loan_number = %input.loan_number))]
    pub async fn update(&self, input: UpdateLoanInput) -> Result<bool, ServiceError> {
        if let Some(m) = input.mobile_number.as_deref().filter(|m| !m.is_empty()) {
            validate_mobile_number(m)?;
        }
        if input.loan_number.trim().is_empty() {
            return Err(ServiceError::Validation("loan number required".into()));
        }
        validate_loan_type(&input.loan_type)?;
        validate_balances(input.total_loan, input.amount_paid)?;

        let Some(mut existing) = self.repo.find_by_loan_number(&input.loan_number).await? else {
            warn!(event = "loan_update_missing", "no loan with this loan number");
            return Ok(false);
        };

        let outstanding = input.total_loan - input.amount_paid;
        if let Some(claimed) = input.outstanding_amount.filter(|c| *c != outstanding) {
            debug!(claimed, outstanding, "ignoring inconsistent outstanding amount from caller");
        }
        if let Some(m) = input.mobile_number.as_deref().filter(|m| !m.is_empty() && *m != existing.mobile_number) {
            debug!(requested = %m, "mobile number is immutable; keeping stored value");
        }

        existing.loan_type = input.loan_type;
        existing.total_loan = input.total_loan;
        existing.amount_paid = input.amount_paid;
        existing.outstanding_amount = outstanding;

        match self.repo.save(existing).await {
            Ok(saved) => {
                info!(amount_paid = saved.amount_paid, outstanding_amount = saved.outstanding_amount, event = "loan_updated", "loan account updated");
                Ok(true)
            }
            // deleted between lookup and write
            Err(ServiceError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Remove the account for `mobile_number`. Returns `Ok(false)` if there was none.
    #[instrument(skip(self))]
    pub async fn delete(&self, mobile_number: &str) -> Result<bool, ServiceError> {
        validate_mobile_number(mobile_number)?;
        let Some(existing) = self.repo.find_by_mobile_number(mobile_number).await? else {
            warn!(event = "loan_delete_missing", "no loan for this mobile number");
            return Ok(false);
        };
        match self.repo.delete(&existing).await {
            Ok(()) => {
                info!(loan_number = %existing.loan_number, event = "loan_deleted", "loan account deleted");
                Ok(true)
            }
            // removed between lookup and delete
            Err(ServiceError::NotFound(_)) => {
                warn!(event = "loan_delete_missing", "loan vanished before delete");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn allocate_loan_number(&self) -> Result<String, ServiceError> {
        for _ in 0..MAX_LOAN_NUMBER_ATTEMPTS {
            let candidate = generate_loan_number(&self.defaults.loan_number_prefix, &mut rand::thread_rng());
            if self.repo.find_by_loan_number(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            debug!(%candidate, "loan number collision, drawing again");
        }
        Err(ServiceError::Db("could not allocate a unique loan number".into()))
    }
}
