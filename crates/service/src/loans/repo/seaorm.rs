use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    DatabaseConnection, DbErr, EntityTrait, SqlErr,
};

use models::loan;
use tracing::warn;

use crate::errors::ServiceError;
use crate::loans::domain::Loan;
use crate::loans::repository::LoanRepository;

pub struct SeaOrmLoanRepository {
    pub db: DatabaseConnection,
}

impl From<loan::Model> for Loan {
    fn from(m: loan::Model) -> Self {
        Loan {
            loan_id: Some(i64::from(m.loan_id)),
            mobile_number: m.mobile_number,
            loan_number: m.loan_number,
            loan_type: m.loan_type,
            total_loan: m.total_loan,
            amount_paid: m.amount_paid,
            outstanding_amount: m.outstanding_amount,
        }
    }
}

/// Row for a first insert; the id is left to the database.
fn insert_model(l: Loan) -> loan::ActiveModel {
    let now = Utc::now().into();
    loan::ActiveModel {
        loan_id: NotSet,
        mobile_number: Set(l.mobile_number),
        loan_number: Set(l.loan_number),
        loan_type: Set(l.loan_type),
        total_loan: Set(l.total_loan),
        amount_paid: Set(l.amount_paid),
        outstanding_amount: Set(l.outstanding_amount),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Row for an update; identity columns stay untouched.
fn update_model(id: i32, l: Loan) -> loan::ActiveModel {
    loan::ActiveModel {
        loan_id: Unchanged(id),
        mobile_number: NotSet,
        loan_number: NotSet,
        loan_type: Set(l.loan_type),
        total_loan: Set(l.total_loan),
        amount_paid: Set(l.amount_paid),
        outstanding_amount: Set(l.outstanding_amount),
        created_at: NotSet,
        updated_at: Set(Utc::now().into()),
    }
}

fn row_id(id: i64) -> Result<i32, ServiceError> {
    i32::try_from(id).map_err(|_| ServiceError::Validation(format!("loan id {} out of range", id)))
}

/// `mobile_number` names the account a unique violation is reported against;
/// the database text only goes to the log.
fn map_db_err(e: DbErr, mobile_number: &str) -> ServiceError {
    if matches!(e, DbErr::RecordNotUpdated) {
        return ServiceError::not_found("loan");
    }
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            warn!(%detail, event = "loan_unique_violation", "storage rejected duplicate loan");
            ServiceError::already_registered(mobile_number)
        }
        _ => ServiceError::Db(e.to_string()),
    }
}

#[async_trait::async_trait]
impl LoanRepository for SeaOrmLoanRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Loan>, ServiceError> {
        let found = loan::find_by_mobile_number(&self.db, mobile_number).await?;
        Ok(found.map(Loan::from))
    }

    async fn find_by_loan_number(&self, loan_number: &str) -> Result<Option<Loan>, ServiceError> {
        let found = loan::find_by_loan_number(&self.db, loan_number).await?;
        Ok(found.map(Loan::from))
    }

    async fn save(&self, l: Loan) -> Result<Loan, ServiceError> {
        let mobile_number = l.mobile_number.clone();
        let saved = match l.loan_id {
            None => insert_model(l).insert(&self.db).await,
            Some(id) => update_model(row_id(id)?, l).update(&self.db).await,
        }
        .map_err(|e| map_db_err(e, &mobile_number))?;
        Ok(saved.into())
    }

    async fn delete(&self, l: &Loan) -> Result<(), ServiceError> {
        let Some(id) = l.loan_id else { return Err(ServiceError::not_found("loan")); };
        let res = loan::Entity::delete_by_id(row_id(id)?)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, &l.mobile_number))?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("loan"));
        }
        Ok(())
    }
}
