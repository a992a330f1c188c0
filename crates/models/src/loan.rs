use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Length of a mobile number accepted by the loans service.
pub const MOBILE_NUMBER_LEN: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub loan_id: i32,
    #[sea_orm(unique)]
    pub mobile_number: String,
    #[sea_orm(unique)]
    pub loan_number: String,
    pub loan_type: String,
    pub total_loan: i32,
    pub amount_paid: i32,
    pub outstanding_amount: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Exactly ten ASCII digits; the empty string is rejected.
pub fn validate_mobile_number(m: &str) -> Result<(), errors::ModelError> {
    if m.len() != MOBILE_NUMBER_LEN || !m.bytes().all(|b| b.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("Mobile number must be 10 digits".into()));
    }
    Ok(())
}

pub fn validate_loan_type(t: &str) -> Result<(), errors::ModelError> {
    if t.trim().is_empty() {
        return Err(errors::ModelError::Validation("loan type required".into()));
    }
    if t.len() > 100 {
        return Err(errors::ModelError::Validation("loan type must be at most 100 characters".into()));
    }
    Ok(())
}

/// Amounts are non-negative and the paid amount never exceeds the total.
pub fn validate_balances(total_loan: i32, amount_paid: i32) -> Result<(), errors::ModelError> {
    if total_loan < 0 {
        return Err(errors::ModelError::Validation("total loan must be >= 0".into()));
    }
    if amount_paid < 0 {
        return Err(errors::ModelError::Validation("amount paid must be >= 0".into()));
    }
    if amount_paid > total_loan {
        return Err(errors::ModelError::Validation("amount paid must not exceed total loan".into()));
    }
    Ok(())
}

pub async fn find_by_mobile_number(db: &DatabaseConnection, mobile_number: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::MobileNumber.eq(mobile_number))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_loan_number(db: &DatabaseConnection, loan_number: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::LoanNumber.eq(loan_number))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, Set};

    #[test]
    fn mobile_number_must_be_ten_digits() {
        assert!(validate_mobile_number("9876543210").is_ok());
        assert!(validate_mobile_number("").is_err());
        assert!(validate_mobile_number("987654321").is_err());
        assert!(validate_mobile_number("98765432101").is_err());
        assert!(validate_mobile_number("98765x3210").is_err());
        // non-ASCII digits are not accepted
        assert!(validate_mobile_number("٩٨٧٦٥٤٣٢١٠").is_err());
    }

    #[test]
    fn balances_are_checked() {
        assert!(validate_balances(100_000, 0).is_ok());
        assert!(validate_balances(100_000, 100_000).is_ok());
        assert!(validate_balances(100_000, 100_001).is_err());
        assert!(validate_balances(-1, 0).is_err());
        assert!(validate_balances(10, -1).is_err());
    }

    #[test]
    fn loan_type_is_required() {
        assert!(validate_loan_type("Home Loan").is_ok());
        assert!(validate_loan_type("   ").is_err());
    }

    #[tokio::test]
    async fn finders_hit_unique_columns() -> anyhow::Result<()> {
        let db = crate::db::connect_in_memory().await?;
        let now = Utc::now().into();
        let am = ActiveModel {
            mobile_number: Set("9876543210".into()),
            loan_number: Set("100000000001".into()),
            loan_type: Set("Home Loan".into()),
            total_loan: Set(100_000),
            amount_paid: Set(0),
            outstanding_amount: Set(100_000),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = am.insert(&db).await?;
        assert!(inserted.loan_id > 0);

        let by_mobile = find_by_mobile_number(&db, "9876543210").await?.expect("by mobile");
        assert_eq!(by_mobile.loan_number, "100000000001");
        let by_number = find_by_loan_number(&db, "100000000001").await?.expect("by loan number");
        assert_eq!(by_number.loan_id, inserted.loan_id);
        assert!(find_by_mobile_number(&db, "1111111111").await?.is_none());

        // the unique index rejects a second account for the same number
        let dup = ActiveModel {
            mobile_number: Set("9876543210".into()),
            loan_number: Set("100000000002".into()),
            loan_type: Set("Home Loan".into()),
            total_loan: Set(100_000),
            amount_paid: Set(0),
            outstanding_amount: Set(100_000),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        assert!(dup.insert(&db).await.is_err());
        Ok(())
    }
}
