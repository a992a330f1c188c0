use serde::{Deserialize, Serialize};

/// A borrower's loan account.
///
/// `loan_id` is `None` until storage assigns it on first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<i64>,
    #[serde(alias = "phoneNumber")]
    pub mobile_number: String,
    pub loan_number: String,
    pub loan_type: String,
    #[serde(alias = "totalLoanAmount")]
    pub total_loan: i32,
    pub amount_paid: i32,
    pub outstanding_amount: i32,
}

impl Loan {
    /// Fresh account: nothing paid, everything outstanding.
    pub fn open(mobile_number: &str, loan_number: String, loan_type: &str, total_loan: i32) -> Self {
        Self {
            loan_id: None,
            mobile_number: mobile_number.to_string(),
            loan_number,
            loan_type: loan_type.to_string(),
            total_loan,
            amount_paid: 0,
            outstanding_amount: total_loan,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.outstanding_amount == self.total_loan - self.amount_paid
    }
}

/// Update payload. The target is identified by `loan_number`.
///
/// `outstanding_amount` is accepted for compatibility but always recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoanInput {
    #[serde(default, alias = "phoneNumber")]
    pub mobile_number: Option<String>,
    pub loan_number: String,
    pub loan_type: String,
    #[serde(alias = "totalLoanAmount")]
    pub total_loan: i32,
    pub amount_paid: i32,
    #[serde(default)]
    pub outstanding_amount: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_account_is_consistent() {
        let l = Loan::open("9876543210", "100000000001".into(), "Home Loan", 100_000);
        assert_eq!(l.amount_paid, 0);
        assert_eq!(l.outstanding_amount, 100_000);
        assert!(l.is_consistent());
    }

    #[test]
    fn update_input_accepts_aliases() {
        let input: UpdateLoanInput = serde_json::from_value(serde_json::json!({
            "phoneNumber": "9876543210",
            "loanNumber": "100000000001",
            "loanType": "Home Loan",
            "totalLoanAmount": 100000,
            "amountPaid": 20000
        }))
        .unwrap();
        assert_eq!(input.mobile_number.as_deref(), Some("9876543210"));
        assert_eq!(input.total_loan, 100_000);
        assert_eq!(input.outstanding_amount, None);
    }

    #[test]
    fn loan_serializes_camel_case() {
        let mut l = Loan::open("9876543210", "100000000001".into(), "Home Loan", 100_000);
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["mobileNumber"], "9876543210");
        assert_eq!(json["totalLoan"], 100000);
        assert!(json.get("loanId").is_none());
        l.loan_id = Some(7);
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["loanId"], 7);
    }
}
