//! Service layer for loan accounts.
//! - Owns the account lifecycle rules (defaults, existence checks, one account per mobile number).
//! - Talks to storage only through [`loans::repository::LoanRepository`].
//! - Reports domain outcomes as [`errors::ServiceError`] or boolean flags, never raw storage errors.

pub mod errors;
pub mod loans;
#[cfg(test)]
pub mod test_support;
