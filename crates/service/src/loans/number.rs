use rand::Rng;

/// Smallest and largest 12-digit loan numbers.
const LOAN_NUMBER_MIN: u64 = 100_000_000_000;
const LOAN_NUMBER_MAX: u64 = 999_999_999_999;

/// `prefix` followed by a random 12-digit number with no leading zero.
pub fn generate_loan_number<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    let n: u64 = rng.gen_range(LOAN_NUMBER_MIN..=LOAN_NUMBER_MAX);
    format!("{prefix}{n}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn twelve_digits_after_prefix() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let n = generate_loan_number("", &mut rng);
            assert_eq!(n.len(), 12);
            assert!(n.bytes().all(|b| b.is_ascii_digit()));
            assert_ne!(n.as_bytes()[0], b'0');
        }
        let p = generate_loan_number("LN-", &mut rng);
        assert!(p.starts_with("LN-"));
        assert_eq!(p.len(), 15);
    }
}
