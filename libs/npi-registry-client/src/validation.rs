//! NPI number validation
//!
//! An NPI is ten digits whose last digit is a Luhn check digit computed over
//! the first nine digits prefixed with the health industry code `80840`.
//! The prefix contributes a constant 24 to the Luhn sum.
//!
//! Validation says nothing about whether a number has been assigned; use
//! [`crate::RegistryClient::get`] for that.

const NPI_LENGTH: usize = 10;
const PREFIX_SUM: u32 = 24;

/// Whether `number` is a well-formed NPI with a matching check digit.
pub fn is_valid_npi(number: &str) -> bool {
    if number.len() != NPI_LENGTH || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let last = number.as_bytes()[NPI_LENGTH - 1] - b'0';
    check_digit(&number[..NPI_LENGTH - 1]) == Some(last)
}

/// Integer form of [`is_valid_npi`].
pub fn is_valid_npi_number(number: u64) -> bool {
    is_valid_npi(&number.to_string())
}

/// Check digit for the first nine digits of an NPI.
///
/// Returns `None` unless `base` is exactly nine ASCII digits.
pub fn check_digit(base: &str) -> Option<u8> {
    if base.len() != NPI_LENGTH - 1 || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let sum: u32 = base
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, digit)| {
            if i % 2 == 0 {
                let doubled = digit * 2;
                doubled / 10 + doubled % 10
            } else {
                digit
            }
        })
        .sum::<u32>()
        + PREFIX_SUM;

    Some(((10 - sum % 10) % 10) as u8)
}
