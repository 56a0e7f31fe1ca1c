//! Pure checksum functions for South African identity numbers.
//!
//! Both functions are zero-allocation: they operate directly on the byte slice
//! of the input and never panic, whatever the input.
//!
//! # Algorithm
//!
//! Positions are numbered from 0, left to right. Even positions carry weight 1,
//! odd positions weight 2. Each weighted digit above 9 is folded into a single
//! digit by summing its two decimal digits (`14` becomes `1 + 4 = 5`). The
//! identity number is valid when the folded sum is a multiple of 10.

/// Number of digits consumed by [`rsa_id_checksum`].
const CHECKED_LEN: usize = 13;

/// Verifies the mod-10 checksum over all 13 digits of an identity number.
///
/// Returns `false` for input that is not exactly 13 ASCII digits, so it is
/// safe on raw user input; the validation engine still runs the structural
/// gate first so it can report *why* a number failed.
///
/// # Examples
///
/// ```
/// use rsaid_core::check_digits::rsa_id_checksum;
///
/// assert!(rsa_id_checksum("6712272244082"));
///
/// // Corrupting the last digit invalidates the check.
/// assert!(!rsa_id_checksum("6712272244083"));
/// ```
pub fn rsa_id_checksum(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() != CHECKED_LEN {
        return false;
    }
    let mut sum: u32 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        if !byte.is_ascii_digit() {
            return false;
        }
        sum += weighted_digit(i, u32::from(byte - b'0'));
    }
    sum % 10 == 0
}

/// Computes the final digit that makes a 12-digit body pass [`rsa_id_checksum`].
///
/// Returns `None` unless `body` is exactly 12 ASCII digits. The final position
/// (index 12) is even, so it carries weight 1 and the required digit is simply
/// the amount needed to reach the next multiple of 10.
///
/// # Examples
///
/// ```
/// use rsaid_core::check_digits::check_digit;
///
/// assert_eq!(check_digit("671227224408"), Some(2));
/// assert_eq!(check_digit("67122722440"), None);
/// ```
pub fn check_digit(body: &str) -> Option<u8> {
    let bytes = body.as_bytes();
    if bytes.len() != CHECKED_LEN - 1 {
        return None;
    }
    let mut sum: u32 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        if !byte.is_ascii_digit() {
            return None;
        }
        sum += weighted_digit(i, u32::from(byte - b'0'));
    }
    u8::try_from((10 - sum % 10) % 10).ok()
}

/// Applies the position weight to `digit` and folds two-digit products.
fn weighted_digit(position: usize, digit: u32) -> u32 {
    let multiplier = if position % 2 == 0 { 1 } else { 2 };
    let product = digit * multiplier;
    if product > 9 {
        product / 10 + product % 10
    } else {
        product
    }
}
