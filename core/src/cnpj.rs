//! CNPJ registration numbers: generation and mod-11 check digits.
//!
//! Layout: 12 base digits followed by two check digits,
//! formatted as `DD.DDD.DDD/DDDD-DD`.

use crate::rng::StreamRng;

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weighted mod-11 check digit over the leading `weights.len()` digits.
pub fn check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let total: u32 = digits
        .iter()
        .zip(weights)
        .map(|(d, w)| u32::from(*d) * w)
        .sum();
    let remainder = total % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

/// Append both check digits to 12 base digits.
pub fn complete(base: [u8; 12]) -> [u8; 14] {
    let mut digits = [0u8; 14];
    digits[..12].copy_from_slice(&base);
    digits[12] = check_digit(&digits[..12], &FIRST_WEIGHTS);
    digits[13] = check_digit(&digits[..13], &SECOND_WEIGHTS);
    digits
}

/// Draw a fresh, valid, formatted CNPJ.
pub fn generate(rng: &mut StreamRng) -> String {
    let mut base = [0u8; 12];
    for d in base.iter_mut() {
        *d = rng.next_u64_below(10) as u8;
    }
    format(&complete(base))
}

pub fn format(d: &[u8; 14]) -> String {
    format!(
        "{}{}.{}{}{}.{}{}{}/{}{}{}{}-{}{}",
        d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7], d[8], d[9], d[10], d[11], d[12], d[13]
    )
}

/// Strip punctuation and return the 14 digits, if that is what's there.
pub fn parse(formatted: &str) -> Option<[u8; 14]> {
    let digits: Vec<u8> = formatted
        .chars()
        .filter(|c| !matches!(c, '.' | '/' | '-'))
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<_>>()?;
    digits.try_into().ok()
}

/// Recompute both check digits from the first 12 and compare.
pub fn is_valid(formatted: &str) -> bool {
    let Some(digits) = parse(formatted) else {
        return false;
    };
    let mut base = [0u8; 12];
    base.copy_from_slice(&digits[..12]);
    complete(base) == digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn known_number_checks_out() {
        // 11.222.333/0001-81 is the canonical documentation example.
        assert!(is_valid("11.222.333/0001-81"));
        assert!(!is_valid("11.222.333/0001-82"));
    }

    #[test]
    fn low_remainder_yields_zero_digit() {
        // All-zero base: weighted sum 0, remainder 0 => digit 0.
        assert_eq!(complete([0; 12])[12..], [0, 0]);
    }

    #[test]
    fn generated_numbers_are_valid_and_well_formed() {
        let mut rng = RngBank::new(2024).for_stream(StreamSlot::Population);
        for _ in 0..500 {
            let cnpj = generate(&mut rng);
            assert_eq!(cnpj.len(), 18, "bad length: {cnpj}");
            assert_eq!(&cnpj[2..3], ".");
            assert_eq!(&cnpj[6..7], ".");
            assert_eq!(&cnpj[10..11], "/");
            assert_eq!(&cnpj[15..16], "-");
            assert!(is_valid(&cnpj), "checksum mismatch: {cnpj}");
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(!is_valid(""));
        assert!(!is_valid("12.345.678/0001"));
        assert!(!is_valid("AB.CDE.FGH/IJKL-MN"));
    }
}
