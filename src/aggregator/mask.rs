//! Conversions between textual cpumasks, integer masks and CPU lists.
//!
//! Trace events print cpumasks as hex, split into 32-bit comma separated
//! words on machines with more than 32 CPUs (e.g. "00000000,000000f0").
//! Masks are held as a little-endian vector of 64-bit words so any CPU
//! count fits.

use crate::utils::error::MaskError;
use std::fmt;

/// Hex digits per 64-bit word
const WORD_DIGITS: usize = 16;

/// Integer value of a cpumask, of any width
///
/// **Public** - bit `i` set means CPU `i` belongs to the mask
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CpuMask {
    /// Least significant word first, no trailing zero words
    words: Vec<u64>,
}

impl CpuMask {
    fn from_words(mut words: Vec<u64>) -> Self {
        while words.last() == Some(&0) {
            words.pop();
        }
        Self { words }
    }

    /// Number of CPUs in the mask
    pub fn count(&self) -> u32 {
        self.words.iter().map(|word| word.count_ones()).sum()
    }

    /// Whether the two masks share at least one CPU
    pub fn intersects(&self, other: &CpuMask) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .any(|(a, b)| a & b != 0)
    }
}

impl From<u64> for CpuMask {
    fn from(value: u64) -> Self {
        Self::from_words(vec![value])
    }
}

/// Lowercase hex without leading zeros or separators
impl fmt::Display for CpuMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((high, rest)) = self.words.split_last() else {
            return write!(f, "0");
        };
        write!(f, "{:x}", high)?;
        for word in rest.iter().rev() {
            write!(f, "{:016x}", word)?;
        }
        Ok(())
    }
}

/// Parse a textual hex cpumask into its integer value
///
/// # Errors
/// * `MaskError::InvalidFormat` - text is not hex once commas are removed
pub fn mask_to_int(mask: &str) -> Result<CpuMask, MaskError> {
    let invalid = || MaskError::InvalidFormat(mask.to_string());

    let digits: String = mask.chars().filter(|&c| c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let words = digits
        .as_bytes()
        .rchunks(WORD_DIGITS)
        .map(|chunk| {
            let chunk = std::str::from_utf8(chunk).map_err(|_| invalid())?;
            u64::from_str_radix(chunk, 16).map_err(|_| invalid())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CpuMask::from_words(words))
}

/// Number of CPUs set in a textual cpumask
pub fn count_set_bits(mask: &str) -> Result<u32, MaskError> {
    Ok(mask_to_int(mask)?.count())
}

/// Build the mask with bit `i` set for every CPU `i`
pub fn cpu_list_to_mask<I>(cpus: I) -> CpuMask
where
    I: IntoIterator<Item = u32>,
{
    let mut words: Vec<u64> = Vec::new();

    for cpu in cpus {
        let word = (cpu / u64::BITS) as usize;
        if words.len() <= word {
            words.resize(word + 1, 0);
        }
        words[word] |= 1u64 << (cpu % u64::BITS);
    }

    CpuMask::from_words(words)
}

/// CPUs present in a mask, lowest first
pub fn mask_to_cpu_list(mask: &CpuMask) -> Vec<u32> {
    mask.words
        .iter()
        .zip((0u32..).step_by(u64::BITS as usize))
        .flat_map(|(&word, base)| {
            (0..u64::BITS)
                .filter(move |&bit| word & (1u64 << bit) != 0)
                .map(move |bit| base + bit)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_to_int() {
        assert_eq!(mask_to_int("0000000f"), Ok(CpuMask::from(15u64)));
        assert_eq!(mask_to_int("00000001,00000000"), Ok(CpuMask::from(1u64 << 32)));
    }

    #[test]
    fn test_mask_to_int_wider_than_64_cpus() {
        let mask = mask_to_int("00000001,00000000,00000000").unwrap();
        assert_eq!(mask_to_cpu_list(&mask), vec![64]);
        assert_eq!(mask.to_string(), "10000000000000000");
    }

    #[test]
    fn test_mask_to_int_leading_zero_words() {
        assert_eq!(mask_to_int("00000000,00000000,0000000f"), mask_to_int("f"));
        assert_eq!(mask_to_int("00000000"), Ok(CpuMask::default()));
    }

    #[test]
    fn test_mask_to_int_rejects_garbage() {
        assert_eq!(
            mask_to_int("bad-mask"),
            Err(MaskError::InvalidFormat("bad-mask".to_string()))
        );
        assert!(mask_to_int("").is_err());
        assert!(mask_to_int(",").is_err());
        assert!(mask_to_int("+f").is_err());
    }

    #[test]
    fn test_count_set_bits_ignores_commas() {
        assert_eq!(count_set_bits("000000f0"), Ok(4));
        assert_eq!(count_set_bits("0,0,0,0,f,0"), Ok(4));
        assert_eq!(count_set_bits("ffffffff,ffffffff,ffffffff"), Ok(96));
    }

    #[test]
    fn test_cpu_list_to_mask() {
        assert_eq!(cpu_list_to_mask([]), CpuMask::default());
        assert_eq!(cpu_list_to_mask([0, 1, 2, 3]), CpuMask::from(0xfu64));
        assert_eq!(cpu_list_to_mask([4, 4, 7]), CpuMask::from(0x90u64));
    }

    #[test]
    fn test_cpu_index_past_first_word() {
        let mask = cpu_list_to_mask([64]);
        assert!(!mask.intersects(&CpuMask::from(1u64)));
        assert_eq!(mask, mask_to_int("1,00000000,00000000").unwrap());
    }

    #[test]
    fn test_mask_to_cpu_list() {
        assert_eq!(mask_to_cpu_list(&CpuMask::default()), Vec::<u32>::new());
        assert_eq!(mask_to_cpu_list(&CpuMask::from(0xf0u64)), vec![4, 5, 6, 7]);
        assert_eq!(mask_to_cpu_list(&CpuMask::from(1u64 << 63)), vec![63]);
    }

    #[test]
    fn test_cpu_list_roundtrip_is_sorted() {
        let cpus = [9, 2, 133, 0, 64, 5];
        assert_eq!(
            mask_to_cpu_list(&cpu_list_to_mask(cpus)),
            vec![0, 2, 5, 9, 64, 133]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CpuMask::default().to_string(), "0");
        assert_eq!(mask_to_int("000000f0").unwrap().to_string(), "f0");
    }
}
