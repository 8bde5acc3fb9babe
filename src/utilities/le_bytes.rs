use super::ct::{ct_u32_eq, ct_u32_lt};

/// Given two integers `a` and `b` of the same length represented as little
/// endian bytes, return `0xFF..FF` if `a > b` and zero otherwise. Every byte
/// of both inputs is read.
pub fn le_bytes_ct_gt(a: &[u8], b: &[u8]) -> u32 {
    debug_assert_eq!(a.len(), b.len());

    let mut gt = 0u32;
    let mut undecided = u32::MAX;
    for (x, y) in a.iter().zip(b.iter()).rev() {
        let (x, y) = (*x as u32, *y as u32);
        gt |= undecided & ct_u32_lt(y, x);
        undecided &= ct_u32_eq(x, y);
    }
    gt
}

/// Reverse a little endian byte string into big endian order.
pub fn le_to_be_bytes(a: &[u8]) -> Vec<u8> {
    a.iter().rev().copied().collect()
}

#[cfg(test)]
mod test_le_bytes {
    use super::*;

    #[test]
    fn test_gt() {
        assert_eq!(le_bytes_ct_gt(&[0, 1], &[255, 0]), u32::MAX);
        assert_eq!(le_bytes_ct_gt(&[255, 0], &[0, 1]), 0);
        assert_eq!(le_bytes_ct_gt(&[4, 4, 4], &[4, 4, 4]), 0);
        assert_eq!(le_bytes_ct_gt(&[5, 4, 4], &[4, 4, 4]), u32::MAX);
        assert_eq!(le_bytes_ct_gt(&[3, 4, 4], &[4, 4, 4]), 0);
    }

    #[test]
    fn test_reverse() {
        assert_eq!(le_to_be_bytes(&[1, 2, 3]), vec![3, 2, 1]);
    }
}
