//! Reflected binary Gray code

/// `index`-th Gray code word
#[inline]
pub fn gray_code(index: usize) -> usize {
    index ^ (index >> 1)
}

/// First `count` Gray code words; consecutive words differ in one bit
pub fn gray_code_sequence(count: usize) -> Vec<usize> {
    (0..count).map(gray_code).collect()
}

/// Position of the only bit in which `a` and `b` differ
///
/// Returns `None` when they are equal or differ in more than one bit.
#[inline]
pub fn changed_bit(a: usize, b: usize) -> Option<usize> {
    let difference = a ^ b;
    difference
        .is_power_of_two()
        .then(|| difference.trailing_zeros() as usize)
}
