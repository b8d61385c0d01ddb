/// Unmask `payload` into `dest`, byte `i` being XORed with `mask[i % 4]`.
///
/// Stops at the shorter of the two slices.
#[inline]
pub fn unmask_into(payload: &[u8], mask: [u8; 4], dest: &mut [u8]) {
    for (i, (out, byte)) in dest.iter_mut().zip(payload).enumerate() {
        *out = byte ^ mask[i & 3];
    }
}
