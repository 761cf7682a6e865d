/// zero the given slice.
///
/// Every byte is written through a volatile store so the compiler cannot
/// elide the wipe of a buffer that is about to be dropped.
pub fn zero(to_zero: &mut [u8]) {
    for byte in to_zero.iter_mut() {
        // `byte` is a valid, aligned and exclusive reference for the
        // whole duration of the write.
        unsafe { ::std::ptr::write_volatile(byte, 0) };
    }
}
