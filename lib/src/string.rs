/// Copy `count` bytes from `src` into the front of `dst`.
///
/// The count is clamped to the shorter of the two slices, so a fixed-size
/// copy into an undersized buffer truncates instead of panicking. Returns
/// the number of bytes copied.
#[inline]
pub fn copy_bytes(dst: &mut [u8], src: &[u8], count: usize) -> usize {
    let n = count.min(dst.len()).min(src.len());
    dst[..n].copy_from_slice(&src[..n]);
    n
}

/// Extract a NUL-padded byte array as a `&str`.
///
/// Scans for the first NUL byte (or end of slice) and interprets the
/// prefix as UTF-8. Returns `"<invalid>"` if the bytes are not valid
/// UTF-8, or `""` if the buffer starts with NUL / is empty.
#[inline]
pub fn bytes_as_str(buf: &[u8]) -> &str {
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    core::str::from_utf8(&buf[..len]).unwrap_or("<invalid>")
}
