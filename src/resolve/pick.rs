use rand_chacha::rand_core::RngCore;

/// Pick one element uniformly at random. `None` for an empty slice.
pub fn pick<'a, T, R: RngCore + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(pick_index(rng, items.len()))
}

// Draws at or above the last whole multiple of `len` are redrawn.
fn pick_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    let len = len as u64;
    let zone = u64::MAX - (u64::MAX % len);
    loop {
        let v = rng.next_u64();
        if v < zone {
            return (v % len) as usize;
        }
    }
}
