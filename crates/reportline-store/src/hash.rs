//! Blake3 hashing of subgroup cell grids

/// Hash a cell grid. Cell and row boundaries are part of the hash, so
/// `[["ab"]]` and `[["a", "b"]]` differ.
pub fn hash_grid(cells: &[Vec<String>]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    for row in cells {
        for cell in row {
            hasher.update(&(cell.len() as u64).to_le_bytes());
            hasher.update(cell.as_bytes());
        }
        hasher.update(b"\x1e");
    }
    hasher.finalize()
}

/// Return the first 8 hex characters of a blake3 hash.
pub fn short_hash(hash: &blake3::Hash) -> String {
    hash.to_hex()[..8].to_string()
}
