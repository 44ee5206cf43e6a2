/// Order used when a source gives none
pub const DEFAULT_DIMENSION_ORDER: &str = "XYCZT";

/// Letters appended, in this order, when missing from a raw order
const PREFERENCE: [char; 5] = ['X', 'Y', 'C', 'Z', 'T'];

/// Normalize an arbitrary order string into a permutation of `XYZCT`.
///
/// Letters are uppercased, characters outside `XYZCT` are dropped and only
/// the first occurrence of each letter is kept. Missing letters are then
/// appended in `X, Y, C, Z, T` order, so an empty input gives `"XYCZT"`.
pub fn canonicalize_dimension_order(raw: &str) -> String {
    let mut order = String::with_capacity(5);
    for c in raw.chars().map(|c| c.to_ascii_uppercase()) {
        if PREFERENCE.contains(&c) && !order.contains(c) {
            order.push(c);
        }
    }
    for c in PREFERENCE {
        if !order.contains(c) {
            order.push(c);
        }
    }
    order
}

/// True if `order` contains each of `X, Y, Z, C, T` exactly once and nothing else
pub fn is_valid_dimension_order(order: &str) -> bool {
    order.len() == 5 && PREFERENCE.iter().all(|c| order.matches(*c).count() == 1)
}

/// Force `X` and `Y` to the front of a canonical order.
///
/// The schema only admits orders beginning with `XY`; the relative order of
/// Z, C and T is kept.
pub fn ome_dimension_order(order: &str) -> String {
    let canonical = canonicalize_dimension_order(order);
    let rest: String = canonical.chars().filter(|c| *c != 'X' && *c != 'Y').collect();
    format!("XY{}", rest)
}
