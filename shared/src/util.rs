/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a human-facing order number: `ORD-<unix_ms>-<suffix>`.
///
/// The suffix is 12 random bits (4096 values per millisecond), rendered in
/// decimal. Callers treat the result as an opaque key; global uniqueness is
/// enforced by the store's order-number index, which asks for a fresh number
/// on the rare collision.
pub fn generate_order_number() -> String {
    use rand::Rng;
    let suffix: u16 = rand::thread_rng().gen_range(0..0x1000);
    format!("ORD-{}-{}", now_millis(), suffix)
}
