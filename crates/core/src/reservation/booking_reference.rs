use rand::Rng;

const HEX_CHARS: &[u8] = b"0123456789ABCDEF";

/// Generates a booking reference of the form `HIVE-XXXXXXXX`, 8 uppercase
/// hex characters. Uniqueness is enforced by the storage layer's unique
/// index; callers regenerate on collision.
pub fn generate_booking_reference() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..8)
        .map(|_| HEX_CHARS[rng.gen_range(0..HEX_CHARS.len())] as char)
        .collect();
    format!("HIVE-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_expected_shape() {
        let r = generate_booking_reference();
        assert_eq!(r.len(), 13);
        assert!(r.starts_with("HIVE-"));
        assert!(r[5..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }
}
