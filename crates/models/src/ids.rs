//! Document-style identifiers: 24 lowercase hex characters encoding a 4-byte
//! big-endian unix timestamp followed by 8 random bytes.

use std::fmt::Write;

use rand::RngCore;

pub const OBJECT_ID_LEN: usize = 24;

/// Generate a fresh identifier.
pub fn new_object_id() -> String {
    let secs = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    rand::thread_rng().fill_bytes(&mut bytes[4..]);
    bytes.iter().fold(String::with_capacity(OBJECT_ID_LEN), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

/// Whether `id` has the identifier shape (case-insensitive hex).
pub fn is_object_id(id: &str) -> bool {
    id.len() == OBJECT_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_well_formed_and_distinct() {
        let a = new_object_id();
        let b = new_object_id();
        assert!(is_object_id(&a), "{a}");
        assert_eq!(a.len(), 24);
        assert!(a.chars().all(|c| !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }

    #[test]
    fn shape_check() {
        assert!(is_object_id("507f1f77bcf86cd799439011"));
        assert!(is_object_id("507F1F77BCF86CD799439011"));
        assert!(!is_object_id("507f1f77bcf86cd79943901"));
        assert!(!is_object_id("507f1f77bcf86cd79943901z"));
        assert!(!is_object_id(""));
    }
}
