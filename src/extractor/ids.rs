// Random video identifiers shaped like real ones

use rand::Rng;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

pub const VIDEO_ID_LEN: usize = 11;

/// 11 characters drawn uniformly from the URL-safe base64 alphabet
pub fn random_video_id() -> String {
    let mut rng = rand::thread_rng();
    (0..VIDEO_ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        for _ in 0..100 {
            let id = random_video_id();
            assert_eq!(id.len(), VIDEO_ID_LEN);
            assert!(id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }
}
