use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                         abcdefghijklmnopqrstuvwxyz\
                         0123456789";

/// Length of session and entity API tokens.
pub const TOKEN_LENGTH: usize = 128;

/// Length of push subscription identifiers.
pub const NOTIF_ID_LENGTH: usize = 64;

/// Generates a random alphanumeric string of `length` characters.
///
/// Uses the thread-local cryptographically secure generator.
pub fn random_string(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
