use rand::Rng;

/// Generates a random alphanumeric secret of the given length,
/// used for caregiver share codes.
pub fn create_random_secret(secret_len: usize) -> String {
    let rng = rand::thread_rng();
    rng.sample_iter(&rand::distributions::Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_secret_of_given_length() {
        for len in [0, 1, 8, 30] {
            assert_eq!(create_random_secret(len).len(), len);
        }
    }

    #[test]
    fn it_creates_distinct_secrets() {
        assert_ne!(create_random_secret(16), create_random_secret(16));
    }
}
