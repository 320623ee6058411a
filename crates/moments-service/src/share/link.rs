//! Share token generation.

/// Number of random bytes in a share token.
const TOKEN_BYTES: usize = 16;

/// Generate an unpredictable share token: 128 random bits as lowercase hex.
pub fn generate_share_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
