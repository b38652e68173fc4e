use chrono::NaiveDateTime;
use uuid::Uuid;

/// Prefix of generated message identifiers.
pub const MESSAGE_ID_PREFIX: &str = "SEPA-";
/// Prefix of generated payment-information identifiers.
pub const PAYMENT_INFO_ID_PREFIX: &str = "PMT-";

fn random_hex(len: usize) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[hex.len() - len..].to_string()
}

/// Generate a message identifier from the creation timestamp plus a random
/// suffix, e.g. "SEPA-20240615-103000-4f9a2c" (27 characters).
pub fn generate_message_id(created_at: NaiveDateTime) -> String {
    format!(
        "{MESSAGE_ID_PREFIX}{}-{}",
        created_at.format("%Y%m%d-%H%M%S"),
        random_hex(6)
    )
}

/// Generate a payment-information identifier, e.g. "PMT-0f3a9b2c41d7e".
pub fn generate_payment_info_id() -> String {
    format!("{PAYMENT_INFO_ID_PREFIX}{}", random_hex(13))
}
