/// Keeps only the ASCII digits of a phone cell. The result may be empty.
pub fn extract_phone_digits(value: &str) -> String {
    value.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

/// Prepends `prefix` to numbers that look local, i.e. have at most
/// `local_digits` digits. Numbers already carrying a country code pass
/// through unchanged.
pub fn with_country_prefix(phone: &str, prefix: Option<&str>, local_digits: usize) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() && phone.len() <= local_digits => {
            format!("{prefix}{phone}")
        }
        _ => phone.to_string(),
    }
}
