/// Strip layer prefixes from an error string before showing it to the user
///
/// "Database error: record error: esim 12 not found" becomes "esim 12 not found".
pub fn extract_clean_error(error_msg: &str) -> String {
    const PREFIXES: [&str; 2] = ["Database error:", "record error:"];

    let mut clean = error_msg.trim();
    loop {
        let stripped = PREFIXES
            .iter()
            .find_map(|prefix| clean.strip_prefix(prefix))
            .map(str::trim_start);
        match stripped {
            Some(rest) => clean = rest,
            None => break,
        }
    }
    clean.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_nested_prefixes() {
        assert_eq!(
            extract_clean_error("Database error: record error: esim 12 not found"),
            "esim 12 not found"
        );
        assert_eq!(extract_clean_error("❌ Amount must be positive"), "❌ Amount must be positive");
    }
}
