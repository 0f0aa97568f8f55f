//! Completion post-processing.
//!
//! Models wrap their output in markdown fences and sometimes skip the JSON
//! contract entirely, so the raw text goes through a fixed cleanup ladder:
//! drop fence markers, trim, try the JSON `sql` field, fall back to the
//! cleaned text itself.

/// Strip markdown code-fence markers from raw model output.
///
/// Removes every occurrence of ```json, ```sql, and bare ``` markers, then
/// trims. Markers are replaced wherever they appear rather than only at the
/// edges, matching how fenced completions actually arrive.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```sql", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Extract the SQL payload from raw model output.
///
/// # Returns
///
/// The `sql` field of the cleaned text parsed as JSON, trimmed. If the
/// cleaned text is not valid JSON, the cleaned text itself (best effort;
/// the caller gets whatever the model produced). A JSON object without a
/// `sql` string yields the empty string.
pub fn extract_sql_payload(raw: &str) -> String {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str::<serde_json::Value>(&cleaned) {
        Ok(parsed) => parsed
            .get("sql")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string(),
        Err(_) => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_payload() {
        let raw = "```json\n{\"sql\": \"SELECT 1\"}\n```";
        assert_eq!(extract_sql_payload(raw), "SELECT 1");
    }

    #[test]
    fn test_unfenced_json_payload() {
        let raw = "{\"sql\": \"  SELECT COUNT(*) FROM loans  \"}";
        assert_eq!(extract_sql_payload(raw), "SELECT COUNT(*) FROM loans");
    }

    #[test]
    fn test_sql_fence_markers() {
        let raw = "```sql\nSELECT amount FROM loans\n```";
        assert_eq!(extract_sql_payload(raw), "SELECT amount FROM loans");
    }

    #[test]
    fn test_bare_fences() {
        let raw = "```\n{\"sql\": \"SELECT 1\"}\n```";
        assert_eq!(extract_sql_payload(raw), "SELECT 1");
    }

    #[test]
    fn test_invalid_json_falls_back_to_cleaned_text() {
        let raw = "  SELECT * FROM loans WHERE amount > 1000  ";
        assert_eq!(
            extract_sql_payload(raw),
            "SELECT * FROM loans WHERE amount > 1000"
        );
    }

    #[test]
    fn test_invalid_json_inside_fences_falls_back() {
        let raw = "```sql\nSELECT loan_id FROM loans\n```\nThis query lists the loans.";
        assert_eq!(
            extract_sql_payload(raw),
            "SELECT loan_id FROM loans\n\nThis query lists the loans."
        );
    }

    #[test]
    fn test_json_without_sql_field_yields_empty() {
        let raw = "{\"query\": \"SELECT 1\"}";
        assert_eq!(extract_sql_payload(raw), "");
    }

    #[test]
    fn test_json_with_non_string_sql_yields_empty() {
        let raw = "{\"sql\": 42}";
        assert_eq!(extract_sql_payload(raw), "");
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(extract_sql_payload("   \n  "), "");
    }

    #[test]
    fn test_strip_fences_preserves_inner_text() {
        assert_eq!(strip_code_fences("```json\nabc\n```"), "abc");
        assert_eq!(strip_code_fences("no fences at all"), "no fences at all");
    }
}
