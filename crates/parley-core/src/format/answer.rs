/// Strip the leading newlines and spaces completion models tend to emit
/// before the reply. Nothing else is touched, so applying it twice is a no-op.
pub fn format_answer(raw: &str) -> String {
    raw.trim_start_matches(['\n', ' ']).to_string()
}
