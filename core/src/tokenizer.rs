/// Tokenize text into terms: lowercase, strip ASCII punctuation, split on whitespace.
///
/// The same function is used for documents and queries, so a query term can
/// only match a document term if both normalize to the same string.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    stripped.split_whitespace().map(str::to_string).collect()
}
