/// Split an attribute list (`KEY=VALUE,KEY="quoted, value"`) at unquoted commas.
pub fn split_attributes(s: &str) -> Vec<&str> {
    let mut attrs = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                attrs.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() {
        attrs.push(s[start..].trim());
    }

    attrs
}

/// Parse an attribute list into `(KEY, value)` pairs, unquoting values.
///
/// Entries without `=` are skipped.
pub fn parse_attributes(s: &str) -> Vec<(String, &str)> {
    split_attributes(s)
        .into_iter()
        .filter_map(|attr| {
            let (key, value) = attr.split_once('=')?;
            Some((key.trim().to_uppercase(), value.trim().trim_matches('"')))
        })
        .collect()
}

/// Return the value following the first `:` of a tag line.
pub fn tag_value(line: &str) -> Option<&str> {
    line.trim().split_once(':').map(|(_, value)| value)
}
