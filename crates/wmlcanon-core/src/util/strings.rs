pub fn string_concatenate<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().fold(String::new(), |mut acc, s| {
        acc.push_str(s.as_ref());
        acc
    })
}

/// Text whose first or last character is a space must be written with
/// `xml:space="preserve"`, or consumers may trim it.
pub fn needs_space_preserve(text: &str) -> bool {
    text.starts_with(' ') || text.ends_with(' ')
}
