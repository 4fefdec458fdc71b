// Minimal CSV line splitting for the artisan dataset
//
// Rows never span lines in the source export, so parsing is line-oriented.

/// Split one CSV line into trimmed fields.
///
/// Double quotes toggle quoting, `""` inside a quoted field is a literal quote,
/// and commas only separate fields outside quotes.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
