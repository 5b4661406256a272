/// Returns the text before the first line break, without a trailing `\r`.
pub fn first_line(input: &str) -> &str {
    let line = input.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}
