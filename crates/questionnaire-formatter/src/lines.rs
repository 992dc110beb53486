/// Splits widget text into lines the way every operation expects it: the
/// block is trimmed first, then split on `\n` with stray `\r` removed.
///
/// Empty text yields a single empty line, never an empty list.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// True for the degenerate "nothing entered" input: no lines, or one empty line.
pub fn is_blank<S: AsRef<str>>(lines: &[S]) -> bool {
    match lines {
        [] => true,
        [only] => only.as_ref().is_empty(),
        _ => false,
    }
}
