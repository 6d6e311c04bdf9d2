use std::io::{self, BufRead, Write};

pub mod gebied;
pub mod maps;

/// Writes `message`, then reads one line from `input` with surrounding
/// whitespace removed. End of input reads as an empty line.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<String> {
    write!(output, "{}", message)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(line.trim().to_string())
}
