use std::io::{self, BufRead, Write};

use crate::services::GebiedResolver;

use super::prompt_line;

pub async fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    resolver: &GebiedResolver,
) -> io::Result<()> {
    let postcode = prompt_line(input, output, "Please enter the postcode: ")?;
    if postcode.is_empty() {
        writeln!(
            output,
            "Input Error: Postcode cannot be empty. Please provide a valid postcode."
        )?;
        return Ok(());
    }

    match resolver.resolve(&postcode).await {
        Ok(gebied) => writeln!(output, "The gebied for postcode {} is: {}", postcode, gebied),
        Err(e) => {
            log::error!("Resolving postcode {} failed: {:?}", postcode, e);
            writeln!(output, "The gebied for postcode {} is: {}", postcode, e)
        }
    }
}
