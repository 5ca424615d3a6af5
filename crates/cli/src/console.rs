//! Terminal adapter for [`pipeline::HumanInput`].

use std::io::{BufRead, Write};

use async_trait::async_trait;
use pipeline::{HumanInput, HumanInputError};

/// Prints the prompt to stdout and reads one line from stdin.
///
/// The read runs on tokio's blocking pool and waits indefinitely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleInput;

#[async_trait]
impl HumanInput for ConsoleInput {
    async fn request_supplement(&self, prompt: &str) -> Result<String, HumanInputError> {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            read_line(&prompt, &mut std::io::stdin().lock(), &mut std::io::stdout())
        })
        .await
        .map_err(|e| HumanInputError::Io(std::io::Error::other(e)))?
    }
}

/// Writes `prompt`, then reads one line without its line terminator.
///
/// # Errors
///
/// [`HumanInputError::Closed`] at end of input.
pub fn read_line<R, W>(prompt: &str, input: &mut R, output: &mut W) -> Result<String, HumanInputError>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(HumanInputError::Closed);
    }
    Ok(line.trim_end_matches(|c| c == '\n' || c == '\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_line_and_echoes_prompt() {
        let mut input = "focus on 2023-2024 hardware\r\nignored\n".as_bytes();
        let mut output = Vec::new();

        let line = read_line("Details: ", &mut input, &mut output).unwrap();

        assert_eq!(line, "focus on 2023-2024 hardware");
        assert_eq!(output, b"Details: ");
    }

    #[test]
    fn test_blank_line_is_an_answer() {
        let mut input = "\n".as_bytes();
        assert_eq!(read_line("> ", &mut input, &mut Vec::new()).unwrap(), "");
    }

    #[test]
    fn test_end_of_input_is_closed() {
        let mut input = "".as_bytes();
        assert!(matches!(
            read_line("> ", &mut input, &mut Vec::new()),
            Err(HumanInputError::Closed)
        ));
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut input = "no newline".as_bytes();
        assert_eq!(read_line("> ", &mut input, &mut Vec::new()).unwrap(), "no newline");
    }
}
