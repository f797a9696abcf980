use crate::error::Error;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Operator answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Confirm this issue only.
    Yes,
    /// Decline this issue only.
    No,
    /// Confirm this and every remaining issue from the same finder run.
    All,
    /// Decline this and every remaining issue from the same finder run.
    None,
}

/// Unrecognized confirmation input; the asker retries in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedResponse(pub String);

impl FromStr for Response {
    type Err = MalformedResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(Response::Yes),
            "n" | "no" => Ok(Response::No),
            "a" | "all" => Ok(Response::All),
            "none" => Ok(Response::None),
            other => Err(MalformedResponse(other.to_string())),
        }
    }
}

/// Blocking request/response exchange with the operator.
///
/// Implementations must keep re-asking until the input parses; a
/// malformed answer never changes state. End of input is an operator
/// abort.
pub trait Confirmer {
    fn ask(&mut self, prompt: &str) -> Result<Response, Error>;
}

/// Interactive confirmer reading from stdin.
pub struct StdinConfirmer;

impl StdinConfirmer {
    pub fn new() -> Self {
        StdinConfirmer
    }
}

impl Default for StdinConfirmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmer for StdinConfirmer {
    fn ask(&mut self, prompt: &str) -> Result<Response, Error> {
        let stdin = io::stdin();
        let mut input = String::new();

        loop {
            print!("{} [y/n/all/none]: ", prompt);
            io::stdout().flush()?;

            input.clear();
            let bytes_read = stdin.lock().read_line(&mut input)?;
            if bytes_read == 0 {
                // EOF: the operator is gone
                return Err(Error::Aborted);
            }

            match input.parse::<Response>() {
                Ok(response) => return Ok(response),
                Err(MalformedResponse(text)) => {
                    println!("Unrecognized response '{}'", text);
                }
            }
        }
    }
}
