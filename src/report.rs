//! Console rendering of probe progress and outcome

use std::io::{self, Write};
use crate::config::ProbeConfig;
use crate::ProbeOutcome;

pub const HTTP_ERROR_HINTS: [&str; 2] = [
  "1. Is your API key correct in your configuration?"
, "2. Has your Azure API key expired?"
];

pub const GENERIC_ERROR_HINTS: [&str; 3] = [
  "1. Check your API key in your configuration"
, "2. Make sure you're connected to the internet"
, "3. Verify your .env file (or config file) is in the directory you run azprobe from"
];

/// Lines printed before the request goes out
pub fn write_banner<W: Write>(
  out: &mut W
, config: &ProbeConfig
) -> io::Result<()>
{   writeln!(out, "Testing Azure API connection...")?;
    writeln!(out, "Using model: {}", config.model)?;
    writeln!(out, "API Key starts with: {}...", config.key_prefix())
}

pub fn write_outcome<W: Write>(
  out: &mut W
, outcome: &ProbeOutcome
, config: &ProbeConfig
) -> io::Result<()>
{   match outcome
    {   ProbeOutcome::Success(message) => {
          writeln!(out, "\n✅ SUCCESS! Your Azure API is working!")?;
          writeln!(out, "API Response: {}", message)?;
          writeln!(out, "\nYou're ready to start building your project! 🚀")
        }
      , ProbeOutcome::HttpError { status_code, body } => {
          let reason = reqwest::StatusCode::from_u16(*status_code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status");
          writeln!(
            out,
            "\n❌ HTTP ERROR: {} {} for url: {}",
            status_code, reason, config.endpoint_url
          )?;
          writeln!(out, "Status Code: {}", status_code)?;
          writeln!(out, "Response: {}", body)?;
          writeln!(out, "\nCheck:")?;
          for hint in HTTP_ERROR_HINTS
          {   writeln!(out, "{}", hint)?;
          }
          Ok(())
        }
      , ProbeOutcome::GenericError(description) => {
          writeln!(out, "\n❌ ERROR: {}", description)?;
          writeln!(out, "\nTroubleshooting:")?;
          for hint in GENERIC_ERROR_HINTS
          {   writeln!(out, "{}", hint)?;
          }
          Ok(())
        }
    }
}
