pub mod error;
pub mod config;
pub mod request;
pub mod client;
pub mod report;

use std::io::Write;
use log::error;

pub use client::Prober;
pub use config::ProbeConfig;

/*

azprobe: check that an Azure-hosted, OpenAI-compatible chat
completions endpoint accepts our key before building on it.

One fixed prompt, one POST, one verdict:

  config ──> Prober::send ──> ProbeOutcome ──> report ──> bool

*/

/// What a single probe produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome
{   /// Endpoint answered; holds `choices[0].message.content`
    Success(String)
  , /// Endpoint answered with a non-2xx status
    HttpError
    {   status_code: u16
      , body: String
    }
  , /// Anything else: transport failure, timeout, bad JSON, missing field
    GenericError(String)
}

impl ProbeOutcome
{   pub fn is_success(&self) -> bool
    {   matches!(self, ProbeOutcome::Success(_))
    }

    /// Short tag for log lines
    pub fn label(&self) -> &'static str
    {   match self
        {   ProbeOutcome::Success(_) => "success"
          , ProbeOutcome::HttpError { .. } => "http-error"
          , ProbeOutcome::GenericError(_) => "error"
        }
    }
}

impl From<Result<String, crate::error::Error>> for ProbeOutcome
{   fn from(result: Result<String, crate::error::Error>) -> Self
    {   match result
        {   Ok(message) => ProbeOutcome::Success(message)
          , Err(crate::error::Error::HttpStatus { status, body }) => {
              ProbeOutcome::HttpError
              {   status_code: status
                , body
              }
            }
          , Err(e) => ProbeOutcome::GenericError(e.to_string())
        }
    }
}

/// Probe the endpoint, printing diagnostics to stdout.
///
/// Returns true iff the endpoint produced a chat completion.
pub async fn probe(config: &ProbeConfig) -> bool
{   let mut out = std::io::stdout();
    probe_to(config, &mut out).await
}

/// Same as [`probe`], writing diagnostics to `out`.
pub async fn probe_to<W: Write>(
  config: &ProbeConfig
, out: &mut W
) -> bool
{   if let Err(e) = report::write_banner(out, config)
    {   error!("Failed to write banner: {}", e);
    }

    let outcome = match Prober::new(config.clone())
    {   Ok(prober) => prober.send().await
      , Err(e) => ProbeOutcome::GenericError(e.to_string())
    };

    if let Err(e) = report::write_outcome(out, &outcome, config)
    {   error!("Failed to write probe outcome: {}", e);
    }
    outcome.is_success()
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::error::Error;

    #[test]
    fn http_status_maps_to_http_error()
    {   let outcome = ProbeOutcome::from(Err(Error::HttpStatus
        {   status: 500
          , body: "boom".to_string()
        }));
        assert_eq!(outcome, ProbeOutcome::HttpError
        {   status_code: 500
          , body: "boom".to_string()
        });
        assert!(!outcome.is_success());
    }

    #[test]
    fn other_errors_map_to_generic_error()
    {   for err in [
          Error::Timeout
        , Error::NoChoicesInResponse
        , Error::ParseError("expected value".to_string())
        , Error::Http("connection refused".to_string())
        ]
        {   let text = err.to_string();
            assert_eq!(
              ProbeOutcome::from(Err(err)),
              ProbeOutcome::GenericError(text)
            );
        }
    }

    #[test]
    fn ok_maps_to_success()
    {   let outcome = ProbeOutcome::from(Ok("hi".to_string()));
        assert!(outcome.is_success());
        assert_eq!(outcome.label(), "success");
    }
}
