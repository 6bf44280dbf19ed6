use std::fmt;

/// Custom error type for probe operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Required configuration value is not set
    MissingConfig(String)
  , /// Configuration value is present but unusable
    InvalidConfiguration(String)
  , /// Server answered with a non-success status
    HttpStatus
    {   status: u16
      , body: String
    }
  , /// Transport-level failure (DNS, connect, TLS, ...)
    Http(String)
  , /// Failed to parse API response
    ParseError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// Reading a configuration file failed
    Io(String)
  , /// Timeout error
    Timeout
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingConfig(name) => {
              write!(f, "Missing configuration value: {}", name)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::HttpStatus { status, body } => {
              write!(f, "{} returned by server: {}", status, body)
            }
          , Error::Http(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_timeout()
        {   Error::Timeout
        } else if e.is_decode()
        {   Error::ParseError(e.to_string())
        } else
        {   Error::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::ParseError(e.to_string())
    }
}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn http_status_display_carries_code_and_body()
    {   let err = Error::HttpStatus
        {   status: 401
          , body: "Access denied".to_string()
        };
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("Access denied"));
    }

    #[test]
    fn json_errors_become_parse_errors()
    {   let json_err = serde_json::from_str::<serde_json::Value>("{nope")
          .unwrap_err();
        assert!(matches!(Error::from(json_err), Error::ParseError(_)));
    }
}
