use std::time::Duration;
use log::{debug, trace, error, info};
use crate::config::ProbeConfig;
use crate::request::{ChatRequest, ChatResponse};

/// Issues the single probe request for one configuration
pub struct Prober
{   config: ProbeConfig
  , http_client: reqwest::Client
}

impl Prober
{   /// Build a prober whose HTTP client enforces the configured timeout
    pub fn new(
      config: ProbeConfig
    ) -> Result<Self, crate::error::Error>
    {   debug!(
          "Creating Prober for {} (timeout {}s)",
          config.endpoint_url, config.timeout_secs
        );
        let http_client = reqwest::Client::builder()
          .timeout(Duration::from_secs(config.timeout_secs))
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            crate::error::Error::Http(e.to_string())
          })?;

        Ok(Prober
        {   config
          , http_client
        })
    }

    /// Run the probe once and classify what happened
    pub async fn send(&self) -> crate::ProbeOutcome
    {   let outcome = crate::ProbeOutcome::from(
          self.request_completion().await
        );
        info!(
          "Probe against {} finished: {}",
          self.config.endpoint_url,
          outcome.label()
        );
        outcome
    }

    /// POST the probe payload and pull out `choices[0].message.content`
    async fn request_completion(
      &self
    ) -> Result<String, crate::error::Error>
    {   let request = ChatRequest::probe(self.config.model.clone());
        trace!("Probe request: {:?}", request);

        // Headers go on before the body so a configured Content-Type
        // is not duplicated by `.json()`
        let mut builder = self.http_client
          .post(&self.config.endpoint_url)
          .query(&self.config.params);
        for (name, value) in &self.config.headers
        {   builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
          .json(&request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::from(e)
          })?;

        let status = response.status();
        trace!("Probe response status: {}", status);

        if !status.is_success()
        {   let body = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Endpoint returned {}: {}", status, body);
            return Err(crate::error::Error::HttpStatus
            {   status: status.as_u16()
              , body
            });
        }

        let raw = response.text().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          crate::error::Error::from(e)
        })?;
        trace!("Probe response body: {}", raw);

        let chat_response: ChatResponse = serde_json::from_str(&raw)
          .map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::from(e)
          })?;

        if let Some(choice) = chat_response.choices.first()
        {   debug!(
              "First choice finish reason: {}",
              choice.finish_reason.as_deref().unwrap_or("none")
            );
        }

        chat_response.first_content()
          .map(str::to_string)
          .map_err(|e| {
            error!("No choices in response");
            e
          })
    }
}
