use crate::config::ProbeConfig;
use crate::error::Result;
use crate::result::ProbeResult;
use crate::signature::Signatures;
use crate::target::Target;
use reqwest::header::{RANGE, USER_AGENT};
use reqwest::{Client, Proxy, RequestBuilder};
use tracing::debug;

/// 0 to 2^64-1, the value that overflows the HTTP.sys range calculation
pub const RANGE_PROBE_HEADER: &str = "bytes=0-18446744073709551615";

/// Sends range probes and classifies the responses
pub struct Prober {
    client: Client,
    user_agent: String,
    signatures: Signatures,
}

impl Prober {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(ref proxy) = config.proxy {
            builder = builder.proxy(Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
            user_agent: config.user_agent.clone(),
            signatures: config.signatures.clone(),
        })
    }

    /// Plain GET of the target's origin, returning the body
    pub async fn fetch_homepage(&self, target: &Target) -> Result<String> {
        debug!("Fetching {}", target.url());

        let response = self.client.get(target.url()).send().await?;
        debug!("{} responded {}", target.url(), response.status());

        Ok(response.text().await?)
    }

    pub fn build_probe_request(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(RANGE, RANGE_PROBE_HEADER)
            .header(USER_AGENT, self.user_agent.as_str())
    }

    /// Probe one asset. Transport and body failures come back as `Unknown`.
    pub async fn classify(&self, url: &str) -> ProbeResult {
        debug!("Probing {}", url);

        let response = match self.build_probe_request(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Probe of {} failed: {}", url, e);
                return ProbeResult::with_error(url.to_string(), e.to_string());
            }
        };

        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                let verdict = self.signatures.classify_body(&body);
                debug!("{} -> {} ({})", url, verdict, status_code);
                ProbeResult::new(url.to_string(), verdict, status_code)
            }
            Err(e) => {
                debug!("Reading probe body of {} failed: {}", url, e);
                let mut result = ProbeResult::with_error(url.to_string(), e.to_string());
                result.status_code = Some(status_code);
                result
            }
        }
    }
}
