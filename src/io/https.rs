//! Remote inputs fetched over HTTPS.

use std::io::{self, Cursor, Read};

use tracing::debug;
use url::Url;

use super::InputProvider;

/// Input provider that downloads a manifest with a blocking GET.
///
/// The body is buffered in memory before it is handed to the pipeline.
#[derive(Debug, Clone)]
pub struct HttpsInput {
    id: String,
    url: Url,
}

impl HttpsInput {
    /// `location` is kept verbatim for error messages.
    pub fn new(location: impl Into<String>, url: Url) -> Self {
        Self {
            id: location.into(),
            url,
        }
    }

    /// Download the whole body; any status other than 2xx is an error.
    pub fn fetch(&self) -> io::Result<Vec<u8>> {
        debug!(url = %self.url, "fetching remote input");
        let response = reqwest::blocking::get(self.url.clone()).map_err(io::Error::other)?;

        let status = response.status();
        if !status.is_success() {
            return Err(io::Error::other(format!(
                "unable to read URL {:?}, server reported {}, status code={}",
                self.id,
                status,
                status.as_u16()
            )));
        }

        let body = response.bytes().map_err(io::Error::other)?;
        Ok(body.to_vec())
    }
}

impl InputProvider for HttpsInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        let body = self.fetch()?;
        Ok(Box::new(Cursor::new(body)))
    }
}
