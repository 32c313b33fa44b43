use crate::config;

pub struct SourceProvider {
    api_key: Option<String>,
    state_vectors_url: String,
    geolocation_url: String
}

#[derive(Clone, Debug, PartialEq)]
pub struct Source {
    path: String
}

impl SourceProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoints(api_key, config::STATE_VECTORS_URL, config::GEOLOCATION_URL)
    }

    pub fn with_endpoints(api_key: Option<String>, state_vectors_url: &str, geolocation_url: &str) -> Self {
        Self { api_key, state_vectors_url: state_vectors_url.to_string(), geolocation_url: geolocation_url.to_string() }
    }

    pub fn has_api_key(&self) -> bool { self.api_key.is_some() }

    pub fn source_state_vectors(&self) -> Source {
        Source::new(self.state_vectors_url.clone())
    }

    // Only the geolocation call carries the key
    pub fn source_geolocation(&self) -> Source {
        match &self.api_key {
            Some(key) => Source::new(format!("{}?apiKey={}", self.geolocation_url, key)),
            None => Source::new(self.geolocation_url.clone())
        }
    }
}

impl Source {
    pub fn new(path: String) -> Self {
        Self { path }
    }

    pub fn get_path(&self) -> &str { &self.path }
}
