//! Application context shared by network-backed commands.

use std::path::Path;

use pressroom_config::{CliSettings, Config};
use pressroom_content::{ContentClient, MetadataExtractor};
use tracing::info;

use crate::error::CliError;

/// Clients built from the loaded configuration.
///
/// Built once per invocation and passed to commands explicitly.
pub(crate) struct AppContext {
    pub(crate) content: ContentClient,
    pub(crate) metadata: MetadataExtractor,
}

impl AppContext {
    /// Load configuration and build the content and metadata clients.
    pub(crate) fn init(
        config_path: Option<&Path>,
        settings: &CliSettings,
    ) -> Result<Self, CliError> {
        let config = Config::load(config_path, Some(settings))?;

        match &config.config_path {
            Some(path) => info!("Loaded configuration from {}", path.display()),
            None => info!("No pressroom.toml found, using defaults"),
        }

        let content = ContentClient::new(&config.content)?;
        let metadata = MetadataExtractor::new(&config.metadata);
        info!("Content API: {}", content.api_url());

        Ok(Self {
            content,
            metadata,
        })
    }
}
