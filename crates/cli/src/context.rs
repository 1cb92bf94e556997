use std::sync::Arc;

use wordpane::protocol::ApiVersion;
use wordpane::EmulatorHost;

use crate::demo;

/// Options shared by every subcommand.
pub struct CommandContext {
    pub select: String,
    pub max_api: Option<ApiVersion>,
    pub json: bool,
}

impl CommandContext {
    pub fn new(select: String, max_api: Option<ApiVersion>, json: bool) -> Self {
        Self {
            select,
            max_api,
            json,
        }
    }

    /// Builds the seeded host this invocation runs against.
    pub fn host(&self) -> Arc<EmulatorHost> {
        let mut builder = EmulatorHost::builder().select(&self.select);
        for text in demo::SEED_PARAGRAPHS {
            builder = builder.paragraph(text);
        }
        if let Some(version) = self.max_api {
            builder = builder.max_api(version);
        }
        builder.build()
    }
}
