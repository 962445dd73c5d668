use crate::parser::{BodyParser, DefaultParser, JsonParser};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Default cap on the accumulated request body: 2 MiB
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Per-router settings shared by every body reader the router creates
#[derive(Clone)]
pub struct RouterConfig {
    max_body_size: usize,
    default_parser: Arc<DefaultParser>,
}

impl RouterConfig {
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    pub fn default_parser(&self) -> &Arc<DefaultParser> {
        &self.default_parser
    }

    pub fn set_max_body_size(&mut self, max_body_size: usize) {
        self.max_body_size = max_body_size;
    }

    pub fn set_default_parser<P>(&mut self, parser: P)
    where
        P: BodyParser<Output = Value> + 'static,
    {
        self.default_parser = Arc::new(parser);
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self { max_body_size: DEFAULT_MAX_BODY_SIZE, default_parser: Arc::new(JsonParser) }
    }
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig").field("max_body_size", &self.max_body_size).finish_non_exhaustive()
    }
}
