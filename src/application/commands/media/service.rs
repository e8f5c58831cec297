use std::sync::Arc;

use crate::application::ports::{storage::ObjectStore, time::Clock};

pub struct MediaCommandService {
    pub(super) store: Arc<dyn ObjectStore>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) max_upload_bytes: usize,
}

impl MediaCommandService {
    pub fn new(store: Arc<dyn ObjectStore>, clock: Arc<dyn Clock>, max_upload_bytes: usize) -> Self {
        Self {
            store,
            clock,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
