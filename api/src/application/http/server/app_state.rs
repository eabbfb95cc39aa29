use std::sync::Arc;

use truthbite_core::application::TruthbiteService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: TruthbiteService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: TruthbiteService) -> Self {
        Self { args, service }
    }
}
