pub mod create_link;
pub mod show_usage;

use crate::link::{LinkGenerator, LinkRequest};

#[derive(Debug)]
pub enum Action {
    ShowUsage,
    CreateLink {
        generator: LinkGenerator,
        request: LinkRequest,
        json: bool,
    },
}
