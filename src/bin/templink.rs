use anyhow::Result;
use std::process::exit;
use templink::cli::{
    actions::{Action, create_link, show_usage},
    start,
};

fn main() -> Result<()> {
    let action = start()?;

    match action {
        Action::ShowUsage => {
            show_usage::handle(&action);
            exit(1);
        }
        Action::CreateLink { .. } => create_link::handle(action)?,
    }

    Ok(())
}
