use crate::{cli::actions::Action, link::LinkResult};
use anyhow::Result;

#[must_use]
pub fn render(bucket: &str, key: &str, link: &LinkResult) -> String {
    format!(
        "=== Temporary Link Generated ===\n\
         Bucket: {bucket}\n\
         Key: {key}\n\
         Link: {}\n\
         Expires: {}\n\
         Expires in: {} seconds\n\
         ===============================",
        link.url, link.expires_at, link.expires_in_seconds
    )
}

/// # Errors
/// Will return an error if the link can't be built
pub fn handle(action: Action) -> Result<()> {
    if let Action::CreateLink {
        generator,
        request,
        json,
    } = action
    {
        let link = generator.build_link(&request)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&link)?);
        } else {
            println!("{}", render(&request.bucket, &request.key, &link));
        }
    }

    Ok(())
}
