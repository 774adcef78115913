use crate::cli::actions::Action;

fn me() -> Option<String> {
    std::env::current_exe()
        .ok()?
        .file_name()?
        .to_str()?
        .to_owned()
        .into()
}

#[must_use]
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <bucket> <key>\nExample: {program} my-bucket path/to/file.txt"
    )
}

/// Print the usage to stdout, the caller exits with status 1
pub fn handle(action: &Action) {
    if let Action::ShowUsage = action {
        println!(
            "{}",
            usage(&me().unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string()))
        );
    }
}
