use std::fmt::Write as _;

use carefind_core::{Directory, DirectoryEntry, ProviderFilter};

pub(crate) fn run_directory(
    directory: &Directory,
    filter: &ProviderFilter,
    json: bool,
) -> anyhow::Result<()> {
    let entries = directory.filter(filter);
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render_entries(&entries));
    }
    Ok(())
}

pub(crate) fn render_entries(entries: &[&DirectoryEntry]) -> String {
    if entries.is_empty() {
        return "No providers match this filter.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{} [{}]", entry.name, entry.kind);
        let _ = writeln!(out, "  {} at {}", entry.specialty, entry.facility);
        let _ = writeln!(out, "  Contact: {}", entry.contact);
        let _ = writeln!(out, "  {}\n", entry.bio);
    }
    out
}
