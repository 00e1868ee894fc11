use crate::commands::{print_json, Context};
use crate::util::format_timestamp_datetime;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ImportsArgs {}

pub fn list_imports(ctx: &Context<'_>, _args: ImportsArgs) -> Result<()> {
    let imports = ctx.store.imports().list()?;

    if ctx.json {
        print_json(&imports)?;
        return Ok(());
    }

    if imports.is_empty() {
        println!("no imports");
        return Ok(());
    }

    for import in imports {
        println!(
            "{}  {}  {} {}  {} rows, {} records",
            import.id,
            format_timestamp_datetime(import.created_at),
            import.source,
            import.label,
            import.row_count,
            import.record_count
        );
    }
    Ok(())
}
