use crate::commands::{print_json, Context};
use crate::util::{flag_label, parse_record_id};
use anyhow::Result;
use clap::Args;
use matchday_core::dto::RecordListItemDto;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only records still waiting for confirmation
    #[arg(long)]
    pub pending: bool,
}

#[derive(Debug, Args)]
pub struct RecordIdArgs {
    /// Record id, e.g. row-3
    pub id: String,
}

pub fn list_records(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let items: Vec<RecordListItemDto> = ctx
        .store
        .records()
        .list()?
        .iter()
        .filter(|record| !args.pending || !record.confirmed)
        .map(RecordListItemDto::from)
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no records");
        return Ok(());
    }

    for item in items {
        println!("{}", format_item(&item));
    }
    Ok(())
}

pub fn set_confirmed(ctx: &Context<'_>, args: RecordIdArgs, confirmed: bool) -> Result<()> {
    let id = parse_record_id(&args.id)?;
    let record = ctx.store.records().set_confirmed(&id, confirmed)?;
    report(ctx, &RecordListItemDto::from(&record))
}

pub fn toggle_confirmed(ctx: &Context<'_>, args: RecordIdArgs) -> Result<()> {
    let id = parse_record_id(&args.id)?;
    let record = ctx.store.records().toggle_confirmed(&id)?;
    report(ctx, &RecordListItemDto::from(&record))
}

fn report(ctx: &Context<'_>, item: &RecordListItemDto) -> Result<()> {
    if ctx.json {
        print_json(item)?;
    } else if item.confirmed {
        println!("{} ({}) confirmed", item.team_name, item.id);
    } else {
        println!("{} ({}) pending", item.team_name, item.id);
    }
    Ok(())
}

fn format_item(item: &RecordListItemDto) -> String {
    let flags: Vec<&str> = [
        flag_label(item.confirmed, "confirmed"),
        flag_label(item.confirmation_sent, "confirmation sent"),
        flag_label(item.reminder_sent, "reminder sent"),
    ]
    .into_iter()
    .filter(|label| !label.is_empty())
    .collect();

    let mut line = format!(
        "{}  {} {}  {}  {} ({})",
        item.id, item.match_day, item.match_time, item.field_name, item.team_name, item.phone
    );
    if !flags.is_empty() {
        line.push_str(&format!("  [{}]", flags.join(", ")));
    }
    line
}
