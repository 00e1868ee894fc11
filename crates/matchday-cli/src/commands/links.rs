use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::parse_record_id;
use anyhow::Result;
use clap::Args;
use matchday_core::domain::MessageKind;
use matchday_core::dto::RecordLinksDto;
use matchday_core::messaging::message_links;

#[derive(Debug, Args)]
pub struct LinksArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct MarkSentArgs {
    pub id: String,
    /// confirmation or reminder
    #[arg(long)]
    pub kind: String,
}

pub fn show_links(ctx: &Context<'_>, args: LinksArgs) -> Result<()> {
    let id = parse_record_id(&args.id)?;
    let record = ctx
        .store
        .records()
        .get(&id)?
        .ok_or_else(|| not_found(format!("record {id}")))?;
    let messages = &ctx.config.messages;
    let links = message_links(&record, &messages.templates, &messages.links)?;
    let dto = RecordLinksDto {
        id: record.id,
        team_name: record.team_name,
        links,
    };

    if ctx.json {
        print_json(&dto)?;
        return Ok(());
    }

    println!("{} ({})", dto.team_name, dto.id);
    for link in &dto.links {
        let sent = if link.sent { " (sent)" } else { "" };
        println!("{}{sent}: {}", link.kind.as_str(), link.url);
    }
    Ok(())
}

pub fn mark_sent(ctx: &Context<'_>, args: MarkSentArgs) -> Result<()> {
    let id = parse_record_id(&args.id)?;
    let kind: MessageKind = args.kind.parse()?;
    let record = ctx.store.records().mark_message_sent(&id, kind)?;

    if ctx.json {
        print_json(&serde_json::json!({
            "id": record.id,
            "kind": kind,
            "messages": record.messages,
        }))?;
    } else {
        println!("{} marked as sent for {}", kind.as_str(), record.team_name);
    }
    Ok(())
}
