use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use matchday_core::domain::{ScheduledMatch, SlotIssueKind, TeamRef};
use matchday_core::dto::ScheduleDto;
use matchday_core::{group, slot_issues};

#[derive(Debug, Args)]
pub struct MatchesArgs {
    /// Also list slots with one team or more than two
    #[arg(long)]
    pub issues: bool,
}

pub fn list_matches(ctx: &Context<'_>, args: MatchesArgs) -> Result<()> {
    let records = ctx.store.records().list()?;
    let schedule = ScheduleDto {
        matches: group(&records),
        issues: if args.issues {
            slot_issues(&records)
        } else {
            Vec::new()
        },
    };

    if ctx.json {
        print_json(&schedule)?;
        return Ok(());
    }

    if schedule.matches.is_empty() {
        println!("no matches");
    }
    for scheduled in &schedule.matches {
        println!("{}", format_match(scheduled));
    }

    for issue in &schedule.issues {
        let label = match issue.kind {
            SlotIssueKind::Unmatched => "unmatched",
            SlotIssueKind::Overbooked => "overbooked",
        };
        println!(
            "{label}: {} {} {}: {}",
            issue.slot.match_day,
            issue.slot.match_time,
            issue.slot.field_name,
            issue.teams.join(", ")
        );
    }
    Ok(())
}

fn format_match(scheduled: &ScheduledMatch) -> String {
    let ready = if scheduled.both_confirmed() { "  [ready]" } else { "" };
    format!(
        "{} {}  {}  {} vs {}{ready}",
        scheduled.match_day,
        scheduled.match_time,
        scheduled.field_name,
        team_label(&scheduled.team_a),
        team_label(&scheduled.team_b)
    )
}

fn team_label(team: &TeamRef) -> String {
    let state = if team.confirmed { "confirmed" } else { "pending" };
    format!("{} ({state})", team.name)
}
