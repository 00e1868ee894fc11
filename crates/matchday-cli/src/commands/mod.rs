use anyhow::Result;
use matchday_config::AppConfig;
use matchday_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod import;
pub mod imports;
pub mod links;
pub mod matches;
pub mod records;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
