use std::io::Write;

use crate::card::Balance;
use csv::Writer;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub balance: Balance,
    pub applied: u64,
    pub rejected: u64,
}

pub fn print_summary<W>(output: &mut W, summary: &Summary) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    if let Err(err) = writer.serialize(summary) {
        anyhow::bail!("Failed to write to CSV: {err}")
    }
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
