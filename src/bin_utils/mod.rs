//! Batch driver around [`crate::card`]: replays a CSV operation script against
//! one card, running every worker of the script on its own thread.

use std::{
    collections::BTreeMap,
    io::{Read, Write},
    thread,
};

use crate::{
    card::PrepaidCard,
    command::{CardCommand, CardCommandError},
    processor::{CardProcessor, ProcessError, session_processor::SessionProcessor},
};
use anyhow::{Context, Result, anyhow};
use csv_parser::CsvOperationParser;
use csv_printer::{Summary, print_summary};
use tracing::{debug, debug_span};
pub mod csv_parser;
pub mod csv_printer;

pub type WorkerId = u16;

type ParsedCommand = (u64, Result<CardCommand, CardCommandError>);

#[derive(Debug, Default)]
struct WorkerReport {
    applied: u64,
    rejected: u64,
    failures: Vec<(u64, ProcessError)>,
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub card: &'w PrepaidCard,
    pub error_printer: Box<dyn FnMut(u64, ProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        // file order is kept within each worker
        let mut workers: BTreeMap<WorkerId, Vec<ParsedCommand>> = BTreeMap::new();
        for (line, row) in parser {
            let row = row.with_context(|| format!("Failed to parse operation at line {line}"))?;
            let command = CardCommand::parse_command(row.kind, row.value.as_deref());
            workers.entry(row.worker).or_default().push((line, command));
        }

        let card = self.card;
        let reports = thread::scope(|s| {
            let handles: Vec<_> = workers
                .into_iter()
                .map(|(worker, commands)| s.spawn(move || run_worker(card, worker, commands)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|_| anyhow!("Worker thread panicked"))?;

        let mut summary = Summary {
            balance: card.balance(),
            applied: 0,
            rejected: 0,
        };
        let mut failures = Vec::new();
        for report in reports {
            summary.applied += report.applied;
            summary.rejected += report.rejected;
            failures.extend(report.failures);
        }
        failures.sort_by_key(|(line, _)| *line);
        for (line, err) in failures {
            (self.error_printer)(line, err);
        }

        print_summary(self.output, &summary)
    }
}

fn run_worker(card: &PrepaidCard, worker: WorkerId, commands: Vec<ParsedCommand>) -> WorkerReport {
    let _span = debug_span!("worker", worker).entered();
    let mut processor = SessionProcessor::new(card);
    let mut report = WorkerReport::default();

    for (line, command) in commands {
        let res = command
            .map_err(ProcessError::from)
            .and_then(|command| processor.process_command(command));
        if let Err(err) = res {
            debug!(line, %err, "operation failed");
            if matches!(err, ProcessError::CommandErr(_)) {
                report.rejected += 1;
            }
            report.failures.push((line, err));
        }
    }
    report.applied += processor.applied;
    report.rejected += processor.rejected;
    report
}
