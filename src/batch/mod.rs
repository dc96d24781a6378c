//! Batch classification of tab-separated coordinate files.
//!
//! Input rows are `sample_id, latitude, longitude` (extra columns are
//! ignored); output rows append the assigned code and name.

mod options;

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::BatchError;
use crate::models::{Assignment, ClassificationResult, CoordinateQuery};
use crate::pip::ClassifierService;
use crate::source::open_maybe_gzip;

pub use options::{BatchOptions, LineTerminator, MalformedRowPolicy};

/// Counts reported after a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows_read: usize,
    pub classified: usize,
    pub skipped: usize,
    pub assigned: usize,
    pub on_land: usize,
    pub ambiguous: usize,
}

impl BatchSummary {
    fn record(&mut self, assignment: &Assignment) {
        self.classified += 1;
        match assignment {
            Assignment::Province { .. } => self.assigned += 1,
            Assignment::OnLand => self.on_land += 1,
            Assignment::Ambiguous => self.ambiguous += 1,
        }
    }
}

/// Drives a [`ClassifierService`] over every row of an input file
pub struct BatchRunner<'a> {
    service: &'a ClassifierService,
    options: BatchOptions,
    progress: Option<ProgressBar>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(service: &'a ClassifierService, options: BatchOptions) -> Self {
        Self {
            service,
            options,
            progress: None,
        }
    }

    /// Tick the given progress bar once per classified row
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Classify `input` into `output`. The output file is only created once
    /// every row has been read and classified.
    pub fn run_files(&self, input: &Path, output: &Path) -> Result<BatchSummary, BatchError> {
        info!("Classifying {} -> {}", input.display(), output.display());

        let reader = open_maybe_gzip(input)?;
        let (results, summary) = self.classify_all(reader)?;

        let writer = BufWriter::new(File::create(output)?);
        self.write_results(&results, writer)?;

        Ok(summary)
    }

    /// Classify rows from any reader and write them to any writer
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<BatchSummary, BatchError> {
        let (results, summary) = self.classify_all(input)?;
        self.write_results(&results, output)?;
        Ok(summary)
    }

    fn classify_all<R: Read>(
        &self,
        input: R,
    ) -> Result<(Vec<ClassificationResult>, BatchSummary), BatchError> {
        let mut summary = BatchSummary::default();
        let queries = self.read_queries(input, &mut summary)?;

        if let Some(pb) = &self.progress {
            pb.set_length(queries.len() as u64);
        }

        let classify = |query: CoordinateQuery| {
            let result = self.service.classify(query);
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
            result
        };

        let results: Vec<ClassificationResult> = if self.options.parallel {
            queries.into_par_iter().map(classify).collect()
        } else {
            queries.into_iter().map(classify).collect()
        };

        for result in &results {
            summary.record(&result.assignment);
        }

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        info!(
            "Classified {} rows ({} assigned, {} on land, {} ambiguous, {} skipped)",
            summary.classified,
            summary.assigned,
            summary.on_land,
            summary.ambiguous,
            summary.skipped
        );

        Ok((results, summary))
    }

    fn read_queries<R: Read>(
        &self,
        input: R,
        summary: &mut BatchSummary,
    ) -> Result<Vec<CoordinateQuery>, BatchError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .quote(b'"')
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        let mut queries = Vec::new();
        for (index, row) in reader.byte_records().enumerate() {
            let row = row?;
            summary.rows_read += 1;

            let line = row
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 1);

            let parsed = StringRecord::from_byte_record(row)
                .map_err(|e| format!("invalid UTF-8: {}", e.utf8_error()))
                .and_then(|row| parse_row(&row));

            match parsed {
                Ok(query) => queries.push(query),
                Err(reason) => match self.options.on_malformed_row {
                    MalformedRowPolicy::Fail => {
                        return Err(BatchError::MalformedRow { line, reason })
                    }
                    MalformedRowPolicy::Skip => {
                        warn!("Skipping line {}: {}", line, reason);
                        summary.skipped += 1;
                    }
                },
            }
        }

        Ok(queries)
    }

    fn write_results<W: Write>(
        &self,
        results: &[ClassificationResult],
        output: W,
    ) -> Result<(), BatchError> {
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .quote(b'"')
            .quote_style(QuoteStyle::Necessary)
            .terminator(self.options.line_terminator.into())
            .has_headers(false)
            .from_writer(output);

        for result in results {
            writer.write_record(result.to_record())?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Parse one input row into a query
pub fn parse_row(row: &StringRecord) -> Result<CoordinateQuery, String> {
    if row.len() < 3 {
        return Err(format!("expected 3 columns, found {}", row.len()));
    }

    let lat = parse_degrees(&row[1]).ok_or_else(|| format!("invalid latitude '{}'", &row[1]))?;
    let lon = parse_degrees(&row[2]).ok_or_else(|| format!("invalid longitude '{}'", &row[2]))?;

    Ok(CoordinateQuery::new(&row[0], lat, lon))
}

fn parse_degrees(field: &str) -> Option<f64> {
    field.trim().parse().ok()
}
