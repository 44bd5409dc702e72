//! From a hit table and the protein file that was searched, extract the hit sequences
//! in `{genome}_{marker}_hits.fasta` and write the tab separated summary `{genome}_{marker}_summary.txt`.
//!
//! Records keep the order they have in the protein file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use seq_io::fasta;

use crate::errors::PipelineError;
use crate::hits::tblout::{parse_tblout, HitRecordMap};
use crate::utils::files::OutputLayout;

/// header row of summary tables
pub const SUMMARY_HEADER: [&str; 5] = ["hit_id", "length", "e_value", "query_accession", "query_name"];

/// width of sequence lines in hits fasta files
const FASTA_LINE_WIDTH: usize = 60;

/// What was produced for one (genome, marker) pair
#[derive(Clone, Debug)]
pub struct MarkerSummary {
    pub genome_name: String,
    pub marker_name: String,
    /// number of records written in the hits fasta and in the summary
    pub nb_hits: usize,
    pub hits_fasta: PathBuf,
    pub summary: PathBuf,
}

/// Formats an e-value for summary tables : shortest digits that read back to the same value,
/// positional notation for exponents in [-4, 16), else scientific with a signed exponent of at least 2 digits.
/// Integral values keep a trailing `.0`, so 0 is printed `0.0`.
pub fn format_e_value(e_value: f64) -> String {
    if !e_value.is_finite() {
        return if e_value.is_nan() {
            String::from("nan")
        } else if e_value > 0. {
            String::from("inf")
        } else {
            String::from("-inf")
        };
    }
    if e_value == 0. {
        return if e_value.is_sign_negative() { String::from("-0.0") } else { String::from("0.0") };
    }
    // {:e} gives shortest round trip digits, as in 2.3e-50
    let scientific = format!("{:e}", e_value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if (-4..16).contains(&exponent) {
        let positional = format!("{}", e_value);
        if positional.contains('.') {
            positional
        } else {
            positional + ".0"
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
} // end of format_e_value

/// record id is the header up to the first ascii whitespace (blank or tab), as the search tool sees it.
fn record_id<'a>(head: &'a [u8], path: &Path) -> Result<&'a str, PipelineError> {
    let id = head.split(|b| b.is_ascii_whitespace()).next().unwrap_or(head);
    std::str::from_utf8(id).map_err(|e| PipelineError::parse(path, format!("record id not utf8 : {}", e)))
}

fn open_fasta(path: &Path) -> Result<fasta::Reader<File>, PipelineError> {
    fasta::Reader::from_path(path).map_err(|e| PipelineError::parse(path, format!("cannot open sequence file : {}", e)))
}

/// Copies records of protein_file whose id is a key of hits into hits_fasta.
/// Returns the number of records written.
pub fn write_hit_sequences(protein_file: &Path, hits: &HitRecordMap, hits_fasta: &Path) -> Result<usize, PipelineError> {
    let mut reader = open_fasta(protein_file)?;
    let file = File::create(hits_fasta).map_err(|e| PipelineError::io(hits_fasta, e))?;
    let mut writer = BufWriter::new(file);
    let mut nb_written = 0;
    //
    for record in reader.records() {
        let record = record.map_err(|e| PipelineError::parse(protein_file, e.to_string()))?;
        let id = record_id(&record.head, protein_file)?;
        if hits.contains_key(id) {
            fasta::write_wrap(&mut writer, &record.head, None, &record.seq, FASTA_LINE_WIDTH)
                .map_err(|e| PipelineError::io(hits_fasta, e))?;
            nb_written += 1;
        }
    }
    writer.flush().map_err(|e| PipelineError::io(hits_fasta, e))?;
    log::debug!("{:?} : {} hit sequences written", hits_fasta, nb_written);
    Ok(nb_written)
} // end of write_hit_sequences

/// Reads back hits_fasta and writes one summary row per record, after the header.
/// Returns the number of rows.
pub fn write_summary_table(hits_fasta: &Path, hits: &HitRecordMap, summary: &Path) -> Result<usize, PipelineError> {
    let mut reader = open_fasta(hits_fasta)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_path(summary)
        .map_err(|e| PipelineError::io(summary, e.into()))?;
    writer
        .write_record(SUMMARY_HEADER)
        .map_err(|e| PipelineError::io(summary, e.into()))?;
    //
    let mut nb_rows = 0;
    for record in reader.records() {
        let record = record.map_err(|e| PipelineError::parse(hits_fasta, e.to_string()))?;
        let id = record_id(&record.head, hits_fasta)?;
        let hit = hits
            .get(id)
            .ok_or_else(|| PipelineError::parse(hits_fasta, format!("record {} is not in hit table", id)))?;
        let length = record.seq.len().to_string();
        let e_value = format_e_value(hit.e_value);
        writer
            .write_record([
                id,
                length.as_str(),
                e_value.as_str(),
                hit.query_accession.as_str(),
                hit.query_name.as_str(),
            ])
            .map_err(|e| PipelineError::io(summary, e.into()))?;
        nb_rows += 1;
    }
    writer.flush().map_err(|e| PipelineError::io(summary, e))?;
    Ok(nb_rows)
} // end of write_summary_table

// every sequence written must have its summary row
fn check_row_count(nb_written: usize, nb_rows: usize, summary: &Path) -> Result<(), PipelineError> {
    if nb_written != nb_rows {
        return Err(PipelineError::parse(
            summary,
            format!("{} hit sequences written but {} summary rows", nb_written, nb_rows),
        ));
    }
    Ok(())
}

/// Parses the hit table, extracts hit sequences, writes the summary.
/// The hit map lives only for this call.
pub fn summarize_hits(
    hit_table: &Path,
    protein_file: &Path,
    layout: &OutputLayout,
    genome_name: &str,
    marker_name: &str,
) -> Result<MarkerSummary, PipelineError> {
    let hits = parse_tblout(hit_table)?;
    //
    let hits_fasta = layout.hits_fasta(genome_name, marker_name);
    let summary = layout.summary(genome_name, marker_name);
    let nb_written = write_hit_sequences(protein_file, &hits, &hits_fasta)?;
    let nb_hits = write_summary_table(&hits_fasta, &hits, &summary)?;
    check_row_count(nb_written, nb_hits, &summary)?;
    //
    log::info!("genome {} marker {} : {} hits", genome_name, marker_name, nb_hits);
    Ok(MarkerSummary {
        genome_name: genome_name.to_string(),
        marker_name: marker_name.to_string(),
        nb_hits,
        hits_fasta,
        summary,
    })
} // end of summarize_hits

//=========================================================================

// end of mod tests
