//! parsing of the per sequence tabular output of the profile search (hmmer3 --tblout).
//!
//! Lines beginning with # are comments. A data row is whitespace separated :
//!
//! target name, target accession, query name, query accession,
//! full sequence (E-value, score, bias), best 1 domain (E-value, score, bias),
//! exp, reg, clu, ov, env, dom, rep, inc, description of target.
//!
//! The description is free text and may contain spaces, so we only require the first 18 columns.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fxhash::FxHashMap;

use crate::errors::PipelineError;

/// minimum number of columns in a data row
const TBLOUT_MIN_COLUMNS: usize = 18;
const TARGET_NAME_COL: usize = 0;
const QUERY_NAME_COL: usize = 2;
const QUERY_ACC_COL: usize = 3;
const BEST_DOMAIN_EVALUE_COL: usize = 7;

/// what we keep of a row, for one hit sequence
#[derive(Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub query_accession: String,
    pub query_name: String,
    /// best domain e-value. Summaries print it back with `format_e_value`, not as the tool wrote it
    pub e_value: f64,
}

/// hit sequence id -> hit record.
///
/// If a table has many rows for the same hit sequence (possible if a marker file contains many models)
/// the last row wins. This is the historical behaviour of the tool, it is kept as is.
pub type HitRecordMap = FxHashMap<String, HitRecord>;

/// parses one data row. Returns hit id and its record.
fn parse_row(line: &str) -> Result<(String, HitRecord), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < TBLOUT_MIN_COLUMNS {
        return Err(format!(
            "expected at least {} columns, got {} in line : {}",
            TBLOUT_MIN_COLUMNS,
            fields.len(),
            line
        ));
    }
    let e_value_field = fields[BEST_DOMAIN_EVALUE_COL];
    let e_value = e_value_field
        .parse::<f64>()
        .map_err(|_| format!("invalid e-value {:?} in line : {}", e_value_field, line))?;
    let record = HitRecord {
        query_accession: fields[QUERY_ACC_COL].to_string(),
        query_name: fields[QUERY_NAME_COL].to_string(),
        e_value,
    };
    Ok((fields[TARGET_NAME_COL].to_string(), record))
} // end of parse_row

/// Builds the hit map from a reader. path is only used in errors.
pub fn read_tblout<R: BufRead>(reader: R, path: &Path) -> Result<HitRecordMap, PipelineError> {
    let mut hits = HitRecordMap::default();
    let mut nb_rows = 0usize;
    //
    for (num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| PipelineError::parse(path, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (hit_id, record) =
            parse_row(trimmed).map_err(|reason| PipelineError::parse(path, format!("line {} : {}", num + 1, reason)))?;
        log::trace!("hit {} query {} e-value {}", hit_id, record.query_name, record.e_value);
        if let Some(old) = hits.insert(hit_id, record) {
            log::debug!(
                "hit table {:?} : duplicate hit, previous row (query {}, e-value {}) overwritten",
                path,
                old.query_name,
                old.e_value
            );
        }
        nb_rows += 1;
    }
    log::debug!("hit table {:?} : nb rows {}, nb distinct hits {}", path, nb_rows, hits.len());
    Ok(hits)
} // end of read_tblout

/// opens and parses hit table at path
pub fn parse_tblout(path: &Path) -> Result<HitRecordMap, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::parse(path, format!("cannot open hit table : {}", e)))?;
    read_tblout(BufReader::new(file), path)
}

//=========================================================================

// end of mod tests
