#![cfg(unix)]

mod common;

use std::fs;
use std::time::{Duration, Instant};

use metabolishmm::{run_pipeline, PipelineError, PipelineParams, ToolParams};

use crate::common::{log_init_test, Workspace, SUMMARY_HEADER_LINE};

fn params(ws: &Workspace, threads: usize, tools: ToolParams) -> PipelineParams {
    PipelineParams::new(&ws.genomes, &ws.out, &ws.markers, threads).with_tools(tools)
}

#[test]
fn two_genomes_one_marker() {
    log_init_test();
    let ws = Workspace::new(&["A", "B"], &["K1"]);
    let report = run_pipeline(&params(&ws, 2, ws.tools(None, None))).unwrap();
    assert_eq!(report.nb_genomes, 2);
    assert_eq!(report.nb_markers, 1);
    assert_eq!(report.nb_hits(), 4);
    //
    let expected = vec![
        "A.proteins.fasta",
        "A_K1.out",
        "A_K1_hits.fasta",
        "A_K1_summary.txt",
        "B.proteins.fasta",
        "B_K1.out",
        "B_K1_hits.fasta",
        "B_K1_summary.txt",
        "parameters.json",
    ];
    assert_eq!(ws.outputs(), expected);
    //
    let summary = fs::read_to_string(ws.out.join("A_K1_summary.txt")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], SUMMARY_HEADER_LINE);
    // protein file order, not hit table order
    assert_eq!(lines[1], "contig_1_2\t156\t0.0019\tPF00384.25\tK1");
    assert_eq!(lines[2], "contig_2_1\t6\t2.3e-50\tPF00384.25\tK1");
    assert_eq!(lines.len(), 3);
}

#[test]
fn summary_rows_match_hits_fasta() {
    log_init_test();
    let ws = Workspace::new(&["A"], &["K1", "K2"]);
    run_pipeline(&params(&ws, 1, ws.tools(None, None))).unwrap();
    for marker in ["K1", "K2"] {
        let hits = fs::read_to_string(ws.out.join(format!("A_{}_hits.fasta", marker))).unwrap();
        let hit_ids: Vec<&str> = hits
            .lines()
            .filter_map(|l| l.strip_prefix('>'))
            .map(|h| h.split_whitespace().next().unwrap())
            .collect();
        let summary = fs::read_to_string(ws.out.join(format!("A_{}_summary.txt", marker))).unwrap();
        let summary_ids: Vec<&str> = summary.lines().skip(1).map(|l| l.split('\t').next().unwrap()).collect();
        assert_eq!(hit_ids, summary_ids);
        // every id comes from the hit table
        let table = fs::read_to_string(ws.out.join(format!("A_{}.out", marker))).unwrap();
        for id in summary_ids {
            assert!(table.lines().any(|l| l.starts_with(id)));
        }
    }
}

#[test]
fn empty_input_dir_succeeds() {
    log_init_test();
    let ws = Workspace::new(&[], &["K1"]);
    let report = run_pipeline(&params(&ws, 2, ws.tools(None, None))).unwrap();
    assert_eq!(report.nb_genomes, 0);
    assert!(ws.out.is_dir());
    assert_eq!(ws.outputs(), vec!["parameters.json"]);
    assert!(ws.predictor_calls().is_empty());
}

#[test]
fn rerun_gives_identical_summaries() {
    log_init_test();
    let ws = Workspace::new(&["A", "B"], &["K1"]);
    let tools = ws.tools(None, None);
    run_pipeline(&params(&ws, 2, tools.clone())).unwrap();
    let first = fs::read(ws.out.join("B_K1_summary.txt")).unwrap();
    run_pipeline(&params(&ws, 2, tools)).unwrap();
    let second = fs::read(ws.out.join("B_K1_summary.txt")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_search_tool_blocks_everything() {
    log_init_test();
    let ws = Workspace::new(&["A"], &["K1"]);
    let good = ws.tools(None, None);
    let absent = ws.bin.join("no_hmmsearch_here");
    let tools = ToolParams::new(good.get_predictor(), absent.to_str().unwrap());
    match run_pipeline(&params(&ws, 1, tools)) {
        Err(PipelineError::MissingDependency { missing }) => {
            assert_eq!(missing, vec![absent.to_str().unwrap().to_string()]);
        }
        other => panic!("expected MissingDependency, got {:?}", other),
    }
    assert!(ws.predictor_calls().is_empty());
    assert!(!ws.out.exists());
}

#[test]
fn search_failure_stops_only_its_genome() {
    log_init_test();
    let ws = Workspace::new(&["A", "B", "Z"], &["K1", "K2", "K3"]);
    let tools = ws.tools(None, Some(("Z", "K2")));
    // one worker, genomes run one after the other
    let err = run_pipeline(&params(&ws, 1, tools)).unwrap_err();
    match &err {
        PipelineError::Genome { genome, .. } => assert_eq!(genome, "Z"),
        other => panic!("expected a genome failure, got {:?}", other),
    }
    match err.root() {
        PipelineError::ProcessFailure { exit_code, stderr, command } => {
            assert_eq!(*exit_code, Some(3));
            assert_eq!(stderr, "Error: no TC cutoffs in K2");
            assert!(command.contains("--cut_tc"));
        }
        other => panic!("expected ProcessFailure, got {:?}", other),
    }
    // Z keeps K1 outputs, nothing from K2 on
    assert!(ws.out.join("Z_K1_summary.txt").is_file());
    assert!(ws.out.join("Z_K1_hits.fasta").is_file());
    assert!(!ws.out.join("Z_K2.out").exists());
    assert!(!ws.out.join("Z_K2_summary.txt").exists());
    assert!(!ws.out.join("Z_K3.out").exists());
    // genomes that ran before Z are complete
    let calls = ws.predictor_calls();
    assert!(calls.last().unwrap().ends_with("Z.fasta"));
    for call in &calls[..calls.len() - 1] {
        let stem = std::path::Path::new(call).file_stem().unwrap().to_string_lossy().into_owned();
        for marker in ["K1", "K2", "K3"] {
            assert!(ws.out.join(format!("{}_{}_summary.txt", stem, marker)).is_file());
        }
    }
}

#[test]
fn genomes_not_started_are_skipped_after_failure() {
    log_init_test();
    let ws = Workspace::new(&["A", "B", "C"], &["K1"]);
    let tools = ws.tools(Some("*"), None);
    let err = run_pipeline(&params(&ws, 1, tools)).unwrap_err();
    assert!(matches!(err.root(), PipelineError::ProcessFailure { .. }));
    // queued genomes were dequeued before returning
    assert_eq!(ws.predictor_calls().len(), 1);
    assert!(ws.outputs().iter().all(|f| !f.ends_with(".out")));
}

#[test]
fn running_sibling_completes_after_failure() {
    log_init_test();
    let ws = Workspace::new(&["A", "Z"], &["K1"]);
    // two workers : A and Z start together, Z fails while A is still predicting
    let tools = ws.slow_tools(Some("A"), Some("Z"), None);
    let start = Instant::now();
    let err = run_pipeline(&params(&ws, 2, tools)).unwrap_err();
    match &err {
        PipelineError::Genome { genome, .. } => assert_eq!(genome, "Z"),
        other => panic!("expected a genome failure, got {:?}", other),
    }
    // the run waited for A
    assert!(start.elapsed() >= Duration::from_secs(1));
    assert_eq!(ws.predictor_calls().len(), 2);
    for artifact in ["A.proteins.fasta", "A_K1.out", "A_K1_hits.fasta", "A_K1_summary.txt"] {
        assert!(ws.out.join(artifact).is_file(), "missing {}", artifact);
    }
    let summary = fs::read_to_string(ws.out.join("A_K1_summary.txt")).unwrap();
    assert_eq!(summary.lines().count(), 3);
    assert!(!ws.out.join("Z_K1.out").exists());
}

#[test]
fn no_marker_only_predicts() {
    log_init_test();
    let ws = Workspace::new(&["A", "B"], &[]);
    let report = run_pipeline(&params(&ws, 2, ws.tools(None, None))).unwrap();
    assert_eq!(report.nb_markers, 0);
    assert_eq!(ws.outputs(), vec!["A.proteins.fasta", "B.proteins.fasta", "parameters.json"]);
}

#[test]
fn parameters_are_dumped() {
    log_init_test();
    let ws = Workspace::new(&["A"], &["K1"]);
    run_pipeline(&params(&ws, 3, ws.tools(None, None))).unwrap();
    let reloaded = PipelineParams::reload_json(&ws.out).unwrap();
    assert_eq!(reloaded.get_nb_workers(), 3);
    assert_eq!(reloaded.get_markers_dir(), ws.markers.as_path());
}
