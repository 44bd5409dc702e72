#![allow(dead_code)]

//! fake predictor and search executables honoring the command line contracts of prodigal and hmmsearch.
//! They are small sh scripts written in a temporary directory.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use metabolishmm::ToolParams;

/// the proteins every fake prediction produces
pub const PROTEINS: &str = "\
>contig_1_1 # 2 # 31 # 1 # ID=1_1;partial=10
MKVLAAGIVG*
>contig_1_2 # 100 # 400 # -1 # ID=1_2;partial=00
MSEQNNTEMTFQIQRIYTKDISFEAPNAPHVFQKDWQPEVKLDLDTASSQLADDVYEVVLRVTVTASLGEETAFLCEVQQGG
IFSIAGIEGTQMAHCLGAYCPNILFPYARECITSMVSRGTFPQLNLAPVNFDALFMNYLQQQAGEGTEEHQDA*
>contig_2_1 # 3 # 200 # 1 # ID=2_1;partial=10
MAVLK*
";

pub const SUMMARY_HEADER_LINE: &str = "hit_id\tlength\te_value\tquery_accession\tquery_name";

pub fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Writes PROTEINS to the file given by -a. Every call appends the genome to calls.log in bin_dir.
/// If fail_genome is given (a sh pattern on the genome stem, "*" for all) the prediction exits with code 1.
/// If slow_genome is given (same pattern) the prediction of these genomes takes one second.
pub fn fake_predictor(bin_dir: &Path, fail_genome: Option<&str>, slow_genome: Option<&str>) -> PathBuf {
    let path = bin_dir.join("fake_prodigal");
    let fail = fail_genome.unwrap_or("__no_genome__");
    let slow = slow_genome.unwrap_or("__no_genome__");
    let body = format!(
        r#"
while [ $# -gt 0 ]; do
  case "$1" in
    -i) in="$2"; shift 2;;
    -a) out="$2"; shift 2;;
    *) shift;;
  esac
done
echo "$in" >> "{log}"
stem=$(basename "$in" .fasta)
case "$stem" in
  {fail}) echo "prediction failed for $stem" 1>&2; exit 1;;
  {slow}) sleep 1;;
esac
cat > "$out" <<'PROT'
{proteins}PROT
"#,
        log = bin_dir.join("calls.log").display(),
        fail = fail,
        slow = slow,
        proteins = PROTEINS
    );
    write_script(&path, &body);
    path
}

/// Writes a tblout table with hits on contig_2_1 and contig_1_2 (in that order), query name is the marker stem.
/// If fail_on is (genome, marker) the search of this pair exits with code 3 without writing anything.
pub fn fake_searcher(bin_dir: &Path, fail_on: Option<(&str, &str)>) -> PathBuf {
    let path = bin_dir.join("fake_hmmsearch");
    let (fail_genome, fail_marker) = fail_on.unwrap_or(("", ""));
    let body = format!(
        r#"
out="$2"
marker=$(basename "$6" .hmm)
genome=$(basename "$7" .proteins.fasta)
if [ "$genome" = "{fail_genome}" ] && [ "$marker" = "{fail_marker}" ]; then
  echo "Error: no TC cutoffs in $marker" 1>&2
  exit 3
fi
cat > "$out" <<TBL
# target name        accession  query name           accession    E-value  score  bias   E-value  score  bias   exp reg clu  ov env dom rep inc description of target
contig_2_1           -          $marker              PF00384.25   1.2e-50  170.1   0.0   2.3e-50  169.2   0.0   1.4   1   0   0   1   1   1   1 # 3 # 200 # 1 # ID=2_1;partial=10
contig_1_2           -          $marker              PF00384.25    0.0012   15.3   0.1    0.0019   14.6   0.1   1.3   1   0   0   1   1   1   1 -
#
# [ok]
TBL
"#,
        fail_genome = fail_genome,
        fail_marker = fail_marker
    );
    write_script(&path, &body);
    path
}

/// a scratch layout : bin, genomes, hmm and out directories
pub struct Workspace {
    pub td: tempfile::TempDir,
    pub bin: PathBuf,
    pub genomes: PathBuf,
    pub markers: PathBuf,
    pub out: PathBuf,
}

impl Workspace {
    pub fn new(genomes: &[&str], markers: &[&str]) -> Self {
        let td = tempfile::tempdir().unwrap();
        let bin = td.path().join("bin");
        let genome_dir = td.path().join("genomes");
        let marker_dir = td.path().join("hmm");
        for d in [&bin, &genome_dir, &marker_dir] {
            fs::create_dir(d).unwrap();
        }
        for g in genomes {
            fs::write(genome_dir.join(format!("{}.fasta", g)), ">contig_1\nACGTACGTACGT\n>contig_2\nTTGACA\n").unwrap();
        }
        for m in markers {
            fs::write(marker_dir.join(format!("{}.hmm", m)), "HMMER3/f [3.3 | Nov 2019]\nNAME  x\n//\n").unwrap();
        }
        let out = td.path().join("results").join("run1");
        Workspace {
            bin,
            genomes: genome_dir,
            markers: marker_dir,
            out,
            td,
        }
    }

    pub fn tools(&self, fail_genome: Option<&str>, fail_on: Option<(&str, &str)>) -> ToolParams {
        self.slow_tools(None, fail_genome, fail_on)
    }

    /// as tools, with the prediction of slow_genome delayed by one second
    pub fn slow_tools(&self, slow_genome: Option<&str>, fail_genome: Option<&str>, fail_on: Option<(&str, &str)>) -> ToolParams {
        let predictor = fake_predictor(&self.bin, fail_genome, slow_genome);
        let searcher = fake_searcher(&self.bin, fail_on);
        ToolParams::new(predictor.to_str().unwrap(), searcher.to_str().unwrap())
    }

    /// genomes seen by the predictor so far
    pub fn predictor_calls(&self) -> Vec<String> {
        match fs::read_to_string(self.bin.join("calls.log")) {
            Ok(s) => s.lines().map(String::from).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// sorted file names of output directory
    pub fn outputs(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.out)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
