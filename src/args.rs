// Command-line argument parsing
use clap::Parser;
use std::path::PathBuf;

use crate::error::LcadreError;
use crate::estimate::{DEFAULT_RARE_CUTOFF, DEFAULT_TARGET_READ_PAIRS};
use crate::io::{FileType, INFER};

#[derive(Parser, Debug)]
#[command(
    name = "lcadre",
    about = "LCaDRE: Library Complexity and Duplication Rate Estimation"
)]
pub struct Args {
    /// Path to read name-sorted alignment file
    pub alignment_file: PathBuf,
    /// Type of alignment file
    #[arg(
        short = 't',
        long,
        default_value = INFER,
        value_parser = ["sam", "bam", "cram", INFER]
    )]
    pub file_type: String,
    /// Target count of read pairs for extrapolation
    #[arg(short = 'n', long, default_value_t = DEFAULT_TARGET_READ_PAIRS)]
    pub n_extrapolation: u64,
    /// Signatures seen at most this many times count as rare for ACE
    #[arg(long, default_value_t = DEFAULT_RARE_CUTOFF)]
    pub rare_cutoff: u32,
    /// Indexed FASTA reference used to decode CRAM input
    #[arg(short = 'R', long)]
    pub reference: Option<PathBuf>,
}

/// Resolved run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub alignment_file: PathBuf,
    pub file_type: FileType,
    pub target_read_pairs: u64,
    pub rare_cutoff: u32,
    pub reference: Option<PathBuf>,
}

impl Config {
    /// Build a configuration, inferring the file type from the extension
    pub fn new(alignment_file: impl Into<PathBuf>, target_read_pairs: u64) -> Result<Self, LcadreError> {
        let alignment_file = alignment_file.into();
        let file_type = FileType::resolve(INFER, &alignment_file)?;
        Ok(Self {
            alignment_file,
            file_type,
            target_read_pairs,
            rare_cutoff: DEFAULT_RARE_CUTOFF,
            reference: None,
        })
    }
}

impl TryFrom<&Args> for Config {
    type Error = LcadreError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        if args.n_extrapolation == 0 {
            return Err(LcadreError::InvalidParameter {
                name: "n_extrapolation",
                reason: "must be positive".to_string(),
            });
        }
        if args.rare_cutoff == 0 {
            return Err(LcadreError::InvalidParameter {
                name: "rare_cutoff",
                reason: "must be positive".to_string(),
            });
        }
        Ok(Self {
            alignment_file: args.alignment_file.clone(),
            file_type: FileType::resolve(&args.file_type, &args.alignment_file)?,
            target_read_pairs: args.n_extrapolation,
            rare_cutoff: args.rare_cutoff,
            reference: args.reference.clone(),
        })
    }
}
