//! Alignment file I/O
//!
//! This module opens SAM, BAM and CRAM files, checks the header sort order
//! and converts noodles records into [`AlignmentRecord`] views.

use anyhow::{Context, Result};
use bstr::ByteSlice;
use noodles::sam::alignment::io::Read as _;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::{bam, bgzf, cram, fasta, sam};
use std::fmt;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use crate::error::LcadreError;
use crate::record::AlignmentRecord;

/// Value accepted for `--file-type` that resolves from the file extension
pub const INFER: &str = "infer";

/// Supported alignment encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Sam,
    Bam,
    Cram,
}

impl FileType {
    /// Resolve an explicit type name, or infer it from the extension when
    /// `name` is `infer`
    pub fn resolve(name: &str, path: &Path) -> Result<Self, LcadreError> {
        if name == INFER {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            ext.parse()
        } else {
            name.parse()
        }
    }
}

impl FromStr for FileType {
    type Err = LcadreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sam" => Ok(Self::Sam),
            "bam" => Ok(Self::Bam),
            "cram" => Ok(Self::Cram),
            _ => Err(LcadreError::UnsupportedFileType(s.to_string())),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sam => "sam",
            Self::Bam => "bam",
            Self::Cram => "cram",
        };
        f.write_str(s)
    }
}

/// Sequential reader over one alignment file
///
/// The underlying file is closed when the reader is dropped.
pub enum AlignmentReader {
    Sam(sam::io::Reader<Box<dyn BufRead>>),
    Bam(bam::io::Reader<bgzf::io::Reader<File>>),
    Cram(cram::io::Reader<File>),
}

impl AlignmentReader {
    /// Open `path` as `file_type`
    ///
    /// `reference` is an indexed FASTA used to decode CRAM records; it is
    /// ignored for SAM and BAM.
    pub fn open(path: &Path, file_type: FileType, reference: Option<&Path>) -> Result<Self> {
        let reader = match file_type {
            FileType::Sam => Self::Sam(
                sam::io::reader::Builder::default()
                    .build_from_path(path)
                    .with_context(|| format!("failed to open SAM file {}", path.display()))?,
            ),
            FileType::Bam => Self::Bam(
                bam::io::reader::Builder::default()
                    .build_from_path(path)
                    .with_context(|| format!("failed to open BAM file {}", path.display()))?,
            ),
            FileType::Cram => {
                let mut builder = cram::io::reader::Builder::default();
                if let Some(fasta_path) = reference {
                    let fasta_reader = fasta::io::indexed_reader::Builder::default()
                        .build_from_path(fasta_path)
                        .with_context(|| {
                            format!("failed to open reference {}", fasta_path.display())
                        })?;
                    let adapter = fasta::repository::adapters::IndexedReader::new(fasta_reader);
                    builder = builder.set_reference_sequence_repository(fasta::Repository::new(adapter));
                }
                Self::Cram(
                    builder
                        .build_from_path(path)
                        .with_context(|| format!("failed to open CRAM file {}", path.display()))?,
                )
            }
        };
        Ok(reader)
    }

    pub fn read_header(&mut self) -> Result<sam::Header> {
        let header = match self {
            Self::Sam(r) => r.read_header()?,
            Self::Bam(r) => r.read_header()?,
            Self::Cram(r) => r.read_header()?,
        };
        Ok(header)
    }

    /// Stream records in file order as [`AlignmentRecord`] views
    pub fn records<'a>(
        &'a mut self,
        header: &'a sam::Header,
    ) -> impl Iterator<Item = Result<AlignmentRecord>> + 'a {
        let inner = match self {
            Self::Sam(r) => r.alignment_records(header),
            Self::Bam(r) => r.alignment_records(header),
            Self::Cram(r) => r.alignment_records(header),
        };
        inner.map(move |result| {
            let record = result.context("failed to read alignment record")?;
            to_alignment_record(header, &*record)
        })
    }
}

/// Snapshot the fields of a noodles record needed for pairing
pub fn to_alignment_record(
    header: &sam::Header,
    record: &dyn sam::alignment::Record,
) -> Result<AlignmentRecord> {
    let flags = record.flags()?;
    let name = record.name().map(|n| n.to_vec()).unwrap_or_default();

    let reference_name = record
        .reference_sequence_id(header)
        .transpose()?
        .and_then(|id| header.reference_sequences().get_index(id))
        .map(|(name, _)| name.to_string());

    let reference_start = record
        .alignment_start()
        .transpose()?
        .map(|p| p.get() as i64 - 1);

    let mut soft_clip_leading = 0;
    let mut leading = true;
    let mut ref_span = 0;
    for op in record.cigar().iter() {
        let op = op?;
        let len = op.len() as i64;
        match op.kind() {
            Kind::HardClip => {}
            Kind::SoftClip if leading => soft_clip_leading += len,
            _ => leading = false,
        }
        if op.kind().consumes_reference() {
            ref_span += len;
        }
    }

    let reference_end = if flags.is_unmapped() || ref_span == 0 {
        None
    } else {
        reference_start.map(|start| start + ref_span)
    };

    Ok(AlignmentRecord {
        name,
        reference_name,
        reference_start,
        reference_end,
        is_reverse: flags.is_reverse_complemented(),
        is_secondary: flags.is_secondary(),
        is_supplementary: flags.is_supplementary(),
        soft_clip_leading,
    })
}

/// Declared `@HD SO` value, if any
pub fn sort_order(header: &sam::Header) -> Option<&[u8]> {
    header.header().and_then(|hd| {
        hd.other_fields().iter().find_map(|(tag, value)| {
            let raw: &[u8; 2] = tag.as_ref();
            (raw == b"SO").then_some(value.as_slice())
        })
    })
}

fn is_coordinate(sort_order: &[u8]) -> bool {
    sort_order.trim().eq_ignore_ascii_case(b"coordinate")
}

/// Pairing relies on mates being adjacent, so coordinate sorted input is
/// rejected up front
pub fn check_sort_order(header: &sam::Header) -> Result<(), LcadreError> {
    match sort_order(header) {
        Some(so) if is_coordinate(so) => Err(LcadreError::CoordinateSorted),
        _ => Ok(()),
    }
}
