use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Result;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;

use crate::errors::AudioJoinError;
use crate::file_utils::FileManager;

// @module: WAV concatenation with inserted silence gaps

/// Result of a successful join
#[derive(Debug)]
pub struct JoinSummary {
    /// Number of clips concatenated
    pub clip_count: usize,
    /// Canonical PCM format inherited from the first clip
    pub spec: WavSpec,
    /// Silence frames appended after each clip
    pub gap_frames: u64,
    /// Path of the written output file
    pub output: PathBuf,
}

/// Silence frames representing `gap_ms` milliseconds at `sample_rate`.
///
/// Invariant: the frame count is the ceiling of `sample_rate * gap_ms / 1000`,
/// never a truncation, so the gap is at least the requested duration.
pub fn silence_frames(sample_rate: u32, gap_ms: u64) -> u64 {
    (u64::from(sample_rate) * gap_ms).div_ceil(1000)
}

/// Concatenate every WAV clip in `in_dir` into one output file.
///
/// Clips are taken in lexicographic filename order, the sole ordering
/// guarantee; callers must name clips so that order matches playback order
/// (zero-padded numeric prefixes). A silence gap of `gap_ms` milliseconds is
/// appended after every clip, including the last.
///
/// Every clip's PCM format must exactly match the first clip's. All formats
/// are validated before the output file is created, so no failure path
/// leaves a partial output behind.
pub fn join_wav_dir<P1: AsRef<Path>, P2: AsRef<Path>>(
    in_dir: P1,
    out_path: P2,
    gap_ms: u64,
) -> Result<JoinSummary> {
    let in_dir = in_dir.as_ref();
    let out_path = out_path.as_ref();

    let files = FileManager::list_files_with_extension(in_dir, "wav")?;
    if files.is_empty() {
        return Err(AudioJoinError::NoInputFiles(in_dir.to_path_buf()).into());
    }

    let spec = validate_formats(&files)?;
    let gap_frames = silence_frames(spec.sample_rate, gap_ms);

    debug!(
        "Joining {} clips at {} ch / {} bit / {} Hz, {} silence frames per gap",
        files.len(),
        spec.channels,
        spec.bits_per_sample,
        spec.sample_rate,
        gap_frames
    );

    if let Some(parent) = out_path.parent() {
        FileManager::ensure_dir(parent)?;
    }

    let result = write_joined(&files, out_path, spec, gap_frames);
    if result.is_err() && out_path.exists() {
        // A clip's data section failed mid-copy; a truncated output is worse
        // than none at all.
        let _ = std::fs::remove_file(out_path);
    }
    result?;

    Ok(JoinSummary {
        clip_count: files.len(),
        spec,
        gap_frames,
        output: out_path.to_path_buf(),
    })
}

/// Open every clip and check its format against the first clip's.
///
/// Returns the canonical spec, or a mismatch error naming the offending file.
fn validate_formats(files: &[PathBuf]) -> Result<WavSpec, AudioJoinError> {
    let expected = open_reader(&files[0])?.spec();

    for file in &files[1..] {
        let spec = open_reader(file)?.spec();
        if spec != expected {
            return Err(AudioJoinError::FormatMismatch {
                file: file.clone(),
                expected_channels: expected.channels,
                expected_bits: expected.bits_per_sample,
                expected_rate: expected.sample_rate,
                found_channels: spec.channels,
                found_bits: spec.bits_per_sample,
                found_rate: spec.sample_rate,
            });
        }
    }

    Ok(expected)
}

fn write_joined(
    files: &[PathBuf],
    out_path: &Path,
    spec: WavSpec,
    gap_frames: u64,
) -> Result<(), AudioJoinError> {
    let mut writer = WavWriter::create(out_path, spec).map_err(|source| AudioJoinError::Wav {
        file: out_path.to_path_buf(),
        source,
    })?;

    for file in files {
        let mut reader = open_reader(file)?;
        match spec.sample_format {
            SampleFormat::Int => copy_samples::<i32>(&mut reader, &mut writer, file, out_path)?,
            SampleFormat::Float => copy_samples::<f32>(&mut reader, &mut writer, file, out_path)?,
        }
        append_silence(&mut writer, spec, gap_frames, out_path)?;
    }

    writer.finalize().map_err(|source| AudioJoinError::Wav {
        file: out_path.to_path_buf(),
        source,
    })
}

fn open_reader(file: &Path) -> Result<WavReader<BufReader<File>>, AudioJoinError> {
    WavReader::open(file).map_err(|source| AudioJoinError::Wav {
        file: file.to_path_buf(),
        source,
    })
}

fn copy_samples<S: hound::Sample + Copy>(
    reader: &mut WavReader<BufReader<File>>,
    writer: &mut WavWriter<BufWriter<File>>,
    in_file: &Path,
    out_file: &Path,
) -> Result<(), AudioJoinError> {
    for sample in reader.samples::<S>() {
        let sample = sample.map_err(|source| AudioJoinError::Wav {
            file: in_file.to_path_buf(),
            source,
        })?;
        writer.write_sample(sample).map_err(|source| AudioJoinError::Wav {
            file: out_file.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Append `gap_frames` frames of digital silence (zero-valued samples)
fn append_silence(
    writer: &mut WavWriter<BufWriter<File>>,
    spec: WavSpec,
    gap_frames: u64,
    out_file: &Path,
) -> Result<(), AudioJoinError> {
    let samples = gap_frames * u64::from(spec.channels);
    for _ in 0..samples {
        let written = match spec.sample_format {
            SampleFormat::Int => writer.write_sample(0_i32),
            SampleFormat::Float => writer.write_sample(0.0_f32),
        };
        written.map_err(|source| AudioJoinError::Wav {
            file: out_file.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
