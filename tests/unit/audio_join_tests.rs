/*!
 * Tests for WAV joining and silence sizing
 */

use anyhow::Result;
use hound::WavReader;
use scriptcast::audio_join::{join_wav_dir, silence_frames};
use scriptcast::errors::AudioJoinError;

use crate::common;

/// Test silence sizing uses the ceiling, never truncation
#[test]
fn test_silence_frames_withFractionalFrames_shouldCeil() {
    assert_eq!(silence_frames(8000, 150), 1200);
    assert_eq!(silence_frames(44100, 150), 6615);
    // 44100 * 333 / 1000 = 14685.3 -> 14686
    assert_eq!(silence_frames(44100, 333), 14686);
    assert_eq!(silence_frames(44100, 0), 0);
}

/// Test joined frame count equals N*F + N*ceil(R*G/1000)
#[test]
fn test_join_wav_dir_withThreeClips_shouldMatchFrameCount() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let in_dir = temp_dir.path().join("wavs");
    std::fs::create_dir(&in_dir)?;

    for i in 1..=3 {
        common::create_test_wav(&in_dir, &format!("{:02}.wav", i), 1, 8000, 1000, 10)?;
    }

    let out_path = temp_dir.path().join("joined.wav");
    let summary = join_wav_dir(&in_dir, &out_path, 150)?;

    assert_eq!(summary.clip_count, 3);
    assert_eq!(summary.gap_frames, 1200);

    let reader = WavReader::open(&out_path)?;
    assert_eq!(reader.spec().sample_rate, 8000);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(u64::from(reader.duration()), 3 * 1000 + 3 * 1200);

    Ok(())
}

/// Test clips are concatenated in lexicographic filename order
#[test]
fn test_join_wav_dir_withUnorderedNames_shouldSortLexicographically() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let in_dir = temp_dir.path().join("wavs");
    std::fs::create_dir(&in_dir)?;

    // Created out of order on purpose; values mark each clip
    common::create_test_wav(&in_dir, "02.wav", 1, 8000, 100, 2)?;
    common::create_test_wav(&in_dir, "01.wav", 1, 8000, 100, 1)?;

    let out_path = temp_dir.path().join("joined.wav");
    let summary = join_wav_dir(&in_dir, &out_path, 10)?;

    let mut reader = WavReader::open(&out_path)?;
    let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>()?;

    // First clip's samples come first
    assert_eq!(samples[0], 1);
    // Second clip starts after the first clip plus one silence gap
    let second_start = (100 + summary.gap_frames) as usize;
    assert_eq!(samples[second_start], 2);

    Ok(())
}

/// Test a silence gap is appended after the last clip too
#[test]
fn test_join_wav_dir_withSingleClip_shouldAppendTrailingGap() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let in_dir = temp_dir.path().join("wavs");
    std::fs::create_dir(&in_dir)?;

    common::create_test_wav(&in_dir, "only.wav", 1, 8000, 50, 7)?;

    let out_path = temp_dir.path().join("joined.wav");
    let summary = join_wav_dir(&in_dir, &out_path, 125)?;

    let mut reader = WavReader::open(&out_path)?;
    let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>()?;

    assert_eq!(samples.len(), 50 + summary.gap_frames as usize);
    assert!(samples[50..].iter().all(|&s| s == 0));

    Ok(())
}

/// Test the WAV extension match is case-insensitive
#[test]
fn test_join_wav_dir_withUppercaseExtension_shouldIncludeClip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let in_dir = temp_dir.path().join("wavs");
    std::fs::create_dir(&in_dir)?;

    common::create_test_wav(&in_dir, "01.WAV", 1, 8000, 10, 3)?;

    let out_path = temp_dir.path().join("joined.wav");
    let summary = join_wav_dir(&in_dir, &out_path, 0)?;

    assert_eq!(summary.clip_count, 1);

    Ok(())
}

/// Test an empty input directory fails without writing output
#[test]
fn test_join_wav_dir_withNoClips_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let in_dir = temp_dir.path().join("wavs");
    std::fs::create_dir(&in_dir)?;

    let out_path = temp_dir.path().join("joined.wav");
    let err = join_wav_dir(&in_dir, &out_path, 150).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AudioJoinError>(),
        Some(AudioJoinError::NoInputFiles(_))
    ));
    assert!(err.to_string().contains("No WAV files found"));
    assert!(!out_path.exists());

    Ok(())
}

/// Test a channel-count mismatch fails naming the clip, before any output
#[test]
fn test_join_wav_dir_withChannelMismatch_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let in_dir = temp_dir.path().join("wavs");
    std::fs::create_dir(&in_dir)?;

    common::create_test_wav(&in_dir, "01.wav", 1, 8000, 100, 1)?;
    common::create_test_wav(&in_dir, "02.wav", 2, 8000, 100, 1)?;

    let out_path = temp_dir.path().join("joined.wav");
    let err = join_wav_dir(&in_dir, &out_path, 150).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AudioJoinError>(),
        Some(AudioJoinError::FormatMismatch { .. })
    ));
    assert!(err.to_string().contains("02.wav"));
    assert!(!out_path.exists());

    Ok(())
}

/// Test a sample-rate mismatch is fatal too
#[test]
fn test_join_wav_dir_withRateMismatch_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let in_dir = temp_dir.path().join("wavs");
    std::fs::create_dir(&in_dir)?;

    common::create_test_wav(&in_dir, "01.wav", 1, 8000, 100, 1)?;
    common::create_test_wav(&in_dir, "02.wav", 1, 44100, 100, 1)?;

    let out_path = temp_dir.path().join("joined.wav");
    let err = join_wav_dir(&in_dir, &out_path, 150).unwrap_err();

    assert!(err.to_string().contains("Format mismatch"));
    assert!(!out_path.exists());

    Ok(())
}

/// Test stereo clips keep their interleaved frame count
#[test]
fn test_join_wav_dir_withStereoClips_shouldCountFramesNotSamples() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let in_dir = temp_dir.path().join("wavs");
    std::fs::create_dir(&in_dir)?;

    common::create_test_wav(&in_dir, "01.wav", 2, 8000, 200, 5)?;
    common::create_test_wav(&in_dir, "02.wav", 2, 8000, 200, 6)?;

    let out_path = temp_dir.path().join("joined.wav");
    let summary = join_wav_dir(&in_dir, &out_path, 100)?;

    // ceil(8000 * 100 / 1000) = 800 frames per gap
    assert_eq!(summary.gap_frames, 800);

    let reader = WavReader::open(&out_path)?;
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(u64::from(reader.duration()), 2 * 200 + 2 * 800);

    Ok(())
}
