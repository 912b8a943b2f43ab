//! End-to-end pipeline tests with a scripted tool runner.
//!
//! The runner records every invocation and fabricates outputs, so these
//! tests assert the exact command sequence a composition produces without
//! ffmpeg installed.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use storycut::config::Settings;
use storycut::media::runner::{CommandOutput, ToolRunner};
use storycut::media::MediaResult;
use storycut::models::{CaptionMode, TimedWord};
use storycut::pipeline::{self, PipelineError, StepError};
use tempfile::{tempdir, TempDir};

/// Records every call; ffprobe reports a fixed duration, ffmpeg touches
/// its output file (the last argument) so output validation passes.
struct ScriptedRunner {
    duration: &'static str,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    fn new(duration: &'static str) -> Self {
        Self {
            duration,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, tool: &str, args: &[String]) -> MediaResult<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((tool.to_string(), args.to_vec()));

        if tool == "ffprobe" {
            return Ok(CommandOutput {
                stdout: format!("{}\n", self.duration),
                stderr: String::new(),
            });
        }

        if let Some(output) = args.last() {
            fs::write(output, b"").unwrap();
        }
        Ok(CommandOutput {
            stdout: String::new(),
            stderr: "frame=  100 fps=25\n".to_string(),
        })
    }
}

struct Fixture {
    _dir: TempDir,
    settings: Settings,
    speech: PathBuf,
    video: PathBuf,
    music: PathBuf,
    output: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let speech = dir.path().join("speech.mp3");
    let video = dir.path().join("background.mp4");
    let music = dir.path().join("music.mp3");
    let output = dir.path().join("out").join("story.mp4");
    fs::write(&speech, b"audio").unwrap();
    fs::write(&video, b"video").unwrap();
    fs::write(&music, b"music").unwrap();

    let mut settings = Settings::default();
    settings.paths.temp_root = dir.path().join(".temp").display().to_string();
    settings.paths.logs_folder = dir.path().join(".logs").display().to_string();

    Fixture {
        _dir: dir,
        settings,
        speech,
        video,
        music,
        output,
    }
}

#[test]
fn composes_without_captions() {
    let fx = fixture();
    let runner = Arc::new(ScriptedRunner::new("30.0"));
    let request = fx
        .settings
        .build_request(&fx.speech, &fx.video, &fx.music, &fx.output);

    let delivered = pipeline::compose(request, &fx.settings, runner.clone(), None).unwrap();
    assert_eq!(delivered, fx.output);
    assert!(fx.output.is_file());

    let calls = runner.calls();
    let tools: Vec<&str> = calls.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(tools, ["ffprobe", "ffmpeg", "ffmpeg", "ffmpeg", "ffmpeg"]);

    // Trims target the probed speech duration.
    let trim_video = calls[1].1.join(" ");
    assert!(trim_video.contains("-ss 0 -t 30.000"));
    let trim_music = calls[2].1.join(" ");
    assert!(trim_music.contains("-t 30.000"));
    assert!(trim_music.contains("volume=-8dB"));

    // No captions, unity speed: the mux copies the video stream.
    let mux = calls[4].1.join(" ");
    assert!(mux.contains("-c:v copy"));
    assert!(mux.contains("-shortest"));
    assert!(!mux.contains("-filter:v"));
}

#[test]
fn missing_input_spawns_nothing() {
    let fx = fixture();
    let runner = Arc::new(ScriptedRunner::new("30.0"));
    let request = fx.settings.build_request(
        fx._dir.path().join("nope.mp3"),
        &fx.video,
        &fx.music,
        &fx.output,
    );

    let err = pipeline::compose(request, &fx.settings, runner.clone(), None).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::StepFailed {
            source: StepError::MissingInput { .. },
            ..
        }
    ));
    assert!(runner.calls().is_empty());
}

#[test]
fn transcript_without_words_fails_eagerly() {
    let fx = fixture();
    let runner = Arc::new(ScriptedRunner::new("30.0"));
    let mut request = fx
        .settings
        .build_request(&fx.speech, &fx.video, &fx.music, &fx.output);
    request.captions.mode = CaptionMode::SingleWords;

    let err = pipeline::compose(request, &fx.settings, runner.clone(), None).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::StepFailed {
            source: StepError::InvalidInput(_),
            ..
        }
    ));
    assert!(runner.calls().is_empty());
}

#[test]
fn zero_playback_speed_fails_before_any_subprocess() {
    let fx = fixture();
    let runner = Arc::new(ScriptedRunner::new("30.0"));
    let mut settings = fx.settings.clone();
    settings.playback.speed = 0.0;
    let request = settings.build_request(&fx.speech, &fx.video, &fx.music, &fx.output);

    let err = pipeline::compose(request, &settings, runner.clone(), None).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::StepFailed {
            source: StepError::InvalidInput(_),
            ..
        }
    ));
    assert!(runner.calls().is_empty());
}

#[test]
fn burns_proportional_captions_into_mux() {
    let fx = fixture();
    let runner = Arc::new(ScriptedRunner::new("20.0"));
    let mut request = fx
        .settings
        .build_request(&fx.speech, &fx.video, &fx.music, &fx.output)
        .with_narration("First we set the scene carefully. Then everything changes at once.");
    request.captions.mode = CaptionMode::ProportionalSentences;

    pipeline::compose(request, &fx.settings, runner.clone(), None).unwrap();

    let calls = runner.calls();
    let mux = calls.last().unwrap().1.join(" ");
    assert!(mux.contains("-filter:v subtitles="));
    assert!(mux.contains("-c:v libx264"));
    assert!(!mux.contains("-c:v copy"));
}

#[test]
fn word_exact_captions_use_styled_format() {
    let fx = fixture();
    let runner = Arc::new(ScriptedRunner::new("5.0"));
    let mut request = fx
        .settings
        .build_request(&fx.speech, &fx.video, &fx.music, &fx.output)
        .with_transcript(vec![
            TimedWord::new("hello", 0.0, 0.4),
            TimedWord::new("world", 0.5, 0.9),
        ]);
    request.captions.mode = CaptionMode::SingleWords;

    pipeline::compose(request, &fx.settings, runner.clone(), None).unwrap();

    let calls = runner.calls();
    let mux = calls.last().unwrap().1.join(" ");
    assert!(mux.contains("-filter:v ass="));
}

#[test]
fn sidecar_subtitle_when_not_burning() {
    let fx = fixture();
    let runner = Arc::new(ScriptedRunner::new("20.0"));
    let mut request = fx
        .settings
        .build_request(&fx.speech, &fx.video, &fx.music, &fx.output)
        .with_narration("A single sentence that carries the whole story.");
    request.captions.mode = CaptionMode::ProportionalSentences;
    request.captions.burn_in = false;

    pipeline::compose(request, &fx.settings, runner.clone(), None).unwrap();

    let calls = runner.calls();
    let mux = calls.last().unwrap().1.join(" ");
    assert!(mux.contains("-c:v copy"));
    assert!(!mux.contains("-filter:v"));

    let sidecar = fx.output.with_extension("srt");
    assert!(sidecar.is_file());
    let content = fs::read_to_string(sidecar).unwrap();
    assert!(content.contains("A single sentence"));
    assert!(content.contains("00:00:00,000 --> 00:00:20,000"));
}

#[test]
fn playback_speed_reencodes_both_streams() {
    let fx = fixture();
    let runner = Arc::new(ScriptedRunner::new("10.0"));
    let request = fx
        .settings
        .build_request(&fx.speech, &fx.video, &fx.music, &fx.output)
        .with_playback_speed(1.5);

    pipeline::compose(request, &fx.settings, runner.clone(), None).unwrap();

    let mux = runner.calls().last().unwrap().1.join(" ");
    assert!(mux.contains("setpts=PTS/1.5"));
    assert!(mux.contains("-filter:a atempo=1.5"));
    assert!(mux.contains("-c:v libx264"));
}

#[test]
fn working_area_is_removed_after_run() {
    let fx = fixture();
    let runner = Arc::new(ScriptedRunner::new("30.0"));
    let request = fx
        .settings
        .build_request(&fx.speech, &fx.video, &fx.music, &fx.output);

    pipeline::compose(request, &fx.settings, runner, None).unwrap();

    let temp_root = PathBuf::from(&fx.settings.paths.temp_root);
    let leftovers: Vec<_> = fs::read_dir(&temp_root).unwrap().collect();
    assert!(leftovers.is_empty());
}

#[test]
fn probe_failure_aborts_before_any_trim() {
    struct FailingProbe {
        calls: Mutex<usize>,
    }
    impl ToolRunner for FailingProbe {
        fn run(&self, tool: &str, _args: &[String]) -> MediaResult<CommandOutput> {
            *self.calls.lock().unwrap() += 1;
            assert_eq!(tool, "ffprobe");
            Ok(CommandOutput {
                stdout: "N/A\n".to_string(),
                stderr: String::new(),
            })
        }
    }

    let fx = fixture();
    let runner = Arc::new(FailingProbe {
        calls: Mutex::new(0),
    });
    let request = fx
        .settings
        .build_request(&fx.speech, &fx.video, &fx.music, &fx.output);

    let err = pipeline::compose(request, &fx.settings, runner.clone(), None).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::StepFailed {
            source: StepError::Probe(_),
            ..
        }
    ));
    assert_eq!(*runner.calls.lock().unwrap(), 1);
}
