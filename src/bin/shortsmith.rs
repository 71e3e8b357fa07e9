use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use shortsmith::{
    ArticleExtractor as _, FrameCodec, JsonFileExtractor, MediaKind, Pipeline, ScriptRecord,
    SegmentKind, ShortsConfig,
};

#[derive(Parser, Debug)]
#[command(name = "shortsmith", version, about = "Turn articles into narrated vertical shorts")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the whole pipeline for one article.
    Generate(GenerateArgs),
    /// Build and save the narration script.
    Script(ScriptArgs),
    /// Render and encode the captioned video for a script.
    Video(VideoArgs),
    /// Render one still frame of a segment as a PNG.
    Frame(FrameArgs),
    /// Synthesize the narration for a script.
    Voice(VoiceArgs),
    /// Combine a video with its narration.
    Integrate(IntegrateArgs),
}

#[derive(Args, Debug, Default)]
struct ScriptOverrides {
    /// Template and narration language (`en`, `fr`).
    #[arg(long)]
    language: Option<String>,

    /// Word budget of the full script.
    #[arg(long)]
    max_words: Option<usize>,

    /// Cap on the estimated duration in seconds.
    #[arg(long)]
    max_duration: Option<u32>,
}

#[derive(Args, Debug, Default)]
struct VideoOverrides {
    /// Caption font file tried before the system fonts.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Frame codec of the intermediate AVI.
    #[arg(long, value_enum)]
    codec: Option<CodecChoice>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input article JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output root; `articles/`, `scripts/`, `videos/`, `audio/` and `final/` go below it.
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    #[command(flatten)]
    script: ScriptOverrides,

    #[command(flatten)]
    video: VideoOverrides,

    /// Narrate each section separately and place it under its segment.
    #[arg(long)]
    sections: bool,
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    /// Input article JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output root; the script goes to `<out-dir>/scripts/`.
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    #[command(flatten)]
    script: ScriptOverrides,
}

#[derive(Parser, Debug)]
struct VideoArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    video: VideoOverrides,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Segment to preview.
    #[arg(long, value_enum, default_value_t = SegmentChoice::Intro)]
    segment: SegmentChoice,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    video: VideoOverrides,
}

#[derive(Parser, Debug)]
struct VoiceArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output root; audio goes to `<out-dir>/audio/`.
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    /// Also write one file per section.
    #[arg(long)]
    sections: bool,

    /// Narration language (defaults to the script language).
    #[arg(long)]
    language: Option<String>,
}

#[derive(Parser, Debug)]
struct IntegrateArgs {
    /// Input video.
    video: PathBuf,

    /// Input narration.
    audio: PathBuf,

    /// Output MP4 path; the manual bundle uses the same path without extension.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CodecChoice {
    Mjpeg,
    Dib,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SegmentChoice {
    Intro,
    Body,
    Conclusion,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Generate(args) => cmd_generate(config, args),
        Command::Script(args) => cmd_script(config, args),
        Command::Video(args) => cmd_video(config, args),
        Command::Frame(args) => cmd_frame(config, args),
        Command::Voice(args) => cmd_voice(config, args),
        Command::Integrate(args) => cmd_integrate(config, args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::WARN,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ShortsConfig> {
    match path {
        Some(p) => ShortsConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(ShortsConfig::default()),
    }
}

fn apply_script(config: &mut ShortsConfig, o: ScriptOverrides) {
    if let Some(language) = o.language {
        config.script.language = language;
    }
    if let Some(n) = o.max_words {
        config.script.max_words = n;
    }
    if let Some(n) = o.max_duration {
        config.script.max_duration = n;
    }
}

fn apply_video(config: &mut ShortsConfig, o: VideoOverrides) {
    if let Some(font) = o.font {
        config.video.font_path = Some(font);
    }
    if let Some(codec) = o.codec {
        config.video.raw_codec = match codec {
            CodecChoice::Mjpeg => FrameCodec::Mjpeg,
            CodecChoice::Dib => FrameCodec::Dib,
        };
    }
}

fn read_script(path: &Path) -> anyhow::Result<ScriptRecord> {
    ScriptRecord::from_path(path).with_context(|| format!("load script '{}'", path.display()))
}

fn cmd_generate(mut config: ShortsConfig, args: GenerateArgs) -> anyhow::Result<()> {
    apply_script(&mut config, args.script);
    apply_video(&mut config, args.video);

    let pipeline = Pipeline::new(config, &args.out_dir)?.with_section_narration(args.sections);
    let out = pipeline.run(&args.in_path.to_string_lossy())?;

    eprintln!("script: {}", out.script_path.display());
    eprintln!("video:  {}", out.video.path.display());
    eprintln!("audio:  {}", out.audio.path.display());
    for part in &out.section_audio {
        eprintln!("        {} ({})", part.asset.path.display(), part.kind);
    }
    match out.final_asset.kind {
        MediaKind::Bundle => eprintln!(
            "no muxing tool available; manual bundle written to {}",
            out.final_asset.path.display()
        ),
        _ => eprintln!("wrote {}", out.final_asset.path.display()),
    }
    Ok(())
}

fn cmd_script(mut config: ShortsConfig, args: ScriptArgs) -> anyhow::Result<()> {
    apply_script(&mut config, args.script);
    let pipeline = Pipeline::new(config, &args.out_dir)?;

    let article = JsonFileExtractor::new().extract(&args.in_path.to_string_lossy())?;
    let script = pipeline.build_script(&article);
    let path = pipeline.layout().script_path(&script.slug());
    script.save(&path)?;

    println!("title:    {}", script.title);
    println!("words:    {}", script.word_count);
    println!("duration: {}s", script.estimated_duration);
    println!();
    println!("{}", script.full_script);
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_video(mut config: ShortsConfig, args: VideoArgs) -> anyhow::Result<()> {
    apply_video(&mut config, args.video);
    let script = read_script(&args.script)?;

    let pipeline = Pipeline::new(config, ".")?;
    let asset = pipeline.render_video(&script, &args.out)?;
    if asset.path != args.out {
        eprintln!("compression unavailable; raw video kept");
    }
    eprintln!("wrote {}", asset.path.display());
    Ok(())
}

fn cmd_frame(mut config: ShortsConfig, args: FrameArgs) -> anyhow::Result<()> {
    apply_video(&mut config, args.video);
    let script = read_script(&args.script)?;
    let kind = match args.segment {
        SegmentChoice::Intro => SegmentKind::Intro,
        SegmentChoice::Body => SegmentKind::Body,
        SegmentChoice::Conclusion => SegmentKind::Conclusion,
    };

    let pipeline = Pipeline::new(config, ".")?;
    let frame = pipeline.preview_frame(&script, kind)?;
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_voice(mut config: ShortsConfig, args: VoiceArgs) -> anyhow::Result<()> {
    if args.language.is_some() {
        config.voice.language = args.language;
    }
    let script = read_script(&args.script)?;

    let pipeline = Pipeline::new(config, &args.out_dir)?;
    let slug = script.slug();
    let asset = pipeline.narrate(&script, &pipeline.layout().audio_path(&slug))?;
    eprintln!("wrote {}", asset.path.display());

    if args.sections {
        let parts = pipeline.narrate_sections(&script, &slug)?;
        for part in parts {
            eprintln!("wrote {} ({})", part.asset.path.display(), part.kind);
        }
    }
    Ok(())
}

fn cmd_integrate(config: ShortsConfig, args: IntegrateArgs) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config, ".")?;
    let asset = pipeline.integrate(&args.video, &args.audio, &args.out)?;
    match asset.kind {
        MediaKind::Bundle => eprintln!(
            "no muxing tool available; manual bundle written to {}",
            asset.path.display()
        ),
        _ => eprintln!("wrote {}", asset.path.display()),
    }
    Ok(())
}
