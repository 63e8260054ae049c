use std::{env, fs, path::PathBuf, process};

use anyhow::{Context, Result, bail};
use embed_resize_config::Config;
use embed_resize_engine::{EditorHost, MemoryHost, syntax};
use relative_path::RelativePath;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("inspect") if args.len() == 3 => inspect(&resolve_file(&args[2])?),
        Some("set-width") if args.len() == 5 => {
            let line: usize = args[3]
                .parse()
                .context("line must be a positive integer")?;
            let width: u32 = args[4]
                .parse()
                .context("width must be a non-negative integer")?;
            set_width(&resolve_file(&args[2])?, line, width)
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: embed-resize-cli <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  inspect <file>                   List image embeds and their widths");
    eprintln!("  set-width <file> <line> <width>  Set the display width of the embed");
    eprintln!("                                   on the given 1-based line");
    eprintln!();
    eprintln!("Relative files are resolved against notes_path from");
    eprintln!("~/.config/embed-resize/config.toml when it exists.");
}

/// Resolve a file argument, anchoring relative paths at the configured notes
/// directory when one is set up.
fn resolve_file(arg: &str) -> Result<PathBuf> {
    let direct = PathBuf::from(arg);
    if direct.is_absolute() || direct.exists() {
        return Ok(direct);
    }
    match Config::load()? {
        Some(config) => Ok(RelativePath::new(arg).to_path(&config.notes_path)),
        None => Ok(direct),
    }
}

fn inspect(path: &PathBuf) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let mut found = 0;
    for (index, line) in content.lines().enumerate() {
        if !syntax::is_embed_line(line) {
            continue;
        }
        found += 1;
        let markup = syntax::normalize_to_canonical(line).unwrap_or_else(|_| line.to_string());
        match syntax::ImageEmbed::parse(&markup) {
            Ok(embed) => match embed.width {
                Some(width) => println!("{:>5}  {}  width={}", index + 1, embed.target, width),
                None => println!("{:>5}  {}  (no width)", index + 1, embed.target),
            },
            Err(err) => println!("{:>5}  unparseable embed: {}", index + 1, err),
        }
    }
    if found == 0 {
        println!("no image embeds in {}", path.display());
    }
    Ok(())
}

fn set_width(path: &PathBuf, line: usize, width: u32) -> Result<()> {
    if line == 0 {
        bail!("line numbers are 1-based");
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let mut host = MemoryHost::new(&content);
    let offset = host
        .offset_of_line(line - 1)
        .map_err(|_| anyhow::anyhow!("{} has no line {}", path.display(), line))?;
    let text = host.line_text(offset)?;
    if !syntax::is_embed_line(&text) {
        bail!("line {line} is not an image embed: {text:?}");
    }

    let markup = syntax::normalize_to_canonical(&text).unwrap_or(text);
    let rewritten = syntax::rewrite_width(&markup, width);
    let span = host.line_span(offset)?;
    host.replace_span(span, &rewritten)?;

    fs::write(path, host.text()).with_context(|| format!("writing {}", path.display()))?;
    println!("{}:{} -> {}", path.display(), line, rewritten);
    Ok(())
}
