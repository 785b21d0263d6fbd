use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use converter_core::paths::data_dir;
use converter_core::{AppContext, ConversionKind};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

const PASSWORD_ENV: &str = "CONVERTER_PASSWORD";

#[derive(Parser, Debug)]
#[command(name = "converter")]
#[command(
    author,
    version,
    about = "Bangla Converter: local accounts, file conversions and history",
    long_about = None
)]
struct Cli {
    /// Directory holding config.json and the database
    #[arg(long, global = true, env = "CONVERTER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Database file to use instead of the one named in config.json
    #[arg(long, global = true, env = "CONVERTER_DB_PATH")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a local account
    Register {
        #[arg(long)]
        user: String,
    },

    /// Check a username and password
    Login {
        #[arg(long)]
        user: String,
    },

    /// Convert a file after logging in
    Convert {
        /// One of: docx-to-pdf, pdf-to-docx, jpg-to-png, png-to-jpg, video-to-mp3
        kind: ConversionKind,

        input: PathBuf,

        #[arg(long)]
        user: String,
    },

    /// List the available conversions
    Kinds,

    /// Show recent conversions, newest first
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Switch between the dark and light theme
    Theme,

    /// Switch between Bangla and English
    Lang,

    /// Password reset (not available yet)
    ResetPassword,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data = match cli.data_dir {
        Some(dir) => dir,
        None => data_dir()?,
    };
    let mut ctx = AppContext::init(data, cli.db_path.as_deref())?;

    match cli.command {
        Commands::Register { user } => register_command(&ctx, &user),
        Commands::Login { user } => login_command(&ctx, &user),
        Commands::Convert { kind, input, user } => convert_command(&ctx, kind, &input, &user),
        Commands::Kinds => kinds_command(&ctx),
        Commands::History { limit } => history_command(&ctx, limit),
        Commands::Theme => theme_command(&mut ctx),
        Commands::Lang => lang_command(&mut ctx),
        Commands::ResetPassword => {
            println!("{}", ctx.messages().coming_soon);
            Ok(())
        }
    }
}

fn register_command(ctx: &AppContext, user: &str) -> Result<()> {
    let text = ctx.messages();
    let password = prompt_password(text.password)?;
    if !ctx.credentials().register(user, &password)? {
        bail!("{}", text.username_exists);
    }
    println!("{}", text.registration_success);
    Ok(())
}

fn login_command(ctx: &AppContext, user: &str) -> Result<()> {
    authenticate(ctx, user)?;
    println!("{}", ctx.messages().login_success);
    Ok(())
}

fn convert_command(
    ctx: &AppContext,
    kind: ConversionKind,
    input: &Path,
    user: &str,
) -> Result<()> {
    authenticate(ctx, user)?;
    let output = ctx.dispatcher().run(kind, input)?;
    info!(user, action = kind.label(), "conversion finished");
    println!("{}: {}", ctx.messages().saved, output.display());
    Ok(())
}

fn kinds_command(ctx: &AppContext) -> Result<()> {
    println!("{}", ctx.messages().converter_options);
    for kind in ConversionKind::ALL {
        println!("  {:<14} {}", kind.slug(), kind.label());
    }
    Ok(())
}

fn history_command(ctx: &AppContext, limit: Option<usize>) -> Result<()> {
    let text = ctx.messages();
    let limit = limit.unwrap_or(ctx.config().history_limit);
    let records = ctx.activity().recent(limit)?;
    println!("{}", text.history);
    if records.is_empty() {
        println!("  {}", text.history_empty);
    }
    for record in records {
        let name = Path::new(&record.file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| record.file_path.clone());
        let when = record
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "----------------".to_string());
        println!("  {}  {}  {}", when, record.action, name);
    }
    Ok(())
}

fn theme_command(ctx: &mut AppContext) -> Result<()> {
    let theme = ctx.toggle_theme()?;
    let palette = ctx.palette();
    println!("{}: {}", ctx.messages().theme, theme.as_str());
    println!(
        "  bg {}  fg {}  panel {}  button {}  hover {}",
        palette.bg, palette.fg, palette.panel, palette.button, palette.button_hover
    );
    Ok(())
}

fn lang_command(ctx: &mut AppContext) -> Result<()> {
    let language = ctx.toggle_language()?;
    println!("{} ({})", ctx.messages().title, language.as_str());
    Ok(())
}

fn authenticate(ctx: &AppContext, user: &str) -> Result<()> {
    let text = ctx.messages();
    let password = prompt_password(text.password)?;
    if !ctx.credentials().verify(user, &password)? {
        bail!("{}", text.invalid_credentials);
    }
    Ok(())
}

fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(Zeroizing::new(pw));
    }
    let pw = rpassword::prompt_password(format!("{prompt}: "))
        .map_err(|e| anyhow!("password prompt: {e}"))?;
    Ok(Zeroizing::new(pw))
}
