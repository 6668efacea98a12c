use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::info;
use oledconv::{
    read_source, ConversionContext, ConversionMode, Converter, EXAMPLE_SOURCE, FONT_8X16,
};
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use crate::report::{function_table, json_report};
mod report;

#[derive(Parser)]
#[command(
    name = "oledconv",
    version,
    about = "Convert OLED row/column calls to pixel coordinates or OLED_Printf"
)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Convert OLED calls in a C source file (stdin when omitted)
    Convert {
        input: Option<PathBuf>,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ModeArg::Direct)]
        mode: ModeArg,
        /// Font-size token, inserted verbatim (e.g. OLED_8X16, OLED_6X8)
        #[arg(short, long, default_value = FONT_8X16)]
        font: String,
        /// Prepend OLED_Clear();
        #[arg(long)]
        clear: bool,
        /// Do not append OLED_Update();
        #[arg(long)]
        no_update: bool,
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        report: ReportFormat,
    },
    /// Print the built-in example code
    Example,
    /// List recognized functions with their old and new signatures
    Functions,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Mode 1: keep the function, switch to pixel parameters
    #[value(alias = "1")]
    Direct,
    /// Mode 2: convert everything to OLED_Printf
    #[value(alias = "2")]
    Printf,
}

impl From<ModeArg> for ConversionMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Direct => ConversionMode::Direct,
            ModeArg::Printf => ConversionMode::Printf,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    /// Status line on stderr
    Text,
    /// JSON summary on stdout
    Json,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let converter = Converter::new();

    match cli.command {
        Cmd::Convert {
            input,
            output,
            mode,
            font,
            clear,
            no_update,
            report,
        } => {
            let code = match input.as_ref().filter(|p| p.as_os_str() != "-") {
                Some(path) => {
                    let file = fs::File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    read_source(file).with_context(|| format!("{}", path.display()))?
                }
                None => read_source(io::stdin().lock()).context("stdin")?,
            };
            info!("read {} lines", code.lines().count());

            let context = ConversionContext::new(mode.into())
                .with_font_size(font)
                .with_clear(clear)
                .with_update(!no_update);
            let out = converter.convert_block(&code, &context);

            if let Some(path) = &output {
                fs::write(path, format!("{}\n", out.text))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("wrote {}", path.display());
            }

            match report {
                ReportFormat::Text => {
                    if output.is_none() {
                        let mut stdout = io::stdout().lock();
                        writeln!(stdout, "{}", out.text)?;
                    }
                    eprintln!("{}", out.summary());
                }
                ReportFormat::Json => {
                    let path = output.as_ref().map(|p| p.display().to_string());
                    let value = json_report(&out, &context, path.as_deref());
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
            }
        }
        Cmd::Example => {
            println!("{EXAMPLE_SOURCE}");
        }
        Cmd::Functions => {
            println!("{}", function_table(converter.functions()));
        }
    }
    Ok(())
}
