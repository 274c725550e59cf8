use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "unzip-data")]
#[command(version)]
#[command(about = "Extract every entry of a ZIP archive into a directory", long_about = None)]
#[command(after_help = "Examples:\n  \
  unzip-data                     extract data.zip into the current directory\n  \
  unzip-data foo.zip -d out      extract foo.zip into out/\n  \
  RUST_LOG=debug unzip-data      log every entry while extracting")]
pub struct Cli {
    /// ZIP file path
    #[arg(value_name = "FILE", default_value = "data.zip")]
    pub file: PathBuf,

    /// Extract files into exdir
    #[arg(short = 'd', value_name = "DIR", default_value = ".")]
    pub extract_dir: PathBuf,

    /// Log more (-v => info, -vv => debug)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode, errors only
    #[arg(short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
