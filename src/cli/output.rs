use clap::ValueEnum;

/// Output format for command results and error envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Human,
    /// JSON on stdout, JSON error envelope on stderr
    Json,
}

impl OutputFormat {
    /// Format requested on a raw command line
    ///
    /// Used when clap rejects the arguments before `Cli::format` exists.
    /// Accepts `--format json` and `--format=json` anywhere before `--`;
    /// the last occurrence wins, unknown values are ignored.
    pub fn from_argv<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut format = OutputFormat::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            let value = if arg == "--" {
                break;
            } else if arg == "--format" {
                match args.next() {
                    Some(value) => value.as_ref().to_string(),
                    None => break,
                }
            } else if let Some(value) = arg.strip_prefix("--format=") {
                value.to_string()
            } else {
                continue;
            };

            if let Ok(parsed) = OutputFormat::from_str(&value, false) {
                format = parsed;
            }
        }
        format
    }
}
