//! Core application

use std::io::{IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_LOG_TARGET, ENV_LOG, EXIT_INCOMPLETE_FILTER};
use crate::domain::filters::{
    self, AGREEMENT_CONTENT_OPTIONS, AGREEMENT_LINE_TYPE_OPTIONS, ActiveFilters,
    ContentFilterForm, FilterGroup, FilterOption,
};
use crate::utils::file::read_input;

pub struct CoreApp {
    pub config: AppConfig,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<ExitCode> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self {
            config: AppConfig::load(&cli_config)?,
        };
        app.execute(command)
    }

    fn execute(&self, command: Commands) -> Result<ExitCode> {
        match command {
            Commands::Decode { expressions } => self.decode(&expressions),
            Commands::Encode { input, active } => self.encode(input.as_deref(), active.as_deref()),
            Commands::Describe { expressions } => self.describe(&expressions),
            Commands::Options => self.options(),
        }
    }

    fn decode(&self, expressions: &[String]) -> Result<ExitCode> {
        let groups = filters::decode(expressions, &self.config.messages)
            .context("Failed to decode content filter")?;
        self.print_json(&groups)?;
        Ok(ExitCode::SUCCESS)
    }

    fn encode(&self, input: Option<&Path>, active: Option<&Path>) -> Result<ExitCode> {
        let rows = read_input(input)?;
        let groups: Vec<FilterGroup> =
            serde_json::from_str(&rows).context("Failed to parse filter rows")?;

        let active = match active {
            Some(path) => serde_json::from_str(&read_input(Some(path))?)
                .context("Failed to parse active filter state")?,
            None => ActiveFilters::new(),
        };

        let form = ContentFilterForm::new(groups);
        let mut committed = None;
        filters::submit(
            &form,
            &self.config.filter_name,
            &active,
            &mut |state: ActiveFilters| committed = Some(state),
        );

        let Some(state) = committed else {
            eprintln!(
                "Filter not committed: every row needs an attribute and at least one content type"
            );
            return Ok(ExitCode::from(EXIT_INCOMPLETE_FILTER));
        };

        self.print_json(&state)?;
        Ok(ExitCode::SUCCESS)
    }

    fn describe(&self, expressions: &[String]) -> Result<ExitCode> {
        let groups = filters::decode(expressions, &self.config.messages)
            .context("Failed to decode content filter")?;
        let form = ContentFilterForm::new(groups);
        println!("{}", form.describe(&self.config.messages));
        Ok(ExitCode::SUCCESS)
    }

    fn options(&self) -> Result<ExitCode> {
        let mut stdout = std::io::stdout().lock();
        self.write_options(&mut stdout, "Content types", AGREEMENT_CONTENT_OPTIONS)?;
        writeln!(stdout)?;
        self.write_options(&mut stdout, "Agreement line types", AGREEMENT_LINE_TYPE_OPTIONS)?;
        Ok(ExitCode::SUCCESS)
    }

    fn write_options(
        &self,
        out: &mut impl Write,
        title: &str,
        options: &[FilterOption],
    ) -> Result<()> {
        writeln!(out, "{}:", title)?;
        for option in options {
            writeln!(
                out,
                "  {:<24} {}",
                option.value,
                option.label(&self.config.messages)
            )?;
        }
        Ok(())
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        writeln!(std::io::stdout().lock(), "{}", json)?;
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("warn,{}=info", APP_LOG_TARGET);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(std::io::stderr().is_terminal())
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
