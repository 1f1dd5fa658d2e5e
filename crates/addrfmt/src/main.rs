use std::fs;
use std::path::{Path, PathBuf};

use addrfmt_core::{AddressData, FormatOptions, OutputKind};
use addrfmt_processor::io::{load_addresses, load_options, load_view};
use addrfmt_processor::{FormatError, Formatted, Formatter};
use addrfmt_template::{escape_none, PartialFn, Renderer};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log pipeline decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format one address or a list of addresses
    Format {
        /// Path to a JSON or YAML file with address fields
        input: PathBuf,

        /// Country code to use instead of the one in the input
        #[arg(short, long)]
        country: Option<String>,

        /// Country code used when the input has none
        #[arg(long)]
        fallback_country: Option<String>,

        /// Abbreviate common words (Street -> St)
        #[arg(short, long)]
        abbreviate: bool,

        /// Add the country name when it is missing
        #[arg(long)]
        append_country: bool,

        /// Keep postcodes as given
        #[arg(long)]
        no_postcode_cleanup: bool,

        /// Output one line per address line instead of text blocks
        #[arg(long)]
        lines: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Options file (YAML or JSON); flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding an alternative data set
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Render a template file against JSON or YAML data
    Render {
        /// Template file
        template: PathBuf,

        /// Data file; renders against an empty view when omitted
        data: Option<PathBuf>,

        /// Directory with `<name>.mustache` partials
        #[arg(long)]
        partials: Option<PathBuf>,
    },
    /// Compile every template in the data set and report failures
    Validate {
        /// Directory holding an alternative data set
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// List known country codes, or look one up
    Countries {
        /// Country code to look up
        code: Option<String>,
    },
    /// Print the JSON schema of the template table
    #[cfg(feature = "schema")]
    Schema,
    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Format {
            input,
            country,
            fallback_country,
            abbreviate,
            append_country,
            no_postcode_cleanup,
            lines,
            json,
            config,
            data_dir,
        } => {
            let mut options = match config {
                Some(ref path) => match load_options(path) {
                    Ok(o) => o,
                    Err(e) => {
                        eprintln!("Error loading config: {}", e);
                        std::process::exit(1);
                    }
                },
                None => FormatOptions::default(),
            };
            if country.is_some() {
                options.country_code = country;
            }
            if fallback_country.is_some() {
                options.fallback_country_code = fallback_country;
            }
            options.abbreviate |= abbreviate;
            options.append_country |= append_country;
            if no_postcode_cleanup {
                options.cleanup_postcode = false;
            }
            if lines {
                options.output = OutputKind::Array;
            }

            let formatter = build_formatter(data_dir.as_deref());
            let addresses = match load_addresses(&input) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Error reading addresses: {}", e);
                    std::process::exit(1);
                }
            };
            debug!(count = addresses.len(), "loaded addresses");

            let mut results = Vec::with_capacity(addresses.len());
            for fields in &addresses {
                match formatter.format(fields, &options) {
                    Ok(formatted) => results.push(formatted),
                    Err(e) => {
                        eprintln!("Error formatting address: {}", e);
                        std::process::exit(1);
                    }
                }
            }

            if json {
                match serde_json::to_string_pretty(&results) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Error serializing results: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_human(&results);
            }
        }
        Commands::Render {
            template,
            data,
            partials,
        } => {
            let source = match fs::read_to_string(&template) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading template: {}", e);
                    std::process::exit(1);
                }
            };
            let view = match data {
                Some(ref path) => match load_view(path) {
                    Ok(v) => v,
                    Err(e) => {
                        eprintln!("Error reading data: {}", e);
                        std::process::exit(1);
                    }
                },
                None => serde_json::Value::Object(Default::default()).into(),
            };

            let renderer = Renderer::new().with_escape(escape_none);
            let rendered = match partials {
                Some(dir) => {
                    let provider = PartialFn(move |name: &str| {
                        fs::read_to_string(dir.join(format!("{name}.mustache"))).ok()
                    });
                    renderer.render_with_partials(&source, view, &provider)
                }
                None => renderer.render(&source, view),
            };
            match rendered {
                Ok(out) => print!("{}", out),
                Err(e) => {
                    eprintln!("Error rendering template: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Validate { data_dir } => {
            let formatter = build_formatter(data_dir.as_deref());
            let issues = formatter.validate_templates();
            if issues.is_empty() {
                println!(
                    "All {} templates compile.",
                    formatter.data().templates.len()
                );
            } else {
                for issue in &issues {
                    eprintln!("{}", issue);
                }
                eprintln!("Validation failed: {} template(s) broken", issues.len());
                std::process::exit(1);
            }
        }
        Commands::Countries { code } => {
            let data = match AddressData::embedded() {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Error loading data: {}", e);
                    std::process::exit(1);
                }
            };
            match code {
                Some(code) => lookup_country(data, &code.to_uppercase()),
                None => {
                    for code in data.templates.codes() {
                        println!("{}  {}", code, data.country_name(code).unwrap_or("-"));
                    }
                }
            }
        }
        #[cfg(feature = "schema")]
        Commands::Schema => {
            use addrfmt_core::CountryTemplate;
            use indexmap::IndexMap;
            use schemars::schema_for;

            let schema = schema_for!(IndexMap<String, CountryTemplate>);
            match serde_json::to_string_pretty(&schema) {
                Ok(out) => println!("{}", out),
                Err(e) => {
                    eprintln!("Error serializing schema: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_formatter(data_dir: Option<&Path>) -> Formatter {
    let built = match data_dir {
        Some(dir) => AddressData::load_dir(dir)
            .map_err(FormatError::from)
            .and_then(Formatter::new),
        None => Formatter::embedded(),
    };
    match built {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error loading address data: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_human(results: &[Formatted]) {
    for (i, formatted) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match formatted {
            Formatted::Text(text) => print!("{}", text),
            Formatted::Lines(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
        }
    }
}

fn lookup_country(data: &AddressData, code: &str) {
    if let Some(entry) = data.templates.get(code) {
        println!("{}  {}", code, data.country_name(code).unwrap_or("-"));
        if let Some(target) = entry.use_country.as_deref() {
            println!("  formatted as {}", target);
        }
        let languages = data.languages(code);
        if !languages.is_empty() {
            println!("  languages: {}", languages.join(", "));
        }
        return;
    }

    eprintln!("Unknown country code: {}", code);
    let suggestions = suggest(data, code);
    if !suggestions.is_empty() {
        eprintln!("Did you mean: {}?", suggestions.join(", "));
    }
    std::process::exit(1);
}

/// Known codes closest to `code`, also matching on country names.
fn suggest(data: &AddressData, code: &str) -> Vec<String> {
    let needle = code.to_lowercase();
    let mut scored: Vec<(f64, &str)> = data
        .templates
        .codes()
        .map(|known| {
            let by_code = strsim::jaro_winkler(&needle, &known.to_lowercase());
            let by_name = data
                .country_name(known)
                .map(|name| strsim::jaro_winkler(&needle, &name.to_lowercase()))
                .unwrap_or(0.0);
            (by_code.max(by_name), known)
        })
        .filter(|(score, _)| *score >= 0.8)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(3)
        .map(|(_, known)| known.to_string())
        .collect()
}
