//! Symbolic static condensation CLI
//!
//! Prints the condensed stiffness matrix, load vector and displacement
//! vector of a generic element system together with code statements.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use fea_condense::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "fea-condense")]
#[command(about = "Statically condense hinged DOFs out of a symbolic stiffness system")]
#[command(version)]
struct Cli {
    /// Number of degrees of freedom of the system
    #[arg(long)]
    size: usize,

    /// Hinged DOF indices, strictly ascending and smaller than the size
    #[arg(
        long,
        num_args = 1..,
        required_unless_present = "release",
        conflicts_with = "release"
    )]
    hinges: Vec<usize>,

    /// Element kind the system belongs to; the size must match its DOF count
    #[arg(long, value_enum)]
    element: Option<ElementKind>,

    /// Hinge the element's rotations at an end instead of listing indices
    #[arg(long, value_enum, requires = "element")]
    release: Option<ElementEnd>,

    /// Largest power written as a repeated product in emitted code
    #[arg(long)]
    max_pow: Option<u32>,

    /// Keep result entries unsimplified
    #[arg(long)]
    no_simplify: bool,

    /// Only print the code statements
    #[arg(long)]
    code_only: bool,

    /// JSON file with condensation options; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Result<CondensationOptions> {
        let mut options = match &self.config {
            Some(path) => CondensationOptions::from_json_file(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => CondensationOptions::default(),
        };
        if let Some(max) = self.max_pow {
            options = options.with_max_expanded_power(max);
        }
        if self.no_simplify {
            options = options.without_simplify();
        }
        if self.code_only {
            options = options.code_only();
        }
        Ok(options)
    }

    fn hinges(&self) -> Result<HingeSet> {
        match (self.element, self.release) {
            (Some(element), Some(end)) => {
                let releases = EndReleases::at(element, end);
                if releases.indices().is_empty() {
                    log::warn!("{} has no rotational DOFs to release", element);
                }
                Ok(releases.hinges()?)
            }
            _ => HingeSet::new(self.hinges.clone(), self.size).context("Invalid hinge set"),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

/// Condense the system described by `cli` and write the report to `out`
fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let options = cli.options()?;
    if let Some(element) = cli.element {
        element.check_size(cli.size)?;
    }

    let hinges = cli.hinges()?;
    if let Some(element) = cli.element {
        for &index in hinges.indices() {
            if !element.is_rotation(index) {
                log::warn!(
                    "Hinge {} releases the translational DOF {} of {}",
                    index,
                    element.dof_label(index).unwrap_or("?"),
                    element
                );
            }
        }
    }

    let system = SymbolicSystem::generic(cli.size)?;
    let condensation = condense(&system, &hinges, &options).context("Condensation failed")?;

    let mut report = Report::new(&condensation, &options);
    if let Some(element) = cli.element {
        report = report.with_element(element);
    }
    report.write_to(out).context("Failed to write report")?;

    Ok(())
}

fn diagnostic(err: &anyhow::Error) -> String {
    format!("error: {:#}", err)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", diagnostic(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fea-condense").chain(args.iter().copied())).unwrap()
    }

    fn output(cli: &Cli) -> String {
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_hinges() {
        let cli = parse(&["--size", "4", "--hinges", "0", "3"]);
        assert_eq!(cli.size, 4);
        assert_eq!(cli.hinges, vec![0, 3]);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_hinges_are_required() {
        assert!(Cli::try_parse_from(["fea-condense", "--size", "4"]).is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "--size",
            "4",
            "--hinges",
            "1",
            "--element",
            "beam2d",
            "--max-pow",
            "2",
            "--code-only",
            "-vv",
        ]);
        let options = cli.options().unwrap();
        assert_eq!(cli.element, Some(ElementKind::Beam2d));
        assert_eq!(options.max_expanded_power, 2);
        assert!(!options.show_matrices);
        assert!(options.simplify);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_run_writes_report() {
        let text = output(&parse(&["--size", "2", "--hinges", "0", "--code-only"]));
        assert!(text.starts_with("    Size: 2, hinges: [0]\n"));
        assert!(text.contains("k.SetSym(1, 1, (k00*k11 - k01*k01)/k00)"));
    }

    #[test]
    fn test_unsorted_hinges_fail_with_diagnostic() {
        let cli = parse(&["--size", "4", "--hinges", "2", "0"]);
        let err = run(&cli, &mut Vec::new()).unwrap_err();

        assert!(matches!(
            err.root_cause().downcast_ref::<CondenseError>(),
            Some(CondenseError::UnsortedHinges(h)) if h == &vec![2, 0]
        ));
        let message = diagnostic(&err);
        assert!(message.starts_with("error: Invalid hinge set: "));
        assert!(message.contains("ascending order"));
    }

    #[test]
    fn test_element_size_mismatch_fails() {
        let cli = parse(&["--size", "3", "--hinges", "1", "--element", "beam2d"]);
        let err = run(&cli, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CondenseError>(),
            Some(CondenseError::ElementSizeMismatch { expected: 4, size: 3, .. })
        ));
    }

    #[test]
    fn test_config_file_with_flag_override() {
        let path = std::env::temp_dir().join(format!(
            "fea-condense-options-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"max_expanded_power": 1, "show_matrices": false, "stiffness_name": "ke"}"#,
        )
        .unwrap();
        let config = path.to_str().unwrap();

        let from_file = parse(&["--size", "2", "--hinges", "0", "--config", config]);
        let options = from_file.options().unwrap();
        assert_eq!(options.max_expanded_power, 1);
        assert!(!options.show_matrices);
        assert_eq!(options.stiffness_name, "ke");

        let overridden = parse(&[
            "--size", "2", "--hinges", "0", "--config", config, "--max-pow", "3",
        ]);
        let options = overridden.options().unwrap();
        assert_eq!(options.max_expanded_power, 3);
        assert!(!options.show_matrices);

        let text = output(&overridden);
        assert!(text.contains("ke.SetSym(1, 1, (k00*k11 - k01*k01)/k00)"));
        assert!(!text.contains("Stiffness matrix:"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_config_file_fails() {
        let cli = parse(&[
            "--size",
            "2",
            "--hinges",
            "0",
            "--config",
            "/nonexistent/fea-condense.json",
        ]);
        let err = run(&cli, &mut Vec::new()).unwrap_err();
        assert!(diagnostic(&err).starts_with("error: Failed to load options from "));
    }

    #[test]
    fn test_no_simplify_reaches_condensation() {
        let cli = parse(&["--size", "3", "--hinges", "0", "2", "--no-simplify"]);
        let options = cli.options().unwrap();
        assert!(!options.simplify);

        let system = SymbolicSystem::generic(3).unwrap();
        let hinges = HingeSet::new(vec![0, 2], 3).unwrap();
        let expected = condense(&system, &hinges, &options.clone().without_simplify()).unwrap();
        assert_eq!(output(&cli), Report::new(&expected, &options).render());
    }

    #[test]
    fn test_release_selects_element_hinges() {
        let cli = parse(&["--size", "4", "--element", "beam2d", "--release", "j"]);
        assert_eq!(cli.release, Some(ElementEnd::J));
        assert_eq!(cli.hinges().unwrap().indices(), &[3]);

        let text = output(&cli);
        assert!(text.contains("Size: 4, hinges: [3]"));
        assert!(text.contains("Element: beam2d, released: [phi_j]"));

        let both = parse(&["--size", "6", "--element", "frame2d", "--release", "both"]);
        assert_eq!(both.hinges().unwrap().indices(), &[2, 5]);
    }

    #[test]
    fn test_release_needs_element_and_excludes_hinges() {
        assert!(Cli::try_parse_from(["fea-condense", "--size", "4", "--release", "i"]).is_err());
        assert!(Cli::try_parse_from([
            "fea-condense",
            "--size",
            "4",
            "--element",
            "beam2d",
            "--release",
            "i",
            "--hinges",
            "1",
        ])
        .is_err());
    }
}
