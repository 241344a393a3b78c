mod cli;
mod output;

use clap::Parser;
use log::{warn, LevelFilter};
use std::process::ExitCode;

use cli::{Cli, RunArgs};
use output::StatusReport;
use pcltoggle::config::{self, ResolvedRoot, RootInputs};
use pcltoggle::engine::ToggleEvent;
use pcltoggle::{worker, CancelFlag, ToggleEngine, ToggleMode, ToggleRequest, ToggleResult};

const EXIT_FAILURES: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_CANCELLED: u8 = 130;

fn init_logger(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Off
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    let mut builder = env_logger::Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(spec) if !cli.quiet => builder.parse_filters(&spec),
        _ => builder.filter_level(level),
    };
    builder.format_timestamp(None).try_init().ok();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(&cli);

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: &Cli) -> pcltoggle::Result<u8> {
    // Usage faults surface before the root is resolved or touched.
    let target = cli
        .command
        .run_target()
        .map(|(mode, args)| mode.map(|m| (m, args)))
        .transpose()?;

    let root = config::resolve_root(&RootInputs::from_env(cli.root.clone(), cli.config.clone()))?;
    log::debug!("Using root {} ({})", root.path.display(), root.source.label());

    match target {
        None => Ok(status(cli, &root)),
        Some((mode, args)) => toggle(cli, &root, mode, args),
    }
}

fn status(cli: &Cli, root: &ResolvedRoot) -> u8 {
    let engine = ToggleEngine::new();
    let report = StatusReport {
        root: root.path.display().to_string(),
        root_source: root.source.label(),
        root_exists: root.path.is_dir(),
        can_disable: engine.can_disable(&root.path),
        can_enable: engine.can_enable(&root.path),
    };

    if cli.json {
        output::print_json(&report);
    } else {
        output::print_status(&report);
    }
    0
}

fn toggle(cli: &Cli, root: &ResolvedRoot, mode: ToggleMode, args: RunArgs) -> pcltoggle::Result<u8> {
    let request = ToggleRequest::new(root.path.clone(), mode);

    if args.dry_run {
        let plan = ToggleEngine::new().plan(&request);
        if cli.json {
            output::print_json(&plan);
        } else {
            output::print_header(mode, &request.root);
            output::print_plan(&plan);
        }
        return Ok(if plan.failures.is_empty() { 0 } else { EXIT_FAILURES });
    }

    let cancel = CancelFlag::new();
    if let Err(e) = cancel.install_ctrlc() {
        warn!("Ctrl-C will not stop the batch cleanly: {e}");
    }

    if !cli.json {
        output::print_header(mode, &request.root);
    }

    let rx = worker::spawn(request, cancel);
    let result = worker::wait(rx, |event| {
        if cli.json {
            return;
        }
        match event {
            ToggleEvent::Renamed(r) => output::print_renamed(&r.from, &r.to),
            ToggleEvent::Failed(f) => output::print_failure(f),
            ToggleEvent::Scanned { .. } => {}
        }
    })?;

    if cli.json {
        output::print_json(&result);
    } else {
        output::print_summary(&result);
    }
    Ok(exit_code(&result))
}

fn exit_code(result: &ToggleResult) -> u8 {
    if result.cancelled {
        EXIT_CANCELLED
    } else if result.failures.is_empty() {
        0
    } else {
        EXIT_FAILURES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcltoggle::FailureReason;

    #[test]
    fn exit_codes_follow_result() {
        let mut result = ToggleResult::default();
        assert_eq!(exit_code(&result), 0);

        result.record_failure("x".into(), FailureReason::TargetExists);
        assert_eq!(exit_code(&result), EXIT_FAILURES);

        result.cancelled = true;
        assert_eq!(exit_code(&result), EXIT_CANCELLED);
    }
}
