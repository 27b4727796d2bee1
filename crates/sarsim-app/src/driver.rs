use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

use sarsim_core::game::session::{RoundKind, RoundResult, SearchSession};
use sarsim_core::model::probability::RegionProbabilities;
use sarsim_core::model::region::RegionId;

use crate::config::SimConfig;
use crate::telemetry::{RoundLog, RoundRecord};

/// One parsed menu selection. The digits match the classic exercise menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Quit,
    Round(RoundKind),
    StartOver,
}

pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    let kind = match input.trim() {
        "0" => return Some(MenuChoice::Quit),
        "7" => return Some(MenuChoice::StartOver),
        "1" => RoundKind::DoubleRegion(RegionId::Alpha),
        "2" => RoundKind::DoubleRegion(RegionId::Bravo),
        "3" => RoundKind::DoubleRegion(RegionId::Charlie),
        "4" => RoundKind::Pair(RegionId::Alpha, RegionId::Bravo),
        "5" => RoundKind::Pair(RegionId::Alpha, RegionId::Charlie),
        "6" => RoundKind::Pair(RegionId::Bravo, RegionId::Charlie),
        _ => return None,
    };
    Some(MenuChoice::Round(kind))
}

/// Parses a comma-separated list of menu digits for non-interactive runs.
pub fn parse_plan(plan: &str) -> Result<Vec<MenuChoice>> {
    plan.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            parse_choice(entry).ok_or_else(|| anyhow::anyhow!("invalid plan entry '{entry}'"))
        })
        .collect()
}

pub fn run_interactive<R: BufRead, W: Write>(
    config: &SimConfig,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let mut log = open_round_log(config)?;

    loop {
        let mut session = new_session(config)?;
        print_session_header(out, &session)?;

        let outcome = run_session(&mut session, input, out, log.as_mut())?;
        match outcome {
            SessionOutcome::Quit => return Ok(()),
            SessionOutcome::Restart => continue,
            SessionOutcome::Found => {
                writeln!(out)?;
                write!(out, "Play again (y/n)?: ")?;
                out.flush()?;
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 || !line.trim().eq_ignore_ascii_case("y") {
                    return Ok(());
                }
            }
        }
    }
}

/// Executes a pre-parsed plan of menu choices without prompting.
pub fn run_plan<W: Write>(config: &SimConfig, plan: &str, out: &mut W) -> Result<()> {
    let choices = parse_plan(plan)?;
    if choices.is_empty() {
        bail!("plan contains no choices");
    }

    let mut log = open_round_log(config)?;
    let mut session = new_session(config)?;
    print_session_header(out, &session)?;

    for choice in choices {
        match choice {
            MenuChoice::Quit => break,
            MenuChoice::StartOver => {
                session = new_session(config)?;
                print_session_header(out, &session)?;
            }
            MenuChoice::Round(kind) => {
                if execute_round(&mut session, kind, out, log.as_mut())? {
                    break;
                }
            }
        }
    }
    Ok(())
}

enum SessionOutcome {
    Quit,
    Restart,
    Found,
}

fn run_session<R: BufRead, W: Write>(
    session: &mut SearchSession,
    input: &mut R,
    out: &mut W,
    mut log: Option<&mut RoundLog>,
) -> Result<SessionOutcome> {
    loop {
        print_menu(out, session.round_number())?;
        write!(out, "Choice: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(SessionOutcome::Quit);
        }

        match parse_choice(&line) {
            Some(MenuChoice::Quit) => return Ok(SessionOutcome::Quit),
            Some(MenuChoice::StartOver) => return Ok(SessionOutcome::Restart),
            Some(MenuChoice::Round(kind)) => {
                if execute_round(session, kind, out, log.as_mut().map(|log| &mut **log))? {
                    return Ok(SessionOutcome::Found);
                }
            }
            None => {
                writeln!(out, "Sorry, but that isn't a valid choice.")?;
            }
        }
    }
}

/// Runs one round and reports it. Returns true once the target was found.
fn execute_round<W: Write>(
    session: &mut SearchSession,
    kind: RoundKind,
    out: &mut W,
    log: Option<&mut RoundLog>,
) -> Result<bool> {
    let result = session
        .run_round(kind)
        .with_context(|| format!("running search {} ({kind})", session.round_number()))?;

    tracing::info!(
        round = result.round,
        kind = %kind,
        found = result.target_was_found(),
        "search round complete"
    );

    if let Some(log) = log {
        log.append(&RoundRecord::from_result(kind, &result))
            .context("writing round log")?;
    }

    report_round(out, &result)?;

    if result.target_was_found() {
        let Some(location) = session.target_global_location() else {
            bail!("session reported a find without a target location");
        };
        writeln!(out, "Target found at {location}.")?;
        tracing::info!(x = location.x, y = location.y, "target located");
        return Ok(true);
    }
    Ok(false)
}

fn report_round<W: Write>(out: &mut W, result: &RoundResult) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Search {} results:", result.round)?;
    for (i, pass) in result.outcomes.iter().enumerate() {
        writeln!(out, "  Pass {} -> {}", i + 1, pass.result)?;
    }

    let e = result.effectiveness.values();
    writeln!(
        out,
        "Search effectiveness: E1 = {:.3}, E2 = {:.3}, E3 = {:.3}",
        e[0], e[1], e[2]
    )?;

    if let Some(probs) = &result.probabilities {
        writeln!(out, "New target probabilities for search {}:", result.round + 1)?;
        print_probabilities(out, probs)?;
    }
    Ok(())
}

fn print_session_header<W: Write>(out: &mut W, session: &SearchSession) -> Result<()> {
    writeln!(out, "{}", "-".repeat(65))?;
    writeln!(out, "Session seed: {}", session.seed())?;
    writeln!(out, "Initial target probabilities:")?;
    print_probabilities(out, session.probabilities())?;
    Ok(())
}

fn print_probabilities<W: Write>(out: &mut W, probs: &RegionProbabilities) -> Result<()> {
    let p = probs.values();
    writeln!(
        out,
        "P1 = {:.3}, P2 = {:.3}, P3 = {:.3}",
        p[0], p[1], p[2]
    )?;
    Ok(())
}

fn print_menu<W: Write>(out: &mut W, round: u32) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Search {round}")?;
    writeln!(out, "Choose next areas to search:")?;
    writeln!(out, "  0 - Quit")?;
    writeln!(out, "  1 - Search Area 1 twice")?;
    writeln!(out, "  2 - Search Area 2 twice")?;
    writeln!(out, "  3 - Search Area 3 twice")?;
    writeln!(out, "  4 - Search Areas 1 & 2")?;
    writeln!(out, "  5 - Search Areas 1 & 3")?;
    writeln!(out, "  6 - Search Areas 2 & 3")?;
    writeln!(out, "  7 - Start over")?;
    Ok(())
}

fn open_round_log(config: &SimConfig) -> Result<Option<RoundLog>> {
    config
        .round_log
        .as_ref()
        .map(RoundLog::create)
        .transpose()
        .context("opening round log")
}

fn new_session(config: &SimConfig) -> Result<SearchSession> {
    let mut setup = config.session_setup().context("building session setup")?;
    if setup.seed.is_none() {
        setup = setup.seed(rand::random());
    }
    SearchSession::from_setup(setup).context("starting search session")
}

#[cfg(test)]
mod tests {
    use super::{MenuChoice, parse_choice, parse_plan, run_interactive, run_plan};
    use crate::config::SimConfig;
    use sarsim_core::game::session::RoundKind;
    use sarsim_core::model::region::RegionId;

    fn config_with_sweep(low: f64, high: f64) -> SimConfig {
        let mut config = SimConfig::default();
        config.sweep.low = low;
        config.sweep.high = high;
        config.seed = Some(4242);
        config
    }

    #[test]
    fn menu_digits_map_to_round_kinds() {
        assert_eq!(parse_choice("0"), Some(MenuChoice::Quit));
        assert_eq!(parse_choice("7"), Some(MenuChoice::StartOver));
        assert_eq!(
            parse_choice("2"),
            Some(MenuChoice::Round(RoundKind::DoubleRegion(RegionId::Bravo)))
        );
        assert_eq!(
            parse_choice(" 5 \n"),
            Some(MenuChoice::Round(RoundKind::Pair(
                RegionId::Alpha,
                RegionId::Charlie
            )))
        );
        assert_eq!(parse_choice("8"), None);
        assert_eq!(parse_choice("quit"), None);
    }

    #[test]
    fn plans_parse_or_fail_loudly() {
        let plan = parse_plan("1, 4,6").unwrap();
        assert_eq!(plan.len(), 3);
        assert!(parse_plan("1,9").is_err());
    }

    #[test]
    fn blind_sweeps_never_find_and_leave_priors_untouched() {
        let config = config_with_sweep(0.0, 0.0);
        let mut out = Vec::new();
        run_plan(&config, "4,6,5", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Not Found"));
        assert!(!text.contains("Target found"));
        // Zero effectiveness inspects nothing, so belief never moves.
        assert!(text.contains("P1 = 0.200, P2 = 0.500, P3 = 0.300"));
    }

    #[test]
    fn exhaustive_sweeps_find_the_target_within_three_rounds() {
        let config = config_with_sweep(1.0, 1.0);
        let mut out = Vec::new();
        run_plan(&config, "1,2,3", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Target found at"));
    }

    #[test]
    fn interactive_session_quits_on_zero() {
        let config = config_with_sweep(0.0, 0.0);
        let mut input = b"4\n0\n".as_slice();
        let mut out = Vec::new();
        run_interactive(&config, &mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Choose next areas to search:"));
        assert!(text.contains("Not Found"));
    }

    #[test]
    fn interactive_session_reports_invalid_choices() {
        let config = config_with_sweep(0.0, 0.0);
        let mut input = b"9\n0\n".as_slice();
        let mut out = Vec::new();
        run_interactive(&config, &mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("isn't a valid choice"));
    }

    #[test]
    fn interactive_eof_ends_the_run() {
        let config = config_with_sweep(0.0, 0.0);
        let mut input = b"".as_slice();
        let mut out = Vec::new();
        run_interactive(&config, &mut input, &mut out).unwrap();
    }
}
