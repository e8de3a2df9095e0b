//! Command implementations.
//!
//! Each command renders to a `String` so it can be tested without a terminal.
//! `styled` turns on ANSI styling for text output; JSON is never styled.

use std::fmt::Write as _;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use console::Style;
use lightdark::{
    resolve_with_cause, Mode, ModeSelection, ResolutionCause, SystemColorScheme, ToggleElement,
};
use serde::Serialize;

use crate::cli::{PlayArgs, ResolveArgs, TableArgs, WatchArgs};
use crate::scenario::{PlayReport, Scenario};

/// One resolver combination and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub user: ModeSelection,
    pub attr: ModeSelection,
    pub pref: Mode,
    pub dirty: bool,
    pub mode: Mode,
    pub auto: bool,
    pub cause: ResolutionCause,
}

/// Every combination of resolver inputs, in a stable order.
pub fn table_rows() -> Vec<TableRow> {
    let mut rows = Vec::with_capacity(36);
    for user in ModeSelection::ALL {
        for attr in ModeSelection::ALL {
            for pref in Mode::ALL {
                for dirty in [false, true] {
                    let (resolved, cause) = resolve_with_cause(user, attr, pref, dirty);
                    rows.push(TableRow {
                        user,
                        attr,
                        pref,
                        dirty,
                        mode: resolved.mode,
                        auto: resolved.auto,
                        cause,
                    });
                }
            }
        }
    }
    rows
}

/// `lightdark resolve`: one resolver combination.
pub fn resolve(args: &ResolveArgs, styled: bool) -> anyhow::Result<String> {
    let (resolved, cause) = resolve_with_cause(args.user, args.attr, args.pref, args.dirty);
    tracing::info!(%resolved, %cause, "resolved");
    if args.json {
        #[derive(Serialize)]
        struct Output {
            mode: Mode,
            auto: bool,
            cause: ResolutionCause,
        }
        let output = Output {
            mode: resolved.mode,
            auto: resolved.auto,
            cause,
        };
        return serde_json::to_string_pretty(&output).context("failed to serialize resolution");
    }
    Ok(format!(
        "{} {}",
        paint(mode_style(resolved.mode), &resolved.to_string(), styled),
        paint(Style::new().dim(), &format!("[{cause}]"), styled),
    ))
}

/// `lightdark table`: every resolver combination.
pub fn table(args: &TableArgs, styled: bool) -> anyhow::Result<String> {
    let rows = table_rows();
    if args.json {
        return serde_json::to_string_pretty(&rows).context("failed to serialize table");
    }

    let header = format!(
        "{:<6} {:<6} {:<6} {:<6} {:<6} {:<6} {}",
        "user", "attr", "pref", "dirty", "mode", "auto", "rule"
    );
    let mut out = String::new();
    let _ = writeln!(out, "{}", paint(Style::new().bold(), &header, styled));
    for row in &rows {
        let mode = format!("{:<6}", row.mode.as_str());
        let _ = writeln!(
            out,
            "{:<6} {:<6} {:<6} {:<6} {} {:<6} {}",
            row.user.as_str(),
            row.attr.as_str(),
            row.pref.as_str(),
            row.dirty,
            paint(mode_style(row.mode), &mode, styled),
            row.auto,
            row.cause,
        );
    }
    Ok(out)
}

/// `lightdark play`: replays a scenario file.
pub fn play(args: &PlayArgs, styled: bool) -> anyhow::Result<String> {
    let scenario = Scenario::from_file(&args.scenario)?;
    let report = scenario.play()?;
    if args.json {
        return serde_json::to_string_pretty(&report).context("failed to serialize report");
    }
    Ok(render_report(&report, styled))
}

/// Human-readable play report.
pub fn render_report(report: &PlayReport, styled: bool) -> String {
    let mut out = String::new();
    for event in &report.events {
        let _ = writeln!(
            out,
            "{} {}",
            paint(Style::new().cyan(), event.event_type, styled),
            paint(mode_style(event.mode), &event.resolved().to_string(), styled),
        );
    }
    for rejection in &report.rejected {
        let _ = writeln!(
            out,
            "{} step {}: {}",
            paint(Style::new().red(), "rejected", styled),
            rejection.step,
            rejection.message
        );
    }
    let _ = writeln!(
        out,
        "{} {} {}",
        paint(Style::new().bold(), &format!("<{}>", report.tag), styled),
        paint(mode_style(report.resolved.mode), &report.resolved.to_string(), styled),
        paint(Style::new().dim(), &format!("[{}]", report.cause), styled),
    );
    let _ = writeln!(out, "  dirty:  {}", report.dirty);
    let _ = writeln!(out, "  states: {}", report.states.join(" "));
    let _ = writeln!(out, "  passes: {}", report.passes);
    out
}

/// Polls the OS preference, printing each change event as it happens.
///
/// Runs until `count` events were printed, or forever without a count.
pub fn watch(args: &WatchArgs, styled: bool) -> anyhow::Result<()> {
    let system = std::rc::Rc::new(SystemColorScheme::new());
    let toggle = ToggleElement::builder(args.variant)
        .color_scheme(system.clone())
        .build();
    println!(
        "{} {}",
        paint(Style::new().bold(), &format!("<{}>", toggle.tag_name()), styled),
        paint(mode_style(toggle.mode()), &toggle.resolved().to_string(), styled),
    );

    let seen = std::rc::Rc::new(std::cell::Cell::new(0usize));
    let counter = seen.clone();
    let _sub = toggle.on_change(move |event| {
        counter.set(counter.get() + 1);
        println!(
            "{} {}",
            paint(Style::new().cyan(), event.event_type, styled),
            paint(mode_style(event.mode), &event.resolved().to_string(), styled),
        );
    });

    let interval = Duration::from_millis(args.interval_ms.max(1));
    tracing::info!(interval_ms = args.interval_ms, "watching system preference");
    while args.count.map_or(true, |limit| seen.get() < limit) {
        thread::sleep(interval);
        if system.poll() {
            toggle.flush();
        }
    }
    Ok(())
}

fn mode_style(mode: Mode) -> Style {
    match mode {
        Mode::Light => Style::new().yellow(),
        Mode::Dark => Style::new().blue(),
    }
}

fn paint(style: Style, text: &str, styled: bool) -> String {
    if styled {
        style.force_styling(true).apply_to(text).to_string()
    } else {
        text.to_string()
    }
}

