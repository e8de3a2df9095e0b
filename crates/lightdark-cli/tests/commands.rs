use std::io::Write;

use lightdark::{resolve, Mode, ModeSelection, ResolutionCause, ResolvedMode};
use lightdark_cli::cli::{PlayArgs, ResolveArgs, TableArgs};
use lightdark_cli::commands::{self, table_rows};

fn resolve_args(user: ModeSelection, attr: ModeSelection, pref: Mode, dirty: bool) -> ResolveArgs {
    ResolveArgs {
        user,
        attr,
        pref,
        dirty,
        json: false,
    }
}

fn scenario_file(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn resolve_prints_mode_and_rule() {
    let args = resolve_args(ModeSelection::Auto, ModeSelection::Dark, Mode::Light, false);
    assert_eq!(commands::resolve(&args, false).unwrap(), "dark [attribute]");

    let args = resolve_args(ModeSelection::Auto, ModeSelection::Dark, Mode::Light, true);
    assert_eq!(commands::resolve(&args, false).unwrap(), "light (auto) [system]");
}

#[test]
fn resolve_json() {
    let mut args = resolve_args(ModeSelection::Dark, ModeSelection::Light, Mode::Light, false);
    args.json = true;
    let json: serde_json::Value =
        serde_json::from_str(&commands::resolve(&args, false).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"mode": "dark", "auto": false, "cause": "user"})
    );
}

#[test]
fn table_covers_every_combination() {
    let rows = table_rows();
    assert_eq!(rows.len(), 36);
    for row in &rows {
        assert_eq!(
            resolve(row.user, row.attr, row.pref, row.dirty),
            ResolvedMode::new(row.mode, row.auto)
        );
    }
    let by_user = rows
        .iter()
        .filter(|r| r.cause == ResolutionCause::User)
        .count();
    assert_eq!(by_user, 24);
}

#[test]
fn table_text_has_header_and_rows() {
    let text = commands::table(&TableArgs { json: false }, false).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 37);
    assert!(lines[0].starts_with("user"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn styled_output_contains_ansi() {
    let text = commands::table(&TableArgs { json: false }, true).unwrap();
    assert!(text.contains('\u{1b}'));
}

#[test]
fn play_reports_events_and_final_state() {
    let file = scenario_file(
        "variant: dark-mode\n\
         mode: dark\n\
         preference: light\n\
         steps:\n  \
         - action: click\n  \
         - action: flush\n  \
         - action: prefer\n    mode: dark\n  \
         - action: set-mode\n    value: auto\n",
    );
    let args = PlayArgs {
        scenario: file.path().to_path_buf(),
        json: false,
    };
    let text = commands::play(&args, false).unwrap();
    assert_eq!(
        text,
        "darkmodechange light\n\
         darkmodechange dark (auto)\n\
         <dark-mode-toggle> dark (auto) [system]\n  \
         dirty:  true\n  \
         states: auto dark\n  \
         passes: 3\n"
    );
}

#[test]
fn play_json() {
    let file = scenario_file("variant: light-dark\nsteps:\n  - action: set-mode\n    value: BLUE\n");
    let args = PlayArgs {
        scenario: file.path().to_path_buf(),
        json: true,
    };
    let json: serde_json::Value =
        serde_json::from_str(&commands::play(&args, false).unwrap()).unwrap();
    assert_eq!(json["tag"], "light-dark-toggle");
    assert_eq!(json["final"]["mode"], "light");
    assert_eq!(json["final"]["auto"], true);
    assert_eq!(json["rejected"][0]["step"], 0);
    assert_eq!(json["events"], serde_json::json!([]));
}

#[test]
fn play_missing_file_fails_with_path() {
    let args = PlayArgs {
        scenario: "/nonexistent/scenario.yaml".into(),
        json: false,
    };
    let err = commands::play(&args, false).unwrap_err();
    assert!(format!("{err:#}").contains("scenario.yaml"));
}
