// SPDX-License-Identifier: MPL-2.0
//! Demo binary: replays a front-end's toast traffic against a live queue and
//! prints the rendered stack every time it changes.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use toastline::config::{self, Config, DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY};
use toastline::diagnostics::{BufferCapacity, DiagnosticsCollector};
use toastline::error::Result;
use toastline::i18n::fluent::I18n;
use toastline::notifications::{ColorMode, Kind, NewNotification, Toast, ToastQueue};
use toastline::paths;

const HELP: &str = "\
toastline - notification queue demo

USAGE:
  toastline [OPTIONS]

OPTIONS:
  --lang <id>            UI language (e.g. en-US, fr)
  --config-dir <dir>     Directory holding settings.toml
  --diagnostics <file>   Write the JSON diagnostics report on exit
  --no-color             Disable ANSI colors
  -h, --help             Print this help
";

struct Flags {
    lang: Option<String>,
    config_dir: Option<String>,
    diagnostics: Option<PathBuf>,
    no_color: bool,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        diagnostics: args.opt_value_from_os_str("--diagnostics", |s| {
            Ok::<_, std::convert::Infallible>(PathBuf::from(s))
        })?,
        no_color: args.contains("--no-color"),
    };

    let rest = args.finish();
    if let Some(unexpected) = rest.first() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected argument {:?}", unexpected),
        });
    }
    Ok(Some(flags))
}

/// One step of the replayed scenario, with strings already localized.
enum Step {
    Enqueue {
        after: Duration,
        payload: NewNotification,
    },
    /// Dismisses the notification created by the `step`-th enqueue.
    Dismiss { after: Duration, step: usize },
}

fn scenario(i18n: &I18n) -> Vec<Step> {
    let toast = |kind: Kind, title: &str, description: Option<&str>| {
        let payload = NewNotification::new(kind, i18n.tr(title));
        match description {
            Some(key) => payload.with_description(i18n.tr(key)),
            None => payload,
        }
    };
    let ms = Duration::from_millis;

    vec![
        // Simulated login round-trips take about a second.
        Step::Enqueue {
            after: ms(1000),
            payload: toast(
                Kind::Error,
                "demo-login-failed",
                Some("demo-login-failed-description"),
            ),
        },
        Step::Enqueue {
            after: ms(1000),
            payload: toast(
                Kind::Success,
                "demo-login-success",
                Some("demo-login-success-description"),
            ),
        },
        Step::Enqueue {
            after: ms(1500),
            payload: toast(
                Kind::Success,
                "demo-signup-success",
                Some("demo-signup-success-description"),
            ),
        },
        Step::Enqueue {
            after: ms(300),
            payload: toast(
                Kind::Info,
                "demo-upload-started",
                Some("demo-upload-started-description"),
            )
            .with_duration(ms(4000)),
        },
        Step::Enqueue {
            after: ms(200),
            payload: toast(
                Kind::Warning,
                "demo-upload-warning",
                Some("demo-upload-warning-description"),
            )
            .with_duration(ms(6000)),
        },
        // The user closes the warning by hand.
        Step::Dismiss {
            after: ms(700),
            step: 4,
        },
        Step::Enqueue {
            after: ms(400),
            payload: toast(
                Kind::Success,
                "demo-contact-sent",
                Some("demo-contact-sent-description"),
            ),
        },
        Step::Enqueue {
            after: ms(300),
            payload: toast(Kind::Success, "demo-shortlisted", None).with_duration(ms(1500)),
        },
        Step::Enqueue {
            after: ms(300),
            payload: toast(Kind::Info, "demo-message-sent", None),
        },
    ]
}

async fn play(queue: ToastQueue, steps: Vec<Step>) {
    let mut created = Vec::new();
    for step in steps {
        match step {
            Step::Enqueue { after, payload } => {
                tokio::time::sleep(after).await;
                created.push(queue.enqueue(payload));
            }
            Step::Dismiss { after, step } => {
                tokio::time::sleep(after).await;
                if let Some(id) = created.get(step) {
                    queue.remove(*id);
                }
            }
        }
    }
}

fn print_frame(started: Instant, stack: &str, i18n: &I18n) {
    let elapsed = started.elapsed().as_millis().to_string();
    println!(
        "── {} ──",
        i18n.tr_with_args("demo-frame", &[("elapsed", elapsed.as_str())])
    );
    if stack.is_empty() {
        println!("{}", i18n.tr("toast-stack-empty"));
    } else {
        println!("{stack}");
    }
    println!();
}

async fn run(flags: Flags) -> ExitCode {
    paths::init_cli_override(flags.config_dir.clone());
    let (config, config_warning) = config::load();
    let i18n = I18n::new(flags.lang.clone(), &config);

    match play_demo(&flags, &config, config_warning, &i18n).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}\n{err}", i18n.tr(err.i18n_key()));
            ExitCode::FAILURE
        }
    }
}

async fn play_demo(
    flags: &Flags,
    config: &Config,
    config_warning: Option<String>,
    i18n: &I18n,
) -> Result<()> {
    let mode = if flags.no_color || !std::io::stdout().is_terminal() {
        ColorMode::Plain
    } else {
        ColorMode::Ansi
    };

    let mut collector = DiagnosticsCollector::new(buffer_capacity(config));
    let queue = ToastQueue::from_config(&config.notifications, tokio::runtime::Handle::current())
        .with_diagnostics(collector.handle());
    let mut rx = queue.subscribe();

    println!("{}\n", i18n.tr("demo-title"));
    if let Some(key) = config_warning {
        queue.enqueue(NewNotification::warning(i18n.tr(&key)));
    }

    let started = Instant::now();
    let mut scenario = tokio::spawn(play(queue.clone(), scenario(i18n)));
    let mut scenario_done = false;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                print_frame(started, &Toast::render_stack(&snapshot, i18n, mode), i18n);
                if scenario_done && snapshot.is_empty() {
                    break;
                }
            }
            _ = &mut scenario, if !scenario_done => {
                scenario_done = true;
                if queue.is_empty() {
                    break;
                }
            }
        }
    }

    queue.shutdown();
    println!("{}", i18n.tr("demo-done"));

    if let Some(path) = &flags.diagnostics {
        collector.process_pending();
        collector.export_to_file(path)?;
        let shown = path.display().to_string();
        println!(
            "{}",
            i18n.tr_with_args("demo-diagnostics-written", &[("path", shown.as_str())])
        );
    }
    Ok(())
}

fn buffer_capacity(config: &Config) -> BufferCapacity {
    BufferCapacity::new(
        config
            .diagnostics
            .buffer_capacity
            .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    run(flags).await
}
