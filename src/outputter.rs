use std::io::Write;

use console::Style;
use flume::Receiver;

use crate::runner::Outcome;
use crate::runner::StepReport;

pub struct OutPutter;

impl OutPutter {
    /// Drains step reports off the channel and prints one line per step to
    /// stdout, echoing the JSON body in verbose mode, then closes with a
    /// banner. Runs until the runner drops its sender.
    pub async fn start(rx: Receiver<StepReport>, base_url: &str, n_steps: usize, verbose: bool) {
        let mut stdout = std::io::stdout();
        Self::start_with_writer(rx, &mut stdout, base_url, n_steps, verbose).await;
    }

    /// Same loop with the output sink injected, so tests can capture it.
    pub async fn start_with_writer<W: Write>(
        rx: Receiver<StepReport>,
        out: &mut W,
        base_url: &str,
        n_steps: usize,
        verbose: bool,
    ) {
        let style = Style::new().bold().cyan();
        let open_text = format!("Smoke testing {base_url}: {n_steps} steps to run...");
        let _ = writeln!(out, "{}", style.apply_to(open_text));

        let mut i = 1;
        let mut failed_step: Option<String> = None;
        while let Ok(report) = rx.recv_async().await {
            let StepReport {
                name,
                method,
                path,
                outcome,
            } = report;

            match outcome {
                Outcome::Pass { body } => {
                    let _ = writeln!(
                        out,
                        "[{i}/{n_steps}] {} {name}: {method} {path} {}",
                        console::style("✔").green().bold(),
                        console::style("PASS!").green().bold(),
                    );
                    if verbose {
                        let _ = writeln!(
                            out,
                            "{}",
                            serde_json::to_string_pretty(&body).unwrap_or_default()
                        );
                    }
                }
                Outcome::Fail { kind, raw_body } => {
                    let _ = writeln!(
                        out,
                        "[{i}/{n_steps}] {} {name}: {method} {path} {}",
                        console::style("✘").red().bold(),
                        console::style("FAIL!").red().bold(),
                    );
                    let _ = writeln!(out, "  {kind}");
                    if let Some(raw) = raw_body {
                        let _ = writeln!(
                            out,
                            "  {} {raw}",
                            console::style("Raw response body:").yellow().bold()
                        );
                    }
                    failed_step = Some(name);
                }
            }

            i += 1;
        }

        let _ = writeln!(out);
        match failed_step {
            None => {
                let _ = writeln!(
                    out,
                    "{}",
                    console::style(format!("All {n_steps} steps passed! 🎉"))
                        .bold()
                        .green()
                );
            }
            Some(name) => {
                let _ = writeln!(
                    out,
                    "{} {}",
                    console::style("Smoke test FAILED at step:").bold().red(),
                    console::style(name).bold()
                );
            }
        }
    }
}
