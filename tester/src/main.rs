use common::config::HarnessConfig;
use common::logger::init_logging;
use marker::output::OutputChannel;
use tester::plan::text_info_plan;
use tester::solution::text_info_sol;
use tester::submission::text_info;

fn main() {
    let config = HarnessConfig::init(".env");
    let _log_guard = init_logging(config);
    tracing::info!("Starting {}", config.project_name);

    let submission = text_info();
    let solution = text_info_sol();

    let mut out = OutputChannel::stdout();
    match text_info_plan(&submission, &solution).run(&mut out) {
        Ok(summary) => tracing::info!(
            passed = summary.passed,
            total = summary.total,
            "grading complete"
        ),
        Err(err) => {
            tracing::error!("grading run aborted: {err}");
            eprintln!("grading run aborted: {err}");
        }
    }
}
