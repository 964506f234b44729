use clap::Args;
use gradebook_core::SubjectPath;
use serde_json::json;

use super::{open_session, CliResult};

#[derive(Args)]
pub struct TargetArgs {
    semester: usize,
    subject: usize,
    /// Desired subject average (1 to 6)
    target: f64,
    /// Weight of the next assessment (default: grades.default_target_weight)
    #[arg(long)]
    weight: Option<f64>,
}

pub fn run(args: TargetArgs) -> CliResult {
    let (session, config) = open_session()?;
    let weight = args.weight.unwrap_or(config.grades.default_target_weight);

    let solved = session.solve_target(
        SubjectPath::new(args.semester, args.subject),
        args.target,
        weight,
    )?;
    let output = json!({
        "target": solved.target,
        "next_weight": solved.next_weight,
        "needed": solved.display_needed(),
        "outcome": solved.outcome,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
